use crate::error::ControlPlaneError;

/// The remote service managing instance lifecycle.
///
/// Every call blocks until the control plane reports success or failure.
pub trait ControlPlane: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the instance cannot be renamed.
    fn rename(&self, old_name: &str, new_name: &str) -> Result<(), ControlPlaneError>;

    /// Deploy with the given argument list, which starts with the deploy verb.
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment fails.
    fn deploy(&self, args: &[String]) -> Result<(), ControlPlaneError>;

    /// # Errors
    ///
    /// Returns an error if the instance cannot be deleted.
    fn delete(&self, name: &str) -> Result<(), ControlPlaneError>;

    /// Names of the currently deployed instances, in control-plane order.
    ///
    /// # Errors
    ///
    /// Returns an error if the instances cannot be listed.
    fn list_names(&self) -> Result<Vec<String>, ControlPlaneError>;
}
