use std::marker::PhantomData;

use tracing::{debug, warn};
use zdd_saga::SagaStep;

use super::context::DeployContext;
use crate::error::ControlPlaneError;
use crate::traits::ControlPlane;

pub const RENAME_LIVE_STEP: &str = "rename_live_instance";
pub const DEPLOY_STEP: &str = "deploy";
pub const DELETE_VENERABLE_STEP: &str = "delete_venerable_instance";

/// Moves the live instance out of the way under its venerable name.
pub struct RenameLiveInstanceStep<C> {
    target_name: String,
    venerable_name: String,
    _marker: PhantomData<C>,
}

impl<C> RenameLiveInstanceStep<C> {
    #[must_use]
    pub fn new(target_name: impl Into<String>, venerable_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            venerable_name: venerable_name.into(),
            _marker: PhantomData,
        }
    }
}

impl<C> SagaStep for RenameLiveInstanceStep<C>
where
    C: ControlPlane,
{
    type Context = DeployContext<C>;
    type Error = ControlPlaneError;

    fn name(&self) -> &'static str {
        RENAME_LIVE_STEP
    }

    fn execute(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        debug!(
            from = %self.target_name,
            to = %self.venerable_name,
            "renaming live instance"
        );
        ctx.control_plane()
            .rename(&self.target_name, &self.venerable_name)
    }
}

/// Deploys the new instance under the target name.
///
/// When a live instance was renamed beforehand, the step carries the
/// compensation that restores it: whatever landed under the target name is
/// deleted and the venerable instance gets its name back.
pub struct DeployStep<C> {
    deploy_args: Vec<String>,
    restore: Option<Restore>,
    _marker: PhantomData<C>,
}

struct Restore {
    target_name: String,
    venerable_name: String,
}

impl<C> DeployStep<C> {
    /// A deploy with nothing to undo on failure.
    #[must_use]
    pub fn fresh(deploy_args: Vec<String>) -> Self {
        Self {
            deploy_args,
            restore: None,
            _marker: PhantomData,
        }
    }

    /// A deploy that restores the renamed live instance on failure.
    #[must_use]
    pub fn replacing(
        deploy_args: Vec<String>,
        target_name: impl Into<String>,
        venerable_name: impl Into<String>,
    ) -> Self {
        Self {
            deploy_args,
            restore: Some(Restore {
                target_name: target_name.into(),
                venerable_name: venerable_name.into(),
            }),
            _marker: PhantomData,
        }
    }
}

impl<C> SagaStep for DeployStep<C>
where
    C: ControlPlane,
{
    type Context = DeployContext<C>;
    type Error = ControlPlaneError;

    fn name(&self) -> &'static str {
        DEPLOY_STEP
    }

    fn execute(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        debug!(args = ?self.deploy_args, "deploying new instance");
        ctx.control_plane().deploy(&self.deploy_args)
    }

    fn has_compensation(&self) -> bool {
        self.restore.is_some()
    }

    fn compensate_previous(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let Some(restore) = &self.restore else {
            return Ok(());
        };

        warn!(
            target_name = %restore.target_name,
            venerable = %restore.venerable_name,
            "deploy failed, restoring previous instance"
        );

        // Both calls are always attempted; the first failure is returned.
        let deleted = ctx.control_plane().delete(&restore.target_name);
        if let Err(e) = &deleted {
            warn!(error = %e, name = %restore.target_name, "failed to delete partial deployment");
        }

        let renamed = ctx
            .control_plane()
            .rename(&restore.venerable_name, &restore.target_name);
        if let Err(e) = &renamed {
            warn!(
                error = %e,
                from = %restore.venerable_name,
                to = %restore.target_name,
                "failed to restore previous instance name"
            );
        }

        deleted.and(renamed)
    }

    fn compensation_description(&self) -> String {
        match &self.restore {
            Some(restore) => format!(
                "delete '{}' and rename '{}' back to '{}'",
                restore.target_name, restore.venerable_name, restore.target_name
            ),
            None => "nothing to restore".to_string(),
        }
    }
}

/// Removes the venerable instance once the new one is live.
pub struct DeleteVenerableStep<C> {
    venerable_name: String,
    _marker: PhantomData<C>,
}

impl<C> DeleteVenerableStep<C> {
    #[must_use]
    pub fn new(venerable_name: impl Into<String>) -> Self {
        Self {
            venerable_name: venerable_name.into(),
            _marker: PhantomData,
        }
    }
}

impl<C> SagaStep for DeleteVenerableStep<C>
where
    C: ControlPlane,
{
    type Context = DeployContext<C>;
    type Error = ControlPlaneError;

    fn name(&self) -> &'static str {
        DELETE_VENERABLE_STEP
    }

    fn execute(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        debug!(name = %self.venerable_name, "deleting venerable instance");
        ctx.control_plane().delete(&self.venerable_name)
    }
}
