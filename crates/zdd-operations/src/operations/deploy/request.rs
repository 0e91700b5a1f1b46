use crate::Result;
use crate::error::OperationError;
use crate::planner::DEPLOY_VERB;

/// A parsed zero-downtime deploy invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    target_name: String,
    deploy_args: Vec<String>,
}

impl DeployRequest {
    /// Build a request from the target name and the pass-through flags.
    ///
    /// The resulting deploy argument list is `[DEPLOY_VERB, target, flags...]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target name is empty.
    pub fn new(target_name: impl Into<String>, flags: &[String]) -> Result<Self> {
        let target_name = target_name.into();
        if target_name.trim().is_empty() {
            return Err(OperationError::EmptyTargetName);
        }

        let mut deploy_args = Vec::with_capacity(flags.len() + 2);
        deploy_args.push(DEPLOY_VERB.to_string());
        deploy_args.push(target_name.clone());
        deploy_args.extend(flags.iter().cloned());

        Ok(Self {
            target_name,
            deploy_args,
        })
    }

    /// Parse the raw arguments following the subcommand: `[target, flags...]`.
    ///
    /// Returns `Ok(None)` for a bare invocation without a target. Flags are
    /// kept verbatim, including ones that look like options of this tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the target name is empty.
    pub fn from_args(args: &[String]) -> Result<Option<Self>> {
        match args {
            [target_name, flags @ ..] => Self::new(target_name.clone(), flags).map(Some),
            [] => Ok(None),
        }
    }

    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    #[must_use]
    pub fn deploy_args(&self) -> &[String] {
        &self.deploy_args
    }

    /// The flags given after the target name.
    #[must_use]
    pub fn pass_through_args(&self) -> &[String] {
        &self.deploy_args[2..]
    }
}
