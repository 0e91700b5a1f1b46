use clap::Args;
use tracing::debug;
use zdd_operations::config::ZddConfig;
use zdd_operations::operations::{DeployRequest, ZeroDowntimeDeploy};
use zdd_operations::planner::Strategy;
use zdd_operations::providers::CfCliControlPlane;

use super::GlobalOptions;
use crate::error::{CliError, Result};
use crate::output;

const DRY_RUN_FLAG: &str = "--dry-run";

#[derive(Args)]
pub(crate) struct PushZddArgs {
    /// Show the plan without renaming, deploying or deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Application to deploy, followed by flags passed through to the deploy command
    #[arg(
        value_name = "APP_NAME [DEPLOY_ARGS]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    invocation: Vec<String>,
}

pub(crate) fn run(args: PushZddArgs, options: &GlobalOptions) -> Result<()> {
    let Some(request) = DeployRequest::from_args(&args.invocation)? else {
        print!("{}", output::PUSH_ZDD_USAGE);
        return Ok(());
    };

    if request.pass_through_args().iter().any(|arg| arg == DRY_RUN_FLAG) {
        return Err(CliError::MisplacedDryRun);
    }

    let config = load_config(options)?;
    debug!(
        command = %config.control_plane().command(),
        "using control-plane client"
    );

    let operation = ZeroDowntimeDeploy::new(CfCliControlPlane::from_config(
        config.control_plane(),
    ))
    .with_rollback_failure_message(config.rollback().failure_message());

    let plan = operation.plan(&request)?;

    if plan.strategy() == Strategy::ZeroDowntime {
        println!("{}", output::existing_instance_found(plan.target_name()));
    }

    if args.dry_run {
        println!("{}", plan.describe());
        return Ok(());
    }

    operation.execute(&plan)?;

    println!("{}", output::DEPLOY_SUCCEEDED);

    for name in operation.list_instances()? {
        println!("{name}");
    }

    Ok(())
}

fn load_config(options: &GlobalOptions) -> Result<ZddConfig> {
    let config = match &options.config {
        Some(path) => ZddConfig::load(path)?,
        None => {
            let dir = std::env::current_dir().map_err(CliError::CurrentDir)?;
            ZddConfig::discover(&dir)?
        }
    };

    Ok(match &options.cf_command {
        Some(command) => config.with_command(command),
        None => config,
    })
}
