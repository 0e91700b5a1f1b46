mod cf_cli;

pub use cf_cli::{CfCliControlPlane, parse_app_names};
