use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::ControlPlaneConfig;
use crate::error::ControlPlaneError;
use crate::traits::ControlPlane;

const RENAME_VERB: &str = "rename";
const DELETE_VERB: &str = "delete";
const LIST_VERB: &str = "apps";
const FORCE_FLAG: &str = "-f";

const HEADER_COLUMN: &str = "name";
const NO_APPS_FOUND: &str = "No apps found";

/// Drives the control plane through its command-line client.
///
/// Mutating calls inherit the terminal so the client's own progress output
/// stays visible; listing captures stdout for parsing.
pub struct CfCliControlPlane {
    program: String,
    base_args: Vec<String>,
}

impl CfCliControlPlane {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ControlPlaneConfig) -> Self {
        Self {
            program: config.command().to_string(),
            base_args: config.args().to_vec(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.base_args).args(args);
        command
    }

    fn describe(&self, args: &[&str]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.base_args.iter().map(String::as_str))
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn run(&self, args: &[&str]) -> Result<(), ControlPlaneError> {
        let description = self.describe(args);
        debug!(command = %description, "running control-plane command");

        let status = self
            .command(args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| ControlPlaneError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ControlPlaneError::CommandFailed {
                command: description,
                code: status.code(),
            })
        }
    }

    fn capture(&self, args: &[&str]) -> Result<String, ControlPlaneError> {
        let description = self.describe(args);
        debug!(command = %description, "capturing control-plane output");

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ControlPlaneError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ControlPlaneError::CommandFailed {
                command: description,
                code: output.status.code(),
            });
        }

        String::from_utf8(output.stdout).map_err(|source| ControlPlaneError::InvalidOutput {
            command: description,
            source,
        })
    }
}

impl ControlPlane for CfCliControlPlane {
    fn rename(&self, old_name: &str, new_name: &str) -> Result<(), ControlPlaneError> {
        self.run(&[RENAME_VERB, old_name, new_name])
    }

    fn deploy(&self, args: &[String]) -> Result<(), ControlPlaneError> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run(&args)
    }

    fn delete(&self, name: &str) -> Result<(), ControlPlaneError> {
        self.run(&[DELETE_VERB, name, FORCE_FLAG])
    }

    fn list_names(&self) -> Result<Vec<String>, ControlPlaneError> {
        let output = self.capture(&[LIST_VERB])?;
        let names = parse_app_names(&output);
        debug!(count = names.len(), "listed deployed instances");
        Ok(names)
    }
}

/// Extract instance names from the client's `apps` listing.
///
/// Names are the first column of the rows following the table header (the
/// line whose first column is `name`). Without a header, output containing
/// the client's status lines (an empty space) has no names; anything else is
/// treated as one name per line.
#[must_use]
pub fn parse_app_names(output: &str) -> Vec<String> {
    let lines: Vec<&str> = output.lines().map(str::trim).collect();

    let rows = match lines
        .iter()
        .position(|line| line.split_whitespace().next() == Some(HEADER_COLUMN))
    {
        Some(header) => &lines[header + 1..],
        None if lines.iter().any(|line| is_status_line(line)) => return Vec::new(),
        None => &lines[..],
    };

    rows.iter()
        .filter_map(|line| line.split_whitespace().next())
        .map(ToString::to_string)
        .collect()
}

fn is_status_line(line: &str) -> bool {
    line == "OK" || line.starts_with("Getting apps") || line.starts_with(NO_APPS_FOUND)
}
