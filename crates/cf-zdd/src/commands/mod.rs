mod push_zdd;

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::Result;

/// Options shared by every subcommand.
pub(crate) struct GlobalOptions {
    pub(crate) config: Option<PathBuf>,
    pub(crate) cf_command: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Perform a zero-downtime push of an application over the top of an old one
    PushZdd(push_zdd::PushZddArgs),
}

impl Commands {
    pub(crate) fn execute(self, options: &GlobalOptions) -> Result<()> {
        match self {
            Self::PushZdd(args) => push_zdd::run(args, options),
        }
    }
}
