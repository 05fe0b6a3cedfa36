//! Watch CLI command.

use clap::Parser;

use super::FilterArgs;

/// Mount a live listing and print every published snapshot until Ctrl-C.
#[derive(Debug, Parser)]
pub struct WatchCommand {
    #[command(flatten)]
    pub filter: FilterArgs,
}
