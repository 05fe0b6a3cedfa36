//! Genre CLI commands.

use clap::{Parser, Subcommand};

/// Genre commands.
#[derive(Debug, Parser)]
pub struct GenresCommand {
    #[command(subcommand)]
    pub action: GenresAction,
}

/// Available genre actions.
#[derive(Debug, Subcommand)]
pub enum GenresAction {
    /// Look up a genre by ID.
    Get {
        /// Genre ID.
        id: i64,
    },
}
