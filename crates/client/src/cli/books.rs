//! Book CLI commands.

use clap::{Parser, Subcommand};

use super::FilterArgs;

/// Book commands.
#[derive(Debug, Parser)]
pub struct BooksCommand {
    #[command(subcommand)]
    pub action: BooksAction,
}

/// Available book actions.
#[derive(Debug, Subcommand)]
pub enum BooksAction {
    /// List books with their genre names.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Delete a book.
    Delete {
        /// Book ID.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}
