//! CLI command definitions.

pub mod books;
pub mod genres;
pub mod watch;

use clap::{Args, Parser, Subcommand, ValueEnum};

use catalog_core::catalog::{FilterState, Ordering};

/// Live book catalog client.
#[derive(Debug, Parser)]
#[command(name = "catalog-client")]
#[command(about = "Live book catalog client", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "CATALOG_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Live channel URL (derived from the base URL if omitted).
    #[arg(long, env = "CATALOG_WS_URL")]
    pub ws_url: Option<String>,

    /// Bearer token for API requests.
    #[arg(long, env = "CATALOG_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Label shown for genres that cannot be resolved.
    #[arg(long, env = "CATALOG_FALLBACK_LABEL", default_value = "Unknown")]
    pub fallback_label: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Book listing and deletion.
    Books(books::BooksCommand),
    /// Genre lookups.
    Genres(genres::GenresCommand),
    /// Keep a live listing open and print every update.
    Watch(watch::WatchCommand),
}

/// Listing filter flags shared by several commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only books of this genre ID.
    #[arg(long)]
    pub genre: Option<i64>,
    /// Search in title or author.
    #[arg(long)]
    pub search: Option<String>,
    /// Sort order: title, -title, id, -id.
    #[arg(long, allow_hyphen_values = true)]
    pub ordering: Option<Ordering>,
}

impl From<FilterArgs> for FilterState {
    fn from(args: FilterArgs) -> Self {
        FilterState {
            genre: args.genre,
            search: args.search,
            ordering: args.ordering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_descending_ordering() {
        let cli = Cli::try_parse_from([
            "catalog-client",
            "books",
            "list",
            "--genre",
            "3",
            "--ordering",
            "-title",
        ])
        .unwrap();

        let Commands::Books(books::BooksCommand {
            action: books::BooksAction::List { filter },
        }) = cli.command
        else {
            panic!("expected books list");
        };

        assert_eq!(
            FilterState::from(filter),
            FilterState::new()
                .with_genre(3)
                .with_ordering(Ordering::TitleDesc)
        );
    }

    #[test]
    fn test_invalid_ordering_is_rejected() {
        let result =
            Cli::try_parse_from(["catalog-client", "books", "list", "--ordering", "name"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
