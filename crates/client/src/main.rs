//! catalog-client CLI entry point.

use std::sync::Arc;

use catalog_client::cli::books::BooksAction;
use catalog_client::cli::genres::GenresAction;
use catalog_client::cli::{Cli, Commands, OutputFormat};
use catalog_client::output::{format_json, pretty};
use catalog_client::view::ViewOptions;
use catalog_client::{Catalog, CatalogView, Config, GenreCache};
use catalog_core::catalog::{CatalogSnapshot, FilterState};
use clap::Parser;
use dialoguer::Confirm;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::new(&cli.base_url)?
        .with_ws_url(cli.ws_url.clone())
        .with_token(cli.token.clone())
        .with_fallback_label(cli.fallback_label.clone());
    let api = Arc::new(config.client());

    match cli.command {
        Commands::Books(books_cmd) => match books_cmd.action {
            BooksAction::List { filter } => {
                let genres = GenreCache::with_fallback(api.clone(), config.fallback_label.clone());
                let catalog = Catalog::new(api, genres);
                catalog.set_filter(FilterState::from(filter)).await?;
                print_snapshot(&catalog.current(), cli.format)?;
            }
            BooksAction::Delete { id, yes } => {
                if !yes
                    && !Confirm::new()
                        .with_prompt(format!("Delete book {}?", id))
                        .default(false)
                        .interact()?
                {
                    if !cli.quiet {
                        println!("Cancelled.");
                    }
                    return Ok(());
                }
                api.delete_book(id).await?;
                if !cli.quiet {
                    println!("Deleted book {}", id);
                }
            }
        },
        Commands::Genres(genres_cmd) => match genres_cmd.action {
            GenresAction::Get { id } => {
                let genre = api.get_genre(id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_json(&genre)?),
                    OutputFormat::Pretty => println!("{}", pretty::format_genre(&genre)),
                }
            }
        },
        Commands::Watch(watch_cmd) => {
            let options = ViewOptions::new(config.ws_url.clone())
                .with_filter(FilterState::from(watch_cmd.filter))
                .with_fallback_label(config.fallback_label.clone());

            let mut view = CatalogView::mount(api, options).await;
            let mut snapshots = view.subscribe();

            if !cli.quiet {
                eprintln!("Watching catalog, press Ctrl-C to stop...");
            }
            let current = snapshots.borrow_and_update().clone();
            if !current.is_initial() {
                print_snapshot(&current, cli.format)?;
            }

            loop {
                tokio::select! {
                    _ = signal::ctrl_c() => {
                        tracing::info!("Received Ctrl+C, closing view");
                        break;
                    }
                    changed = snapshots.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = snapshots.borrow_and_update().clone();
                        print_snapshot(&snapshot, cli.format)?;
                    }
                }
            }

            view.teardown().await;
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &CatalogSnapshot, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(snapshot)?),
        OutputFormat::Pretty => println!("{}", pretty::format_snapshot(snapshot)),
    }
    Ok(())
}
