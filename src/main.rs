use clap::{Parser, Subcommand};
use std::sync::Arc;
use tome_core::config::Config;
use tome_core::search::SearchExecutor;
use tome_engine::HttpEngine;
use tome_index::{HttpStore, Indexer};

#[derive(Parser)]
#[command(name = "tome", about = "tome — book indexing and search pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and index a book's PDF into the search engine.
    Index {
        /// Catalog book id.
        #[arg(long)]
        book_id: i64,
        /// Genre name; omitted means none.
        #[arg(long)]
        genre: Option<String>,
        /// Storage reference of the uploaded PDF.
        #[arg(long)]
        pdf: String,
    },
    /// Delete a book's search document (no-op when absent).
    Delete {
        #[arg(long)]
        book_id: i64,
    },
    /// Search the index and print matching book ids, best first.
    Search {
        /// Use semantic (expanded, any-term) matching instead of context.
        #[arg(long)]
        semantic: bool,
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    tracing::debug!(index = %config.engine.index, "configuration loaded");
    let engine = Arc::new(HttpEngine::new(&config.engine));

    match cli.command {
        Command::Index { book_id, genre, pdf } => {
            let store = Arc::new(HttpStore::new(&config.storage));
            let (indexer, dispatcher) = Indexer::spawn(engine, store, &config.indexing);
            indexer.book_created(book_id, genre, Some(&pdf)).await;
            drop(indexer);
            dispatcher.await?;
        }
        Command::Delete { book_id } => {
            let store = Arc::new(HttpStore::new(&config.storage));
            let (indexer, dispatcher) = Indexer::spawn(engine, store, &config.indexing);
            indexer.delete_book(book_id).await?;
            drop(indexer);
            dispatcher.await?;
        }
        Command::Search { semantic, query } => {
            let executor = SearchExecutor::new(engine, config.search.clone());
            let ids = if semantic {
                executor.semantic_search(&query).await?
            } else {
                executor.context_search(&query).await?
            };
            for id in ids {
                println!("{id}");
            }
        }
    }

    Ok(())
}
