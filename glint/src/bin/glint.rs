//! Glint CLI - query an icon catalog from a terminal.
//!
//! Stands in for the launcher shell during development:
//!
//!     glint query brands github
//!     glint --format svg --color tomato query star
//!     glint activate 'glint:html:#7dcfff:solid:star'
//!
//! Without `--catalog` (or `GLINT_CATALOG`) the bundled demo catalog is used.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glint::{IconSearchApi, IconSearcher, Preferences};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "glint", version, about = "Search Font Awesome style icon catalogs")]
struct Cli {
    /// Catalog source file (JSON). Defaults to the bundled demo catalog.
    #[arg(long, env = "GLINT_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Output format: html, class, unicode or svg
    #[arg(long, default_value = "html", global = true)]
    format: String,

    /// Icon color for previews and SVG output (any CSS color)
    #[arg(long, default_value = "#7dcfff", global = true)]
    color: String,

    /// Maximum number of results
    #[arg(long, default_value_t = 10, global = true)]
    limit: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank icons for a query (empty query lists the catalog)
    Query {
        /// Query words
        words: Vec<String>,

        /// Print the clipboard payload of the top result instead of the list
        #[arg(long)]
        copy: bool,
    },
    /// Print the clipboard payload for an action token from `query`
    Activate { action: String },
}

impl Cli {
    fn preferences(&self) -> Preferences {
        Preferences {
            output_format: self.format.clone(),
            preview_color: self.color.clone(),
            max_results: Some(self.limit),
            ..Preferences::default()
        }
    }

    fn searcher(&self) -> Result<IconSearcher> {
        let searcher = match &self.catalog {
            Some(path) => IconSearcher::new(path.to_string_lossy().into_owned())
                .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            None => IconSearcher::from_json(demo_catalog::CATALOG_JSON.to_string())
                .context("Failed to load demo catalog")?,
        };
        Ok(searcher)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let searcher = cli.searcher()?;

    match &cli.command {
        Commands::Query { words, copy } => {
            let response = searcher.on_query(words.join(" "), cli.preferences());

            if *copy {
                let action = response
                    .rows
                    .first()
                    .and_then(|row| row.action.clone())
                    .context("No matching icons found")?;
                println!("{}", searcher.activate(action)?);
                return Ok(());
            }

            for row in &response.rows {
                println!("{:<24} {}", row.title, row.subtitle);
                if let Some(action) = &row.action {
                    println!("{:<24} {}", "", action);
                }
            }
            eprintln!("{} match(es), catalog of {}", response.total_matches, searcher.catalog_size());
        }
        Commands::Activate { action } => {
            println!("{}", searcher.activate(action.clone())?);
        }
    }

    Ok(())
}
