//! StadiumHQ CLI - London stadiums from Wikipedia
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, rendering records and handling top-level errors.

use clap::{Parser, Subcommand};
use colored::Colorize;
use stadiumhq::{Catalogue, Config, StaticMap, SubjectSummary, WikiClient};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stadiumhq")]
#[command(author, version, about = "London football stadiums from Wikipedia", long_about = None)]
struct Cli {
    /// Config file to use instead of stadiumhq.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every stadium in the catalogue
    List,
    /// Show one subject in full
    Details {
        /// Wikipedia title, e.g. "Wembley Stadium"
        title: String,
    },
    /// Show catalogue stadiums whose name contains the query
    Search {
        /// Search query; omit to show everything
        #[arg(default_value = "")]
        query: String,
    },
    /// Print a static map image URL for a subject
    Map {
        /// Wikipedia title
        title: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let client = WikiClient::new(&config.wikipedia)?;
    let catalogue = Catalogue::from(&config.stadiums);
    let maps = StaticMap::new(&config.maps);

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {
            let stadiums = client.get_summaries(catalogue.titles()).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stadiums)?);
            } else {
                println!("{}\n", "Stadiums in London".bold());
                for stadium in &stadiums {
                    print_card(stadium);
                }
            }
        }
        Commands::Details { title } => {
            let stadium = client.get_summary(&title).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stadium)?);
            } else {
                print_details(&stadium, maps.url_for(&stadium));
            }
        }
        Commands::Search { query } => {
            let titles = catalogue.search(&query);
            let results = client.get_summaries(&titles).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No stadiums found for: {}", query);
            } else {
                println!("Search results for '{}':\n", query);
                for stadium in &results {
                    print_card(stadium);
                }
            }
        }
        Commands::Map { title } => {
            if !maps.has_key() {
                anyhow::bail!(
                    "no static map API key configured; set {} or [maps] api_key",
                    stadiumhq::config::MAPS_API_KEY_VAR
                );
            }
            let stadium = client.get_summary(&title).await;
            match maps.url_for(&stadium) {
                Some(url) => println!("{}", url),
                None => println!("No coordinates known for: {}", stadium.title),
            }
        }
    }

    Ok(())
}

/// Short listing used by `list` and `search`
fn print_card(stadium: &SubjectSummary) {
    println!("🏟️  {}", stadium.title.bold());
    if let Some(description) = &stadium.description {
        println!("   {}", description.italic());
    }
    if !stadium.url.is_empty() {
        println!("   {}", stadium.url.blue());
    }
    println!("   {}\n", first_sentence(&stadium.extract));
}

fn print_details(stadium: &SubjectSummary, map_url: Option<String>) {
    println!("=== {} ===\n", stadium.title.bold());
    if let Some(description) = &stadium.description {
        println!("{}\n", description.italic());
    }
    println!("{}\n", stadium.extract);

    if let Some(coords) = stadium.coordinates {
        println!("📍 {:.4}, {:.4}", coords.lat, coords.lon);
    }
    if let Some(lang) = &stadium.lang {
        println!("🌐 Language: {}", lang);
    }
    if !stadium.url.is_empty() {
        println!("🔗 {}", stadium.url.blue());
    }
    if !stadium.original_image.is_empty() {
        println!("🖼️  {}", stadium.original_image);
    } else if !stadium.image.is_empty() {
        println!("🖼️  {}", stadium.image);
    }
    if let Some(url) = map_url {
        println!("🗺️  {}", url);
    }
}

/// First sentence of an extract, for the short listing
fn first_sentence(text: &str) -> &str {
    match text.find(". ") {
        Some(idx) => &text[..=idx],
        None => text,
    }
}
