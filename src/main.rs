mod db;
mod entry;
mod extract;
mod fetch;
mod lookup;
mod server;

use clap::{Parser, Subcommand};
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(name = "sozluk", about = "Turkish-English dictionary lookup via Wiktionary")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and seed the source registry
    Init,
    /// Look up a word (cache first, then the configured sources)
    Lookup {
        word: String,
        /// Bypass the cache and re-fetch from the sources
        #[arg(long)]
        refresh: bool,
    },
    /// Serve lookups over HTTP
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// List the registered sources
    Sources,
    /// Show cache statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let seeded = db::seed_sources(&conn)?;
            println!("Database ready ({} new sources seeded).", seeded);
            Ok(())
        }
        Commands::Lookup { word, refresh } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            db::seed_sources(&conn)?;
            let conn = Mutex::new(conn);
            let client = reqwest::Client::new();

            match lookup::lookup(&conn, &client, &word, refresh).await? {
                lookup::LookupOutcome::Found { source, entry, cached } => {
                    println!("{}", serde_json::to_string_pretty(&entry)?);
                    eprintln!(
                        "-- {} via {}{}",
                        lookup::normalize(&word),
                        source,
                        if cached { " (cached)" } else { "" }
                    );
                }
                lookup::LookupOutcome::NotFound => {
                    println!("Not found: {}", lookup::normalize(&word));
                }
            }
            Ok(())
        }
        Commands::Serve { port } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            db::seed_sources(&conn)?;
            server::serve(conn, port).await
        }
        Commands::Sources => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            db::seed_sources(&conn)?;
            let sources = db::fetch_sources(&conn)?;
            println!(
                "{:>3} | {:<18} | {:<22} | {:<8} | {}",
                "#", "Identifier", "Name", "Language", "URL pattern"
            );
            println!("{}", "-".repeat(90));
            for (i, s) in sources.iter().enumerate() {
                println!(
                    "{:>3} | {:<18} | {:<22} | {:<8} | {}",
                    i + 1,
                    s.identifier,
                    s.name,
                    s.language,
                    s.url_pattern
                );
            }
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Sources:      {}", s.sources);
            println!("Cached words: {}", s.cached_words);
            Ok(())
        }
    }
}
