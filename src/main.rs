use clap::{Parser, Subcommand};
use configuration::settings::Settings;
use core_types::PositionRecord;
use database::{DbRepository, SCHEMA_SQL};

/// The main entry point for the geotrack service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    configuration::init_tracing()?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            let mut settings = configuration::load_settings()?;
            if let Some(bind) = args.bind {
                settings.bind_address = bind;
            }
            web_server::run_server(&settings).await?;
        }
        Commands::DbInfo => {
            let settings = configuration::load_settings()?;
            handle_db_info(&settings).await?;
        }
        Commands::Schema => print!("{}", SCHEMA_SQL),
        Commands::Sample => println!("{}", serde_json::to_string_pretty(&PositionRecord::sample())?),
    }
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Records and serves geographic positions backed by PostgreSQL/PostGIS.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Check the store: print its version and the (redacted) connection target.
    DbInfo,
    /// Print the reference DDL for the two tables.
    Schema,
    /// Print the hardcoded sample record served by /api/coordinates/sara.
    Sample,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on (e.g., "127.0.0.1:8000"). Overrides BIND_ADDRESS.
    #[arg(long)]
    bind: Option<String>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_db_info(settings: &Settings) -> anyhow::Result<()> {
    let db_settings = settings.database()?;
    let repo = DbRepository::new(database::connect(&db_settings)?);

    let version = repo.server_version().await?;
    let identity = repo.current_database().await?;

    println!("connection: {}", db_settings.redacted_url());
    println!("database:   {}", identity.database);
    println!("schema:     {}", identity.schema.as_deref().unwrap_or("-"));
    println!("version:    {}", version);

    repo.pool().close().await;
    Ok(())
}
