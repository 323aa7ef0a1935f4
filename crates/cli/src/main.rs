//! FitPass CLI - Database migrations and catalog inspection.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! fitpass-cli migrate
//!
//! # Print the seeded gym catalog as JSON
//! fitpass-cli catalog gyms
//!
//! # Print the seeded product catalog as JSON
//! fitpass-cli catalog products
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `catalog` - Inspect the seeded catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fitpass-cli")]
#[command(author, version, about = "FitPass CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect the seeded catalog
    Catalog {
        #[command(subcommand)]
        target: CatalogTarget,
    },
}

#[derive(Subcommand)]
enum CatalogTarget {
    /// Print all gyms as JSON
    Gyms,
    /// Print all products as JSON
    Products,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Catalog { target } => match target {
            CatalogTarget::Gyms => commands::catalog::gyms()?,
            CatalogTarget::Products => commands::catalog::products()?,
        },
    }
    Ok(())
}
