//! Silver Pizza CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! sp-cli migrate
//!
//! # Seed a development catalog (creates the staff user if needed)
//! sp-cli seed -u staff -p <password>
//!
//! # Grant or revoke catalog-management rights
//! sp-cli staff grant -u someone
//! sp-cli staff revoke -u someone
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(author, version, about = "Silver Pizza CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a starter catalog
    Seed {
        /// Username of the staff account that owns the seeded pizzas
        #[arg(short, long, default_value = "staff")]
        username: String,

        /// Password for the staff account, if it has to be created
        #[arg(short, long)]
        password: String,
    },
    /// Manage staff rights
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// Grant catalog-management rights to a user
    Grant {
        /// Username
        #[arg(short, long)]
        username: String,
    },
    /// Revoke catalog-management rights from a user
    Revoke {
        /// Username
        #[arg(short, long)]
        username: String,
    },
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
        Commands::Seed { username, password } => {
            commands::seed::run(&username, &password).await?;
        }
        Commands::Staff { action } => match action {
            StaffAction::Grant { username } => {
                commands::staff::set_staff(&username, true).await?;
            }
            StaffAction::Revoke { username } => {
                commands::staff::set_staff(&username, false).await?;
            }
        },
    }
    Ok(())
}
