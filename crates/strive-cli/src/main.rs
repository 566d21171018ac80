use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use strive_core::{AccountService, AuthConfig, Registration, TokenService};
use strive_db::{Database, DatabaseConfig, UserRepository};

#[derive(Parser)]
#[command(name = "strive", version, about = "Goals, to-dos and habits: operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Register a user account
    CreateUser {
        #[arg(short, long)]
        username: String,

        /// Password (reads from STRIVE_USER_PASSWORD env var if not provided)
        #[arg(short, long, env = "STRIVE_USER_PASSWORD")]
        password: String,

        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// Mint an access/refresh token pair for an existing user
    Token {
        #[arg(short, long)]
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("strive=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = connect_db().await?;

    match cli.command {
        Commands::Migrate => {
            db.migrate().await.context("Failed to run migrations")?;
            println!("Migrations applied.");
        }
        Commands::CreateUser {
            username,
            password,
            email,
        } => {
            db.migrate().await.context("Failed to run migrations")?;
            let user = accounts(&db)?
                .register(Registration {
                    username,
                    password,
                    email,
                })
                .await?;
            println!("Created user '{}' (id {})", user.username, user.id);
        }
        Commands::Token { username } => {
            let pair = accounts(&db)?.issue_for(&username).await?;
            let json = serde_json::json!({
                "access": pair.access,
                "refresh": pair.refresh,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

/// Connect to PostgreSQL using DATABASE_URL.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env().context("DATABASE_URL not set")?;
    Database::connect(&config)
        .await
        .context("Failed to connect to database")
}

fn accounts(db: &Database) -> Result<AccountService<UserRepository>> {
    let auth = AuthConfig::from_env()?;
    Ok(AccountService::new(db.user_repo(), TokenService::new(&auth)))
}
