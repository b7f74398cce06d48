use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};

use authgate_cli::accounts;
use authgate_config::{PasswordConfig, ServerConfig};
use authgate_db::{PgPool, PgUserStore, init_db_pool, revert_last_migration, run_migrations};
use authgate_models::RegisterRequest;

#[derive(Parser)]
#[command(name = "authgate-cli")]
#[command(about = "Authgate CLI - Administrative tools for Authgate", long_about = None)]
struct Cli {
    /// Load environment variables from this file instead of `.env`
    #[arg(short = 'c', long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply or revert database migrations
    Migrate {
        #[command(subcommand)]
        direction: MigrateDirection,
    },
    /// Create a user account
    CreateUser {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address (optional)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name (optional)
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum MigrateDirection {
    /// Apply all pending migrations
    Up,
    /// Revert the most recently applied migration
    Down,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let server_config = ServerConfig::from_env()?;
    let pool = init_db_pool(&server_config).await?;

    match cli.command {
        Commands::Migrate { direction } => handle_migrate(&pool, direction).await,
        Commands::CreateUser {
            username,
            email,
            full_name,
            password,
        } => handle_create_user(pool, username, email, full_name, password).await,
    }
}

async fn handle_migrate(pool: &PgPool, direction: MigrateDirection) -> Result<()> {
    match direction {
        MigrateDirection::Up => {
            run_migrations(pool).await?;
            println!("✅ Migrations applied");
        }
        MigrateDirection::Down => match revert_last_migration(pool).await? {
            Some(version) => println!("✅ Reverted migration {}", version),
            None => println!("Nothing to revert"),
        },
    }

    Ok(())
}

async fn handle_create_user(
    pool: PgPool,
    username: Option<String>,
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };

    let email = match email {
        Some(email) => Some(email),
        None => optional_input("Email address (optional)")?,
    };

    let full_name = match full_name {
        Some(full_name) => Some(full_name),
        None => optional_input("Full name (optional)")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let password_config = PasswordConfig::from_env()?;
    let store = PgUserStore::new(pool);

    let request = RegisterRequest {
        username,
        password,
        email,
        full_name,
    };

    let user = accounts::create_user(&store, password_config.bcrypt_cost, request)
        .await
        .map_err(|e| e.error)?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Username: {}", user.username);
    if let Some(email) = &user.email {
        println!("   Email: {}", email);
    }

    Ok(())
}

fn optional_input(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))?;

    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}
