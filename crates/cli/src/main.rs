//! `civicconnect` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — run migrations, ensure the default admin, start the API server.
//! - `migrate` — run pending database migrations.
//! - `seed`    — create the default admin and demo official accounts.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;
use auth::password::hash_password;
use auth::TokenKeys;
use db::repository::users as user_repo;
use db::DbPool;
use lifecycle::{ReportLifecycle, UserRole};
use services::{LogNotifier, StubImageValidator};

const DEFAULT_DATABASE_URL: &str = "sqlite://civic.sqlite";

#[derive(Parser)]
#[command(
    name = "civicconnect",
    about = "Municipal issue-reporting backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
    /// Run pending database migrations.
    Migrate {
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
    /// Create the default admin and demo official accounts.
    Seed {
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
}

/// Create a user with the given credentials unless the email is taken.
async fn ensure_user(
    pool: &DbPool,
    email: &str,
    password: &str,
    phone: Option<&str>,
    role: UserRole,
) {
    let existing = user_repo::find_by_email(pool, email)
        .await
        .expect("failed to query users");
    if existing.is_some() {
        info!("User {email} already exists");
        return;
    }

    let hash = hash_password(password).expect("failed to hash password");
    user_repo::create_user(pool, Some(email), phone, Some(&hash), role.as_str(), "LOCAL")
        .await
        .expect("failed to create user");
    info!("Created {} user: {email}", role.as_str());
}

async fn ensure_default_admin(pool: &DbPool) {
    ensure_user(pool, "admin@civic.com", "admin123", None, UserRole::Admin).await;
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, database_url } => {
            info!("Starting API server on {bind}");
            let pool = db::pool::create_pool(&database_url, 10)
                .await
                .expect("failed to connect to database");
            db::pool::run_migrations(&pool)
                .await
                .expect("migration failed");
            ensure_default_admin(&pool).await;

            let lifecycle = Arc::new(ReportLifecycle::new(
                pool.clone(),
                Arc::new(StubImageValidator),
                Arc::new(LogNotifier),
            ));
            let state = AppState::new(pool, lifecycle, TokenKeys::from_env());

            api::serve(&bind, state).await.expect("server error");
        }
        Command::Migrate { database_url } => {
            info!("Running migrations against {database_url}");
            let pool = db::pool::create_pool(&database_url, 2)
                .await
                .expect("failed to connect to database");
            db::pool::run_migrations(&pool)
                .await
                .expect("migration failed");
            info!("Migrations applied successfully");
        }
        Command::Seed { database_url } => {
            let pool = db::pool::create_pool(&database_url, 2)
                .await
                .expect("failed to connect to database");
            db::pool::run_migrations(&pool)
                .await
                .expect("migration failed");

            ensure_default_admin(&pool).await;
            ensure_user(
                &pool,
                "official@civic.com",
                "official123",
                Some("+919876543210"),
                UserRole::Official,
            )
            .await;
        }
    }
}
