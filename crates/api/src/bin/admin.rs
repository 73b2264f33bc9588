//! Management commands for the Green Homes backend.
//!
//! ```text
//! greenhomes-admin migrate
//! greenhomes-admin create-superuser --email a@b.c --full-name "Site Owner" --password '...'
//! greenhomes-admin seed-settings
//! greenhomes-admin cleanup-sessions
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use greenhomes_api::auth::password::{hash_password, validate_password_strength};
use greenhomes_core::roles::ROLE_SUPER_ADMIN;
use greenhomes_core::validation::validate_email;
use greenhomes_db::models::admin_user::CreateAdminUser;
use greenhomes_db::repositories::{
    AdminUserRepo, ContactSettingsRepo, HomePageRepo, PageHeroImagesRepo, SessionRepo,
    SystemStatusRepo,
};
use greenhomes_db::DbPool;

#[derive(Parser, Debug)]
#[command(name = "greenhomes-admin")]
#[command(about = "Green Homes backend management commands", long_about = None)]
struct Cli {
    /// Database connection string (falls back to `DATABASE_URL`).
    #[arg(long, value_name = "DATABASE")]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Create a Super Admin account.
    CreateSuperuser {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "NAME")]
        full_name: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create the singleton settings rows if they are missing.
    SeedSettings,
    /// Delete expired and revoked refresh sessions.
    CleanupSessions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenhomes_admin=info,greenhomes_db=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let database_url = match cli.database {
        Some(url) => url,
        None => std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
    };
    let pool = greenhomes_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Command::Migrate => {
            greenhomes_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Migrations applied");
        }
        Command::CreateSuperuser {
            email,
            full_name,
            password,
        } => create_superuser(&pool, &email, &full_name, &password).await?,
        Command::SeedSettings => {
            HomePageRepo::ensure(&pool).await?;
            ContactSettingsRepo::ensure(&pool).await?;
            SystemStatusRepo::ensure(&pool).await?;
            PageHeroImagesRepo::ensure(&pool).await?;
            tracing::info!("Settings rows present");
        }
        Command::CleanupSessions => {
            let removed = SessionRepo::cleanup_expired(&pool).await?;
            tracing::info!(removed, "Expired sessions removed");
        }
    }

    pool.close().await;
    Ok(())
}

async fn create_superuser(
    pool: &DbPool,
    email: &str,
    full_name: &str,
    password: &str,
) -> anyhow::Result<()> {
    let email = email.trim().to_lowercase();
    if let Err(e) = validate_email(&email) {
        bail!("{e}");
    }
    if full_name.trim().is_empty() {
        bail!("Full name is required");
    }
    if let Err(problems) = validate_password_strength(password) {
        bail!("Weak password: {}", problems.join(" "));
    }
    if AdminUserRepo::find_by_email(pool, &email).await?.is_some() {
        bail!("An admin with email '{email}' already exists");
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
    let admin = AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            email,
            full_name: full_name.trim().to_string(),
            password_hash,
            role: ROLE_SUPER_ADMIN.to_string(),
            is_superuser: true,
        },
    )
    .await
    .context("Failed to create admin user")?;

    tracing::info!(admin_id = admin.id, email = %admin.email, "Superuser created");
    Ok(())
}
