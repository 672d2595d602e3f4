//! CLI administration tool for catalog-api.
//!
//! Provides commands for managing user accounts and roles, viewing
//! statistics, and performing database checks without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create the first administrator
//! cargo run --bin admin -- user create --admin
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Grant or revoke a role
//! cargo run --bin admin -- user grant ada@example.com ROLE_MODERATOR
//! cargo run --bin admin -- user revoke 7 MODERATOR
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`)
//! - `BCRYPT_COST` (optional, default: 10)

use catalog_api::config::Config;
use catalog_api::domain::entities::user::normalize_email;
use catalog_api::domain::entities::{NewUser, RoleName, User};
use catalog_api::domain::repositories::UserRepository;
use catalog_api::infrastructure::persistence::PgUserRepository;
use catalog_api::infrastructure::security::PasswordHasher;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing catalog-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a user account
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Login email
        #[arg(short, long)]
        email: Option<String>,

        /// Password (generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Also grant ROLE_ADMIN
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users with their roles
    List,

    /// Add a role to a user
    Grant {
        /// User email or ID
        user: String,

        /// Role name, e.g. ROLE_ADMIN or ADMIN
        role: String,
    },

    /// Remove a role from a user
    Revoke {
        /// User email or ID
        user: String,

        /// Role name, e.g. ROLE_MODERATOR or MODERATOR
        role: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            name,
            email,
            password,
            admin,
            yes,
        } => {
            create_user(repo, name, email, password, admin, yes).await?;
        }
        UserAction::List => {
            list_users(repo).await?;
        }
        UserAction::Grant { user, role } => {
            change_role(repo, user, role, true).await?;
        }
        UserAction::Revoke { user, role } => {
            change_role(repo, user, role, false).await?;
        }
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for name and email (or use provided)
/// 2. Use the provided password or generate one
/// 3. Display account details
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash the password with bcrypt and store the account
///
/// A generated password is printed once and cannot be retrieved later.
async fn create_user(
    repo: Arc<PgUserRepository>,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let name = name.trim().to_string();
    if !(3..=150).contains(&name.chars().count()) {
        bail!("Name must be between 3 and 150 characters");
    }

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = normalize_email(&email);

    if repo
        .exists_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    {
        bail!("Email {} is already in use", email);
    }

    let (password, generated) = match password {
        Some(p) => (p, false),
        None if skip_confirm => (generate_password(), true),
        None => {
            let entered: String = Password::new()
                .with_prompt("Password (leave empty to generate)")
                .allow_empty_password(true)
                .interact()?;
            if entered.is_empty() {
                (generate_password(), true)
            } else {
                (entered, false)
            }
        }
    };

    if password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }

    let mut roles = vec![RoleName::User];
    if admin {
        roles.push(RoleName::Admin);
    }

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Name:  {}", name.cyan());
    println!("  Email: {}", email.cyan());
    println!("  Roles: {}", format_roles(&roles).cyan());
    if generated {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let hasher = PasswordHasher::new(bcrypt_cost()?);
    let password_hash = hasher
        .hash(password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = repo
        .create(NewUser {
            name,
            email,
            password_hash,
            roles,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Lists all users with their roles.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Name                 Email                          Roles
///   ──────────────────────────────────────────────────────────────────────────
///   1   Ada Lovelace         ada@example.com                ROLE_USER, ROLE_ADMIN
/// ```
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create --admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {:<30} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Roles".bright_white().bold()
    );
    println!("  {}", "─".repeat(78).bright_black());

    for user in &users {
        let roles = format_roles(&user.roles);
        let roles = if user.has_role(RoleName::Admin) {
            roles.bright_red()
        } else {
            roles.green()
        };

        println!(
            "  {:<4} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            roles
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Grants or revokes one role.
///
/// # Lookup
///
/// - If input is numeric, lookup by ID
/// - Otherwise, lookup by email
///
/// A user always keeps at least one role.
async fn change_role(
    repo: Arc<PgUserRepository>,
    user_ref: String,
    role: String,
    grant: bool,
) -> Result<()> {
    let role: RoleName = role.parse()?;
    let user = find_user(&repo, &user_ref).await?;

    let mut roles = user.roles.clone();
    if grant {
        if roles.contains(&role) {
            println!("{}", format!("⚠️  {} already has {}", user.email, role).yellow());
            return Ok(());
        }
        roles.push(role);
        roles.sort();
    } else {
        if !roles.contains(&role) {
            println!("{}", format!("⚠️  {} does not have {}", user.email, role).yellow());
            return Ok(());
        }
        roles.retain(|r| *r != role);
        if roles.is_empty() {
            bail!("Cannot remove the last role of {}", user.email);
        }
    }

    let updated = repo
        .set_roles(user.id, roles)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update roles: {}", e))?;

    let verb = if grant { "granted" } else { "revoked" };
    println!(
        "{} {} {} {}",
        "✅".green(),
        role.to_string().bright_white().bold(),
        verb,
        updated.email.cyan()
    );
    println!("  Roles: {}", format_roles(&updated.roles));
    println!();

    Ok(())
}

async fn find_user(repo: &PgUserRepository, user_ref: &str) -> Result<User> {
    let user = match user_ref.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_email(&normalize_email(user_ref))
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    user.context("User not found")
}

/// Displays system statistics.
///
/// Shows:
/// - Number of users
/// - Number of categories
/// - Number of products
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let categories_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;

    let products_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    println!(
        "  Users:      {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Categories: {}",
        categories_count.to_string().bright_green().bold()
    );
    println!(
        "  Products:   {}",
        products_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

fn bcrypt_cost() -> Result<u32> {
    let cost = std::env::var("BCRYPT_COST")
        .unwrap_or_else(|_| "10".to_string())
        .parse::<u32>()
        .context("BCRYPT_COST must be a valid number")?;

    if !(4..=31).contains(&cost) {
        bail!("BCRYPT_COST must be between 4 and 31");
    }

    Ok(cost)
}

fn format_roles(roles: &[RoleName]) -> String {
    roles
        .iter()
        .map(RoleName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generates a random password.
///
/// # Format
///
/// - Length: 16 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 16;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
