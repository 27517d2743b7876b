use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use rolegate::cli::seeder::{SEED_PASSWORD, seed_users};
use rolegate::cli::{create_admin, set_role};
use rolegate::config::DatabaseConfig;
use rolegate_db::{UserStore, connect_store};

#[derive(Parser)]
#[command(name = "rolegate-cli")]
#[command(about = "Rolegate CLI - Administrative tools for Rolegate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Change a user's role
    SetRole {
        /// User ID
        user_id: i64,

        /// One of: admin, moderator, user
        role: String,
    },
    /// Seed the store with fake users
    Seed {
        /// Number of users to create
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let store = connect_store(&DatabaseConfig::from_env()).await?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(store.as_ref(), name, email, password).await,
        Commands::SetRole { user_id, role } => {
            let user = set_role(store.as_ref(), user_id, &role).await?;
            println!("✅ {} <{}> is now {}", user.name, user.email, user.role);
            Ok(())
        }
        Commands::Seed { count } => {
            let summary = seed_users(store.as_ref(), count).await?;
            println!("🌱 Seeded {} users", summary.created());
            println!("   - admins: {}", summary.admins);
            println!("   - moderators: {}", summary.moderators);
            println!("   - users: {}", summary.users);
            if summary.skipped > 0 {
                println!("   - skipped (email taken): {}", summary.skipped);
            }
            println!("   Password for all seeded users: {}", SEED_PASSWORD);
            Ok(())
        }
    }
}

async fn handle_create_admin(
    store: &dyn UserStore,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let admin = create_admin(store, &name, &email, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   ID: {}", admin.id);
    println!("   Email: {}", admin.email);
    println!("   Name: {}", admin.name);
    Ok(())
}
