use anyhow::{Context, bail};
use avisgate::store::{PgPrincipalStore, PrincipalStore};
use avisgate_core::{BcryptHasher, CredentialHasher, Principal};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use validator::ValidateEmail;

#[derive(Parser)]
#[command(name = "avisgate-cli")]
#[command(about = "avisgate CLI - Administrative tools for Mon Café Avis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the bcrypt hash of a password
    HashPassword {
        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create an account directly in the database
    CreateUser {
        /// Email address, also the login identifier
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Authority to grant; repeat for several
        #[arg(short = 'a', long = "authority")]
        authorities: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword { password } => handle_hash_password(password),
        Commands::CreateUser {
            email,
            full_name,
            password,
            authorities,
        } => handle_create_user(email, full_name, password, authorities).await,
    }
}

fn prompt_password(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password"),
    }
}

fn handle_hash_password(password: Option<String>) -> anyhow::Result<()> {
    let password = prompt_password(password)?;
    let hash = BcryptHasher::default().hash(&password)?;
    println!("{}", hash);
    Ok(())
}

async fn handle_create_user(
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
    authorities: Vec<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::<String>::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };
    if !email.validate_email() {
        bail!("'{}' is not a valid email address", email);
    }

    let full_name = match full_name {
        Some(full_name) => full_name,
        None => Input::<String>::new()
            .with_prompt("Full name")
            .interact_text()
            .context("Failed to read full name")?,
    };

    let password = prompt_password(password)?;
    if password.trim().is_empty() {
        bail!("Password must not be blank");
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let credential_hash = BcryptHasher::default().hash(&password)?;
    let principal = authorities.into_iter().fold(
        Principal::new(email.clone(), credential_hash).with_full_name(full_name),
        |principal, authority| principal.with_authority(authority),
    );

    if !PgPrincipalStore::new(pool).insert(principal).await? {
        bail!("An account already exists for {}", email);
    }

    println!("\n✅ Account created successfully!");
    println!("   Email: {}", email);
    Ok(())
}
