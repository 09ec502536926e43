use campus_cli::admin::{AdminInput, create_admin};
use campus_cli::seeder::{self, SeedConfig};
use campus_db::{PgAccountStore, init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(about = "Campus CLI - Administrative tools for the Campus API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrative academic account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake administrators, faculty and students
    Seed {
        /// Number of administrative accounts
        #[arg(long, default_value = "2")]
        admins: usize,

        /// Number of faculty accounts
        #[arg(long, default_value = "10")]
        faculty: usize,

        /// Number of students
        #[arg(short = 's', long, default_value = "100")]
        students: usize,

        /// Shared password of the seeded accounts
        #[arg(long, default_value = seeder::DEFAULT_SEED_PASSWORD)]
        password: String,
    },
    /// Delete every seeded account
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pool = init_db_pool().await?;
    run_migrations(&pool).await?;
    let store = PgAccountStore::new(pool);

    match cli.command {
        Commands::CreateAdmin {
            email,
            name,
            password,
        } => handle_create_admin(&store, email, name, password).await,
        Commands::Seed {
            admins,
            faculty,
            students,
            password,
        } => {
            let config = SeedConfig::default()
                .with_administrators(admins)
                .with_faculty(faculty)
                .with_students(students)
                .with_password(password);
            seeder::seed_all(&store, &config).await.map(|_| ())
        }
        Commands::ClearSeed => seeder::clear_seed(&store).await.map(|_| ()),
    }
}

async fn handle_create_admin(
    store: &PgAccountStore,
    email: Option<String>,
    name: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let account = create_admin(store, AdminInput::new(&email, &name, &password)?).await?;

    println!("\n✅ Administrator created successfully!");
    println!("   Email: {}", account.email);
    println!("   Name: {}", account.name.unwrap_or_default());
    Ok(())
}
