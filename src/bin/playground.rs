// src/bin/playground.rs
//
// Manual testing harness for the `users` table: an interactive menu by default, or one
// operation per invocation via subcommands.

use anyhow::{anyhow, bail};
use clap::{Args, Parser, Subcommand};
use tokio::io::BufReader;
use turso_crud_example::console::Console;
use turso_crud_example::infra::logging::init_tracing;
use turso_crud_example::storage;
use turso_crud_example::{AppError, DatabaseConfig, User, UserService};

#[derive(Parser, Debug)]
#[command(name = "playground", about = "CRUD playground over the users table")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (the default)
    Menu,
    /// Create the users table if it does not exist
    CreateTable,
    /// Insert one user
    Insert {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Insert the sample users Bob, Charlie and Diana (ids 2-4) in one batch
    Seed,
    /// List all users ordered by id
    List,
    /// Find one user by id or by name
    Find(FindArgs),
    /// Change a user's email
    UpdateEmail {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        email: String,
    },
    /// Delete a user
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Check that a user no longer exists
    VerifyDeleted {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct FindArgs {
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    name: Option<String>,
}

fn sample_users() -> Vec<User> {
    vec![
        User::new(2, "Bob", "bob@example.com"),
        User::new(3, "Charlie", "charlie@example.com"),
        User::new(4, "Diana", "diana@example.com"),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing("warn")?;
    let cli = Cli::parse();

    let config = DatabaseConfig::from_env()?;
    let db = storage::connect(&config).await?;
    let users = UserService::new(db.clone());

    let result = run(cli.command.unwrap_or(Command::Menu), &users).await;
    db.close().await;
    result
}

async fn run(command: Command, users: &UserService) -> anyhow::Result<()> {
    match command {
        Command::Menu => {
            let input = BufReader::new(tokio::io::stdin());
            let mut console = Console::new(users.clone(), input, tokio::io::stdout());
            console.run().await?;
        }
        Command::CreateTable => {
            users.create_table().await?;
            println!("✅ Table 'users' created (if not already present).");
        }
        Command::Insert { id, name, email } => {
            let user = User::new(id, name, email);
            users.insert(&user).await?;
            println!("✅ Inserted user: {}", user);
        }
        Command::Seed => {
            let inserted = users.insert_many(&sample_users()).await?;
            println!("✅ Inserted {} users successfully!", inserted);
        }
        Command::List => {
            println!("✅ Users:");
            for user in users.list().await? {
                println!("- {}", user);
            }
        }
        Command::Find(FindArgs { id, name }) => {
            let (found, label) = match (id, name) {
                (Some(id), _) => (users.find_by_id(id).await?, format!("id = {}", id)),
                (None, Some(name)) => {
                    let label = format!("name = {}", name);
                    (users.find_by_name(&name).await?, label)
                }
                (None, None) => bail!("pass --id or --name"),
            };
            match found {
                Some(user) => println!("✅ Found user: {}", user),
                None => println!("❌ No user found with {}", label),
            }
        }
        Command::UpdateEmail { id, email } => match users.update_email(id, &email).await {
            Ok(()) => println!("✅ Updated user with id={} to email={}", id, email),
            Err(AppError::NotFound { .. }) => return Err(anyhow!("no user with id={}", id)),
            Err(e) => return Err(e.into()),
        },
        Command::Delete { id } => match users.delete(id).await {
            Ok(()) => println!("✅ Deleted user with id={}", id),
            Err(AppError::NotFound { .. }) => return Err(anyhow!("no user with id={}", id)),
            Err(e) => return Err(e.into()),
        },
        Command::VerifyDeleted { id } => {
            if users.exists(id).await? {
                println!("❌ User still exists: id={}", id);
            } else {
                println!("✅ User with id={} was deleted.", id);
            }
        }
    }
    Ok(())
}
