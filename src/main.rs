use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use stacks::cli::Shell;
use stacks::config::paths::StacksPaths;
use stacks::storage::Storage;

#[derive(Parser)]
#[command(
    name = "stacks",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based library catalog manager",
    long_about = "stacks-cli is a terminal-based library catalog manager. It keeps \
                  a catalog of books and a set of user accounts on disk and offers \
                  an interactive shell for searching and managing them."
)]
struct Cli {
    /// Override the data directory
    #[arg(long, env = "STACKS_CLI_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive shell (default)
    Shell,

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config,
}

#[derive(Subcommand)]
enum BackupCommands {
    /// Create a backup now
    Create,

    /// List existing backups, newest first
    List,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => StacksPaths::with_base_dir(dir),
        None => StacksPaths::new()?,
    };

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let storage = Storage::open(paths)?;
            let stdin = io::stdin();
            let mut shell = Shell::new(&storage);
            shell.run(stdin.lock(), io::stdout())?;
        }
        Commands::Backup(cmd) => {
            let storage = Storage::open(paths)?;
            match cmd {
                BackupCommands::Create => {
                    let path = storage.backups().create_backup()?;
                    println!("Created backup {}", path.display());
                }
                BackupCommands::List => {
                    let backups = storage.backups().list_backups()?;
                    if backups.is_empty() {
                        println!("No backups yet");
                    }
                    for backup in backups {
                        println!("{}  {}", backup.name, backup.path.display());
                    }
                }
            }
        }
        Commands::Config => {
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Backups:         {}", paths.backup_dir().display());
            println!("Users file:      {}", paths.users_file().display());
            println!("Books file:      {}", paths.books_file().display());
        }
    }

    Ok(())
}
