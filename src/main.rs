use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use filestore::{Config, FileStore, last_modified};

/// Read and write settings kept in a flat key=value file
#[derive(Parser)]
#[command(name = "filestore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backing file, created when missing
    file: PathBuf,

    /// fsync the file after every write
    #[arg(long, global = true)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value stored under KEY
    Get {
        key: String,
        /// Printed when KEY is missing or empty
        fallback: Option<String>,
    },

    /// Store VALUE under KEY
    Set {
        key: String,
        value: String,
    },

    /// Print the header comment lines
    Comments,

    /// Print the file's modification time in Unix seconds
    Mtime,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Get { key, fallback } => {
            let store = open_store(&cli.file, cli.sync)?;
            println!("{}", store.read(&key, fallback.as_deref()));
        }
        Commands::Set { key, value } => {
            let store = open_store(&cli.file, cli.sync)?;
            store.write(&key, &value).context("write failed")?;
            debug!("set {key} in {}", cli.file.display());
        }
        Commands::Comments => {
            let store = open_store(&cli.file, cli.sync)?;
            for comment in store.comments() {
                println!("{comment}");
            }
        }
        Commands::Mtime => {
            // stat only, never creates the file
            let secs = last_modified(&cli.file)
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            println!("{secs}");
        }
    }

    Ok(())
}

fn open_store(path: &Path, sync: bool) -> Result<FileStore> {
    let conf = Config {
        path: path.to_path_buf(),
        sync_on_write: sync,
    };
    FileStore::with_config(conf).with_context(|| format!("cannot open store {}", path.display()))
}
