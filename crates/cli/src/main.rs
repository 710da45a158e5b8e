//! Operator entry point
//!
//! Two subcommands: `run` applies every pending migration, `rollback`
//! reverses the most recently applied one. Anything else prints usage
//! and mutates nothing. Exits non-zero on any error.

use anyhow::Context;
use clap::{Parser, Subcommand};
use larder_migrate::{seeds, MigrationRunner};
use larder_store::{LocalStore, StoreConfig};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "larder", version, about = "Run and roll back local-store migrations")]
struct Cli {
    /// Storage root holding the config, data and ledger documents
    #[arg(long, env = "LARDER_STORAGE_ROOT", default_value = ".storage")]
    storage_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply every pending migration, in version order
    Run,
    /// Roll back the most recently applied migration
    Rollback,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let root = &cli.storage_root;
    let config = StoreConfig::load_or_init(root).context("loading storage configuration")?;
    let store = LocalStore::open_at(config.data_path(root), config.pretty)
        .context("opening local store")?;
    let mut runner =
        MigrationRunner::open(config.ledger_path(root)).context("opening migration ledger")?;

    for unit in seeds::all() {
        runner.register(unit)?;
    }

    match cli.command {
        Command::Run => {
            let applied = runner.run_pending(&store)?;
            if applied == 0 {
                println!("No pending migrations");
            } else {
                println!("Applied {applied} migration(s)");
            }
            println!("Data document: {}", store.path().display());
        }
        Command::Rollback => match runner.rollback(&store)? {
            Some(name) => println!("Rolled back {name}"),
            None => println!("No migrations to roll back"),
        },
    }

    Ok(())
}
