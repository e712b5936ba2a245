//! Command-line entry point for the CRM record store.
//!
//! # Responsibility
//! - Compose `crm_core` from flags and `CRM_*` environment variables.
//! - Offer maintenance commands: init, seed, stats, reset, version.

use clap::{Parser, Subcommand};
use crm_core::{
    core_version, open_database, seed_contacts, Company, Contact, CoreConfig, Database, Deal,
    EntityCodec, Note, RepoResult, Repository, SeedOutcome, SnapshotStore, Task,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Maintenance commands for the CRM snapshot store
#[derive(Debug, Parser)]
#[command(name = "crm_cli", version, long_about = None)]
struct Cli {
    /// TOML config file; flags and `CRM_*` variables take precedence
    #[arg(long, global = true, env = "CRM_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the snapshot blob
    #[arg(long, global = true, env = "CRM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Snapshot name inside the data directory
    #[arg(long, global = true, env = "CRM_SNAPSHOT_KEY")]
    snapshot_key: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "CRM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "CRM_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open (or create) the database and print table counts
    Init {
        /// Skip seeding fixture contacts into an empty database
        #[arg(long)]
        no_seed: bool,
    },
    /// Insert fixture contacts when the contacts table is empty
    Seed,
    /// Print row counts for every table without creating a snapshot
    Stats,
    /// Delete the stored snapshot
    Reset,
    /// Print the core version
    Version,
}

impl Cli {
    fn config(&self) -> Result<CoreConfig, Box<dyn Error>> {
        let mut config = CoreConfig::load(self.config.as_deref())?;
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(key) = &self.snapshot_key {
            config.snapshot_key = key.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(log_dir) = &self.log_dir {
            config.log_dir = Some(log_dir.clone());
        }
        config.seed_on_start = false;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut config = cli.config()?;

    match &cli.command {
        Command::Init { no_seed } => {
            config.seed_on_start = !no_seed;
            let opened = open_database(&config)?;
            match opened.seed {
                Some(SeedOutcome::Seeded { inserted }) => println!("seeded {inserted} contacts"),
                Some(SeedOutcome::Skipped { .. }) | None => {}
            }
            print_counts(&table_counts(&opened.db)?);
            println!("snapshot={}", config.snapshot_store().path().display());
        }
        Command::Seed => {
            let opened = open_database(&config)?;
            match seed_contacts(&opened.db)? {
                SeedOutcome::Seeded { inserted } => println!("seeded {inserted} contacts"),
                SeedOutcome::Skipped { existing } => {
                    println!("skipped: {existing} contacts already present")
                }
            }
        }
        Command::Stats => match stored_counts(&config)? {
            Some(counts) => print_counts(&counts),
            None => println!(
                "no snapshot at {}",
                config.snapshot_store().path().display()
            ),
        },
        Command::Reset => {
            let mut db = Database::new(config.snapshot_store());
            db.reset()?;
            println!("cleared {}", config.snapshot_store().path().display());
        }
        Command::Version => {
            println!("crm_core version={}", core_version());
            return Ok(());
        }
    }

    info!("event=cli_command module=cli status=ok command={:?}", cli.command);
    Ok(())
}

type TableCounts = Vec<(&'static str, u64)>;

fn table_counts(db: &Database) -> RepoResult<TableCounts> {
    Ok(vec![
        (Contact::TABLE, db.contacts().count()?),
        (Company::TABLE, db.companies().count()?),
        (Deal::TABLE, db.deals().count()?),
        (Task::TABLE, db.tasks().count()?),
        (Note::TABLE, db.notes().count()?),
    ])
}

/// Table counts of the stored snapshot; `None` when nothing was saved yet.
fn stored_counts(config: &CoreConfig) -> Result<Option<TableCounts>, Box<dyn Error>> {
    if config.snapshot_store().load()?.is_none() {
        return Ok(None);
    }
    let opened = open_database(config)?;
    Ok(Some(table_counts(&opened.db)?))
}

fn print_counts(counts: &[(&'static str, u64)]) {
    for (table, count) in counts {
        println!("{table:<10} {count}");
    }
}
