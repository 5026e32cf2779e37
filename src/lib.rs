pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod db;
pub mod desk;
pub mod error;
pub mod history;
pub mod models;
pub mod prompt;
pub mod reorder;
pub mod sheet;
pub mod state;
pub mod storage;


use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use clock::SystemClock;
use config::Config;
use db::Database;
use desk::Desk;
use storage::Storage;

/// `RUST_LOG` wins over the configured level when set.
fn init_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        config.database_path = db.clone();
    }
    init_logger(&config.log_level);

    // Initialize storage
    let db = Database::open(&config.database_path)?;
    db.initialize()?;
    let storage = Storage::new(Arc::new(db));

    let mut desk = Desk::load(storage, Arc::new(SystemClock));
    cli::execute(&mut desk, cli.command, cli.yes)
}
