mod advisor;
mod aggregate;
mod config;
mod db;
mod models;
mod run;
mod settings;
mod ui;
mod validate;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    let tui = args.len() == 1;
    init_logging(&config, tui)?;

    let mut db = db::Database::open(&config.db_path)?;

    if tui {
        run::as_tui(&mut db, &config)
    } else {
        run::as_cli(&args, &mut db, &config)
    }
}

/// The TUI owns the terminal, so its logs go to a file next to the database.
fn init_logging(config: &config::Config, tui: bool) -> Result<()> {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME"))),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if tui {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_path)
            .with_context(|| format!("Failed to open log file: {}", config.log_path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}
