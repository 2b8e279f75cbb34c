use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::advisor::{CommandAdvisor, DEFAULT_TIMEOUT};

/// Overrides the database file location.
pub(crate) const DB_ENV: &str = "SPENDWISE_DB";
/// Command line of the external AI advisor program.
pub(crate) const ADVISOR_ENV: &str = "SPENDWISE_ADVISOR";
/// Seconds to wait for the advisor before killing it.
pub(crate) const ADVISOR_TIMEOUT_ENV: &str = "SPENDWISE_ADVISOR_TIMEOUT";

const DB_FILE: &str = "spendwise.db";
const LOG_FILE: &str = "spendwise.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) advisor_command: Option<String>,
    pub(crate) advisor_timeout: Duration,
}

impl Config {
    pub(crate) fn load() -> Result<Self> {
        let db_path = match std::env::var_os(DB_ENV).filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_data_dir()?.join(DB_FILE),
        };
        let advisor_command = std::env::var(ADVISOR_ENV).ok();
        let mut config = Self::from_parts(db_path, advisor_command)?;
        if let Ok(secs) = std::env::var(ADVISOR_TIMEOUT_ENV) {
            config.advisor_timeout = parse_timeout(&secs)?;
        }
        Ok(config)
    }

    /// Resolve the remaining paths from a database location and make sure its directory exists.
    pub(crate) fn from_parts(db_path: PathBuf, advisor_command: Option<String>) -> Result<Self> {
        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        let log_path = db_path.with_file_name(LOG_FILE);
        let advisor_command = advisor_command
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Ok(Self {
            db_path,
            log_path,
            advisor_command,
            advisor_timeout: DEFAULT_TIMEOUT,
        })
    }

    pub(crate) fn advisor(&self) -> Option<CommandAdvisor> {
        self.advisor_command
            .as_deref()
            .and_then(|line| CommandAdvisor::from_command_line(line).ok())
            .map(|advisor| advisor.with_timeout(self.advisor_timeout))
    }
}

fn parse_timeout(value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => bail!("{ADVISOR_TIMEOUT_ENV} must be a positive number of seconds, got '{value}'"),
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendwise", "SpendWise")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
