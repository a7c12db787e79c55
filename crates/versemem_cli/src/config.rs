//! Runtime configuration resolved from flags, environment and defaults.

use crate::cli::Cli;
use std::path::PathBuf;

const DB_PATH_ENV: &str = "VERSEMEM_DB_PATH";
const LOG_LEVEL_ENV: &str = "VERSEMEM_LOG_LEVEL";
const DEFAULT_DB_FILE_NAME: &str = "versemem.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "versemem-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl CliConfig {
    /// Flag wins over environment; environment wins over defaults.
    pub fn resolve(cli: &Cli) -> Self {
        let db_path = cli
            .db
            .clone()
            .or_else(|| non_blank_env(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| non_blank_env(LOG_LEVEL_ENV))
            .unwrap_or_else(|| versemem_core::default_log_level().to_string());

        let log_dir = cli
            .log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}
