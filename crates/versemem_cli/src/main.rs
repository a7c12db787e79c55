//! Terminal front end for `versemem_core`.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the database.
//! - Dispatch one subcommand per invocation.

mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::Cli;
use config::CliConfig;
use log::error;
use std::process::ExitCode;
use versemem_core::db::open_db;
use versemem_core::{init_logging, SqliteKeyValueStore};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CliConfig::resolve(&cli);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "error: cannot open database `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let kv = SqliteKeyValueStore::new(&conn);
    match commands::run(cli.command, &kv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_command module=cli status=error");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
