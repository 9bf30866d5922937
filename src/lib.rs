pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod managers;
pub mod ui;

use clap::Parser;
use std::process::exit;

/// Run the cardboard CLI entrypoint.
pub async fn run_cli() {
    let args = cli::args::Cli::parse();

    if let Err(e) = cli::dispatcher::dispatch(&args).await {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
