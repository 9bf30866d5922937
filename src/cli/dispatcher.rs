//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::config::Config;
use crate::core::types::PackageAction;
use crate::dispatch::Dispatcher;
use crate::error::Result;

/// Dispatch the parsed CLI command to the appropriate handler.
pub async fn dispatch(args: &Cli) -> Result<()> {
    let mut config = Config::load(args.global.config.as_deref())?;
    if let Some(secs) = args.global.timeout {
        config.timeout_secs = secs;
    }

    let registry = config.build_registry()?;
    let mut dispatcher = Dispatcher::new(registry);
    dispatcher.set_timeout(config.timeout());

    match &args.command {
        Command::Managers { json } => commands::managers::run(&dispatcher, *json).await,

        Command::Install { manager, package } => {
            commands::package::run(&dispatcher, PackageAction::Install, manager, package).await
        }

        Command::Uninstall { manager, package } => {
            commands::package::run(&dispatcher, PackageAction::Uninstall, manager, package).await
        }

        Command::Update { manager, package } => {
            commands::package::run(&dispatcher, PackageAction::Update, manager, package).await
        }

        Command::Search {
            query,
            manager,
            limit,
            json,
        } => {
            commands::search::run(
                &dispatcher,
                commands::search::SearchOptions {
                    query: query.clone(),
                    manager: manager.clone(),
                    limit: *limit,
                    json: *json,
                },
            )
            .await
        }

        Command::List { manager, json } => {
            commands::list::run(&dispatcher, manager.as_deref(), *json).await
        }

        Command::Url { manager, package } => {
            commands::open::print_url(&dispatcher, manager, package).await
        }

        Command::Open {
            manager,
            package,
            readme,
        } => commands::open::run(&dispatcher, manager, package, *readme).await,
    }
}
