//! List installed packages, for one manager or all of them.

use crate::core::types::{BackendId, InstalledRecord};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;

pub async fn run(dispatcher: &Dispatcher, manager: Option<&str>, json: bool) -> Result<()> {
    let handles = match manager {
        Some(id) => vec![dispatcher.list_installed(&BackendId::from(id))],
        None => dispatcher.list_installed_all(),
    };

    if handles.is_empty() {
        output::warning("No managers registered");
        return Ok(());
    }

    let mut json_records: Vec<InstalledRecord> = Vec::new();

    for handle in handles {
        let backend = handle.backend().clone();
        match handle.wait().await {
            Ok(records) => {
                if json {
                    json_records.extend(records);
                } else {
                    display_backend_records(&backend, &records);
                }
            }
            Err(err) => output::warning(&format!("{}: {}", backend, err)),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&json_records)?);
    }

    Ok(())
}

fn display_backend_records(backend: &BackendId, records: &[InstalledRecord]) {
    println!("{}", format!("{}:", backend).cyan().bold());

    if records.is_empty() {
        println!("  {}", "nothing installed".dimmed());
    }

    for record in records {
        match &record.version {
            Some(version) => println!("  {} {}", record.name, version.dimmed()),
            None => println!("  {}", record.name),
        }
    }

    println!();
}
