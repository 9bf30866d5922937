//! Show registered managers and probe their availability.

use crate::core::types::Availability;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;

pub async fn run(dispatcher: &Dispatcher, json: bool) -> Result<()> {
    let handles = dispatcher.availability();

    if handles.is_empty() {
        output::warning("No managers registered");
        return Ok(());
    }

    let mut rows: Vec<Availability> = Vec::new();
    for handle in handles {
        let backend = handle.backend().clone();
        match handle.wait().await {
            Ok(availability) => rows.push(availability),
            Err(err) => {
                // An unanswerable probe counts as unavailable.
                output::warning(&format!("{}: {}", backend, err));
                rows.push(Availability {
                    backend,
                    available: false,
                });
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    output::header("Managers");
    for row in rows {
        if row.available {
            println!("  {} {}", "✓".green().bold(), row.backend);
        } else {
            println!(
                "  {} {}",
                "✗".red().bold(),
                row.backend.to_string().dimmed()
            );
        }
    }

    Ok(())
}
