//! Package search command
//!
//! Without `--manager`, fans out to every registered manager and renders
//! results as each handle resolves, in registry order. One manager failing
//! only produces a warning; sibling results still render.

use crate::core::types::{BackendId, SearchResult};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;

pub struct SearchOptions {
    pub query: String,
    pub manager: Option<String>,
    pub limit: usize,
    pub json: bool,
}

pub async fn run(dispatcher: &Dispatcher, options: SearchOptions) -> Result<()> {
    let handles = match &options.manager {
        Some(id) => vec![dispatcher.search(&BackendId::from(id.as_str()), &options.query)],
        None => dispatcher.search_all(&options.query),
    };

    if handles.is_empty() {
        output::warning("No managers registered");
        return Ok(());
    }

    if !options.json {
        output::info(&format!("Searching for '{}'...", options.query.cyan()));
        println!();
    }

    let mut json_results: Vec<SearchResult> = Vec::new();

    for handle in handles {
        let backend = handle.backend().clone();
        match handle.wait().await {
            Ok(mut results) => {
                let total = results.len();
                if options.limit > 0 && results.len() > options.limit {
                    results.truncate(options.limit);
                }
                if options.json {
                    json_results.extend(results);
                } else {
                    display_backend_results(&backend, &results, total);
                }
            }
            // Partial failure: warn and keep rendering the siblings.
            Err(err) => output::warning(&format!("{}: {}", backend, err)),
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    Ok(())
}

fn display_backend_results(backend: &BackendId, results: &[SearchResult], total: usize) {
    println!("{}", format!("{}:", backend).cyan().bold());

    if results.is_empty() {
        println!("  {}", "no matches".dimmed());
    }

    for result in results {
        let name = result.name.cyan();
        let version = result
            .version
            .as_deref()
            .map(|v| format!(" {}", v))
            .unwrap_or_default();

        match &result.description {
            Some(desc) => println!("  {}{} - {}", name, version.dimmed(), desc.dimmed()),
            None => println!("  {}{}", name, version.dimmed()),
        }
    }

    if total > results.len() {
        println!(
            "  {}",
            format!("(showing {} of {})", results.len(), total).dimmed()
        );
    }

    println!();
}
