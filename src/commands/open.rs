//! url / open commands
//!
//! `url` prints the resolved project page; `open` hands it to the platform's
//! default browser through the dispatcher's fire-and-forget path, where
//! failures are logged rather than surfaced.

use crate::core::types::BackendId;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::ui as output;

pub async fn print_url(dispatcher: &Dispatcher, manager: &str, package: &str) -> Result<()> {
    let url = dispatcher
        .url(&BackendId::from(manager), package)
        .wait()
        .await?;
    println!("{}", url);
    Ok(())
}

pub async fn run(
    dispatcher: &Dispatcher,
    manager: &str,
    package: &str,
    readme: bool,
) -> Result<()> {
    let backend = BackendId::from(manager);

    let task = if readme {
        dispatcher.open_readme(&backend, package)
    } else {
        dispatcher.open_url(&backend, package)
    };
    output::info(&format!("Opening {} page for '{}'...", backend, package));

    // Keep the process alive until the detached task has resolved the URL.
    let _ = task.await;
    Ok(())
}
