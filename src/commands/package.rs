//! install / uninstall / update commands
//!
//! All three are the same single-manager call shape, so one handler covers
//! them.

use crate::core::types::{BackendId, PackageAction};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::ui as output;

pub async fn run(
    dispatcher: &Dispatcher,
    action: PackageAction,
    manager: &str,
    package: &str,
) -> Result<()> {
    let backend = BackendId::from(manager);

    let handle = match action {
        PackageAction::Install => dispatcher.install(&backend, package),
        PackageAction::Uninstall => dispatcher.uninstall(&backend, package),
        PackageAction::Update => dispatcher.update(&backend, package),
    };

    let status = handle.wait().await?;

    output::success(&format!(
        "{} {} via {}",
        status.package,
        status.action.verb(),
        status.backend
    ));
    if let Some(message) = &status.message {
        output::info(message);
    }

    Ok(())
}
