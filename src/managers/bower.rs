//! bower manager backend
//!
//! Wraps the `bower` tool. Bower registers packages by name against a git
//! URL, so project pages come from `bower lookup` rather than a fixed
//! registry URL scheme.

use crate::core::types::{BackendId, InstalledRecord, PackageAction, SearchResult, StatusResult};
use crate::error::{CardboardError, Result};
use crate::managers::exec;
use crate::managers::traits::PackageProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::process::Command;

pub struct BowerProvider;

impl BowerProvider {
    pub fn new() -> Self {
        Self
    }

    async fn run_action(&self, action: PackageAction, package: &str) -> Result<StatusResult> {
        let subcommand = match action {
            PackageAction::Install => "install",
            PackageAction::Uninstall => "uninstall",
            PackageAction::Update => "update",
        };
        let label = format!("bower {} {}", subcommand, package);

        let mut cmd = Command::new("bower");
        cmd.args([subcommand, package, "--quiet"]);

        let output = exec::command_output(&mut cmd, &label).await?;
        if !output.status.success() {
            return Err(CardboardError::BackendError {
                backend: self.id(),
                message: exec::stderr_summary(&output, &format!("{} failed", label)),
            });
        }

        Ok(StatusResult {
            backend: self.id(),
            package: package.to_string(),
            action,
            message: None,
        })
    }

    async fn lookup(&self, package: &str) -> Result<String> {
        let mut cmd = Command::new("bower");
        cmd.args(["lookup", package, "--json"]);

        let output = exec::command_output(&mut cmd, "bower lookup --json").await?;
        if !output.status.success() {
            return Err(CardboardError::BackendError {
                backend: self.id(),
                message: exec::stderr_summary(&output, "bower lookup failed"),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let entry: BowerLookup =
            serde_json::from_str(&stdout).map_err(|_| CardboardError::BackendError {
                backend: self.id(),
                message: format!("No bower registry entry for '{}'", package),
            })?;

        entry.url.ok_or_else(|| CardboardError::BackendError {
            backend: self.id(),
            message: format!("No bower registry entry for '{}'", package),
        })
    }
}

impl Default for BowerProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageProvider for BowerProvider {
    fn id(&self) -> BackendId {
        BackendId::from("bower")
    }

    async fn is_available(&self) -> bool {
        which::which("bower").is_ok()
    }

    async fn install(&self, package: &str) -> Result<StatusResult> {
        self.run_action(PackageAction::Install, package).await
    }

    async fn uninstall(&self, package: &str) -> Result<StatusResult> {
        self.run_action(PackageAction::Uninstall, package).await
    }

    async fn update(&self, package: &str) -> Result<StatusResult> {
        self.run_action(PackageAction::Update, package).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let mut cmd = Command::new("bower");
        cmd.args(["search", query, "--json"]);

        let output = exec::command_output(&mut cmd, "bower search --json").await?;
        if !output.status.success() {
            return Err(CardboardError::BackendError {
                backend: self.id(),
                message: exec::stderr_summary(&output, "bower search failed"),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_search_output(&self.id(), &stdout))
    }

    async fn list_installed(&self) -> Result<Vec<InstalledRecord>> {
        let mut cmd = Command::new("bower");
        cmd.args(["ls", "--json"]);

        let output = exec::command_output(&mut cmd, "bower ls --json").await?;
        if !output.status.success() {
            return Err(CardboardError::BackendError {
                backend: self.id(),
                message: exec::stderr_summary(&output, "bower ls failed"),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ls_output(&self.id(), &stdout))
    }

    async fn url(&self, package: &str) -> Result<String> {
        let url = self.lookup(package).await?;
        Ok(project_page(&url))
    }

    async fn readme(&self, package: &str) -> Result<String> {
        let url = self.lookup(package).await?;
        Ok(format!("{}#readme", project_page(&url)))
    }
}

#[derive(Deserialize)]
struct BowerLookup {
    url: Option<String>,
}

#[derive(Deserialize)]
struct BowerSearchEntry {
    name: String,
    url: Option<String>,
}

fn parse_search_output(backend: &BackendId, stdout: &str) -> Vec<SearchResult> {
    let entries: Vec<BowerSearchEntry> = serde_json::from_str(stdout).unwrap_or_default();

    entries
        .into_iter()
        .map(|entry| SearchResult {
            backend: backend.clone(),
            name: entry.name,
            version: None,
            description: None,
            url: entry.url.as_deref().map(project_page),
        })
        .collect()
}

#[derive(Deserialize)]
struct BowerTree {
    dependencies: Option<HashMap<String, BowerNode>>,
}

#[derive(Deserialize)]
struct BowerNode {
    #[serde(rename = "pkgMeta")]
    pkg_meta: Option<BowerMeta>,
}

#[derive(Deserialize)]
struct BowerMeta {
    version: Option<String>,
}

fn parse_ls_output(backend: &BackendId, stdout: &str) -> Vec<InstalledRecord> {
    let tree: BowerTree = match serde_json::from_str(stdout) {
        Ok(tree) => tree,
        Err(_) => return Vec::new(),
    };

    let mut records: Vec<InstalledRecord> = tree
        .dependencies
        .unwrap_or_default()
        .into_iter()
        .map(|(name, node)| InstalledRecord {
            backend: backend.clone(),
            name,
            version: node.pkg_meta.and_then(|meta| meta.version),
        })
        .collect();

    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}

/// Turn a registry git URL into a browsable project page.
fn project_page(url: &str) -> String {
    let url = url.strip_suffix(".git").unwrap_or(url);
    if let Some(rest) = url.strip_prefix("git://") {
        format!("https://{}", rest)
    } else {
        url.to_string()
    }
}
