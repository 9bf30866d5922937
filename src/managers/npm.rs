//! npm manager backend
//!
//! Shells out to `npm` in the current project directory and parses its JSON
//! output.

use crate::core::types::{BackendId, InstalledRecord, PackageAction, SearchResult, StatusResult};
use crate::error::{CardboardError, Result};
use crate::managers::exec;
use crate::managers::traits::PackageProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::process::Command;

pub struct NpmProvider;

impl NpmProvider {
    pub fn new() -> Self {
        Self
    }

    async fn run_action(&self, action: PackageAction, package: &str) -> Result<StatusResult> {
        let subcommand = match action {
            PackageAction::Install => "install",
            PackageAction::Uninstall => "uninstall",
            PackageAction::Update => "update",
        };
        let label = format!("npm {} {}", subcommand, package);

        let mut cmd = Command::new("npm");
        cmd.args([subcommand, "--no-fund", "--no-audit", package]);

        let output = exec::command_output(&mut cmd, &label).await?;
        if !output.status.success() {
            return Err(CardboardError::BackendError {
                backend: self.id(),
                message: exec::stderr_summary(&output, &format!("{} failed", label)),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string);

        Ok(StatusResult {
            backend: self.id(),
            package: package.to_string(),
            action,
            message,
        })
    }
}

impl Default for NpmProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageProvider for NpmProvider {
    fn id(&self) -> BackendId {
        BackendId::from("npm")
    }

    async fn is_available(&self) -> bool {
        which::which("npm").is_ok()
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
        let mut cmd = Command::new("npm");
        cmd.args(["search", "--json", query]);

        let output = exec::command_output(&mut cmd, "npm search --json").await?;
        if !output.status.success() {
            return Err(CardboardError::BackendError {
                backend: self.id(),
                message: exec::stderr_summary(&output, "npm search failed"),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_search_output(&self.id(), &stdout))
    }

    async fn list_installed(&self) -> Result<Vec<InstalledRecord>> {
        let mut cmd = Command::new("npm");
        cmd.args(["ls", "--depth=0", "--json"]);

        let output = exec::command_output(&mut cmd, "npm ls --depth=0 --json").await?;
        if !output.status.success() {
            return Err(CardboardError::BackendError {
                backend: self.id(),
                message: exec::stderr_summary(&output, "npm ls failed"),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ls_output(&self.id(), &stdout))
    }

    async fn url(&self, package: &str) -> Result<String> {
        Ok(format!("https://www.npmjs.com/package/{}", package))
    }

    async fn readme(&self, package: &str) -> Result<String> {
        Ok(format!("https://www.npmjs.com/package/{}#readme", package))
    }
}

#[derive(Deserialize)]
struct NpmSearchEntry {
    name: String,
    version: Option<String>,
    description: Option<String>,
    links: Option<NpmLinks>,
}

#[derive(Deserialize)]
struct NpmLinks {
    npm: Option<String>,
}

fn parse_search_output(backend: &BackendId, stdout: &str) -> Vec<SearchResult> {
    let entries: Vec<NpmSearchEntry> = serde_json::from_str(stdout).unwrap_or_default();

    entries
        .into_iter()
        .map(|entry| SearchResult {
            backend: backend.clone(),
            name: entry.name,
            version: entry.version,
            description: entry.description,
            url: entry.links.and_then(|links| links.npm),
        })
        .collect()
}

#[derive(Deserialize)]
struct NpmTree {
    dependencies: Option<HashMap<String, NpmDependency>>,
}

#[derive(Deserialize)]
struct NpmDependency {
    version: Option<String>,
}

fn parse_ls_output(backend: &BackendId, stdout: &str) -> Vec<InstalledRecord> {
    let tree: NpmTree = match serde_json::from_str(stdout) {
        Ok(tree) => tree,
        Err(_) => return Vec::new(),
    };

    let mut records: Vec<InstalledRecord> = tree
        .dependencies
        .unwrap_or_default()
        .into_iter()
        .map(|(name, dep)| InstalledRecord {
            backend: backend.clone(),
            name,
            version: dep.version,
        })
        .collect();

    // HashMap iteration order is arbitrary; keep output stable.
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_output_maps_entries() {
        let backend = BackendId::from("npm");
        let json = r#"[
            {"name": "left-pad", "version": "1.3.0", "description": "String left pad",
             "links": {"npm": "https://www.npmjs.com/package/left-pad"}},
            {"name": "pad-left", "version": "2.1.0"}
        ]"#;

        let results = parse_search_output(&backend, json);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "left-pad");
        assert_eq!(results[0].version.as_deref(), Some("1.3.0"));
        assert_eq!(
            results[0].url.as_deref(),
            Some("https://www.npmjs.com/package/left-pad")
        );
        assert_eq!(results[1].name, "pad-left");
        assert!(results[1].description.is_none());
        assert!(results[1].url.is_none());
    }

    #[test]
    fn parse_search_output_tolerates_garbage() {
        let backend = BackendId::from("npm");
        assert!(parse_search_output(&backend, "not json").is_empty());
    }

    #[test]
    fn parse_ls_output_sorts_by_name() {
        let backend = BackendId::from("npm");
        let json = r#"{"dependencies": {
            "zebra": {"version": "2.0.0"},
            "alpha": {"version": "1.0.0"},
            "missing": {}
        }}"#;

        let records = parse_ls_output(&backend, json);

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "missing", "zebra"]);
        assert_eq!(records[0].version.as_deref(), Some("1.0.0"));
        assert!(records[1].version.is_none());
    }

    #[test]
    fn parse_ls_output_without_dependencies() {
        let backend = BackendId::from("npm");
        assert!(parse_ls_output(&backend, "{}").is_empty());
        assert!(parse_ls_output(&backend, "").is_empty());
    }
}
