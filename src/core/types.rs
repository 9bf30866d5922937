//! Core data model shared by the registry, the dispatch core and the
//! concrete providers.
//!
//! Payload shapes are deliberately thin envelopes: every value records which
//! backend produced it, the rest is whatever the underlying tool reported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable string key identifying a manager backend within the registry.
///
/// Ids are opaque; uniqueness is enforced by the registry, and registry
/// insertion order defines fan-out ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendId(String);

impl BackendId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BackendId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BackendId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Mutating capability a [`StatusResult`] reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageAction {
    Install,
    Uninstall,
    Update,
}

impl PackageAction {
    /// Past-tense verb for user-facing status lines.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Install => "installed",
            Self::Uninstall => "uninstalled",
            Self::Update => "updated",
        }
    }
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Update => "update",
        };
        f.write_str(name)
    }
}

/// Outcome of one install/uninstall/update invocation on one backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusResult {
    pub backend: BackendId,
    pub package: String,
    pub action: PackageAction,
    /// Backend-defined detail line, e.g. the tool's own summary output.
    pub message: Option<String>,
}

/// One match from a backend's package repository search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub backend: BackendId,
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// One package currently installed through a backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstalledRecord {
    pub backend: BackendId,
    pub name: String,
    pub version: Option<String>,
}

/// Per-backend answer to "is this manager's underlying tool usable right now".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Availability {
    pub backend: BackendId,
    pub available: bool,
}
