//! Backend capability contract.
//!
//! Any `Send + Sync` object implementing [`PackageProvider`] is a valid
//! manager backend; there is no shared base state. Each capability is an
//! independent asynchronous operation that may succeed or fail on its own.

use crate::core::types::{BackendId, InstalledRecord, SearchResult, StatusResult};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PackageProvider: Send + Sync {
    /// Registry id this provider answers for.
    fn id(&self) -> BackendId;

    /// Probe whether the underlying tool is present and usable right now.
    async fn is_available(&self) -> bool;

    async fn install(&self, package: &str) -> Result<StatusResult>;

    async fn uninstall(&self, package: &str) -> Result<StatusResult>;

    async fn update(&self, package: &str) -> Result<StatusResult>;

    /// Search the backend's package repository.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// List packages currently installed through this backend.
    async fn list_installed(&self) -> Result<Vec<InstalledRecord>>;

    /// Project page URL for a package.
    async fn url(&self, package: &str) -> Result<String>;

    /// Readme URL (or equivalent content reference) for a package.
    async fn readme(&self, package: &str) -> Result<String>;
}

/// Factory producing a provider instance on first use.
///
/// Factories run lazily inside the dispatch core; a failure here surfaces as
/// a `LoadError` on the operation handle, never as a separate failure mode.
pub type ProviderFactory = Box<dyn Fn() -> Result<Arc<dyn PackageProvider>> + Send + Sync>;
