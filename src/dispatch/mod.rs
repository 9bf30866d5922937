//! Dispatch core
//!
//! Translates logical requests ("install X via npm", "search every manager
//! for Q") into provider invocations and returns [`OperationHandle`]s without
//! blocking the caller.
//!
//! Fan-out operations issue exactly one sub-operation per registered manager,
//! in registry order, and the returned sequence preserves that order so
//! callers can zip results back to manager identities positionally.
//! Completion order is unconstrained.
//!
//! Providers are created lazily on first use and cached, so repeated calls
//! against the same id always observe the same capability set. Resolution
//! failures (unknown id, factory error) surface through the handle exactly
//! like capability failures.

pub mod handle;


pub use handle::OperationHandle;

use crate::core::types::{
    Availability, BackendId, InstalledRecord, SearchResult, StatusResult,
};
use crate::error::{CardboardError, Result};
use crate::managers::{ManagerRegistry, PackageProvider};
use crate::ui;
use std::collections::HashMap;
use std::future::Future;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Per-backend deadline applied when the caller does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Collaborator that hands a URL to the platform's external viewer.
///
/// The dispatch core only computes URLs; opening them belongs to the
/// presentation side of the boundary.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the OS default handler.
pub struct SystemUrlOpener;

#[cfg(target_os = "macos")]
const OPEN_COMMAND: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPEN_COMMAND: &str = "xdg-open";

impl UrlOpener for SystemUrlOpener {
    fn open(&self, url: &str) -> Result<()> {
        std::process::Command::new(OPEN_COMMAND)
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| CardboardError::UrlOpenFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

type InstanceCache = Mutex<HashMap<BackendId, Arc<dyn PackageProvider>>>;

pub struct Dispatcher {
    registry: Arc<ManagerRegistry>,
    instances: Arc<InstanceCache>,
    timeout: Option<Duration>,
    opener: Arc<dyn UrlOpener>,
}

impl Dispatcher {
    pub fn new(registry: ManagerRegistry) -> Self {
        Self::with_opener(registry, Arc::new(SystemUrlOpener))
    }

    pub fn with_opener(registry: ManagerRegistry, opener: Arc<dyn UrlOpener>) -> Self {
        Self {
            registry: Arc::new(registry),
            instances: Arc::new(Mutex::new(HashMap::new())),
            timeout: Some(DEFAULT_TIMEOUT),
            opener,
        }
    }

    /// Per-backend deadline for every operation; `None` disables it.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn registry(&self) -> &ManagerRegistry {
        &self.registry
    }

    // --- single-manager operations ---

    pub fn install(&self, backend: &BackendId, package: &str) -> OperationHandle<StatusResult> {
        let package = package.to_string();
        self.spawn_call(backend, move |provider| async move {
            provider.install(&package).await
        })
    }

    pub fn uninstall(&self, backend: &BackendId, package: &str) -> OperationHandle<StatusResult> {
        let package = package.to_string();
        self.spawn_call(backend, move |provider| async move {
            provider.uninstall(&package).await
        })
    }

    pub fn update(&self, backend: &BackendId, package: &str) -> OperationHandle<StatusResult> {
        let package = package.to_string();
        self.spawn_call(backend, move |provider| async move {
            provider.update(&package).await
        })
    }

    pub fn search(&self, backend: &BackendId, query: &str) -> OperationHandle<Vec<SearchResult>> {
        let query = query.to_string();
        self.spawn_call(backend, move |provider| async move {
            provider.search(&query).await
        })
    }

    pub fn list_installed(&self, backend: &BackendId) -> OperationHandle<Vec<InstalledRecord>> {
        self.spawn_call(backend, move |provider| async move {
            provider.list_installed().await
        })
    }

    pub fn url(&self, backend: &BackendId, package: &str) -> OperationHandle<String> {
        let package = package.to_string();
        self.spawn_call(backend, move |provider| async move {
            provider.url(&package).await
        })
    }

    pub fn readme(&self, backend: &BackendId, package: &str) -> OperationHandle<String> {
        let package = package.to_string();
        self.spawn_call(backend, move |provider| async move {
            provider.readme(&package).await
        })
    }

    // --- fan-out operations ---
    //
    // Zero registered managers yields an empty sequence, not an error.

    pub fn search_all(&self, query: &str) -> Vec<OperationHandle<Vec<SearchResult>>> {
        self.registry
            .backend_ids()
            .iter()
            .map(|id| self.search(id, query))
            .collect()
    }

    pub fn list_installed_all(&self) -> Vec<OperationHandle<Vec<InstalledRecord>>> {
        self.registry
            .backend_ids()
            .iter()
            .map(|id| self.list_installed(id))
            .collect()
    }

    pub fn availability(&self) -> Vec<OperationHandle<Availability>> {
        self.registry
            .backend_ids()
            .iter()
            .map(|id| {
                let backend = id.clone();
                self.spawn_call(id, move |provider| async move {
                    let available = provider.is_available().await;
                    Ok(Availability { backend, available })
                })
            })
            .collect()
    }

    // --- fire-and-forget URL operations ---

    /// Open a package's project page in the external viewer.
    ///
    /// Failures are logged, never surfaced; the returned join handle carries
    /// completion only, for callers that must outlive the spawned task.
    pub fn open_url(&self, backend: &BackendId, package: &str) -> JoinHandle<()> {
        self.open_link(self.url(backend, package), package)
    }

    /// Open a package's readme in the external viewer. Same contract as
    /// [`Dispatcher::open_url`].
    pub fn open_readme(&self, backend: &BackendId, package: &str) -> JoinHandle<()> {
        self.open_link(self.readme(backend, package), package)
    }

    fn open_link(&self, handle: OperationHandle<String>, package: &str) -> JoinHandle<()> {
        let opener = Arc::clone(&self.opener);
        let package = package.to_string();

        tokio::spawn(async move {
            match handle.wait().await {
                Ok(link) => {
                    if let Err(err) = opener.open(&link) {
                        ui::warning(&format!("{}", err));
                    }
                }
                Err(err) => {
                    ui::warning(&format!("Could not resolve link for '{}': {}", package, err));
                }
            }
        })
    }

    // --- plumbing ---

    fn spawn_call<T, F, Fut>(&self, backend: &BackendId, call: F) -> OperationHandle<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn PackageProvider>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send,
    {
        let registry = Arc::clone(&self.registry);
        let instances = Arc::clone(&self.instances);
        let timeout = self.timeout;
        let id = backend.clone();
        let task_id = id.clone();

        let task = tokio::spawn(async move {
            let provider = resolve(&registry, &instances, &task_id)?;
            let invocation = call(provider);

            match timeout {
                Some(limit) => match tokio::time::timeout(limit, invocation).await {
                    Ok(result) => result,
                    Err(_) => Err(CardboardError::Timeout {
                        backend: task_id,
                        limit,
                    }),
                },
                None => invocation.await,
            }
        });

        OperationHandle::new(id, task)
    }
}

/// Resolve an id to a live provider, creating and caching it on first use.
fn resolve(
    registry: &ManagerRegistry,
    instances: &InstanceCache,
    backend: &BackendId,
) -> Result<Arc<dyn PackageProvider>> {
    let factory = registry
        .factory(backend)
        .ok_or_else(|| CardboardError::UnknownBackend(backend.clone()))?;

    let mut cache = instances
        .lock()
        .map_err(|e| CardboardError::LoadError {
            backend: backend.clone(),
            reason: format!("instance cache poisoned: {}", e),
        })?;

    if let Some(provider) = cache.get(backend) {
        return Ok(Arc::clone(provider));
    }

    let provider = factory().map_err(|err| match err {
        load @ CardboardError::LoadError { .. } => load,
        other => CardboardError::LoadError {
            backend: backend.clone(),
            reason: other.to_string(),
        },
    })?;

    cache.insert(backend.clone(), Arc::clone(&provider));
    Ok(provider)
}
