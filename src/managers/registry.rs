//! Manager registry
//!
//! Ordered registration table mapping a [`BackendId`] to a provider factory.
//! The registry is populated once at startup (from config or
//! [`ManagerRegistry::with_defaults`]) and treated as immutable afterwards;
//! insertion order defines the iteration order of every fan-out operation.
//!
//! Replacing path-based dynamic loading with an explicit table makes
//! resolution fail fast: an id either has a factory or the dispatch core
//! reports `UnknownBackend` without touching any provider.

use crate::core::types::BackendId;
use crate::error::Result;
use crate::managers::traits::{PackageProvider, ProviderFactory};
use crate::managers::{bower::BowerProvider, npm::NpmProvider};
use std::sync::Arc;

pub struct ManagerRegistry {
    entries: Vec<(BackendId, ProviderFactory)>,
}

impl std::fmt::Debug for ManagerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerRegistry")
            .field(
                "entries",
                &self.entries.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ManagerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry with the built-in managers (npm, bower) in default order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("npm", || {
            Ok(Arc::new(NpmProvider::new()) as Arc<dyn PackageProvider>)
        });
        registry.register("bower", || {
            Ok(Arc::new(BowerProvider::new()) as Arc<dyn PackageProvider>)
        });
        registry
    }

    /// Register a manager under `id`.
    ///
    /// Ids are unique: re-registering an existing id replaces its factory in
    /// place, keeping the original position in the iteration order.
    pub fn register<F>(&mut self, id: impl Into<BackendId>, factory: F)
    where
        F: Fn() -> Result<Arc<dyn PackageProvider>> + Send + Sync + 'static,
    {
        let id = id.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = Box::new(factory);
        } else {
            self.entries.push((id, Box::new(factory)));
        }
    }

    /// All registered ids in declaration order. Pure and infallible.
    pub fn backend_ids(&self) -> Vec<BackendId> {
        self.entries.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn contains(&self, id: &BackendId) -> bool {
        self.entries.iter().any(|(existing, _)| existing == id)
    }

    pub fn factory(&self, id: &BackendId) -> Option<&ProviderFactory> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, factory)| factory)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ManagerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_registered_in_order() {
        let registry = ManagerRegistry::with_defaults();

        let ids = registry.backend_ids();
        assert_eq!(ids, vec![BackendId::from("npm"), BackendId::from("bower")]);
        assert!(registry.contains(&BackendId::from("npm")));
        assert!(!registry.contains(&BackendId::from("pip")));
    }

    #[test]
    fn registration_preserves_declaration_order() {
        let mut registry = ManagerRegistry::new();
        registry.register("beta", || {
            Ok(Arc::new(NpmProvider::new()) as Arc<dyn PackageProvider>)
        });
        registry.register("alpha", || {
            Ok(Arc::new(NpmProvider::new()) as Arc<dyn PackageProvider>)
        });

        let ids = registry.backend_ids();
        assert_eq!(
            ids,
            vec![BackendId::from("beta"), BackendId::from("alpha")]
        );
    }

    #[test]
    fn reregistering_replaces_in_place() {
        let mut registry = ManagerRegistry::new();
        registry.register("npm", || {
            Ok(Arc::new(NpmProvider::new()) as Arc<dyn PackageProvider>)
        });
        registry.register("bower", || {
            Ok(Arc::new(BowerProvider::new()) as Arc<dyn PackageProvider>)
        });
        registry.register("npm", || {
            Ok(Arc::new(NpmProvider::new()) as Arc<dyn PackageProvider>)
        });

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.backend_ids(),
            vec![BackendId::from("npm"), BackendId::from("bower")]
        );
    }

    #[test]
    fn empty_registry() {
        let registry = ManagerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.backend_ids().is_empty());
        assert!(registry.factory(&BackendId::from("npm")).is_none());
    }
}
