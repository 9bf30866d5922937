//! Configuration loading
//!
//! Cardboard reads an optional `cardboard.kdl`:
//!
//! ```kdl
//! managers {
//!     npm
//!     bower
//! }
//! timeout 30
//! ```
//!
//! The `managers` block declares which built-in managers are registered and
//! in what order; `timeout` is the per-backend deadline in seconds (0
//! disables it). A missing file falls back to the built-in defaults.

use crate::error::{CardboardError, Result};
use crate::managers::{ManagerRegistry, PackageProvider};
use crate::managers::{bower::BowerProvider, npm::NpmProvider};
use kdl::KdlDocument;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Manager ids in registration order.
    pub managers: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            managers: vec!["npm".to_string(), "bower".to_string()],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when no
    /// path is given. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let resolved = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => default_config_file(),
        };

        match resolved {
            Some(file) if file.exists() => Self::from_file(&file),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let doc: KdlDocument = text.parse()?;
        let mut config = Self::default();

        if let Some(node) = doc.get("managers") {
            let mut managers = Vec::new();
            if let Some(children) = node.children() {
                for child in children.nodes() {
                    let name = child.name().value().to_string();
                    if managers.contains(&name) {
                        return Err(CardboardError::ConfigError(format!(
                            "Duplicate manager '{}' in config",
                            name
                        )));
                    }
                    managers.push(name);
                }
            }
            config.managers = managers;
        }

        if let Some(node) = doc.get("timeout") {
            let value = node
                .entries()
                .first()
                .and_then(|entry| entry.value().as_integer())
                .ok_or_else(|| {
                    CardboardError::ConfigError(
                        "timeout expects an integer number of seconds".to_string(),
                    )
                })?;
            config.timeout_secs = u64::try_from(value).map_err(|_| {
                CardboardError::ConfigError("timeout cannot be negative".to_string())
            })?;
        }

        Ok(config)
    }

    /// Per-backend deadline; `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }

    /// Build the manager registry in declared order.
    ///
    /// Unknown manager names fail fast here instead of surfacing later as a
    /// per-operation resolution error.
    pub fn build_registry(&self) -> Result<ManagerRegistry> {
        let mut registry = ManagerRegistry::new();

        for name in &self.managers {
            match name.as_str() {
                "npm" => registry.register("npm", || {
                    Ok(Arc::new(NpmProvider::new()) as Arc<dyn PackageProvider>)
                }),
                "bower" => registry.register("bower", || {
                    Ok(Arc::new(BowerProvider::new()) as Arc<dyn PackageProvider>)
                }),
                other => {
                    return Err(CardboardError::ConfigError(format!(
                        "Unknown manager '{}' in config",
                        other
                    )));
                }
            }
        }

        Ok(registry)
    }
}

fn default_config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "cardboard")
        .map(|dirs| dirs.config_dir().join("cardboard.kdl"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::BackendId;

    #[test]
    fn parse_preserves_manager_order() {
        let config = Config::parse(
            r#"
managers {
    bower
    npm
}
"#,
        )
        .unwrap();

        assert_eq!(config.managers, vec!["bower".to_string(), "npm".to_string()]);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let registry = config.build_registry().unwrap();
        assert_eq!(
            registry.backend_ids(),
            vec![BackendId::from("bower"), BackendId::from("npm")]
        );
    }

    #[test]
    fn parse_rejects_duplicate_managers() {
        let err = Config::parse("managers {\n npm\n npm\n}").unwrap_err();
        assert!(matches!(err, CardboardError::ConfigError(_)));
    }

    #[test]
    fn parse_reads_timeout() {
        let config = Config::parse("timeout 120").unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(120)));

        let disabled = Config::parse("timeout 0").unwrap();
        assert_eq!(disabled.timeout(), None);
    }

    #[test]
    fn parse_rejects_negative_timeout() {
        let err = Config::parse("timeout -5").unwrap_err();
        assert!(matches!(err, CardboardError::ConfigError(_)));
    }

    #[test]
    fn build_registry_rejects_unknown_manager() {
        let config = Config {
            managers: vec!["npm".to_string(), "mystery".to_string()],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };

        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, CardboardError::ConfigError(_)));
    }

    #[test]
    fn empty_managers_block_means_no_backends() {
        let config = Config::parse("managers {\n}").unwrap();
        assert!(config.managers.is_empty());
        assert!(config.build_registry().unwrap().is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.kdl");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardboard.kdl");
        std::fs::write(&path, "managers {\n npm\n}\ntimeout 5").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.managers, vec!["npm".to_string()]);
        assert_eq!(config.timeout_secs, 5);
    }
}
