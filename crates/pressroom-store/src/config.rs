//! Store configuration
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables. All fields have defaults suitable for local runs: snapshots
//! land in `./releases/` with a 5 second I/O bound.
//!
//! | Env Var                     | Effect                                   |
//! |-----------------------------|------------------------------------------|
//! | `PRESSROOM_BACKEND`         | `filesystem`, `object` or `memory`       |
//! | `PRESSROOM_ROOT`            | filesystem root directory                |
//! | `PRESSROOM_OBJECT_ENDPOINT` | object store base URL                    |
//! | `PRESSROOM_OBJECT_BUCKET`   | object store bucket                      |
//! | `PRESSROOM_TIMEOUT_MS`      | per-operation I/O bound in milliseconds   |

use crate::backend::{FsBackend, HttpObjectClient, MemoryObjectClient, ObjectStoreBackend};
use crate::errors::Result;
use crate::snapshot::SnapshotStore;
use pressroom_core::errors::{ExError, ExErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_BACKEND: &str = "PRESSROOM_BACKEND";
pub const ENV_ROOT: &str = "PRESSROOM_ROOT";
pub const ENV_OBJECT_ENDPOINT: &str = "PRESSROOM_OBJECT_ENDPOINT";
pub const ENV_OBJECT_BUCKET: &str = "PRESSROOM_OBJECT_BUCKET";
pub const ENV_TIMEOUT_MS: &str = "PRESSROOM_TIMEOUT_MS";

pub const DEFAULT_ROOT: &str = ".";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Which storage variant backs the snapshot store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    Filesystem { root: PathBuf },
    Object { endpoint: String, bucket: String },
    Memory,
}

impl BackendConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            BackendConfig::Filesystem { .. } => "filesystem",
            BackendConfig::Object { .. } => "object",
            BackendConfig::Memory => "memory",
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Filesystem {
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: BackendConfig,
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

fn config_error(operation: &str, message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op(operation.to_string())
        .with_message(message)
}

impl StoreConfig {
    /// # Errors
    ///
    /// Returns `ExErrorKind::Config` for malformed TOML or invalid values.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(raw)
            .map_err(|e| config_error("config_parse", format!("Invalid store config: {}", e)))?;
        config.validated()
    }

    /// File (if given) then process environment.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Config` if the file cannot be read or parsed, or
    /// an override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    config_error(
                        "config_load",
                        format!("Cannot read {}: {}", path.display(), e),
                    )
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `PRESSROOM_*` overrides resolved through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Config` for an unknown backend kind, an object
    /// backend without endpoint or bucket, or an invalid timeout.
    pub fn with_overrides<F>(self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = lookup(ENV_BACKEND).unwrap_or_else(|| self.backend.kind().to_string());

        let backend = match kind.as_str() {
            "filesystem" => {
                let current = match &self.backend {
                    BackendConfig::Filesystem { root } => Some(root.clone()),
                    _ => None,
                };
                let root = lookup(ENV_ROOT)
                    .map(PathBuf::from)
                    .or(current)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
                BackendConfig::Filesystem { root }
            }
            "object" => {
                let (current_endpoint, current_bucket) = match &self.backend {
                    BackendConfig::Object { endpoint, bucket } => {
                        (Some(endpoint.clone()), Some(bucket.clone()))
                    }
                    _ => (None, None),
                };
                let endpoint = lookup(ENV_OBJECT_ENDPOINT)
                    .or(current_endpoint)
                    .ok_or_else(|| {
                        config_error(
                            "config_env",
                            format!("object backend requires {}", ENV_OBJECT_ENDPOINT),
                        )
                    })?;
                let bucket = lookup(ENV_OBJECT_BUCKET).or(current_bucket).ok_or_else(|| {
                    config_error(
                        "config_env",
                        format!("object backend requires {}", ENV_OBJECT_BUCKET),
                    )
                })?;
                BackendConfig::Object { endpoint, bucket }
            }
            "memory" => BackendConfig::Memory,
            other => {
                return Err(config_error(
                    "config_env",
                    format!(
                        "{}='{}' (expected filesystem, object or memory)",
                        ENV_BACKEND, other
                    ),
                ))
            }
        };

        let timeout_ms = match lookup(ENV_TIMEOUT_MS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                config_error(
                    "config_env",
                    format!("{} must be a whole number of milliseconds", ENV_TIMEOUT_MS),
                )
            })?,
            None => self.timeout_ms,
        };

        Self {
            backend,
            timeout_ms,
        }
        .validated()
    }

    fn validated(self) -> Result<Self> {
        if self.timeout_ms == 0 {
            return Err(config_error("config_validate", "timeout_ms must be positive"));
        }
        if let BackendConfig::Object { endpoint, bucket } = &self.backend {
            if endpoint.is_empty() || bucket.is_empty() {
                return Err(config_error(
                    "config_validate",
                    "object backend requires a non-empty endpoint and bucket",
                ));
            }
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Build the snapshot store selected by `config`.
///
/// # Errors
///
/// Returns `ExErrorKind::Config` if the selected backend cannot be constructed.
pub fn open_store(config: &StoreConfig) -> Result<SnapshotStore> {
    let store = match &config.backend {
        BackendConfig::Filesystem { root } => {
            SnapshotStore::new(FsBackend::new(root), config.timeout())
        }
        BackendConfig::Object { endpoint, bucket } => SnapshotStore::new(
            ObjectStoreBackend::new(HttpObjectClient::new(endpoint.as_str(), bucket.as_str())?),
            config.timeout(),
        ),
        BackendConfig::Memory => SnapshotStore::new(
            ObjectStoreBackend::new(MemoryObjectClient::new()),
            config.timeout(),
        ),
    };

    tracing::info!(
        backend = store.backend_name(),
        timeout_ms = config.timeout_ms,
        "Opened snapshot store"
    );
    Ok(store)
}
