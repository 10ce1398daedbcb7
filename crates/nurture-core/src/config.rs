//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default HTTP port, kept clear of the companion web backend.
pub const DEFAULT_PORT: u16 = 5002;

/// Paths to all Nurture data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Per-user journal records (`data/journals/`).
    pub journals: PathBuf,
    /// Generation backend configuration (`data/backend-config.json`).
    pub backend_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            journals: root.join("journals"),
            backend_config_file: root.join("backend-config.json"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.journals)?;
        Ok(())
    }
}

/// Top-level Nurture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurtureConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
}

impl NurtureConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_paths = DataPaths::new(data_dir)?;
        debug!("Journals stored under {}", data_paths.journals.display());

        Ok(Self { port, data_paths })
    }
}
