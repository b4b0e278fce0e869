//! Path management for stacks-cli
//!
//! Provides XDG-compliant path resolution for data files and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `STACKS_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/stacks-cli` or `~/.config/stacks-cli`
//! 3. Windows: `%APPDATA%\stacks-cli`

use std::path::PathBuf;

use crate::error::CatalogError;

/// Manages all paths used by stacks-cli
#[derive(Debug, Clone)]
pub struct StacksPaths {
    /// Base directory for all stacks-cli data
    base_dir: PathBuf,
}

impl StacksPaths {
    /// Create a new StacksPaths instance
    ///
    /// Path resolution:
    /// 1. `STACKS_CLI_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/stacks-cli` or `~/.config/stacks-cli`
    /// 3. Windows: `%APPDATA%\stacks-cli`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CatalogError> {
        let base_dir = if let Ok(custom) = std::env::var("STACKS_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create StacksPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/stacks-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/stacks-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (~/.config/stacks-cli/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to books.json
    pub fn books_file(&self) -> PathBuf {
        self.data_dir().join("books.json")
    }

    /// Get the path to borrow_records.json
    ///
    /// Reserved for a lending workflow that does not exist yet; the file is
    /// never read or written, only copied by the backup step when present.
    pub fn borrow_records_file(&self) -> PathBuf {
        self.data_dir().join("borrow_records.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/stacks-cli/)
    /// - Data directory (~/.config/stacks-cli/data/)
    /// - Backup directory (~/.config/stacks-cli/backups/)
    pub fn ensure_directories(&self) -> Result<(), CatalogError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CatalogError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CatalogError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| CatalogError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CatalogError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("stacks-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CatalogError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CatalogError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("stacks-cli"))
}
