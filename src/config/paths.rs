//! Path management for BuzzPay
//!
//! ## Path Resolution Order
//!
//! 1. `BUZZPAY_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `buzzpay`
//!    (`~/.config/buzzpay` on Linux, `~/Library/Application Support/...` on
//!    macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BuzzPayError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUZZPAY_DATA_DIR";

/// Manages all paths used by BuzzPay
#[derive(Debug, Clone)]
pub struct BuzzPayPaths {
    /// Base directory for all BuzzPay data
    base_dir: PathBuf,
}

impl BuzzPayPaths {
    /// Create a new BuzzPayPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BuzzPayError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("co", "buzzpay", "buzzpay")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    BuzzPayError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create BuzzPayPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the local record store file
    pub fn requests_file(&self) -> PathBuf {
        self.data_dir().join("requests.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BuzzPayError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BuzzPayError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BuzzPayError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if BuzzPay has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
