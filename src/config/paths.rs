//! Path management for RentalCLI
//!
//! ## Path Resolution Order
//!
//! 1. `RENTAL_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/rental-cli` on Linux,
//!    `~/Library/Application Support/rental-cli` on macOS,
//!    `%APPDATA%\rental-cli` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::RentalError;

/// Manages all paths used by RentalCLI
#[derive(Debug, Clone)]
pub struct RentalPaths {
    /// Base directory for all RentalCLI data
    base_dir: PathBuf,
}

impl RentalPaths {
    /// Create a new RentalPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, RentalError> {
        let base_dir = if let Ok(custom) = std::env::var("RENTAL_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create RentalPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory CSV exports are written to (<base>/outputs/)
    pub fn outputs_dir(&self) -> PathBuf {
        self.base_dir.join("outputs")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the diagnostic log
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("rental.log")
    }

    pub fn units_file(&self) -> PathBuf {
        self.data_dir().join("units.json")
    }

    pub fn tenants_file(&self) -> PathBuf {
        self.data_dir().join("tenants.json")
    }

    pub fn payments_file(&self) -> PathBuf {
        self.data_dir().join("payments.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), RentalError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RentalError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RentalError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.outputs_dir())
            .map_err(|e| RentalError::Io(format!("Failed to create outputs directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, RentalError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| RentalError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("rental-cli"))
}
