//! User settings for RentalCLI
//!
//! Manages user preferences: the rent grace period and the default tenant
//! filter.

use serde::{Deserialize, Serialize};

use super::paths::RentalPaths;
use crate::error::RentalError;

/// User settings for RentalCLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Days after the due date a rent payment still counts as on time
    #[serde(default = "default_grace_days")]
    pub rent_grace_days: u32,

    /// Whether tenant selection offers "active tenants only" first
    #[serde(default = "default_active_only")]
    pub active_tenants_only: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_grace_days() -> u32 {
    10
}

fn default_active_only() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            rent_grace_days: default_grace_days(),
            active_tenants_only: default_active_only(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &RentalPaths) -> Result<Self, RentalError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                RentalError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RentalError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RentalPaths) -> Result<(), RentalError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            RentalError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            RentalError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
