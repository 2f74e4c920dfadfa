//! Configuration module for RentalCLI
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::RentalPaths;
pub use settings::Settings;
