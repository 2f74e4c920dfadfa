//! RentalCLI - Terminal-based rental property manager
//!
//! This library provides the core functionality for the RentalCLI
//! application: rental units, their tenants, the payments those tenants make
//! and the expenses each unit incurs, managed through nested terminal menus.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `validation`: Field validators used by every prompt
//! - `models`: Units, tenants, payments and expenses
//! - `storage`: JSON file storage layer
//! - `services`: Create / update / delete with auditing
//! - `audit`: Audit logging system
//! - `console`: Terminal and scripted user interaction
//! - `menu`: Menu tree, navigation loop and interactive record flows
//! - `actions`: Procedures attached to menu entries
//! - `builder`: The application's menu tree
//! - `reports`, `display`, `export`: Report generation, tables and CSV
//!
//! # Example
//!
//! ```rust,ignore
//! use rental_cli::config::{RentalPaths, Settings};
//! use rental_cli::console::TerminalConsole;
//! use rental_cli::menu::{Navigator, Session};
//! use rental_cli::storage::Storage;
//!
//! let paths = RentalPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let mut console = TerminalConsole::new();
//! let mut session = Session::new(&mut console, &storage, &settings);
//! Navigator::new(rental_cli::builder::build_menu()?)?.run(&mut session)?;
//! ```

pub mod actions;
pub mod audit;
pub mod builder;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod export;
pub mod menu;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{RentalError, RentalResult};
