//! Display formatting for terminal output
//!
//! Report tables and record listings shown between menu screens.

pub mod table;

pub use table::{format_records, format_table};
