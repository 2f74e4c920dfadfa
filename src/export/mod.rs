//! Export module for RentalCLI
//!
//! Writes report tables to CSV files in the outputs directory.

pub mod csv;

pub use self::csv::{report_file_name, save_report, write_csv};
