//! Service layer for RentalCLI
//!
//! Business operations on top of the storage layer: every create, update
//! and delete goes through here so it is committed and audited the same way.

pub mod records;

pub use records::RecordService;
