//! Append-only audit trail for RentalCLI
//!
//! Every create, update and delete of a unit, tenant, payment or expense is
//! written as one JSON line to `audit.log`, with the record before and after
//! the change and a short field-level diff for updates.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
