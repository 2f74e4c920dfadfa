//! Menu actions
//!
//! The procedures attached to menu nodes: selecting, adding, updating and
//! deleting records, and producing reports.

pub mod records;
pub mod reports;

pub use records::{
    AddRecord, ClearSelection, DeleteSelected, Managed, OwnerLookup, SelectRecord,
    UpdateSelected,
};
pub use reports::{
    prompt_date_range, GenerateRevenueReport, ReportScope, ShowRollforward,
    ShowTransactionHistory, ShowTransactionSummary,
};
