//! Reports module for RentalCLI
//!
//! Transaction history and yearly summary, tenant payment rollforward, and
//! the monthly revenue report. Every report renders as a terminal table and
//! exports to CSV.

pub mod revenue;
pub mod rollforward;
pub mod transactions;

pub use revenue::{MonthRevenue, RevenueReport};
pub use rollforward::{AppliedPayment, PaymentRollforward, RollforwardPeriod};
pub use transactions::{
    TransactionHistory, TransactionKind, TransactionRow, TransactionSummary, YearSummary,
};

use std::io::Write;

use chrono::NaiveDate;

use crate::display;
use crate::error::RentalResult;
use crate::export;

/// A report that can be shown as a table
pub trait Report {
    /// Kind of report, e.g. "Transactions"
    fn report_type(&self) -> &str;

    /// Who or what the report covers, e.g. "all units"
    fn subject(&self) -> &str;

    fn headers(&self) -> Vec<String>;

    fn rows(&self) -> Vec<Vec<String>>;

    fn format_terminal(&self) -> String {
        display::format_table(&self.headers(), &self.rows())
    }

    fn export_csv<W: Write>(&self, writer: W) -> RentalResult<()> {
        export::write_csv(writer, &self.headers(), &self.rows())
    }
}

/// Inclusive date bounds; either end may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// Human-readable form of the filter, `None` when unbounded
    pub fn describe(&self) -> Option<String> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some(format!("{} to {}", s, e)),
            (None, Some(e)) => Some(format!("before or on {}", e)),
            (Some(s), None) => Some(format!("on or after {}", s)),
            (None, None) => None,
        }
    }
}

pub(crate) fn amount(value: f64) -> String {
    format!("{:.2}", value)
}
