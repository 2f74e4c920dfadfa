//! Revenue report for one calendar year
//!
//! Income and expenses across every unit, month by month, with year totals.

use chrono::{Datelike, NaiveDate};

use crate::error::RentalResult;
use crate::storage::Storage;

use super::transactions::{TransactionHistory, TransactionKind};
use super::{amount, DateRange, Report};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthRevenue {
    /// 1 = January
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
}

impl MonthRevenue {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }

    pub fn name(&self) -> String {
        NaiveDate::from_ymd_opt(2000, self.month, 1)
            .map(|d| d.format("%B").to_string())
            .unwrap_or_else(|| self.month.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RevenueReport {
    pub year: i32,
    subject: String,
    /// Always twelve entries, January first
    pub months: Vec<MonthRevenue>,
}

impl RevenueReport {
    /// Years with at least one transaction, ascending
    pub fn available_years(storage: &Storage) -> RentalResult<Vec<i32>> {
        Ok(TransactionHistory::generate(storage, None, DateRange::all())?.years())
    }

    pub fn generate(storage: &Storage, year: i32) -> RentalResult<Self> {
        let history = TransactionHistory::generate(storage, None, DateRange::all())?;
        Ok(Self::from_history(&history, year))
    }

    pub fn from_history(history: &TransactionHistory, year: i32) -> Self {
        let mut months: Vec<MonthRevenue> = (1..=12)
            .map(|month| MonthRevenue {
                month,
                income: 0.0,
                expenses: 0.0,
            })
            .collect();

        for row in history.rows.iter().filter(|r| r.date.year() == year) {
            let entry = &mut months[row.date.month0() as usize];
            match row.kind {
                TransactionKind::Payment => entry.income += row.amount,
                TransactionKind::Expense => entry.expenses += row.amount,
            }
        }

        Self {
            year,
            subject: year.to_string(),
            months,
        }
    }

    pub fn total_income(&self) -> f64 {
        self.months.iter().map(|m| m.income).sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.months.iter().map(|m| m.expenses).sum()
    }

    pub fn net_income(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }
}

impl Report for RevenueReport {
    fn report_type(&self) -> &str {
        "Revenue Report"
    }

    fn subject(&self) -> &str {
        &self.subject
    }

    fn headers(&self) -> Vec<String> {
        ["Month", "Income", "Expenses", "Net Income"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = self
            .months
            .iter()
            .map(|m| {
                vec![
                    m.name(),
                    amount(m.income),
                    amount(m.expenses),
                    amount(m.net()),
                ]
            })
            .collect();
        rows.push(vec![
            "Total".to_string(),
            amount(self.total_income()),
            amount(self.total_expenses()),
            amount(self.net_income()),
        ]);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RentalPaths;
    use crate::storage::seed_demo_data;
    use tempfile::TempDir;

    fn seeded() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(RentalPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        seed_demo_data(&storage, false).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_months_and_totals() {
        let (_temp_dir, storage) = seeded();
        let report = RevenueReport::generate(&storage, 2024).unwrap();

        assert_eq!(report.months.len(), 12);
        assert_eq!(report.months[0].name(), "January");

        // two mortgages per month in 2024
        assert_eq!(report.months[0].expenses, 1150.0 + 980.0);
        // rent from David Chen and Priya Patel
        assert_eq!(report.months[0].income, 1850.0 + 1600.0);
        assert_eq!(report.months[11].income, 0.0);

        let expected: f64 = report.months.iter().map(|m| m.net()).sum();
        assert!((report.net_income() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rows_end_with_total() {
        let (_temp_dir, storage) = seeded();
        let report = RevenueReport::generate(&storage, 2024).unwrap();
        let rows = report.rows();

        assert_eq!(rows.len(), 13);
        assert_eq!(rows[12][0], "Total");
        assert_eq!(report.subject(), "2024");
    }

    #[test]
    fn test_available_years() {
        let (_temp_dir, storage) = seeded();
        let years = RevenueReport::available_years(&storage).unwrap();
        assert_eq!(years.first(), Some(&2022));
        assert!(years.contains(&2023));
        assert!(years.contains(&2024));
        assert!(years.windows(2).all(|w| w[0] < w[1]));
    }
}
