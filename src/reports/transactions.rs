//! Transaction history and yearly income summary
//!
//! A transaction is either a payment received from a tenant (attributed to
//! the tenant's unit) or an expense recorded against a unit.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::RentalResult;
use crate::models::{TenantId, Unit, UnitId};
use crate::storage::Storage;

use super::{amount, DateRange, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransactionKind {
    Expense,
    Payment,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Payment => write!(f, "payment"),
        }
    }
}

/// One line of the history
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    pub unit_id: UnitId,
    pub unit: String,
}

/// Short label for a unit: the first line of its address
pub fn unit_label(unit: &Unit) -> String {
    unit.address
        .lines()
        .next()
        .unwrap_or(&unit.address)
        .trim()
        .to_string()
}

/// Payments and expenses, ordered by unit then date
#[derive(Debug, Clone)]
pub struct TransactionHistory {
    pub subject: String,
    pub range: DateRange,
    pub rows: Vec<TransactionRow>,
}

impl TransactionHistory {
    /// Collect transactions for one unit, or every unit when `unit` is `None`
    pub fn generate(storage: &Storage, unit: Option<&Unit>, range: DateRange) -> RentalResult<Self> {
        let labels: HashMap<UnitId, String> = storage
            .units
            .get_all()?
            .iter()
            .map(|u| (u.id, unit_label(u)))
            .collect();
        let tenant_units: HashMap<TenantId, UnitId> = storage
            .tenants
            .get_all()?
            .into_iter()
            .map(|t| (t.id, t.unit_id))
            .collect();

        let wanted = |unit_id: UnitId, date: NaiveDate| {
            unit.map_or(true, |u| u.id == unit_id) && range.contains(date)
        };
        let label = |unit_id: UnitId| {
            labels
                .get(&unit_id)
                .cloned()
                .unwrap_or_else(|| unit_id.to_string())
        };

        let mut rows = Vec::new();
        for expense in storage.expenses.get_all()? {
            if wanted(expense.unit_id, expense.exp_date) {
                rows.push(TransactionRow {
                    id: expense.id.to_string(),
                    kind: TransactionKind::Expense,
                    amount: expense.amount,
                    date: expense.exp_date,
                    category: expense.category.to_string(),
                    unit_id: expense.unit_id,
                    unit: label(expense.unit_id),
                });
            }
        }
        for payment in storage.payments.get_all()? {
            let Some(&unit_id) = tenant_units.get(&payment.tenant_id) else {
                log::warn!("Payment {} has no tenant on record", payment.id);
                continue;
            };
            if wanted(unit_id, payment.pmt_date) {
                rows.push(TransactionRow {
                    id: payment.id.to_string(),
                    kind: TransactionKind::Payment,
                    amount: payment.amount,
                    date: payment.pmt_date,
                    category: payment.category.to_string(),
                    unit_id,
                    unit: label(unit_id),
                });
            }
        }

        rows.sort_by(|a, b| {
            (&a.unit, a.date, a.kind, &a.id).cmp(&(&b.unit, b.date, b.kind, &b.id))
        });

        let subject = match unit {
            Some(u) => format!("Unit {}", unit_label(u)),
            None => "all units".to_string(),
        };

        Ok(Self {
            subject,
            range,
            rows,
        })
    }

    pub fn total(&self, kind: TransactionKind) -> f64 {
        self.rows
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.amount)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Calendar years that have at least one transaction, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.date.year()).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

impl Report for TransactionHistory {
    fn report_type(&self) -> &str {
        "Transactions"
    }

    fn subject(&self) -> &str {
        &self.subject
    }

    fn headers(&self) -> Vec<String> {
        ["ID", "Type", "Amount", "Date", "Category", "Unit"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.kind.to_string(),
                    amount(r.amount),
                    r.date.to_string(),
                    r.category.clone(),
                    r.unit.clone(),
                ]
            })
            .collect()
    }
}

/// Totals for one calendar year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub payments: f64,
    pub expenses: f64,
    pub net_income: f64,
}

/// Payments, expenses and net income per year
#[derive(Debug, Clone)]
pub struct TransactionSummary {
    pub subject: String,
    pub years: Vec<YearSummary>,
}

impl TransactionSummary {
    pub fn generate(storage: &Storage, unit: Option<&Unit>) -> RentalResult<Self> {
        let history = TransactionHistory::generate(storage, unit, DateRange::all())?;
        Ok(Self::from_history(&history))
    }

    pub fn from_history(history: &TransactionHistory) -> Self {
        let mut years: BTreeMap<i32, YearSummary> = BTreeMap::new();
        for row in &history.rows {
            let year = row.date.year();
            let entry = years.entry(year).or_insert(YearSummary {
                year,
                payments: 0.0,
                expenses: 0.0,
                net_income: 0.0,
            });
            match row.kind {
                TransactionKind::Payment => entry.payments += row.amount,
                TransactionKind::Expense => entry.expenses += row.amount,
            }
            entry.net_income = entry.payments - entry.expenses;
        }

        Self {
            subject: history.subject.clone(),
            years: years.into_values().collect(),
        }
    }
}

impl Report for TransactionSummary {
    fn report_type(&self) -> &str {
        "Income Summary"
    }

    fn subject(&self) -> &str {
        &self.subject
    }

    fn headers(&self) -> Vec<String> {
        ["Year", "Payments", "Expenses", "Net Income"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.years
            .iter()
            .map(|y| {
                vec![
                    y.year.to_string(),
                    amount(y.payments),
                    amount(y.expenses),
                    amount(y.net_income),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RentalPaths;
    use crate::models::{
        Expense, ExpenseCategory, Payment, PaymentCategory, PaymentMethod, Tenant,
    };
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
        oak: Unit,
        elm: Unit,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(RentalPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let oak = Unit::new(date("2019-01-01"), "12 Oak St\nSpringfield", 1000.0, 1800.0, 150.0);
        let elm = Unit::new(date("2020-01-01"), "9 Elm Ave", 900.0, 1600.0, 100.0);
        let tenant = Tenant::new(
            "Jane Doe",
            "jane@example.com",
            "5555551234",
            date("2023-01-01"),
            None,
            oak.id,
        );

        storage.units.insert(oak.clone()).unwrap();
        storage.units.insert(elm.clone()).unwrap();
        storage.tenants.insert(tenant.clone()).unwrap();
        for (amt, d) in [(1800.0, "2023-12-01"), (1800.0, "2024-01-02")] {
            storage
                .payments
                .insert(Payment::new(amt, date(d), PaymentMethod::Zelle, PaymentCategory::Rent, tenant.id))
                .unwrap();
        }
        storage
            .expenses
            .insert(Expense::new("Mortgage", ExpenseCategory::Mortgage, 1000.0, date("2024-01-01"), oak.id))
            .unwrap();
        storage
            .expenses
            .insert(Expense::new("Paint", ExpenseCategory::Repairs, 250.0, date("2023-06-15"), elm.id))
            .unwrap();

        Fixture {
            _temp_dir: temp_dir,
            storage,
            oak,
            elm,
        }
    }

    #[test]
    fn test_history_orders_by_unit_then_date() {
        let f = fixture();
        let history = TransactionHistory::generate(&f.storage, None, DateRange::all()).unwrap();

        let order: Vec<(&str, String)> = history
            .rows
            .iter()
            .map(|r| (r.unit.as_str(), r.date.to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("12 Oak St", "2023-12-01".to_string()),
                ("12 Oak St", "2024-01-01".to_string()),
                ("12 Oak St", "2024-01-02".to_string()),
                ("9 Elm Ave", "2023-06-15".to_string()),
            ]
        );
        assert_eq!(history.subject, "all units");
        assert_eq!(history.years(), vec![2023, 2024]);
    }

    #[test]
    fn test_history_for_one_unit_and_range() {
        let f = fixture();
        let range = DateRange::new(Some(date("2024-01-01")), None);
        let history = TransactionHistory::generate(&f.storage, Some(&f.oak), range).unwrap();

        assert_eq!(history.rows.len(), 2);
        assert!(history.rows.iter().all(|r| r.unit_id == f.oak.id));
        assert_eq!(history.total(TransactionKind::Payment), 1800.0);
        assert_eq!(history.total(TransactionKind::Expense), 1000.0);
        assert_eq!(history.subject, "Unit 12 Oak St");

        let elm = TransactionHistory::generate(&f.storage, Some(&f.elm), range).unwrap();
        assert!(elm.is_empty());
    }

    #[test]
    fn test_summary_per_year() {
        let f = fixture();
        let summary = TransactionSummary::generate(&f.storage, None).unwrap();

        assert_eq!(summary.years.len(), 2);
        let y2023 = summary.years[0];
        assert_eq!(y2023.year, 2023);
        assert_eq!(y2023.payments, 1800.0);
        assert_eq!(y2023.expenses, 250.0);
        assert_eq!(y2023.net_income, 1550.0);
        assert_eq!(summary.years[1].net_income, 800.0);
    }

    #[test]
    fn test_report_rows_match_headers() {
        let f = fixture();
        let history = TransactionHistory::generate(&f.storage, None, DateRange::all()).unwrap();
        let width = history.headers().len();
        assert!(history.rows().iter().all(|r| r.len() == width));
        assert_eq!(history.rows()[0][1], "payment");
        assert_eq!(history.rows()[0][2], "1800.00");
    }
}
