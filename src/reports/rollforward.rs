//! Tenant payment rollforward
//!
//! Month by month from move-in until move-out (or today): what rent was
//! due, which rent payments landed in the month, whether a late fee applies,
//! and what carries forward to the next month.

use chrono::{Days, Months, NaiveDate};

use crate::error::{RentalError, RentalResult};
use crate::models::{Payment, PaymentId, PaymentMethod, Tenant, Unit};
use crate::storage::Storage;

use super::{amount, Report};

/// Smallest shortfall that counts as unpaid rent
const SHORTFALL_TOLERANCE: f64 = 0.005;

/// A rent payment counted toward one period
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedPayment {
    pub id: PaymentId,
    pub method: PaymentMethod,
    pub date: NaiveDate,
    pub amount: f64,
}

/// One month of the rollforward
#[derive(Debug, Clone, PartialEq)]
pub struct RollforwardPeriod {
    pub due_date: NaiveDate,
    pub rent_due: f64,
    /// Owed from earlier periods
    pub back_due: f64,
    pub bop_due: f64,
    pub payments: Vec<AppliedPayment>,
    pub late_fee: f64,
    pub rent_owed: f64,
    pub total_owed: f64,
    pub eop_due: f64,
}

impl RollforwardPeriod {
    pub fn rent_paid(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }
}

#[derive(Debug, Clone)]
pub struct PaymentRollforward {
    pub tenant: String,
    pub periods: Vec<RollforwardPeriod>,
}

impl PaymentRollforward {
    /// Build the rollforward for a stored tenant
    pub fn generate(
        storage: &Storage,
        tenant: &Tenant,
        today: NaiveDate,
        grace_days: u32,
    ) -> RentalResult<Self> {
        let unit = storage
            .units
            .get(tenant.unit_id)?
            .ok_or_else(|| RentalError::unit_not_found(tenant.unit_id.to_string()))?;
        let payments = storage.payments_for_tenant(tenant.id)?;
        Ok(Self::build(tenant, &unit, payments, today, grace_days))
    }

    /// Build the rollforward from already-loaded records
    ///
    /// Rent paid before the due date plus `grace_days` counts as on time.
    pub fn build(
        tenant: &Tenant,
        unit: &Unit,
        mut payments: Vec<Payment>,
        today: NaiveDate,
        grace_days: u32,
    ) -> Self {
        payments.sort_by_key(|p| p.pmt_date);
        let mut pending = payments.into_iter().peekable();

        let stop = tenant.move_out_date.unwrap_or(today);
        let mut periods = Vec::new();
        let mut back_due = 0.0;

        for month in 0.. {
            let Some(bop) = tenant.move_in_date.checked_add_months(Months::new(month)) else {
                break;
            };
            if bop >= stop {
                break;
            }
            let Some(eop) = tenant.move_in_date.checked_add_months(Months::new(month + 1)) else {
                break;
            };
            let late_from = bop
                .checked_add_days(Days::new(u64::from(grace_days) + 1))
                .unwrap_or(eop);

            let mut applied = Vec::new();
            while let Some(payment) = pending.next_if(|p| p.pmt_date < eop) {
                if payment.is_rent() {
                    applied.push(AppliedPayment {
                        id: payment.id,
                        method: payment.method,
                        date: payment.pmt_date,
                        amount: payment.amount,
                    });
                }
            }

            let rent_paid: f64 = applied.iter().map(|p| p.amount).sum();
            let paid_on_time: f64 = applied
                .iter()
                .filter(|p| p.date < late_from)
                .map(|p| p.amount)
                .sum();

            let late_fee = if unit.monthly_rent - paid_on_time > SHORTFALL_TOLERANCE {
                unit.late_fee
            } else {
                0.0
            };
            let rent_owed = unit.monthly_rent - rent_paid;
            let total_owed = late_fee + rent_owed;

            periods.push(RollforwardPeriod {
                due_date: bop,
                rent_due: unit.monthly_rent,
                back_due,
                bop_due: unit.monthly_rent + back_due,
                payments: applied,
                late_fee,
                rent_owed,
                total_owed,
                eop_due: back_due + total_owed,
            });
            back_due += total_owed;
        }

        Self {
            tenant: tenant.name.clone(),
            periods,
        }
    }

    /// Balance carried out of the last period
    pub fn balance(&self) -> f64 {
        self.periods.last().map_or(0.0, |p| p.eop_due)
    }
}

impl Report for PaymentRollforward {
    fn report_type(&self) -> &str {
        "Payments"
    }

    fn subject(&self) -> &str {
        &self.tenant
    }

    fn headers(&self) -> Vec<String> {
        [
            "Due Date",
            "Rent Due",
            "Back Due",
            "BOP Due",
            "Payments",
            "Late Fee",
            "Rent Owed",
            "Total Owed",
            "EOP Due",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.periods
            .iter()
            .map(|p| {
                let payments: Vec<String> = p
                    .payments
                    .iter()
                    .map(|a| format!("{} {} {} {}", a.id, a.method, a.date, amount(a.amount)))
                    .collect();
                vec![
                    p.due_date.to_string(),
                    amount(p.rent_due),
                    amount(p.back_due),
                    amount(p.bop_due),
                    payments.join("; "),
                    amount(p.late_fee),
                    amount(p.rent_owed),
                    amount(p.total_owed),
                    amount(p.eop_due),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentCategory;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn unit() -> Unit {
        Unit::new(date("2020-01-01"), "12 Oak St", 800.0, 1000.0, 100.0)
    }

    fn tenant(unit: &Unit, move_out: Option<&str>) -> Tenant {
        Tenant::new(
            "Jane Doe",
            "jane@example.com",
            "5555551234",
            date("2024-01-01"),
            move_out.map(date),
            unit.id,
        )
    }

    fn rent(tenant: &Tenant, amount: f64, d: &str) -> Payment {
        Payment::new(amount, date(d), PaymentMethod::Zelle, PaymentCategory::Rent, tenant.id)
    }

    #[test]
    fn test_periods_run_until_today() {
        let unit = unit();
        let tenant = tenant(&unit, None);
        let payments = vec![
            rent(&tenant, 1000.0, "2024-01-05"),
            Payment::new(
                1000.0,
                date("2024-01-02"),
                PaymentMethod::Check,
                PaymentCategory::SecurityDeposit,
                tenant.id,
            ),
            rent(&tenant, 600.0, "2024-02-05"),
            rent(&tenant, 400.0, "2024-02-20"),
        ];

        let report = PaymentRollforward::build(&tenant, &unit, payments, date("2024-03-15"), 10);
        let p = &report.periods;

        assert_eq!(p.len(), 3);

        assert_eq!(p[0].payments.len(), 1);
        assert_eq!(p[0].late_fee, 0.0);
        assert_eq!(p[0].eop_due, 0.0);

        assert_eq!(p[1].rent_paid(), 1000.0);
        assert_eq!(p[1].late_fee, 100.0);
        assert_eq!(p[1].rent_owed, 0.0);
        assert_eq!(p[1].eop_due, 100.0);

        assert_eq!(p[2].due_date, date("2024-03-01"));
        assert_eq!(p[2].back_due, 100.0);
        assert_eq!(p[2].bop_due, 1100.0);
        assert_eq!(p[2].total_owed, 1100.0);
        assert_eq!(report.balance(), 1200.0);
    }

    #[test]
    fn test_grace_window_boundary() {
        let unit = unit();
        let tenant = tenant(&unit, Some("2024-03-01"));
        let payments = vec![
            rent(&tenant, 1000.0, "2024-01-11"),
            rent(&tenant, 1000.0, "2024-02-12"),
        ];

        let report = PaymentRollforward::build(&tenant, &unit, payments, date("2030-01-01"), 10);

        assert_eq!(report.periods.len(), 2);
        assert_eq!(report.periods[0].late_fee, 0.0);
        assert_eq!(report.periods[1].late_fee, 100.0);
        assert_eq!(report.periods[1].rent_owed, 0.0);
    }

    #[test]
    fn test_move_out_stops_periods() {
        let unit = unit();
        let tenant = tenant(&unit, Some("2024-02-01"));

        let report = PaymentRollforward::build(&tenant, &unit, vec![], date("2030-01-01"), 10);

        assert_eq!(report.periods.len(), 1);
        assert_eq!(report.periods[0].total_owed, 1100.0);
    }

    #[test]
    fn test_no_periods_before_move_in() {
        let unit = unit();
        let tenant = tenant(&unit, None);

        let report = PaymentRollforward::build(&tenant, &unit, vec![], date("2023-12-01"), 10);
        assert!(report.periods.is_empty());
        assert_eq!(report.balance(), 0.0);
    }

    #[test]
    fn test_rows_list_applied_payments() {
        let unit = unit();
        let tenant = tenant(&unit, Some("2024-02-01"));
        let payment = rent(&tenant, 1000.0, "2024-01-03");
        let id = payment.id;

        let report =
            PaymentRollforward::build(&tenant, &unit, vec![payment], date("2030-01-01"), 10);
        let rows = report.rows();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][4], format!("{} zelle 2024-01-03 1000.00", id));
        assert_eq!(report.subject(), "Jane Doe");
    }
}
