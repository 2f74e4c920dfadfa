//! Demo data set
//!
//! Writes a fixed portfolio of units, tenants, payments and expenses so the
//! menus have something to browse on a fresh install.

use chrono::{Datelike, NaiveDate};

use crate::error::{RentalError, RentalResult};
use crate::models::{
    Expense, ExpenseCategory, Payment, PaymentCategory, PaymentMethod, Tenant, Unit,
};

use super::Storage;

/// Counts of records written by [`seed_demo_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub units: usize,
    pub tenants: usize,
    pub payments: usize,
    pub expenses: usize,
}

fn ymd(year: i32, month: u32, day: u32) -> RentalResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| RentalError::Config(format!("Invalid seed date {}-{}-{}", year, month, day)))
}

/// First of each month from `start` through `end` inclusive
fn month_starts(start: NaiveDate, end: NaiveDate) -> RentalResult<Vec<NaiveDate>> {
    let mut months = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    loop {
        let first = ymd(year, month, 1)?;
        if first > end {
            break;
        }
        months.push(first);
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    Ok(months)
}

/// Rent payments on a given day of every month of a tenancy
fn monthly_rent(
    tenant: &Tenant,
    amount: f64,
    day: u32,
    method: PaymentMethod,
    through: NaiveDate,
) -> RentalResult<Vec<Payment>> {
    let end = tenant.move_out_date.unwrap_or(through);
    month_starts(tenant.move_in_date, end)?
        .into_iter()
        .map(|first| {
            let paid = ymd(first.year(), first.month(), day)?;
            Ok(Payment::new(amount, paid, method, PaymentCategory::Rent, tenant.id))
        })
        .collect()
}

/// Write the demo data set
///
/// Refuses to touch existing data unless `force` is set, in which case all
/// existing records are replaced.
pub fn seed_demo_data(storage: &Storage, force: bool) -> RentalResult<SeedSummary> {
    if !force && !storage.is_empty()? {
        return Err(RentalError::Config(
            "Data already exists; rerun with --force to replace it".into(),
        ));
    }

    let oak = Unit::new(
        ymd(2019, 4, 12)?,
        "12 Oak St\nSpringfield, IL 62701",
        1150.0,
        1850.0,
        150.0,
    );
    let elm = Unit::new(
        ymd(2021, 8, 30)?,
        "9 Elm Ave\nSpringfield, IL 62704",
        980.0,
        1600.0,
        125.0,
    );
    let birch = Unit::new(
        ymd(2023, 2, 1)?,
        "1 Birch Rd\nChatham, IL 62629",
        1320.0,
        2100.0,
        200.0,
    );

    let former = Tenant::new(
        "Maria Gomez",
        "maria.gomez@example.com",
        "(217) 555-0142",
        ymd(2022, 1, 1)?,
        Some(ymd(2023, 6, 30)?),
        oak.id,
    );
    let current = Tenant::new(
        "David Chen",
        "david.chen@example.com",
        "217-555-0188",
        ymd(2023, 7, 1)?,
        None,
        oak.id,
    );
    let elm_tenant = Tenant::new(
        "Priya Patel",
        "priya.patel@example.com",
        "2175550111",
        ymd(2023, 9, 1)?,
        None,
        elm.id,
    );

    let through = ymd(2024, 6, 30)?;
    let mut payments = Vec::new();
    payments.extend(monthly_rent(&former, 1850.0, 3, PaymentMethod::Check, through)?);
    payments.extend(monthly_rent(&current, 1850.0, 1, PaymentMethod::Zelle, through)?);
    payments.extend(monthly_rent(&elm_tenant, 1600.0, 5, PaymentMethod::Venmo, through)?);
    payments.push(Payment::new(
        1850.0,
        ymd(2023, 6, 20)?,
        PaymentMethod::Check,
        PaymentCategory::SecurityDeposit,
        current.id,
    ));
    payments.push(Payment::new(
        1600.0,
        ymd(2023, 8, 25)?,
        PaymentMethod::Venmo,
        PaymentCategory::SecurityDeposit,
        elm_tenant.id,
    ));
    // one short, late month so the rollforward shows a late fee
    let short_month = ymd(2024, 2, 5)?;
    if let Some(p) = payments
        .iter_mut()
        .find(|p| p.tenant_id == elm_tenant.id && p.pmt_date == short_month)
    {
        p.amount = 1200.0;
        p.pmt_date = ymd(2024, 2, 16)?;
    }
    payments.push(Payment::new(
        125.0,
        ymd(2024, 3, 5)?,
        PaymentMethod::Cash,
        PaymentCategory::LateFee,
        elm_tenant.id,
    ));

    let mut expenses = Vec::new();
    for first in month_starts(ymd(2024, 1, 1)?, through)? {
        for unit in [&oak, &elm] {
            expenses.push(Expense::new(
                "Monthly mortgage",
                ExpenseCategory::Mortgage,
                unit.monthly_mortgage,
                first,
                unit.id,
            ));
        }
    }
    expenses.push(Expense::new(
        "Water heater replacement",
        ExpenseCategory::Repairs,
        1450.0,
        ymd(2023, 11, 14)?,
        oak.id,
    ));
    expenses.push(Expense::new(
        "Move-out cleaning",
        ExpenseCategory::Cleaning,
        320.0,
        ymd(2023, 7, 2)?,
        oak.id,
    ));
    expenses.push(Expense::new(
        "Kitchen remodel",
        ExpenseCategory::Renovations,
        8200.0,
        ymd(2023, 4, 18)?,
        birch.id,
    ));
    expenses.push(Expense::new(
        "HVAC service",
        ExpenseCategory::Maintenance,
        189.0,
        ymd(2024, 4, 9)?,
        elm.id,
    ));

    let summary = SeedSummary {
        units: 3,
        tenants: 3,
        payments: payments.len(),
        expenses: expenses.len(),
    };

    // parents first
    storage.units.replace_all(vec![oak, elm, birch])?;
    storage.tenants.replace_all(vec![former, current, elm_tenant])?;
    storage.payments.replace_all(payments)?;
    storage.expenses.replace_all(expenses)?;

    log::info!("Seeded demo data: {:?}", summary);
    Ok(summary)
}
