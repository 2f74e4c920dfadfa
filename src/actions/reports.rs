//! Report actions
//!
//! Each report screen builds its report, shows it as a table and offers
//! to save it as CSV in the outputs folder.

use crate::console::Tone;
use crate::error::RentalResult;
use crate::export;
use crate::menu::{FieldEntry, NavCommand, Next, Procedure, Session};
use crate::models::{Tenant, Unit};
use crate::reports::{
    DateRange, PaymentRollforward, Report, RevenueReport, TransactionHistory, TransactionSummary,
};
use crate::validation;

/// Which units a transaction report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    SelectedUnit,
    AllUnits,
}

/// Unit a scoped report covers; the outer `None` means one was required but none is selected
fn scoped_unit(scope: ReportScope, session: &Session<'_>) -> RentalResult<Option<Option<Unit>>> {
    Ok(match scope {
        ReportScope::AllUnits => Some(None),
        ReportScope::SelectedUnit => session.selected::<Unit>()?.map(Some),
    })
}

fn missing_selection(session: &mut Session<'_>, what: &str) -> RentalResult<Option<Next>> {
    session.say(Tone::Error, &format!("No {} selected.", what))?;
    session.continue_message()?;
    Ok(Some(Next::Command(NavCommand::GoBack)))
}

/// Ask for optional start and end dates
///
/// Blank answers leave that end of the range open. `None` means the user
/// cancelled.
pub fn prompt_date_range(session: &mut Session<'_>) -> RentalResult<Option<DateRange>> {
    session.page_header("Enter Date Range", Some("Enter date range to filter data"))?;
    session.cancellation_directions()?;
    session.directions("Press Enter to bypass date filters")?;
    session.blank_line()?;

    let mut bounds = [None, None];
    for (bound, name) in bounds.iter_mut().zip(["start date", "end date"]) {
        match session.prompt_field(name, &validation::OPTIONAL_DATE)? {
            FieldEntry::Value(value) => *bound = value.as_date(),
            FieldEntry::Cancelled => return Ok(None),
        }
    }

    let [start, end] = bounds;
    Ok(Some(DateRange::new(start, end)))
}

/// Print a report under its header
fn show<R: Report>(session: &mut Session<'_>, report: &R, filter: Option<String>) -> RentalResult<()> {
    let subheader = format!("For {} as of {}", report.subject(), session.today());
    session.page_header(report.report_type(), Some(&subheader))?;
    if let Some(filter) = filter {
        session.say(Tone::Direction, &format!("Date filter applied: {}", filter))?;
        session.blank_line()?;
    }
    session.say(Tone::Plain, &report.format_terminal())?;
    session.blank_line()
}

/// Save a report to the outputs folder and say where it went
fn export_report<R: Report>(session: &mut Session<'_>, report: &R) -> RentalResult<()> {
    let outputs = session.storage.paths().outputs_dir();
    match export::save_report(report, &outputs, session.today()) {
        Ok(path) => session.output_message(&path),
        Err(e) => {
            log::error!("Failed to export {} report: {}", report.report_type(), e);
            session.say(Tone::Error, &format!("Could not export report: {}", e))
        }
    }
}

/// Show a report, then offer the CSV export
fn present<R: Report>(session: &mut Session<'_>, report: &R, filter: Option<String>) -> RentalResult<()> {
    show(session, report, filter)?;
    session.run_if_confirmed("Print data to CSV in outputs folder?", |s| export_report(s, report))?;
    session.continue_message()
}

/// Every payment and expense in a date range
#[derive(Debug, Clone, Copy)]
pub struct ShowTransactionHistory(pub ReportScope);

impl Procedure for ShowTransactionHistory {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        let Some(unit) = scoped_unit(self.0, session)? else {
            return missing_selection(session, "unit");
        };
        let Some(range) = prompt_date_range(session)? else {
            return Ok(None);
        };

        let report = TransactionHistory::generate(session.storage, unit.as_ref(), range)?;
        present(session, &report, range.describe())?;
        Ok(None)
    }
}

/// Yearly payments, expenses and net income
#[derive(Debug, Clone, Copy)]
pub struct ShowTransactionSummary(pub ReportScope);

impl Procedure for ShowTransactionSummary {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        let Some(unit) = scoped_unit(self.0, session)? else {
            return missing_selection(session, "unit");
        };

        let report = TransactionSummary::generate(session.storage, unit.as_ref())?;
        present(session, &report, None)?;
        Ok(None)
    }
}

/// Month-by-month rent owed and paid by the selected tenant
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowRollforward;

impl Procedure for ShowRollforward {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        let Some(tenant) = session.selected::<Tenant>()? else {
            return missing_selection(session, "tenant");
        };

        let report = PaymentRollforward::generate(
            session.storage,
            &tenant,
            session.today(),
            session.settings.rent_grace_days,
        )?;
        present(session, &report, None)?;
        Ok(None)
    }
}

/// Monthly income and expenses for one calendar year
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateRevenueReport;

impl Procedure for GenerateRevenueReport {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        let years = RevenueReport::available_years(session.storage)?;
        if years.is_empty() {
            session.say(Tone::Error, "No transactions recorded yet.")?;
            session.continue_message()?;
            return Ok(None);
        }

        let options: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        let index = session
            .console
            .pick("Select Year from options below", &options)?;
        let Some(&year) = years.get(index) else {
            return Ok(None);
        };

        session.page_header(
            "Revenue Report",
            Some(&format!("For the {} calendar year", year)),
        )?;
        let created = session.run_if_confirmed(&format!("Create revenue report for {}?", year), |s| {
            let report = RevenueReport::generate(s.storage, year)?;
            show(s, &report, None)?;
            export_report(s, &report)
        })?;
        if created {
            session.continue_message()?;
        }
        Ok(None)
    }
}
