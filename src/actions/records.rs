//! Record actions
//!
//! Generic select / add / update / delete procedures. What differs per
//! record type (which records are offered, who owns a new one) lives in
//! the [`Managed`] trait.

use std::marker::PhantomData;

use crate::console::Tone;
use crate::error::{RentalError, RentalResult};
use crate::menu::{NavCommand, Next, Owner, Procedure, Role, Selectable, Session};
use crate::models::{Expense, Payment, Tenant, Unit};

/// Who a new record will belong to
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerLookup {
    /// Top-level record
    Standalone,
    Owned(Owner),
    /// No owner available; the message tells the user what to do first
    Missing(String),
    Cancelled,
}

/// Record types the menus can select and create
pub trait Managed: Selectable {
    /// Records offered by a selection screen
    fn candidates(session: &mut Session<'_>) -> RentalResult<Vec<Self>>;

    /// Owner for a new record
    fn owner(session: &mut Session<'_>) -> RentalResult<OwnerLookup>;
}

impl Managed for Unit {
    fn candidates(session: &mut Session<'_>) -> RentalResult<Vec<Self>> {
        session.records().list::<Unit>()
    }

    fn owner(_session: &mut Session<'_>) -> RentalResult<OwnerLookup> {
        Ok(OwnerLookup::Standalone)
    }
}

impl Managed for Tenant {
    fn candidates(session: &mut Session<'_>) -> RentalResult<Vec<Self>> {
        let options: Vec<String> = if session.settings.active_tenants_only {
            vec!["Yes".into(), "No".into()]
        } else {
            vec!["No".into(), "Yes".into()]
        };
        let index = session
            .console
            .pick("Filter on Active Tenants Only?", &options)?;
        let active_only = options.get(index).is_some_and(|o| o == "Yes");

        session
            .records()
            .tenants(session.selection.unit, active_only, session.today())
    }

    /// The selected unit, or one picked from all units
    fn owner(session: &mut Session<'_>) -> RentalResult<OwnerLookup> {
        if let Some(unit) = session.selected::<Unit>()? {
            return Ok(OwnerLookup::Owned(Owner::of(&unit)));
        }

        let units = session.records().list::<Unit>()?;
        if units.is_empty() {
            return Ok(OwnerLookup::Missing(
                "Add a unit before adding tenants.".into(),
            ));
        }

        let mut options: Vec<String> = units.iter().map(|u| u.to_string()).collect();
        options.push("exit".into());
        let index = session.console.pick("Select Unit", &options)?;
        Ok(match units.get(index) {
            Some(unit) => OwnerLookup::Owned(Owner::of(unit)),
            None => OwnerLookup::Cancelled,
        })
    }
}

impl Managed for Payment {
    fn candidates(session: &mut Session<'_>) -> RentalResult<Vec<Self>> {
        match session.selection.tenant {
            Some(tenant_id) => session.storage.payments_for_tenant(tenant_id),
            None => Ok(Vec::new()),
        }
    }

    fn owner(session: &mut Session<'_>) -> RentalResult<OwnerLookup> {
        Ok(match session.selected::<Tenant>()? {
            Some(tenant) => OwnerLookup::Owned(Owner::of(&tenant)),
            None => OwnerLookup::Missing("Select a tenant before adding payments.".into()),
        })
    }
}

impl Managed for Expense {
    fn candidates(session: &mut Session<'_>) -> RentalResult<Vec<Self>> {
        match session.selection.unit {
            Some(unit_id) => session.storage.expenses_for_unit(unit_id),
            None => Ok(Vec::new()),
        }
    }

    fn owner(session: &mut Session<'_>) -> RentalResult<OwnerLookup> {
        Ok(match session.selected::<Unit>()? {
            Some(unit) => OwnerLookup::Owned(Owner::of(&unit)),
            None => OwnerLookup::Missing("Select a unit before adding expenses.".into()),
        })
    }
}

/// Tell the user nothing is selected and step back
fn nothing_selected<T: Selectable>(session: &mut Session<'_>) -> RentalResult<Option<Next>> {
    session.say(Tone::Error, &format!("No {} selected.", T::NAME.to_lowercase()))?;
    session.continue_message()?;
    Ok(Some(Next::Command(NavCommand::GoBack)))
}

/// Pick one record and make it the current selection
pub struct SelectRecord<T>(PhantomData<fn() -> T>);

impl<T> SelectRecord<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for SelectRecord<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Managed> Procedure for SelectRecord<T> {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        let records = T::candidates(session)?;

        if records.is_empty() {
            session.say(
                Tone::Error,
                &format!("No {} records available.", T::NAME.to_lowercase()),
            )?;
            session.continue_message()?;
            let next = match session.last_menu() {
                Some(menu) => Next::Node(menu),
                None => Next::Command(NavCommand::ReturnToRoot),
            };
            return Ok(Some(next));
        }

        let options: Vec<String> = records.iter().map(|r| r.to_string()).collect();
        let index = session
            .console
            .pick(&format!("Select {} from options below", T::NAME), &options)?;
        let record = records.get(index).ok_or_else(|| {
            RentalError::Config(format!("No {} at position {}", T::NAME, index))
        })?;

        log::debug!("Selected {} {}", T::NAME, record.id());
        T::select(&mut session.selection, record.id());
        Ok(None)
    }
}

/// Prompt for a new record and save it
pub struct AddRecord<T>(PhantomData<fn() -> T>);

impl<T> AddRecord<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for AddRecord<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Managed> Procedure for AddRecord<T> {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        let owner = match T::owner(session)? {
            OwnerLookup::Standalone => None,
            OwnerLookup::Owned(owner) => Some(owner),
            OwnerLookup::Missing(message) => {
                session.say(Tone::Error, &message)?;
                session.continue_message()?;
                return Ok(None);
            }
            OwnerLookup::Cancelled => return Ok(None),
        };

        let Some(fields) = session.new_item::<T>(owner.as_ref())? else {
            log::debug!("Add {} abandoned", T::NAME);
            return Ok(None);
        };

        let result = T::from_fields(&fields).and_then(|record| session.records().create(record));
        match result {
            Ok(saved) => {
                session.say(Tone::Success, "The following record was successfully added:")?;
                session.say(Tone::Plain, &saved.to_string())?;
                session.continue_message()?;
            }
            Err(e) => session.report_failure(&format!("save {}", T::NAME.to_lowercase()), &e)?,
        }
        Ok(None)
    }
}

/// Edit the selected record and save it on confirmation
pub struct UpdateSelected<T>(PhantomData<fn() -> T>);

impl<T> UpdateSelected<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for UpdateSelected<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Managed> Procedure for UpdateSelected<T> {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        let Some(mut record) = session.selected::<T>()? else {
            return nothing_selected::<T>(session);
        };

        session.page_header(&format!("Update {}", T::NAME), Some(&record.to_string()))?;
        session.cancellation_directions()?;
        session.blank_line()?;

        session.update_item(&mut record)?;

        session.blank_line()?;
        session.say(Tone::Subheading, &format!("Updated: {}", record))?;
        session.run_if_confirmed("Save changes?", |s| {
            match s.records().update(record) {
                Ok(saved) => {
                    s.say(Tone::Success, "The following record was successfully saved:")?;
                    s.say(Tone::Plain, &saved.to_string())?;
                    s.continue_message()
                }
                Err(e) => s.report_failure(&format!("update {}", T::NAME.to_lowercase()), &e),
            }
        })?;
        Ok(None)
    }
}

/// Delete the selected record, and everything it owns, on confirmation
///
/// Always steps back afterwards: the menu this was reached from is about
/// the record that may no longer exist.
pub struct DeleteSelected<T>(PhantomData<fn() -> T>);

impl<T> DeleteSelected<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for DeleteSelected<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Managed> Procedure for DeleteSelected<T> {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        let Some(record) = session.selected::<T>()? else {
            return nothing_selected::<T>(session);
        };

        session.page_header(&format!("Delete {} Record", T::NAME), Some(&record.to_string()))?;
        session.run_if_confirmed("Confirm delete?", |s| {
            match s.records().delete::<T>(record.id()) {
                Ok(removed) => {
                    s.selection.clear(T::ROLE);
                    s.say(Tone::Success, "The following record was successfully deleted:")?;
                    s.say(Tone::Plain, &removed.to_string())?;
                    s.continue_message()
                }
                Err(e) => s.report_failure(&format!("delete {}", T::NAME.to_lowercase()), &e),
            }
        })?;
        Ok(Some(Next::Command(NavCommand::GoBack)))
    }
}

/// Forget the selection for a role on entry
#[derive(Debug, Clone, Copy)]
pub struct ClearSelection(pub Role);

impl Procedure for ClearSelection {
    fn run(&self, session: &mut Session<'_>) -> RentalResult<Option<Next>> {
        session.selection.clear(self.0);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RentalPaths, Settings};
    use crate::console::scripted::{choose, typed, Answer, ScriptedConsole};
    use crate::menu::{MenuTree, SUBMIT_CHANGES};
    use crate::models::{PaymentCategory, PaymentMethod};
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
        unit: Unit,
        current: Tenant,
        former: Tenant,
        payment: Payment,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(RentalPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let unit = Unit::new(date("2020-01-01"), "12 Oak St", 1000.0, 1800.0, 150.0);
        let current = Tenant::new(
            "Jane Doe",
            "jane@example.com",
            "555-555-1234",
            date("2023-07-01"),
            None,
            unit.id,
        );
        let former = Tenant::new(
            "Sam Roe",
            "sam@example.com",
            "555-555-9876",
            date("2021-01-01"),
            Some(date("2023-06-30")),
            unit.id,
        );
        let payment = Payment::new(
            1800.0,
            date("2024-01-02"),
            PaymentMethod::Zelle,
            PaymentCategory::Rent,
            current.id,
        );

        storage.units.insert(unit.clone()).unwrap();
        storage.tenants.insert(current.clone()).unwrap();
        storage.tenants.insert(former.clone()).unwrap();
        storage.payments.insert(payment.clone()).unwrap();

        Fixture {
            _temp_dir: temp_dir,
            storage,
            unit,
            current,
            former,
            payment,
        }
    }

    fn run<P: Procedure>(
        storage: &Storage,
        procedure: &P,
        prepare: impl FnOnce(&mut Session<'_>),
        answers: Vec<Answer>,
    ) -> (RentalResult<Option<Next>>, crate::menu::Selection, ScriptedConsole) {
        let settings = Settings::default();
        let mut console = ScriptedConsole::new(answers);
        let (result, selection) = {
            let mut session = Session::new(&mut console, storage, &settings)
                .with_today(date("2024-07-01"));
            prepare(&mut session);
            let result = procedure.run(&mut session);
            (result, session.selection.clone())
        };
        (result, selection, console)
    }

    #[test]
    fn test_select_unit() {
        let f = fixture();
        let (result, selection, console) =
            run(&f.storage, &SelectRecord::<Unit>::new(), |_| {}, vec![Answer::Index(0)]);

        assert_eq!(result.unwrap(), None);
        assert_eq!(selection.unit, Some(f.unit.id));
        assert_eq!(console.picks[0].0, "Select Unit from options below");
    }

    #[test]
    fn test_select_tenant_filters_on_unit_and_activity() {
        let f = fixture();
        let unit_id = f.unit.id;
        let (_, selection, console) = run(
            &f.storage,
            &SelectRecord::<Tenant>::new(),
            |s| s.selection.unit = Some(unit_id),
            vec![choose("Yes"), Answer::Index(0)],
        );

        assert_eq!(console.picks[0].1, vec!["Yes", "No"]);
        let offered = &console.picks[1].1;
        assert_eq!(offered.len(), 1);
        assert!(offered[0].contains("Jane Doe"));
        assert_eq!(selection.tenant, Some(f.current.id));
        assert_eq!(selection.unit, Some(unit_id));

        let (_, selection, console) = run(
            &f.storage,
            &SelectRecord::<Tenant>::new(),
            |_| {},
            vec![choose("No"), Answer::Index(1)],
        );
        assert_eq!(console.picks[1].1.len(), 2);
        assert_eq!(selection.tenant, Some(f.former.id));
    }

    #[test]
    fn test_select_without_candidates_returns_to_listing_menu() {
        let f = fixture();
        let tree = MenuTree::new("Main Menu").unwrap();
        let root = tree.root();

        // no tenant selected, so there are no payments to offer
        let (result, selection, console) = run(
            &f.storage,
            &SelectRecord::<Payment>::new(),
            |s| s.set_last_menu(Some(root)),
            vec![],
        );
        assert_eq!(result.unwrap(), Some(Next::Node(root)));
        assert_eq!(selection.payment, None);
        assert!(console.saw("No payment records available."));

        let (result, _, _) = run(&f.storage, &SelectRecord::<Payment>::new(), |_| {}, vec![]);
        assert_eq!(
            result.unwrap(),
            Some(Next::Command(NavCommand::ReturnToRoot))
        );
    }

    #[test]
    fn test_add_unit() {
        let f = fixture();
        let answers = vec![
            typed("2024-01-15"),
            typed("5 Pine Ct"),
            typed("900"),
            typed("1500"),
            typed("100"),
            typed("y"),
        ];
        let (result, _, console) = run(&f.storage, &AddRecord::<Unit>::new(), |_| {}, answers);

        assert_eq!(result.unwrap(), None);
        assert!(console.saw("The following record was successfully added:"));
        let units = f.storage.units.get_all().unwrap();
        assert_eq!(units.len(), 2);
        let pine = units.iter().find(|u| u.address == "5 Pine Ct").unwrap();
        assert_eq!(pine.monthly_rent, 1500.0);
    }

    #[test]
    fn test_add_tenant_picks_unit_when_none_selected() {
        let f = fixture();
        let answers = vec![
            Answer::Index(0),
            typed("Alex Kim"),
            typed("alex@example.com"),
            typed("2175550100"),
            typed("2024-05-01"),
            typed(""),
            typed("y"),
        ];
        let (result, _, console) = run(&f.storage, &AddRecord::<Tenant>::new(), |_| {}, answers);

        result.unwrap();
        assert_eq!(console.picks[0].0, "Select Unit");
        let tenants = f.storage.tenants_for_unit(f.unit.id).unwrap();
        let alex = tenants.iter().find(|t| t.name == "Alex Kim").unwrap();
        assert_eq!(alex.move_out_date, None);
    }

    #[test]
    fn test_add_tenant_cancelled_at_unit_pick() {
        let f = fixture();
        let (result, _, console) = run(
            &f.storage,
            &AddRecord::<Tenant>::new(),
            |_| {},
            vec![choose("exit")],
        );

        assert_eq!(result.unwrap(), None);
        assert_eq!(console.remaining(), 0);
        assert_eq!(f.storage.tenants.count().unwrap(), 2);
    }

    #[test]
    fn test_add_payment_needs_tenant() {
        let f = fixture();
        let (result, _, console) =
            run(&f.storage, &AddRecord::<Payment>::new(), |_| {}, vec![]);

        assert_eq!(result.unwrap(), None);
        assert_eq!(
            console.errors,
            vec!["Select a tenant before adding payments."]
        );
        assert_eq!(f.storage.payments.count().unwrap(), 1);
    }

    #[test]
    fn test_add_payment_for_selected_tenant() {
        let f = fixture();
        let tenant_id = f.current.id;
        let answers = vec![
            typed("1800"),
            typed("2024-02-01"),
            choose("check"),
            choose("rent"),
            typed("y"),
        ];
        let (result, _, _) = run(
            &f.storage,
            &AddRecord::<Payment>::new(),
            |s| s.selection.tenant = Some(tenant_id),
            answers,
        );

        result.unwrap();
        let payments = f.storage.payments_for_tenant(tenant_id).unwrap();
        assert_eq!(payments.len(), 2);
        assert!(payments.iter().any(|p| p.method == PaymentMethod::Check));
    }

    #[test]
    fn test_update_selected_saves_on_confirmation() {
        let f = fixture();
        let payment_id = f.payment.id;
        let answers = vec![
            choose("amount: 1800.00"),
            typed("1950"),
            choose(SUBMIT_CHANGES),
            typed("y"),
        ];
        let (result, _, console) = run(
            &f.storage,
            &UpdateSelected::<Payment>::new(),
            |s| s.selection.payment = Some(payment_id),
            answers,
        );

        assert_eq!(result.unwrap(), None);
        assert!(console.saw("The following record was successfully saved:"));
        let stored = f.storage.payments.get(payment_id).unwrap().unwrap();
        assert_eq!(stored.amount, 1950.0);
    }

    #[test]
    fn test_update_declined_keeps_stored_record() {
        let f = fixture();
        let payment_id = f.payment.id;
        let answers = vec![
            choose("amount: 1800.00"),
            typed("1950"),
            choose(SUBMIT_CHANGES),
            typed("n"),
        ];
        let (result, _, _) = run(
            &f.storage,
            &UpdateSelected::<Payment>::new(),
            |s| s.selection.payment = Some(payment_id),
            answers,
        );

        result.unwrap();
        let stored = f.storage.payments.get(payment_id).unwrap().unwrap();
        assert_eq!(stored, f.payment);
    }

    #[test]
    fn test_update_without_selection_steps_back() {
        let f = fixture();
        let (result, _, console) =
            run(&f.storage, &UpdateSelected::<Tenant>::new(), |_| {}, vec![]);

        assert_eq!(result.unwrap(), Some(Next::Command(NavCommand::GoBack)));
        assert_eq!(console.errors, vec!["No tenant selected."]);
    }

    #[test]
    fn test_delete_unit_cascades_and_clears_selection() {
        let f = fixture();
        let unit_id = f.unit.id;
        let tenant_id = f.current.id;
        let (result, selection, console) = run(
            &f.storage,
            &DeleteSelected::<Unit>::new(),
            |s| {
                s.selection.unit = Some(unit_id);
                s.selection.tenant = Some(tenant_id);
            },
            vec![typed("y")],
        );

        assert_eq!(result.unwrap(), Some(Next::Command(NavCommand::GoBack)));
        assert!(console.saw("The following record was successfully deleted:"));
        assert_eq!(selection.unit, None);
        assert_eq!(selection.tenant, None);
        assert_eq!(f.storage.units.count().unwrap(), 0);
        assert_eq!(f.storage.tenants.count().unwrap(), 0);
        assert_eq!(f.storage.payments.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_with_unwritable_audit_log_still_clears_selection() {
        let f = fixture();
        std::fs::create_dir_all(f.storage.audit().path()).unwrap();
        let payment_id = f.payment.id;
        let (result, selection, console) = run(
            &f.storage,
            &DeleteSelected::<Payment>::new(),
            |s| s.selection.payment = Some(payment_id),
            vec![typed("y")],
        );

        assert_eq!(result.unwrap(), Some(Next::Command(NavCommand::GoBack)));
        assert!(console.errors.is_empty());
        assert!(console.saw("The following record was successfully deleted:"));
        assert_eq!(selection.payment, None);
        assert!(f.storage.payments.get(payment_id).unwrap().is_none());
    }

    #[test]
    fn test_delete_declined_keeps_selection() {
        let f = fixture();
        let tenant_id = f.current.id;
        let (result, selection, _) = run(
            &f.storage,
            &DeleteSelected::<Tenant>::new(),
            |s| s.selection.tenant = Some(tenant_id),
            vec![typed("n")],
        );

        assert_eq!(result.unwrap(), Some(Next::Command(NavCommand::GoBack)));
        assert_eq!(selection.tenant, Some(tenant_id));
        assert!(f.storage.tenants.get(tenant_id).unwrap().is_some());
    }

    #[test]
    fn test_clear_selection() {
        let f = fixture();
        let unit_id = f.unit.id;
        let (result, selection, _) = run(
            &f.storage,
            &ClearSelection(Role::Unit),
            |s| s.selection.unit = Some(unit_id),
            vec![],
        );

        assert_eq!(result.unwrap(), None);
        assert!(!selection.is_set(Role::Unit));
    }
}
