//! Record service
//!
//! Generic create / update / delete for any stored record type, with audit
//! logging and cascading deletes.

use chrono::NaiveDate;

use crate::error::RentalResult;
use crate::models::{Tenant, UnitId};
use crate::storage::{Storage, Stored};

/// Service for record persistence
pub struct RecordService<'a> {
    storage: &'a Storage,
}

impl<'a> RecordService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn get<T: Stored>(&self, id: T::Id) -> RentalResult<Option<T>> {
        T::repository(self.storage).get(id)
    }

    pub fn list<T: Stored>(&self) -> RentalResult<Vec<T>> {
        T::repository(self.storage).get_all()
    }

    /// Persist a new record
    pub fn create<T: Stored>(&self, record: T) -> RentalResult<T> {
        T::repository(self.storage).insert(record.clone())?;
        audited(self.storage.log_create(&record));
        log::info!("Created {} {}", T::NAME, record.id());
        Ok(record)
    }

    /// Persist changes to an existing record
    pub fn update<T: Stored>(&self, record: T) -> RentalResult<T> {
        let before = T::repository(self.storage).update(record.clone())?;
        audited(self.storage.log_update(&before, &record));
        log::info!("Updated {} {}", T::NAME, record.id());
        Ok(record)
    }

    /// Delete a record together with everything it owns
    ///
    /// Owned records are removed first, deepest level first, so a failure
    /// part way leaves the owner in place.
    pub fn delete<T: Stored>(&self, id: T::Id) -> RentalResult<T> {
        let dependents = T::dependents(self.storage, id)?;
        if !dependents.is_empty() {
            log::info!(
                "Deleting {} record(s) owned by {} {}",
                dependents.len(),
                T::NAME,
                id
            );
        }

        for payment in &dependents.payments {
            self.remove(payment)?;
        }
        for expense in &dependents.expenses {
            self.remove(expense)?;
        }
        for tenant in &dependents.tenants {
            self.remove(tenant)?;
        }

        let removed = T::repository(self.storage).delete(id)?;
        audited(self.storage.log_delete(&removed));
        log::info!("Deleted {} {}", T::NAME, id);
        Ok(removed)
    }

    fn remove<T: Stored>(&self, record: &T) -> RentalResult<()> {
        let removed = T::repository(self.storage).delete(record.id())?;
        audited(self.storage.log_delete(&removed));
        Ok(())
    }

    /// Tenants, optionally narrowed to one unit and to those still living there
    pub fn tenants(
        &self,
        unit_id: Option<UnitId>,
        active_only: bool,
        today: NaiveDate,
    ) -> RentalResult<Vec<Tenant>> {
        self.storage.tenants.filter(|t| {
            unit_id.map_or(true, |u| t.unit_id == u) && (!active_only || t.is_active(today))
        })
    }
}

/// The record is already committed, so a failed audit append is only warned about
fn audited(result: RentalResult<()>) {
    if let Err(e) = result {
        log::warn!("Audit entry not written: {}", e);
    }
}
