//! Storage layer for RentalCLI
//!
//! One JSON file per record type under `<base>/data/`, written atomically,
//! plus the append-only audit log.

pub mod file_io;
pub mod repository;
pub mod seed;

pub use file_io::{read_json, write_json_atomic};
pub use repository::Repository;
pub use seed::{seed_demo_data, SeedSummary};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::RentalPaths;
use crate::error::RentalResult;
use crate::models::{Entity, Expense, Payment, Tenant, TenantId, Unit, UnitId};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: RentalPaths,
    pub units: Repository<Unit>,
    pub tenants: Repository<Tenant>,
    pub payments: Repository<Payment>,
    pub expenses: Repository<Expense>,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: RentalPaths) -> RentalResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            units: Repository::new(paths.units_file()),
            tenants: Repository::new(paths.tenants_file()),
            payments: Repository::new(paths.payments_file()),
            expenses: Repository::new(paths.expenses_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open storage and load every repository
    pub fn open(paths: RentalPaths) -> RentalResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &RentalPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> RentalResult<()> {
        self.units.load()?;
        self.tenants.load()?;
        self.payments.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// True when no unit has been recorded yet
    pub fn is_empty(&self) -> RentalResult<bool> {
        Ok(self.units.count()? == 0)
    }

    pub fn tenants_for_unit(&self, unit_id: UnitId) -> RentalResult<Vec<Tenant>> {
        self.tenants.filter(|t| t.unit_id == unit_id)
    }

    pub fn expenses_for_unit(&self, unit_id: UnitId) -> RentalResult<Vec<Expense>> {
        self.expenses.filter(|e| e.unit_id == unit_id)
    }

    pub fn payments_for_tenant(&self, tenant_id: TenantId) -> RentalResult<Vec<Payment>> {
        self.payments.filter(|p| p.tenant_id == tenant_id)
    }

    pub fn log_create<T: Entity>(&self, record: &T) -> RentalResult<()> {
        self.audit.log(&AuditEntry::create(
            T::ENTITY_TYPE,
            record.id().to_string(),
            Some(record.to_string()),
            record,
        ))
    }

    pub fn log_update<T: Entity>(&self, before: &T, after: &T) -> RentalResult<()> {
        self.audit.log(&AuditEntry::update(
            T::ENTITY_TYPE,
            after.id().to_string(),
            Some(after.to_string()),
            before,
            after,
        ))
    }

    pub fn log_delete<T: Entity>(&self, record: &T) -> RentalResult<()> {
        self.audit.log(&AuditEntry::delete(
            T::ENTITY_TYPE,
            record.id().to_string(),
            Some(record.to_string()),
            record,
        ))
    }
}

/// Records that must go when their owner is deleted
#[derive(Debug, Default)]
pub struct Dependents {
    pub tenants: Vec<Tenant>,
    pub payments: Vec<Payment>,
    pub expenses: Vec<Expense>,
}

impl Dependents {
    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty() && self.payments.is_empty() && self.expenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tenants.len() + self.payments.len() + self.expenses.len()
    }
}

/// Ties a record type to its repository and ownership rules
pub trait Stored: Entity {
    fn repository(storage: &Storage) -> &Repository<Self>;

    /// Records owned by `id`, directly or transitively
    fn dependents(_storage: &Storage, _id: Self::Id) -> RentalResult<Dependents> {
        Ok(Dependents::default())
    }
}

impl Stored for Unit {
    fn repository(storage: &Storage) -> &Repository<Self> {
        &storage.units
    }

    fn dependents(storage: &Storage, id: UnitId) -> RentalResult<Dependents> {
        let tenants = storage.tenants_for_unit(id)?;
        let mut payments = Vec::new();
        for tenant in &tenants {
            payments.extend(storage.payments_for_tenant(tenant.id)?);
        }

        Ok(Dependents {
            tenants,
            payments,
            expenses: storage.expenses_for_unit(id)?,
        })
    }
}

impl Stored for Tenant {
    fn repository(storage: &Storage) -> &Repository<Self> {
        &storage.tenants
    }

    fn dependents(storage: &Storage, id: TenantId) -> RentalResult<Dependents> {
        Ok(Dependents {
            payments: storage.payments_for_tenant(id)?,
            ..Dependents::default()
        })
    }
}

impl Stored for Payment {
    fn repository(storage: &Storage) -> &Repository<Self> {
        &storage.payments
    }
}

impl Stored for Expense {
    fn repository(storage: &Storage) -> &Repository<Self> {
        &storage.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{ExpenseCategory, PaymentCategory, PaymentMethod};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RentalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("outputs").exists());
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn test_unit_dependents_are_transitive() {
        let (_temp_dir, storage) = create_storage();
        let unit = Unit::new(date("2020-01-01"), "12 Oak St", 1000.0, 1800.0, 150.0);
        let tenant = Tenant::new(
            "Jane Doe",
            "jane@example.com",
            "5555551234",
            date("2023-01-01"),
            None,
            unit.id,
        );
        let payment = Payment::new(
            1800.0,
            date("2023-01-02"),
            PaymentMethod::Zelle,
            PaymentCategory::Rent,
            tenant.id,
        );
        let expense = Expense::new(
            "Gutter repair",
            ExpenseCategory::Repairs,
            300.0,
            date("2023-02-01"),
            unit.id,
        );

        storage.units.insert(unit.clone()).unwrap();
        storage.tenants.insert(tenant.clone()).unwrap();
        storage.payments.insert(payment).unwrap();
        storage.expenses.insert(expense).unwrap();

        let deps = Unit::dependents(&storage, unit.id).unwrap();
        assert_eq!(deps.tenants.len(), 1);
        assert_eq!(deps.payments.len(), 1);
        assert_eq!(deps.expenses.len(), 1);
        assert_eq!(deps.len(), 3);

        let tenant_deps = Tenant::dependents(&storage, tenant.id).unwrap();
        assert_eq!(tenant_deps.payments.len(), 1);
        assert!(tenant_deps.tenants.is_empty());
    }

    #[test]
    fn test_audit_hooks() {
        let (_temp_dir, storage) = create_storage();
        let unit = Unit::new(date("2020-01-01"), "12 Oak St", 1000.0, 1800.0, 150.0);
        let mut changed = unit.clone();
        changed.monthly_rent = 1900.0;

        storage.log_create(&unit).unwrap();
        storage.log_update(&unit, &changed).unwrap();
        storage.log_delete(&changed).unwrap();

        let entries = storage.audit().read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update, Operation::Delete]);
        assert!(entries[1]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("monthly_rent"));
    }
}
