//! Core data models for RentalCLI
//!
//! This module contains the persisted business records (units, tenants,
//! payments, expenses) and the [`Entity`] contract the interactive create
//! and update flows are written against.

pub mod expense;
pub mod ids;
pub mod payment;
pub mod tenant;
pub mod unit;

use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::audit::EntityType;
use crate::error::{RentalError, RentalResult};
use crate::validation::{FieldValue, Validator};

pub use expense::{Expense, ExpenseCategory};
pub use ids::{ExpenseId, PaymentId, TenantId, UnitId};
pub use payment::{Payment, PaymentCategory, PaymentMethod};
pub use tenant::Tenant;
pub use unit::Unit;

/// One user-editable field of an entity
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub validator: Validator,
}

/// Contract between a record type and the generic create/update flows
pub trait Entity: Clone + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Copy
        + Eq
        + Hash
        + fmt::Display
        + fmt::Debug
        + Into<Uuid>
        + Serialize
        + DeserializeOwned
        + Send
        + Sync;

    /// Type name shown to the user ("Unit", "Tenant", ...)
    const NAME: &'static str;

    /// Audit log classification
    const ENTITY_TYPE: EntityType;

    fn id(&self) -> Self::Id;

    /// Editable fields, in prompt order
    fn fields() -> &'static [Field];

    /// Current value of a field
    fn field_value(&self, name: &str) -> Option<FieldValue>;

    /// Overwrite a field with an already-validated value
    fn set_field(&mut self, name: &str, value: FieldValue) -> RentalResult<()>;

    /// Build a new record from a complete field map
    fn from_fields(fields: &FieldMap) -> RentalResult<Self>;

    /// Key used to order listings
    fn sort_key(&self) -> String;

    /// Name of the foreign key a child record uses to point at this type
    fn foreign_key_name() -> String {
        format!("{}_id", Self::NAME.to_lowercase())
    }

    /// Look up the validator for a field name
    fn field(name: &str) -> Option<Field> {
        Self::fields().iter().find(|f| f.name == name).copied()
    }
}

/// Ordered collection of validated field values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing one with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn required(&self, name: &str) -> RentalResult<&FieldValue> {
        self.get(name)
            .ok_or_else(|| RentalError::Validation(format!("Missing field '{}'", name)))
    }

    pub fn text(&self, name: &str) -> RentalResult<String> {
        self.required(name)?
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| wrong_type(name, "text"))
    }

    pub fn amount(&self, name: &str) -> RentalResult<f64> {
        self.required(name)?
            .as_amount()
            .ok_or_else(|| wrong_type(name, "an amount"))
    }

    pub fn date(&self, name: &str) -> RentalResult<NaiveDate> {
        self.required(name)?
            .as_date()
            .ok_or_else(|| wrong_type(name, "a date"))
    }

    /// A missing or bypassed optional date is `None`
    pub fn optional_date(&self, name: &str) -> RentalResult<Option<NaiveDate>> {
        match self.get(name) {
            None | Some(FieldValue::Empty) => Ok(None),
            Some(FieldValue::Date(d)) => Ok(Some(*d)),
            Some(_) => Err(wrong_type(name, "a date")),
        }
    }

    pub fn reference(&self, name: &str) -> RentalResult<Uuid> {
        self.required(name)?
            .as_ref_id()
            .ok_or_else(|| wrong_type(name, "a record reference"))
    }
}

impl fmt::Display for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

pub(crate) fn wrong_type(name: &str, expected: &str) -> RentalError {
    RentalError::Validation(format!("Field '{}' must be {}", name, expected))
}

pub(crate) fn unknown_field(entity: &str, name: &str) -> RentalError {
    RentalError::Validation(format!("{} has no field '{}'", entity, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_map_preserves_insertion_order() {
        let mut map = FieldMap::new();
        map.insert("b", FieldValue::Text("2".into()));
        map.insert("a", FieldValue::Amount(1.0));
        map.insert("b", FieldValue::Text("3".into()));

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(map.text("b").unwrap(), "3");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_field_map_typed_getters() {
        let mut map = FieldMap::new();
        map.insert("amount", FieldValue::Amount(150.0));
        map.insert("move_out_date", FieldValue::Empty);

        assert_eq!(map.amount("amount").unwrap(), 150.0);
        assert!(map.text("amount").is_err());
        assert!(map.date("missing").is_err());
        assert_eq!(map.optional_date("move_out_date").unwrap(), None);
        assert_eq!(map.optional_date("never_set").unwrap(), None);
    }

    #[test]
    fn test_field_map_display() {
        let mut map = FieldMap::new();
        map.insert("method", FieldValue::Text("zelle".into()));
        map.insert("amount", FieldValue::Amount(20.0));
        assert_eq!(map.to_string(), "{method: zelle, amount: 20.00}");
    }

    #[test]
    fn test_foreign_key_name() {
        assert_eq!(Unit::foreign_key_name(), "unit_id");
        assert_eq!(Tenant::foreign_key_name(), "tenant_id");
    }
}
