//! Unit model
//!
//! A rental unit (property) with its recurring mortgage, rent and late fee.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UnitId;
use super::{unknown_field, wrong_type, Entity, Field, FieldMap};
use crate::audit::EntityType;
use crate::error::RentalResult;
use crate::validation::{self, FieldValue};

static FIELDS: [Field; 5] = [
    Field {
        name: "acquisition_date",
        validator: validation::DATE,
    },
    Field {
        name: "address",
        validator: validation::ADDRESS,
    },
    Field {
        name: "monthly_mortgage",
        validator: validation::AMOUNT,
    },
    Field {
        name: "monthly_rent",
        validator: validation::AMOUNT,
    },
    Field {
        name: "late_fee",
        validator: validation::AMOUNT,
    },
];

/// A rental unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub acquisition_date: NaiveDate,
    pub address: String,
    pub monthly_mortgage: f64,
    pub monthly_rent: f64,
    pub late_fee: f64,
}

impl Unit {
    pub fn new(
        acquisition_date: NaiveDate,
        address: impl Into<String>,
        monthly_mortgage: f64,
        monthly_rent: f64,
        late_fee: f64,
    ) -> Self {
        Self {
            id: UnitId::new(),
            acquisition_date,
            address: address.into(),
            monthly_mortgage,
            monthly_rent,
            late_fee,
        }
    }

    /// Address on a single line
    pub fn short_address(&self) -> String {
        self.address.replace('\n', ", ")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Unit {}: {} | Acquired: {} | Mortgage: {:.2} | Rent: {:.2} | Late Fee: {:.2}>",
            self.id,
            self.short_address(),
            self.acquisition_date,
            self.monthly_mortgage,
            self.monthly_rent,
            self.late_fee
        )
    }
}

impl Entity for Unit {
    type Id = UnitId;

    const NAME: &'static str = "Unit";
    const ENTITY_TYPE: EntityType = EntityType::Unit;

    fn id(&self) -> UnitId {
        self.id
    }

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "acquisition_date" => Some(FieldValue::Date(self.acquisition_date)),
            "address" => Some(FieldValue::Text(self.address.clone())),
            "monthly_mortgage" => Some(FieldValue::Amount(self.monthly_mortgage)),
            "monthly_rent" => Some(FieldValue::Amount(self.monthly_rent)),
            "late_fee" => Some(FieldValue::Amount(self.late_fee)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> RentalResult<()> {
        match (name, value) {
            ("acquisition_date", FieldValue::Date(d)) => self.acquisition_date = d,
            ("address", FieldValue::Text(s)) => self.address = s,
            ("monthly_mortgage", FieldValue::Amount(a)) => self.monthly_mortgage = a,
            ("monthly_rent", FieldValue::Amount(a)) => self.monthly_rent = a,
            ("late_fee", FieldValue::Amount(a)) => self.late_fee = a,
            (name, _) if Self::field(name).is_some() => {
                return Err(wrong_type(name, "of the declared type"))
            }
            (name, _) => return Err(unknown_field(Self::NAME, name)),
        }
        Ok(())
    }

    fn from_fields(fields: &FieldMap) -> RentalResult<Self> {
        Ok(Self::new(
            fields.date("acquisition_date")?,
            fields.text("address")?,
            fields.amount("monthly_mortgage")?,
            fields.amount("monthly_rent")?,
            fields.amount("late_fee")?,
        ))
    }

    fn sort_key(&self) -> String {
        self.short_address()
    }
}
