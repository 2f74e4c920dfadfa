//! Expense model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{ExpenseId, UnitId};
use super::{unknown_field, wrong_type, Entity, Field, FieldMap};
use crate::audit::EntityType;
use crate::error::{RentalError, RentalResult};
use crate::validation::{self, FieldValue};

static FIELDS: [Field; 4] = [
    Field {
        name: "descr",
        validator: validation::DESCRIPTION,
    },
    Field {
        name: "category",
        validator: validation::EXPENSE_CATEGORY,
    },
    Field {
        name: "amount",
        validator: validation::AMOUNT,
    },
    Field {
        name: "exp_date",
        validator: validation::DATE,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Mortgage,
    PropertyMgmt,
    Repairs,
    Maintenance,
    Renovations,
    Cleaning,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mortgage => "mortgage",
            Self::PropertyMgmt => "property mgmt",
            Self::Repairs => "repairs",
            Self::Maintenance => "maintenance",
            Self::Renovations => "renovations",
            Self::Cleaning => "cleaning",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mortgage" => Ok(Self::Mortgage),
            "property mgmt" => Ok(Self::PropertyMgmt),
            "repairs" => Ok(Self::Repairs),
            "maintenance" => Ok(Self::Maintenance),
            "renovations" => Ok(Self::Renovations),
            "cleaning" => Ok(Self::Cleaning),
            other => Err(RentalError::Validation(format!(
                "Unknown expense category: {}",
                other
            ))),
        }
    }
}

/// Money spent on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub descr: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub exp_date: NaiveDate,
    pub unit_id: UnitId,
}

impl Expense {
    pub fn new(
        descr: impl Into<String>,
        category: ExpenseCategory,
        amount: f64,
        exp_date: NaiveDate,
        unit_id: UnitId,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            descr: descr.into(),
            category,
            amount,
            exp_date,
            unit_id,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Expense {}: {}, {}, {}, {:.2}, Unit: {}>",
            self.id, self.descr, self.category, self.exp_date, self.amount, self.unit_id
        )
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    const NAME: &'static str = "Expense";
    const ENTITY_TYPE: EntityType = EntityType::Expense;

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "descr" => Some(FieldValue::Text(self.descr.clone())),
            "category" => Some(FieldValue::Text(self.category.to_string())),
            "amount" => Some(FieldValue::Amount(self.amount)),
            "exp_date" => Some(FieldValue::Date(self.exp_date)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> RentalResult<()> {
        match (name, value) {
            ("descr", FieldValue::Text(s)) => self.descr = s,
            ("category", FieldValue::Text(s)) => self.category = s.parse()?,
            ("amount", FieldValue::Amount(a)) => self.amount = a,
            ("exp_date", FieldValue::Date(d)) => self.exp_date = d,
            (name, _) if Self::field(name).is_some() => {
                return Err(wrong_type(name, "of the declared type"))
            }
            (name, _) => return Err(unknown_field(Self::NAME, name)),
        }
        Ok(())
    }

    fn from_fields(fields: &FieldMap) -> RentalResult<Self> {
        Ok(Self::new(
            fields.text("descr")?,
            fields.text("category")?.parse()?,
            fields.amount("amount")?,
            fields.date("exp_date")?,
            UnitId::from_uuid(fields.reference("unit_id")?),
        ))
    }

    fn sort_key(&self) -> String {
        self.exp_date.to_string()
    }
}
