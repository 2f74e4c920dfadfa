//! Tenant model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TenantId, UnitId};
use super::{unknown_field, wrong_type, Entity, Field, FieldMap};
use crate::audit::EntityType;
use crate::error::RentalResult;
use crate::validation::{self, FieldValue};

static FIELDS: [Field; 5] = [
    Field {
        name: "name",
        validator: validation::NAME,
    },
    Field {
        name: "email_address",
        validator: validation::EMAIL,
    },
    Field {
        name: "phone_number",
        validator: validation::PHONE,
    },
    Field {
        name: "move_in_date",
        validator: validation::DATE,
    },
    Field {
        name: "move_out_date",
        validator: validation::OPTIONAL_DATE,
    },
];

/// A tenant living (or having lived) in a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub move_in_date: NaiveDate,
    #[serde(default)]
    pub move_out_date: Option<NaiveDate>,
    pub unit_id: UnitId,
}

impl Tenant {
    pub fn new(
        name: impl Into<String>,
        email_address: impl Into<String>,
        phone_number: impl Into<String>,
        move_in_date: NaiveDate,
        move_out_date: Option<NaiveDate>,
        unit_id: UnitId,
    ) -> Self {
        Self {
            id: TenantId::new(),
            name: name.into(),
            email_address: email_address.into(),
            phone_number: phone_number.into(),
            move_in_date,
            move_out_date,
            unit_id,
        }
    }

    /// A tenant is active until their move-out date has passed
    pub fn is_active(&self, today: NaiveDate) -> bool {
        match self.move_out_date {
            None => true,
            Some(out) => out > today,
        }
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let move_out = self
            .move_out_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Present".to_string());
        write!(
            f,
            "<Tenant {}: {} | Contact Info: {}, {} | Dates: {} to {} | Unit ID: {}>",
            self.id,
            self.name,
            self.email_address,
            self.phone_number,
            self.move_in_date,
            move_out,
            self.unit_id
        )
    }
}

impl Entity for Tenant {
    type Id = TenantId;

    const NAME: &'static str = "Tenant";
    const ENTITY_TYPE: EntityType = EntityType::Tenant;

    fn id(&self) -> TenantId {
        self.id
    }

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "email_address" => Some(FieldValue::Text(self.email_address.clone())),
            "phone_number" => Some(FieldValue::Text(self.phone_number.clone())),
            "move_in_date" => Some(FieldValue::Date(self.move_in_date)),
            "move_out_date" => Some(
                self.move_out_date
                    .map(FieldValue::Date)
                    .unwrap_or(FieldValue::Empty),
            ),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> RentalResult<()> {
        match (name, value) {
            ("name", FieldValue::Text(s)) => self.name = s,
            ("email_address", FieldValue::Text(s)) => self.email_address = s,
            ("phone_number", FieldValue::Text(s)) => self.phone_number = s,
            ("move_in_date", FieldValue::Date(d)) => self.move_in_date = d,
            ("move_out_date", FieldValue::Date(d)) => self.move_out_date = Some(d),
            ("move_out_date", FieldValue::Empty) => self.move_out_date = None,
            (name, _) if Self::field(name).is_some() => {
                return Err(wrong_type(name, "of the declared type"))
            }
            (name, _) => return Err(unknown_field(Self::NAME, name)),
        }
        Ok(())
    }

    fn from_fields(fields: &FieldMap) -> RentalResult<Self> {
        Ok(Self::new(
            fields.text("name")?,
            fields.text("email_address")?,
            fields.text("phone_number")?,
            fields.date("move_in_date")?,
            fields.optional_date("move_out_date")?,
            UnitId::from_uuid(fields.reference("unit_id")?),
        ))
    }

    fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}
