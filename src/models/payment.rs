//! Payment model
//!
//! Money received from a tenant. Only `rent` payments count toward the
//! monthly rollforward; deposits and late fees are recorded but kept apart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{PaymentId, TenantId};
use super::{unknown_field, wrong_type, Entity, Field, FieldMap};
use crate::audit::EntityType;
use crate::error::{RentalError, RentalResult};
use crate::validation::{self, FieldValue};

static FIELDS: [Field; 4] = [
    Field {
        name: "amount",
        validator: validation::AMOUNT,
    },
    Field {
        name: "pmt_date",
        validator: validation::DATE,
    },
    Field {
        name: "method",
        validator: validation::PAYMENT_METHOD,
    },
    Field {
        name: "category",
        validator: validation::PAYMENT_CATEGORY,
    },
];

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Check,
    Venmo,
    Zelle,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Venmo => "venmo",
            Self::Zelle => "zelle",
            Self::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "check" => Ok(Self::Check),
            "venmo" => Ok(Self::Venmo),
            "zelle" => Ok(Self::Zelle),
            "cash" => Ok(Self::Cash),
            other => Err(RentalError::Validation(format!(
                "Unknown payment method: {}",
                other
            ))),
        }
    }
}

/// What a payment was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    Rent,
    SecurityDeposit,
    LateFee,
}

impl PaymentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::SecurityDeposit => "security deposit",
            Self::LateFee => "late fee",
        }
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentCategory {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rent" => Ok(Self::Rent),
            "security deposit" => Ok(Self::SecurityDeposit),
            "late fee" => Ok(Self::LateFee),
            other => Err(RentalError::Validation(format!(
                "Unknown payment category: {}",
                other
            ))),
        }
    }
}

/// A payment received from a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: f64,
    pub pmt_date: NaiveDate,
    pub method: PaymentMethod,
    pub category: PaymentCategory,
    pub tenant_id: TenantId,
}

impl Payment {
    pub fn new(
        amount: f64,
        pmt_date: NaiveDate,
        method: PaymentMethod,
        category: PaymentCategory,
        tenant_id: TenantId,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            amount,
            pmt_date,
            method,
            category,
            tenant_id,
        }
    }

    pub fn is_rent(&self) -> bool {
        self.category == PaymentCategory::Rent
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Payment {}: {}, {}, {:.2}, {}, Tenant: {}>",
            self.id, self.category, self.pmt_date, self.amount, self.method, self.tenant_id
        )
    }
}

impl Entity for Payment {
    type Id = PaymentId;

    const NAME: &'static str = "Payment";
    const ENTITY_TYPE: EntityType = EntityType::Payment;

    fn id(&self) -> PaymentId {
        self.id
    }

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "amount" => Some(FieldValue::Amount(self.amount)),
            "pmt_date" => Some(FieldValue::Date(self.pmt_date)),
            "method" => Some(FieldValue::Text(self.method.to_string())),
            "category" => Some(FieldValue::Text(self.category.to_string())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> RentalResult<()> {
        match (name, value) {
            ("amount", FieldValue::Amount(a)) => self.amount = a,
            ("pmt_date", FieldValue::Date(d)) => self.pmt_date = d,
            ("method", FieldValue::Text(s)) => self.method = s.parse()?,
            ("category", FieldValue::Text(s)) => self.category = s.parse()?,
            (name, _) if Self::field(name).is_some() => {
                return Err(wrong_type(name, "of the declared type"))
            }
            (name, _) => return Err(unknown_field(Self::NAME, name)),
        }
        Ok(())
    }

    fn from_fields(fields: &FieldMap) -> RentalResult<Self> {
        Ok(Self::new(
            fields.amount("amount")?,
            fields.date("pmt_date")?,
            fields.text("method")?.parse()?,
            fields.text("category")?.parse()?,
            TenantId::from_uuid(fields.reference("tenant_id")?),
        ))
    }

    fn sort_key(&self) -> String {
        self.pmt_date.to_string()
    }
}
