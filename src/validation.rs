//! Field validators
//!
//! A validator turns raw user input into a typed [`FieldValue`] or rejects it.
//! Every validator also advertises the shape of input it accepts: either a
//! closed list of choices (rendered as a picker) or a free-text hint.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use uuid::Uuid;

use crate::error::{RentalError, RentalResult};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9._-]+@\w+\.[a-z]+$").expect("Invalid email regex")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\([0-9]{3}\) [0-9]{3}-[0-9]{4}|[0-9]{3}-[0-9]{3}-[0-9]{4}|[0-9]{10})$")
        .expect("Invalid phone regex")
});

pub const PAYMENT_METHODS: &[&str] = &["check", "venmo", "zelle", "cash"];
pub const PAYMENT_CATEGORIES: &[&str] = &["rent", "security deposit", "late fee"];
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "mortgage",
    "property mgmt",
    "repairs",
    "maintenance",
    "renovations",
    "cleaning",
];

/// Input handed to a validator
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Text(String),
    Number(f64),
}

impl RawInput {
    fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

/// A validated field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Amount(f64),
    Date(NaiveDate),
    /// An optional field the user bypassed
    Empty,
    /// Foreign key to a parent entity
    Ref(Uuid),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<f64> {
        match self {
            Self::Amount(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_ref_id(&self) -> Option<Uuid> {
        match self {
            Self::Ref(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Amount(a) => write!(f, "{:.2}", a),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Empty => write!(f, "None"),
            Self::Ref(id) => write!(f, "{}", id),
        }
    }
}

/// What a validator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraints {
    /// Closed set of legal values
    Choices(&'static [&'static str]),
    /// Free-text description shown next to the prompt
    Hint(&'static str),
}

/// Broad kind of value a validator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Amount,
    Date,
    OptionalDate,
    Choice,
}

/// A named field validator
#[derive(Clone, Copy)]
pub struct Validator {
    pub name: &'static str,
    pub kind: ValueKind,
    pub constraints: Constraints,
    check: fn(&RawInput) -> RentalResult<FieldValue>,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("constraints", &self.constraints)
            .finish()
    }
}

impl Validator {
    /// Run the validator
    pub fn validate(&self, input: &RawInput) -> RentalResult<FieldValue> {
        (self.check)(input)
    }

    /// Only the monetary-amount validator gets its raw text coerced to a number
    pub fn coerces_to_number(&self) -> bool {
        self.kind == ValueKind::Amount
    }

    /// Prepare raw text for this validator
    ///
    /// Text that should be a number but does not parse is an input error
    /// like any other rejected value.
    pub fn coerce(&self, raw: &str) -> RentalResult<RawInput> {
        if self.coerces_to_number() {
            raw.trim()
                .parse::<f64>()
                .map(RawInput::Number)
                .map_err(|_| RentalError::Validation(format!("'{}' is not a number", raw)))
        } else {
            Ok(RawInput::Text(raw.to_string()))
        }
    }

    /// Coerce then validate
    pub fn parse(&self, raw: &str) -> RentalResult<FieldValue> {
        self.validate(&self.coerce(raw)?)
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.constraints, Constraints::Choices(_))
    }
}

fn text_input(input: &RawInput) -> RentalResult<&str> {
    input
        .text()
        .ok_or_else(|| RentalError::Validation("Expected text input".into()))
}

fn check_name(input: &RawInput) -> RentalResult<FieldValue> {
    let name = text_input(input)?;
    if name.trim().is_empty() {
        return Err(RentalError::Validation("Name must be non-empty string".into()));
    }
    Ok(FieldValue::Text(name.trim().to_string()))
}

fn check_address(input: &RawInput) -> RentalResult<FieldValue> {
    let address = text_input(input)?;
    if address.trim().is_empty() {
        return Err(RentalError::Validation("Address must be non-empty string".into()));
    }
    Ok(FieldValue::Text(address.trim().to_string()))
}

fn check_description(input: &RawInput) -> RentalResult<FieldValue> {
    let descr = text_input(input)?.trim();
    if descr.chars().count() <= 1 {
        return Err(RentalError::Validation(
            "Description must be string greater than one character".into(),
        ));
    }
    Ok(FieldValue::Text(descr.to_string()))
}

fn check_email(input: &RawInput) -> RentalResult<FieldValue> {
    let email = text_input(input)?.trim();
    if !EMAIL_REGEX.is_match(email) {
        return Err(RentalError::Validation("Did not enter valid email address".into()));
    }
    Ok(FieldValue::Text(email.to_string()))
}

fn check_phone(input: &RawInput) -> RentalResult<FieldValue> {
    let phone = text_input(input)?.trim();
    if !PHONE_REGEX.is_match(phone) {
        return Err(RentalError::Validation("Did not enter valid phone number".into()));
    }
    Ok(FieldValue::Text(phone.to_string()))
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> RentalResult<NaiveDate> {
    let text = text.trim();
    let well_formed = text.len() == 10
        && text
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });

    if !well_formed {
        return Err(RentalError::Validation(
            "Did not enter date in YYYY-MM-DD format".into(),
        ));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| RentalError::Validation(format!("Invalid date '{}': {}", text, e)))
}

fn check_date(input: &RawInput) -> RentalResult<FieldValue> {
    Ok(FieldValue::Date(parse_date(text_input(input)?)?))
}

fn check_optional_date(input: &RawInput) -> RentalResult<FieldValue> {
    let text = text_input(input)?;
    if text.trim().is_empty() {
        return Ok(FieldValue::Empty);
    }
    check_date(input)
}

fn check_amount(input: &RawInput) -> RentalResult<FieldValue> {
    match input {
        RawInput::Number(n) if n.is_finite() && *n >= 0.0 => Ok(FieldValue::Amount(*n)),
        _ => Err(RentalError::Validation("Value must be positive number".into())),
    }
}

fn check_choice(
    input: &RawInput,
    choices: &[&str],
    what: &str,
) -> RentalResult<FieldValue> {
    let value = text_input(input)?;
    if choices.contains(&value) {
        Ok(FieldValue::Text(value.to_string()))
    } else {
        Err(RentalError::Validation(format!(
            "{} must match one of the following: {}",
            what,
            choices.join(", ")
        )))
    }
}

fn check_method(input: &RawInput) -> RentalResult<FieldValue> {
    check_choice(input, PAYMENT_METHODS, "Payment method")
}

fn check_payment_category(input: &RawInput) -> RentalResult<FieldValue> {
    check_choice(input, PAYMENT_CATEGORIES, "Payment type")
}

fn check_expense_category(input: &RawInput) -> RentalResult<FieldValue> {
    check_choice(input, EXPENSE_CATEGORIES, "Expense type")
}

pub const NAME: Validator = Validator {
    name: "name",
    kind: ValueKind::Text,
    constraints: Constraints::Hint("non-empty string"),
    check: check_name,
};

pub const ADDRESS: Validator = Validator {
    name: "address",
    kind: ValueKind::Text,
    constraints: Constraints::Hint("non-empty string"),
    check: check_address,
};

pub const DESCRIPTION: Validator = Validator {
    name: "description",
    kind: ValueKind::Text,
    constraints: Constraints::Hint("string greater than one character"),
    check: check_description,
};

pub const EMAIL: Validator = Validator {
    name: "email",
    kind: ValueKind::Text,
    constraints: Constraints::Hint("valid email address"),
    check: check_email,
};

pub const PHONE: Validator = Validator {
    name: "phone",
    kind: ValueKind::Text,
    constraints: Constraints::Hint("valid 10-digit phone number"),
    check: check_phone,
};

pub const DATE: Validator = Validator {
    name: "date",
    kind: ValueKind::Date,
    constraints: Constraints::Hint("YYYY-MM-DD format"),
    check: check_date,
};

pub const OPTIONAL_DATE: Validator = Validator {
    name: "optional date",
    kind: ValueKind::OptionalDate,
    constraints: Constraints::Hint("enter date in YYYY-MM-DD format or press enter to bypass"),
    check: check_optional_date,
};

pub const AMOUNT: Validator = Validator {
    name: "amount",
    kind: ValueKind::Amount,
    constraints: Constraints::Hint("positive number"),
    check: check_amount,
};

pub const PAYMENT_METHOD: Validator = Validator {
    name: "payment method",
    kind: ValueKind::Choice,
    constraints: Constraints::Choices(PAYMENT_METHODS),
    check: check_method,
};

pub const PAYMENT_CATEGORY: Validator = Validator {
    name: "payment category",
    kind: ValueKind::Choice,
    constraints: Constraints::Choices(PAYMENT_CATEGORIES),
    check: check_payment_category,
};

pub const EXPENSE_CATEGORY: Validator = Validator {
    name: "expense category",
    kind: ValueKind::Choice,
    constraints: Constraints::Choices(EXPENSE_CATEGORIES),
    check: check_expense_category,
};
