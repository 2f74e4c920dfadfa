//! Interactive create, update and confirm flows
//!
//! Every field prompt follows the same protocol: closed choice lists are
//! picked, everything else is typed; rejected input is reported and asked
//! again; typing `e` or `exit` cancels.

use uuid::Uuid;

use crate::console::Tone;
use crate::error::RentalResult;
use crate::models::{Entity, FieldMap};
use crate::validation::{Constraints, FieldValue, Validator};

use super::session::Session;

/// Inputs that cancel a prompt, compared case-insensitively
pub const CANCEL_INPUTS: [&str; 2] = ["exit", "e"];

/// Field-picker entry that ends an update
pub const SUBMIT_CHANGES: &str = "<SUBMIT CHANGES>";

/// Choice-list entry that cancels a pick
const CANCEL_CHOICE: &str = "exit";

pub fn is_cancel(raw: &str) -> bool {
    let raw = raw.trim();
    CANCEL_INPUTS.iter().any(|c| raw.eq_ignore_ascii_case(c))
}

/// Outcome of prompting for one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEntry {
    Value(FieldValue),
    Cancelled,
}

/// Record a new entity will belong to
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    /// Foreign key name on the new record, e.g. `unit_id`
    pub key: String,
    pub id: Uuid,
    pub display: String,
}

impl Owner {
    pub fn of<P: Entity>(parent: &P) -> Self {
        Self {
            key: P::foreign_key_name(),
            id: parent.id().into(),
            display: parent.to_string(),
        }
    }
}

impl<'a> Session<'a> {
    /// Ask for one field until the answer validates or the user cancels
    pub fn prompt_field(&mut self, name: &str, validator: &Validator) -> RentalResult<FieldEntry> {
        loop {
            let raw = match validator.constraints {
                Constraints::Choices(choices) => {
                    let mut options: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
                    options.push(CANCEL_CHOICE.to_string());
                    let index = self
                        .console
                        .pick(&format!("Select {} from the following options", name), &options)?;
                    options.swap_remove(index)
                }
                Constraints::Hint(hint) => self
                    .console
                    .read_line(&format!("Enter {} ({}): ", name, hint))?,
            };

            if is_cancel(&raw) {
                log::debug!("Prompt for '{}' cancelled", name);
                return Ok(FieldEntry::Cancelled);
            }

            match validator.parse(&raw) {
                Ok(value) => {
                    if validator.is_choice() {
                        self.console.write_line(&format!("Enter {}: {}", name, value))?;
                    }
                    return Ok(FieldEntry::Value(value));
                }
                Err(e) => {
                    log::debug!("Rejected {} for '{}': {}", validator.name, name, e);
                    self.invalid_option()?;
                }
            }
        }
    }

    /// Yes/no question; only "y" counts as yes
    pub fn confirm(&mut self, prompt: &str) -> RentalResult<bool> {
        let answer = self.console.read_line(&format!("{} (Y/N) ", prompt))?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    /// Run `action` only when the user confirms
    ///
    /// Returns whether the action ran.
    pub fn run_if_confirmed<F>(&mut self, prompt: &str, action: F) -> RentalResult<bool>
    where
        F: FnOnce(&mut Self) -> RentalResult<()>,
    {
        if !self.confirm(prompt)? {
            return Ok(false);
        }
        action(self)?;
        Ok(true)
    }

    /// Collect every field of a new `T`, then ask to save it
    ///
    /// `None` means the user cancelled a field or declined to save.
    pub fn new_item<T: Entity>(&mut self, owner: Option<&Owner>) -> RentalResult<Option<FieldMap>> {
        self.page_header(
            &format!("Add {}", T::NAME),
            Some(&format!("Add information for new {} record below", T::NAME)),
        )?;
        if let Some(owner) = owner {
            self.say(Tone::Plain, &format!("For: {}", owner.display))?;
        }
        self.cancellation_directions()?;
        self.blank_line()?;

        let mut fields = FieldMap::new();
        for field in T::fields() {
            match self.prompt_field(field.name, &field.validator)? {
                FieldEntry::Value(value) => fields.insert(field.name, value),
                FieldEntry::Cancelled => return Ok(None),
            }
        }
        if let Some(owner) = owner {
            fields.insert(owner.key.clone(), FieldValue::Ref(owner.id));
        }

        self.blank_line()?;
        self.say(Tone::Subheading, &format!("New {} Details:", T::NAME))?;
        self.say(Tone::Plain, &fields.to_string())?;

        if self.confirm(&format!("Save {}?", T::NAME))? {
            Ok(Some(fields))
        } else {
            Ok(None)
        }
    }

    /// Let the user edit fields of `record` in memory until they submit or cancel
    pub fn update_item<T: Entity>(&mut self, record: &mut T) -> RentalResult<()> {
        loop {
            let mut options: Vec<String> = T::fields()
                .iter()
                .map(|f| {
                    let value = record
                        .field_value(f.name)
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    format!("{}: {}", f.name, value)
                })
                .collect();
            options.push(SUBMIT_CHANGES.to_string());

            let index = self
                .console
                .pick(&format!("Select Attribute of {} to Update", T::NAME), &options)?;
            let Some(field) = T::fields().get(index) else {
                return Ok(());
            };

            match self.prompt_field(field.name, &field.validator)? {
                FieldEntry::Value(value) => record.set_field(field.name, value)?,
                FieldEntry::Cancelled => return Ok(()),
            }
        }
    }
}
