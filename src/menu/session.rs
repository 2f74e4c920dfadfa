//! Session state shared by every procedure
//!
//! Holds the console, storage and settings a procedure works with, the
//! current [`Selection`], and the screen-level messages all screens use.

use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::config::Settings;
use crate::console::{Console, Tone};
use crate::error::{RentalError, RentalResult};
use crate::models::{Expense, Payment, Tenant, Unit};
use crate::services::RecordService;
use crate::storage::Storage;

use super::selection::{Role, Selectable, Selection};
use super::tree::{Node, NodeId, Title};

/// Shown whenever input is rejected
pub const INVALID_INPUT: &str =
    "ERROR: Input not valid. Please try again using the format specified above.";

pub const WELCOME_BANNER: &str =
    "MANAGE RENTAL UNITS, TENANT INFORMATION, AND RELATED PAYMENTS AND EXPENSES";

/// Context handed to every procedure
pub struct Session<'a> {
    pub console: &'a mut dyn Console,
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub selection: Selection,
    today: NaiveDate,
    last_menu: Option<NodeId>,
}

impl<'a> Session<'a> {
    pub fn new(console: &'a mut dyn Console, storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            console,
            storage,
            settings,
            selection: Selection::new(),
            today: Local::now().date_naive(),
            last_menu: None,
        }
    }

    /// Pin "today" for reports that depend on the current date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The menu that listed the node whose procedure is running
    pub fn last_menu(&self) -> Option<NodeId> {
        self.last_menu
    }

    pub(crate) fn set_last_menu(&mut self, id: Option<NodeId>) {
        self.last_menu = id;
    }

    pub fn records(&self) -> RecordService<'a> {
        RecordService::new(self.storage)
    }

    /// The selected record of a type, if one is selected and still stored
    pub fn selected<T: Selectable>(&self) -> RentalResult<Option<T>> {
        match T::selected(&self.selection) {
            Some(id) => self.records().get::<T>(id),
            None => Ok(None),
        }
    }

    /// Display text of the record selected for a role
    pub fn describe(&self, role: Role) -> RentalResult<Option<String>> {
        let text = match role {
            Role::Unit => self.selected::<Unit>()?.map(|r| r.to_string()),
            Role::Tenant => self.selected::<Tenant>()?.map(|r| r.to_string()),
            Role::Payment => self.selected::<Payment>()?.map(|r| r.to_string()),
            Role::Expense => self.selected::<Expense>()?.map(|r| r.to_string()),
        };
        Ok(text)
    }

    /// Heading for a node's menu
    pub fn title_for(&self, node: &Node) -> RentalResult<String> {
        match node.title() {
            Title::Fixed(text) => Ok(text.clone()),
            Title::OptionsFor(role) => Ok(match self.describe(*role)? {
                Some(record) => format!("Options for: {}", record),
                None => node.label().to_string(),
            }),
        }
    }

    pub fn say(&mut self, tone: Tone, text: &str) -> RentalResult<()> {
        self.console.say(tone, text)
    }

    pub fn blank_line(&mut self) -> RentalResult<()> {
        self.console.write_line("")
    }

    /// Clear the screen and print a header, with an optional sub-header
    pub fn page_header(&mut self, header: &str, subheader: Option<&str>) -> RentalResult<()> {
        self.console.clear()?;
        self.say(Tone::Heading, header)?;
        if let Some(sub) = subheader {
            self.say(Tone::Subheading, sub)?;
        }
        self.blank_line()
    }

    pub fn invalid_option(&mut self) -> RentalResult<()> {
        self.say(Tone::Error, INVALID_INPUT)
    }

    pub fn output_message(&mut self, path: &Path) -> RentalResult<()> {
        self.say(Tone::Success, &format!("Output saved to: {}", path.display()))
    }

    pub fn continue_message(&mut self) -> RentalResult<()> {
        self.console.pause()
    }

    pub fn directions(&mut self, text: &str) -> RentalResult<()> {
        self.say(Tone::Direction, text)
    }

    pub fn cancellation_directions(&mut self) -> RentalResult<()> {
        self.directions("Enter `e` or `exit` to cancel")
    }

    /// Tell the user a storage operation failed and log it
    pub fn report_failure(&mut self, action: &str, err: &RentalError) -> RentalResult<()> {
        log::error!("Failed to {}: {}", action, err);
        self.say(Tone::Error, &format!("Could not {}: {}", action, err))?;
        self.continue_message()
    }

    pub fn welcome(&mut self) -> RentalResult<()> {
        self.console.clear()?;
        self.say(Tone::Heading, "WELCOME")?;
        self.say(Tone::Subheading, WELCOME_BANNER)?;
        self.blank_line()?;
        self.continue_message()
    }

    pub fn goodbye(&mut self) -> RentalResult<()> {
        self.console.clear()?;
        self.say(Tone::Heading, "Goodbye!")
    }
}
