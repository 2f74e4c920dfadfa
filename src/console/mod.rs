//! Interactive I/O seam
//!
//! The menu engine never touches stdin/stdout directly. It talks to a
//! [`Console`], which is a real terminal in the binary and a scripted queue
//! of answers in tests.

mod terminal;

#[cfg(test)]
pub mod scripted;

pub use terminal::TerminalConsole;

use crossterm::style::Stylize;

use crate::error::RentalResult;

/// How a line of output should be emphasised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Screen headers
    Heading,
    /// Sub-headers such as the prompted field name
    Subheading,
    /// Instructions to the user
    Direction,
    Success,
    Error,
}

impl Tone {
    pub fn paint(self, text: &str) -> String {
        match self {
            Tone::Plain => text.to_string(),
            Tone::Heading => text.bold().to_string(),
            Tone::Subheading => text.yellow().to_string(),
            Tone::Direction => text.cyan().to_string(),
            Tone::Success => text.green().to_string(),
            Tone::Error => text.red().to_string(),
        }
    }
}

/// Blocking user interaction
pub trait Console {
    /// Present a closed list and return the chosen index
    ///
    /// The returned index is always within `options`.
    fn pick(&mut self, title: &str, options: &[String]) -> RentalResult<usize>;

    /// Prompt for one line of free text, without the trailing newline
    fn read_line(&mut self, prompt: &str) -> RentalResult<String>;

    fn write_line(&mut self, text: &str) -> RentalResult<()>;

    fn clear(&mut self) -> RentalResult<()>;

    fn say(&mut self, tone: Tone, text: &str) -> RentalResult<()> {
        self.write_line(&tone.paint(text))
    }

    /// Wait for the user before moving on
    fn pause(&mut self) -> RentalResult<()> {
        self.read_line(&Tone::Direction.paint("Press Enter to continue..."))
            .map(|_| ())
    }
}
