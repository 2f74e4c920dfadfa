//! Console driven by a queue of canned answers, for tests

use std::collections::VecDeque;

use crate::error::{RentalError, RentalResult};

use super::{Console, Tone};

/// One canned user response
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Pick the option with exactly this label
    Choose(String),
    /// Pick by position
    Index(usize),
    /// Type a line of text
    Type(String),
}

pub fn choose(label: &str) -> Answer {
    Answer::Choose(label.to_string())
}

pub fn typed(text: &str) -> Answer {
    Answer::Type(text.to_string())
}

/// Console that replays answers and records everything shown
///
/// Running out of answers ends the session with `RentalError::Interrupted`,
/// which is how tests stop the otherwise endless navigation loop.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<Answer>,
    /// Every line written, picker title and prompt, without styling
    pub transcript: Vec<String>,
    /// `(title, options)` of every pick presented
    pub picks: Vec<(String, Vec<String>)>,
    /// Lines written with [`Tone::Error`]
    pub errors: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    fn next(&mut self) -> RentalResult<Answer> {
        self.answers.pop_front().ok_or(RentalError::Interrupted)
    }
}

impl Console for ScriptedConsole {
    fn pick(&mut self, title: &str, options: &[String]) -> RentalResult<usize> {
        self.transcript.push(format!("[pick] {}", title));
        self.picks.push((title.to_string(), options.to_vec()));

        match self.next()? {
            Answer::Choose(label) => options.iter().position(|o| *o == label).ok_or_else(|| {
                RentalError::Config(format!(
                    "Scripted answer '{}' not among options {:?} of '{}'",
                    label, options, title
                ))
            }),
            Answer::Index(i) if i < options.len() => Ok(i),
            other => Err(RentalError::Config(format!(
                "Scripted answer {:?} does not fit pick '{}'",
                other, title
            ))),
        }
    }

    fn read_line(&mut self, prompt: &str) -> RentalResult<String> {
        self.transcript.push(format!("[prompt] {}", prompt));
        match self.next()? {
            Answer::Type(text) => Ok(text),
            other => Err(RentalError::Config(format!(
                "Scripted answer {:?} does not fit prompt '{}'",
                other, prompt
            ))),
        }
    }

    fn write_line(&mut self, text: &str) -> RentalResult<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn clear(&mut self) -> RentalResult<()> {
        Ok(())
    }

    fn say(&mut self, tone: Tone, text: &str) -> RentalResult<()> {
        if tone == Tone::Error {
            self.errors.push(text.to_string());
        }
        self.write_line(text)
    }

    fn pause(&mut self) -> RentalResult<()> {
        self.transcript.push("[pause]".to_string());
        Ok(())
    }
}
