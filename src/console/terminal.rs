//! Terminal-backed console
//!
//! Free text goes through plain line-buffered stdin. Picks take over the
//! screen with a ratatui list until the user presses Enter.

use std::io::{self, BufRead, Stdout, Write};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Terminal,
};

use crate::error::{RentalError, RentalResult};

use super::{Console, Tone};

fn terminal_err(e: io::Error) -> RentalError {
    RentalError::Terminal(e.to_string())
}

/// Raw mode + alternate screen for the lifetime of the guard
struct RawScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl RawScreen {
    fn enter() -> RentalResult<Self> {
        enable_raw_mode().map_err(terminal_err)?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            restore_screen(&mut stdout);
            return Err(terminal_err(e));
        }
        match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore_screen(&mut stdout);
                Err(terminal_err(e))
            }
        }
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        restore_screen(self.terminal.backend_mut());
    }
}

/// Leave raw mode and the alternate screen, ignoring failures
fn restore_screen<W: Write>(out: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen);
}

/// What a key press means inside the picker
#[derive(Debug, PartialEq, Eq)]
enum PickerKey {
    Up,
    Down,
    First,
    Last,
    Confirm,
    Abort,
    Ignore,
}

fn classify(key: KeyEvent) -> PickerKey {
    if key.kind != KeyEventKind::Press {
        return PickerKey::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => PickerKey::Abort,
        KeyCode::Up | KeyCode::Char('k') => PickerKey::Up,
        KeyCode::Down | KeyCode::Char('j') => PickerKey::Down,
        KeyCode::Home | KeyCode::Char('g') => PickerKey::First,
        KeyCode::End | KeyCode::Char('G') => PickerKey::Last,
        KeyCode::Enter => PickerKey::Confirm,
        _ => PickerKey::Ignore,
    }
}

/// Console on the process's own terminal
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn pick(&mut self, title: &str, options: &[String]) -> RentalResult<usize> {
        if options.is_empty() {
            return Err(RentalError::Config(format!(
                "Nothing to choose from in '{}'",
                title
            )));
        }

        let mut screen = RawScreen::enter()?;
        let mut state = ListState::default();
        state.select(Some(0));

        loop {
            screen
                .terminal
                .draw(|frame| {
                    let [list_area, help_area] =
                        Layout::vertical([Constraint::Min(3), Constraint::Length(1)])
                            .areas(frame.area());

                    let items: Vec<ListItem> = options
                        .iter()
                        .map(|o| ListItem::new(Line::from(o.as_str())))
                        .collect();
                    let list = List::new(items)
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .title(format!(" {} ", title))
                                .title_style(
                                    Style::default()
                                        .fg(Color::Cyan)
                                        .add_modifier(Modifier::BOLD),
                                ),
                        )
                        .highlight_style(
                            Style::default()
                                .bg(Color::DarkGray)
                                .add_modifier(Modifier::BOLD),
                        )
                        .highlight_symbol("▶ ");
                    frame.render_stateful_widget(list, list_area, &mut state);

                    let help = Paragraph::new("↑/k up  ↓/j down  Enter select  Ctrl-C quit")
                        .style(Style::default().fg(Color::DarkGray));
                    frame.render_widget(help, help_area);
                })
                .map_err(terminal_err)?;

            let key = match event::read().map_err(terminal_err)? {
                Event::Key(key) => classify(key),
                _ => PickerKey::Ignore,
            };

            let current = state.selected().unwrap_or(0);
            match key {
                PickerKey::Up => state.select(Some(current.saturating_sub(1))),
                PickerKey::Down => state.select(Some((current + 1).min(options.len() - 1))),
                PickerKey::First => state.select(Some(0)),
                PickerKey::Last => state.select(Some(options.len() - 1)),
                PickerKey::Confirm => return Ok(current),
                PickerKey::Abort => return Err(RentalError::Interrupted),
                PickerKey::Ignore => {}
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> RentalResult<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{} ", prompt).map_err(terminal_err)?;
        stdout.flush().map_err(terminal_err)?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(terminal_err)?;
        if read == 0 {
            // stdin closed
            return Err(RentalError::Interrupted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_line(&mut self, text: &str) -> RentalResult<()> {
        writeln!(io::stdout(), "{}", text).map_err(terminal_err)
    }

    fn clear(&mut self) -> RentalResult<()> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)).map_err(terminal_err)
    }

    fn pause(&mut self) -> RentalResult<()> {
        self.write_line(&Tone::Direction.paint("Press any key to continue..."))?;
        enable_raw_mode().map_err(terminal_err)?;
        let outcome = loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    break match classify(key) {
                        PickerKey::Abort => Err(RentalError::Interrupted),
                        _ => Ok(()),
                    };
                }
                Ok(_) => continue,
                Err(e) => break Err(terminal_err(e)),
            }
        };
        disable_raw_mode().map_err(terminal_err)?;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_restore_screen_leaves_alternate_screen() {
        let mut out: Vec<u8> = Vec::new();
        restore_screen(&mut out);
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?1049l");
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_classify_navigation_keys() {
        assert_eq!(classify(press(KeyCode::Up, KeyModifiers::NONE)), PickerKey::Up);
        assert_eq!(classify(press(KeyCode::Char('j'), KeyModifiers::NONE)), PickerKey::Down);
        assert_eq!(classify(press(KeyCode::Enter, KeyModifiers::NONE)), PickerKey::Confirm);
        assert_eq!(classify(press(KeyCode::Char('x'), KeyModifiers::NONE)), PickerKey::Ignore);
    }

    #[test]
    fn test_ctrl_c_aborts() {
        assert_eq!(
            classify(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            PickerKey::Abort
        );
        assert_eq!(classify(press(KeyCode::Char('c'), KeyModifiers::NONE)), PickerKey::Ignore);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(classify(key), PickerKey::Ignore);
    }
}
