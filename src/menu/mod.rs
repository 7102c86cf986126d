//! # Menu
//!
//! The interactive loop: print a screen, read a line, turn it into a
//! `MenuEvent`, run `update()`, then carry out the `Effect`.
//!
//! Workflows never take the process down. Editor and API failures are
//! printed with the operation that failed, and the user lands back at the
//! prompt they came from. Only terminal I/O errors escape `run()`.
//!
//! ## Modules
//!
//! - [`action`]: `MenuState`, `MenuEvent`, `Effect`, and the `update()` reducer
//! - [`prompt`]: screen text and input parsing

pub mod action;
pub mod prompt;

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crossterm::style::Stylize;
use log::{info, warn};

use crate::EntryType;
use crate::api::{EntryApi, Receipt};
use crate::core::editor::EditorSession;
use crate::core::process::Launcher;
use action::{Effect, MenuEvent, MenuState, update};

pub struct Menu<R, W, L: Launcher> {
    api: Arc<dyn EntryApi>,
    editor: EditorSession<L>,
    input: R,
    output: W,
    state: MenuState,
}

impl<R: BufRead, W: Write, L: Launcher> Menu<R, W, L> {
    pub fn new(api: Arc<dyn EntryApi>, editor: EditorSession<L>, input: R, output: W) -> Self {
        Self {
            api,
            editor,
            input,
            output,
            state: MenuState::Main,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Runs until the user exits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        info!("Menu started (editor: {})", self.editor.command());
        while self.state != MenuState::Exit {
            let event = self.next_event()?;
            let effect = update(&mut self.state, event);
            match effect {
                Effect::None => {}
                Effect::WriteEntry(entry_type) => self.write_entry(entry_type).await?,
                Effect::ReadEntries(entry_type) => self.read_entries(entry_type).await?,
                Effect::Quit => writeln!(self.output, "Goodbye!")?,
            }
        }
        info!("Menu exited");
        Ok(())
    }

    /// Shows the current screen until the user types something it understands.
    fn next_event(&mut self) -> io::Result<MenuEvent> {
        let Some(screen) = prompt::screen(self.state) else {
            return Ok(MenuEvent::EndOfInput);
        };
        write!(self.output, "{}", screen.render())?;
        loop {
            let Some(line) = self.ask(&screen.prompt())? else {
                writeln!(self.output)?;
                return Ok(MenuEvent::EndOfInput);
            };
            match prompt::parse(self.state, &line) {
                Some(event) => return Ok(event),
                None => writeln!(self.output, "{}", screen.invalid())?,
            }
        }
    }

    /// Prints `question` and reads one line. `None` at end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn report_failure(&mut self, operation: &str, err: &dyn Display) -> io::Result<()> {
        warn!("{} failed: {}", operation, err);
        writeln!(self.output, "{}", format!("{operation} failed: {err}").red())
    }

    fn report_success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.green())
    }

    /// Status line, then the server's reply when it said anything.
    fn report_receipt(&mut self, message: &str, receipt: &Receipt) -> io::Result<()> {
        self.report_success(&format!("{message} (HTTP {}).", receipt.status))?;
        let body = receipt.body.trim();
        if !body.is_empty() {
            writeln!(self.output, "Response: {body}")?;
        }
        Ok(())
    }

    /// Opens an empty editor and appends whatever the user wrote.
    async fn write_entry(&mut self, entry_type: EntryType) -> io::Result<()> {
        let outcome = match self.editor.edit(entry_type, "") {
            Ok(outcome) => outcome,
            Err(e) => return self.report_failure(&format!("Editing new {entry_type}"), &e),
        };

        let text = outcome.content.trim();
        if !outcome.changed || text.is_empty() {
            info!("Empty {} entry, nothing sent", entry_type);
            writeln!(self.output, "No content entered. Nothing was sent.")?;
            return Ok(());
        }

        match self.api.append(entry_type, text).await {
            Ok(receipt) => {
                info!("Appended {} entry ({} bytes)", entry_type, text.len());
                self.report_receipt(&format!("Saved {entry_type} entry"), &receipt)
            }
            Err(e) => self.report_failure(&format!("Sending {entry_type} entry"), &e),
        }
    }

    /// Opens everything stored for `entry_type`; replaces it only on confirmation.
    async fn read_entries(&mut self, entry_type: EntryType) -> io::Result<()> {
        let current = match self.api.fetch_all(entry_type).await {
            Ok(text) => text,
            Err(e) => return self.report_failure(&format!("Fetching {entry_type} entries"), &e),
        };

        let outcome = match self.editor.edit(entry_type, &current) {
            Ok(outcome) => outcome,
            Err(e) => return self.report_failure(&format!("Editing {entry_type} entries"), &e),
        };

        if !outcome.changed {
            writeln!(self.output, "No changes. Nothing was sent.")?;
            return Ok(());
        }

        let question = format!(
            "Overwrite all {entry_type} entries on the server with your edits? [y/N]: "
        );
        let confirmed = self.ask(&question)?.is_some_and(|answer| prompt::is_yes(&answer));
        if !confirmed {
            info!("Replace of {} declined", entry_type);
            writeln!(self.output, "Edits discarded. Nothing was sent.")?;
            return Ok(());
        }

        match self.api.replace_all(entry_type, &outcome.content).await {
            Ok(receipt) => {
                info!("Replaced {} entries ({} bytes)", entry_type, outcome.content.len());
                self.report_receipt(&format!("Replaced {entry_type} entries"), &receipt)
            }
            Err(e) => self.report_failure(&format!("Replacing {entry_type} entries"), &e),
        }
    }
}
