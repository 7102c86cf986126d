use crossterm::style::Stylize;

use crate::EntryType;
use crate::menu::action::{MenuEvent, MenuState};

/// Title and numbered options for a menu screen.
pub struct Screen {
    pub title: &'static str,
    pub options: &'static [&'static str],
}

const MAIN: Screen = Screen {
    title: "Well API",
    options: &["Write Entry", "Read Entry", "Exit"],
};

const WRITE: Screen = Screen {
    title: "Write Entry",
    options: &["Task", "Note", "Bookmark", "Back to Main Menu"],
};

const READ: Screen = Screen {
    title: "Read Entry",
    options: &["Task", "Note", "Bookmark", "Back to Main Menu"],
};

/// The screen shown in `state`. `None` once the menu has exited.
pub fn screen(state: MenuState) -> Option<&'static Screen> {
    match state {
        MenuState::Main => Some(&MAIN),
        MenuState::Write => Some(&WRITE),
        MenuState::Read => Some(&READ),
        MenuState::Exit => None,
    }
}

impl Screen {
    /// Header plus one line per option, ready to print.
    pub fn render(&self) -> String {
        let mut out = format!("\n{}\n", format!("=== {} ===", self.title).bold());
        for (i, option) in self.options.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, option));
        }
        out
    }

    pub fn prompt(&self) -> String {
        format!("Choose (1-{}): ", self.options.len())
    }

    pub fn invalid(&self) -> String {
        format!("Invalid choice. Press 1-{}", self.options.len())
    }
}

/// Maps a line typed at `state`'s prompt to an event.
///
/// Accepts the option number or a word alias, case-insensitive.
pub fn parse(state: MenuState, input: &str) -> Option<MenuEvent> {
    let input = input.trim().to_ascii_lowercase();
    match state {
        MenuState::Main => match input.as_str() {
            "1" | "w" | "write" => Some(MenuEvent::OpenWrite),
            "2" | "r" | "read" => Some(MenuEvent::OpenRead),
            "3" | "q" | "quit" | "exit" => Some(MenuEvent::Quit),
            _ => None,
        },
        MenuState::Write | MenuState::Read => match input.as_str() {
            "1" | "t" | "task" => Some(MenuEvent::Pick(EntryType::Task)),
            "2" | "n" | "note" => Some(MenuEvent::Pick(EntryType::Note)),
            "3" | "b" | "bookmark" => Some(MenuEvent::Pick(EntryType::Bookmark)),
            "4" | "back" => Some(MenuEvent::Back),
            _ => None,
        },
        MenuState::Exit => None,
    }
}

/// Only an explicit yes counts. Anything else, including blank, declines.
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
