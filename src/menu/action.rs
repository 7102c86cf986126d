//! # Menu Actions
//!
//! Everything the user can do at a prompt becomes a `MenuEvent`.
//! Picking "Write" at the main menu? That's `MenuEvent::OpenWrite`.
//! Picking "Note" inside a submenu? That's `MenuEvent::Pick(EntryType::Note)`.
//!
//! `update()` moves the state machine and returns the `Effect` the runner
//! should perform. No I/O here; the runner in `menu/mod.rs` does the editing
//! and network calls.
//!
//! ```text
//! Main ── OpenWrite ──► Write ── Pick(t) ──► WriteEntry(t), stay in Write
//!  ▲                      │
//!  └──── Back / EOF ──────┘
//! Main ── OpenRead ───► Read ─── Pick(t) ──► ReadEntries(t), stay in Read
//!  ▲                      │
//!  └──── Back / EOF ──────┘
//! Main ── Quit / EOF ─► Exit
//! ```

use crate::EntryType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    Write,
    Read,
    /// Terminal. The runner stops once it gets here.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    OpenWrite,
    OpenRead,
    Quit,
    Pick(EntryType),
    Back,
    /// Input closed (Ctrl-D or a drained pipe).
    EndOfInput,
}

/// Work the runner must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    WriteEntry(EntryType),
    ReadEntries(EntryType),
    Quit,
}

pub fn update(state: &mut MenuState, event: MenuEvent) -> Effect {
    match (*state, event) {
        (MenuState::Main, MenuEvent::OpenWrite) => {
            *state = MenuState::Write;
            Effect::None
        }
        (MenuState::Main, MenuEvent::OpenRead) => {
            *state = MenuState::Read;
            Effect::None
        }
        (MenuState::Main, MenuEvent::Quit | MenuEvent::EndOfInput) => {
            *state = MenuState::Exit;
            Effect::Quit
        }

        // Submenus stay put after each entry until the user backs out
        (MenuState::Write, MenuEvent::Pick(entry_type)) => Effect::WriteEntry(entry_type),
        (MenuState::Read, MenuEvent::Pick(entry_type)) => Effect::ReadEntries(entry_type),
        (MenuState::Write | MenuState::Read, MenuEvent::Back | MenuEvent::EndOfInput) => {
            *state = MenuState::Main;
            Effect::None
        }

        _ => Effect::None,
    }
}
