//! Well library exports for testing

use std::fmt;

use serde::Serialize;

pub mod api;
pub mod core;
pub mod menu;

#[cfg(test)]
pub mod test_support;

/// The three kinds of entries the Well service stores.
/// Each one maps to its own remote resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Task,
    Note,
    Bookmark,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [EntryType::Task, EntryType::Note, EntryType::Bookmark];

    /// Path segment and wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Task => "task",
            EntryType::Note => "note",
            EntryType::Bookmark => "bookmark",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
