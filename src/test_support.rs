//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, VecDeque};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::EntryType;
use crate::api::{ApiError, EntryApi, Receipt};
use crate::core::process::Launcher;

/// One recorded call against `MemoryApi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FetchAll(EntryType),
    Append(EntryType, String),
    ReplaceAll(EntryType, String),
}

/// An in-memory Well service that records every call.
#[derive(Default)]
pub struct MemoryApi {
    store: Mutex<HashMap<EntryType, String>>,
    calls: Mutex<Vec<ApiCall>>,
    failure: Option<(u16, String)>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds stored content for one entry type.
    pub fn with_entries(self, entry_type: EntryType, text: &str) -> Self {
        self.store.lock().unwrap().insert(entry_type, text.to_string());
        self
    }

    /// Every call fails with this status (after being recorded).
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            failure: Some((status, body.to_string())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self, entry_type: EntryType) -> Option<String> {
        self.store.lock().unwrap().get(&entry_type).cloned()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, body)) => Err(ApiError::from_status(*status, body.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EntryApi for MemoryApi {
    async fn fetch_all(&self, entry_type: EntryType) -> Result<String, ApiError> {
        self.record(ApiCall::FetchAll(entry_type))?;
        Ok(self.stored(entry_type).unwrap_or_default())
    }

    async fn append(&self, entry_type: EntryType, text: &str) -> Result<Receipt, ApiError> {
        self.record(ApiCall::Append(entry_type, text.to_string()))?;
        let mut store = self.store.lock().unwrap();
        let entry = store.entry(entry_type).or_default();
        entry.push_str(text);
        entry.push('\n');
        Ok(Receipt {
            status: 201,
            body: format!("{entry_type} saved"),
        })
    }

    async fn replace_all(&self, entry_type: EntryType, text: &str) -> Result<Receipt, ApiError> {
        self.record(ApiCall::ReplaceAll(entry_type, text.to_string()))?;
        self.store.lock().unwrap().insert(entry_type, text.to_string());
        Ok(Receipt {
            status: 200,
            body: format!("{entry_type} replaced"),
        })
    }
}

/// What the pretend editor does to the file on one launch.
#[derive(Debug, Clone)]
pub enum EditorAction {
    /// Quit without saving.
    Leave,
    /// Overwrite the whole file.
    Replace(String),
    /// Add text at the end.
    Append(String),
    /// Overwrite, then exit with a non-zero code.
    ReplaceAndFail(String, i32),
    /// The executable can't be found.
    FailToLaunch,
}

/// A `Launcher` that plays back scripted editor actions, one per launch.
/// Clones share the script and the log of touched paths.
#[derive(Clone, Default)]
pub struct ScriptedLauncher {
    script: Arc<Mutex<VecDeque<EditorAction>>>,
    launched: Arc<Mutex<Vec<PathBuf>>>,
}

impl ScriptedLauncher {
    pub fn new(actions: Vec<EditorAction>) -> Self {
        Self {
            script: Arc::new(Mutex::new(actions.into())),
            launched: Arc::default(),
        }
    }

    /// Scratch paths handed to the editor, in launch order.
    pub fn launched(&self) -> Vec<PathBuf> {
        self.launched.lock().unwrap().clone()
    }
}

impl Launcher for ScriptedLauncher {
    fn launch_blocking(&self, _program: &str, args: &[OsString]) -> io::Result<Option<i32>> {
        let path = PathBuf::from(args.last().expect("scratch path argument"));
        self.launched.lock().unwrap().push(path.clone());

        let action = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(EditorAction::Leave);

        match action {
            EditorAction::Leave => Ok(Some(0)),
            EditorAction::Replace(text) => {
                fs::write(&path, text)?;
                Ok(Some(0))
            }
            EditorAction::Append(text) => {
                let mut current = fs::read_to_string(&path)?;
                current.push_str(&text);
                fs::write(&path, current)?;
                Ok(Some(0))
            }
            EditorAction::ReplaceAndFail(text, code) => {
                fs::write(&path, text)?;
                Ok(Some(code))
            }
            EditorAction::FailToLaunch => Err(io::Error::new(io::ErrorKind::NotFound, "no such editor")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_all_on_never_written_type_is_empty() {
        let api = MemoryApi::new();
        for entry_type in EntryType::ALL {
            assert_eq!(api.fetch_all(entry_type).await.unwrap(), "");
        }
    }

    #[tokio::test]
    async fn test_replace_then_fetch_round_trips() {
        let api = MemoryApi::new().with_entries(EntryType::Note, "old\n");
        api.replace_all(EntryType::Note, "call mom\ncall dad\n").await.unwrap();
        assert_eq!(api.fetch_all(EntryType::Note).await.unwrap(), "call mom\ncall dad\n");
    }

    #[tokio::test]
    async fn test_failing_api_still_records() {
        let api = MemoryApi::failing(401, "nope");
        let err = api.append(EntryType::Task, "x").await.unwrap_err();
        assert!(matches!(err, ApiError::Auth { status: 401, .. }));
        assert_eq!(api.calls(), vec![ApiCall::Append(EntryType::Task, "x".to_string())]);
        assert!(api.stored(EntryType::Task).is_none());
    }
}
