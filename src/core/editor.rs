//! # Editor Session
//!
//! Hands content to the user's external editor and reads back the result.
//!
//! ```text
//! initial ──► scratch file ──► $EDITOR <path> ──► read back ──► diff
//!                  │                                              │
//!                  └────────────── removed on drop ◄──────────────┘
//! ```
//!
//! The scratch file is owned by a guard, so it disappears on every exit path:
//! normal return, launch failure, read failure, or a panic unwinding through.
//! Live scratch paths are also tracked in a process-wide list so the Ctrl-C
//! handler can remove them before the process exits.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use log::{debug, info, warn};
use uuid::Uuid;

use crate::EntryType;
use crate::core::config::Config;
use crate::core::process::{Launcher, SystemLauncher};

static LIVE_SCRATCH_FILES: LazyLock<ScratchRegistry> = LazyLock::new(ScratchRegistry::default);

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum EditorError {
    /// The editor command was blank after splitting.
    EmptyCommand,
    /// The editor executable could not be started (not found, not executable).
    Launch { program: String, source: io::Error },
    /// Creating, writing, or reading the scratch file failed.
    TempFile(io::Error),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::EmptyCommand => write!(f, "editor command is empty"),
            EditorError::Launch { program, source } => {
                write!(f, "could not start editor '{program}': {source}")
            }
            EditorError::TempFile(e) => write!(f, "temp file error: {e}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::EmptyCommand => None,
            EditorError::Launch { source, .. } => Some(source),
            EditorError::TempFile(e) => Some(e),
        }
    }
}

// ============================================================================
// Scratch File Guard
// ============================================================================

/// Paths of scratch files that currently exist on disk.
///
/// Sessions share the process-wide registry unless given their own.
#[derive(Clone, Debug, Default)]
pub struct ScratchRegistry {
    files: Arc<Mutex<Vec<PathBuf>>>,
}

impl ScratchRegistry {
    /// The registry the interrupt handler drains.
    pub fn global() -> Self {
        LIVE_SCRATCH_FILES.clone()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Deletes every registered file. Returns how many were removed.
    pub fn remove_all(&self) -> usize {
        let removed = self
            .lock()
            .drain(..)
            .filter(|path| fs::remove_file(path).is_ok())
            .count();
        if removed > 0 {
            info!("Removed {} scratch file(s) on interrupt", removed);
        }
        removed
    }

    fn register(&self, path: &Path) {
        self.lock().push(path.to_path_buf());
    }

    fn forget(&self, path: &Path) {
        self.lock().retain(|p| p != path);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Deletes every scratch file that is still live in the process-wide registry.
///
/// Used by the interrupt handler, which exits without unwinding.
pub fn remove_live_scratch_files() -> usize {
    ScratchRegistry::global().remove_all()
}

/// A uniquely named temp file that deletes itself when dropped.
struct ScratchFile {
    path: PathBuf,
    registry: ScratchRegistry,
}

impl ScratchFile {
    fn create(
        dir: &Path,
        registry: &ScratchRegistry,
        entry_type: EntryType,
        initial: &str,
    ) -> io::Result<Self> {
        let path = dir.join(format!("well-{}-{}.md", entry_type, Uuid::new_v4()));
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;

        // Guard exists before the write so a failed write still cleans up
        registry.register(&path);
        let scratch = Self {
            path,
            registry: registry.clone(),
        };
        file.write_all(initial.as_bytes())?;
        file.flush()?;
        Ok(scratch)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed scratch file {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove scratch file {}: {}", self.path.display(), e),
        }
        self.registry.forget(&self.path);
    }
}

// ============================================================================
// Session
// ============================================================================

/// The result of one trip through the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub original: String,
    pub content: String,
    pub changed: bool,
    /// `None` when the editor was killed by a signal.
    pub exit_code: Option<i32>,
    /// Where the scratch file lived. Already deleted by the time you see this.
    pub path: PathBuf,
}

pub struct EditorSession<L: Launcher = SystemLauncher> {
    command: String,
    temp_dir: PathBuf,
    launcher: L,
    registry: ScratchRegistry,
}

impl EditorSession<SystemLauncher> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.editor.clone(), SystemLauncher)
    }
}

impl<L: Launcher> EditorSession<L> {
    pub fn new(command: impl Into<String>, launcher: L) -> Self {
        Self {
            command: command.into(),
            temp_dir: std::env::temp_dir(),
            launcher,
            registry: ScratchRegistry::global(),
        }
    }

    /// Put scratch files somewhere other than the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Track scratch files in `registry` instead of the process-wide one.
    pub fn with_registry(mut self, registry: ScratchRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Opens `initial` in the editor and blocks until the editor exits.
    ///
    /// A non-zero exit is logged but not treated as failure; `changed` is
    /// decided purely by comparing the file before and after.
    pub fn edit(&self, entry_type: EntryType, initial: &str) -> Result<EditOutcome, EditorError> {
        // "code --wait" style commands carry their own arguments
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(EditorError::EmptyCommand)?;
        let mut args: Vec<OsString> = parts.map(OsString::from).collect();

        let scratch = ScratchFile::create(&self.temp_dir, &self.registry, entry_type, initial)
            .map_err(EditorError::TempFile)?;
        args.push(scratch.path.clone().into_os_string());

        info!(
            "Opening {} ({} bytes) in {}",
            entry_type,
            initial.len(),
            program
        );

        let exit_code = self
            .launcher
            .launch_blocking(program, &args)
            .map_err(|source| {
                warn!("Failed to launch editor {}: {}", program, source);
                EditorError::Launch {
                    program: program.to_string(),
                    source,
                }
            })?;

        if exit_code != Some(0) {
            warn!("Editor {} exited with {:?}; reading back anyway", program, exit_code);
        }

        let content = fs::read_to_string(&scratch.path).map_err(EditorError::TempFile)?;
        let changed = content != initial;
        debug!("Edit finished: {} bytes, changed={}", content.len(), changed);

        let path = scratch.path.clone();
        drop(scratch);

        Ok(EditOutcome {
            original: initial.to_string(),
            content,
            changed,
            exit_code,
            path,
        })
    }
}
