//! # Core
//!
//! Everything Well needs that isn't the network or the menu.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │          MENU           │
//!                    │  (prompts, workflows)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   config   │      │   editor   │      │    API     │
//!     │ (env, .env │      │ (scratch + │      │  (reqwest) │
//!     │  toml)     │      │  $EDITOR)  │      │            │
//!     └────────────┘      └─────┬──────┘      └────────────┘
//!                               ▼
//!                         ┌────────────┐
//!                         │  process   │
//!                         │ (Launcher) │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `Config` resolution and `ConfigError`
//! - [`editor`]: `EditorSession`, the scratch file guard, `EditorError`
//! - [`process`]: the `Launcher` capability and `SystemLauncher`

pub mod config;
pub mod editor;
pub mod process;
