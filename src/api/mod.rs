pub mod client;
pub mod provider;
pub mod types;

pub use client::WellClient;
pub use provider::{ApiError, EntryApi, Receipt};
pub use types::EntryPayload;
