//! API plumbing for the nimbus CLI: target bookkeeping, token storage and
//! the authenticated HTTP client. Rendering never happens here; handlers
//! pass the decoded responses on to nimbus-render.

pub mod auth;
mod client;
mod error;
mod target;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use target::{TargetEntry, Targets};
