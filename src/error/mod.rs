//! Error types and outcome classification.
//!
//! Every pipeline failure is classified exactly once into an [`Error`]
//! variant with the effective configuration attached; cancellation is the one
//! exception — it carries the raw [`crate::Cancel`] value and is never
//! wrapped, so callers branch on it by variant rather than message text.

mod classify;
mod types;

pub use types::{Error, TIMEOUT_ERROR_CODE};

pub(crate) use classify::{status_error, transport_error};
