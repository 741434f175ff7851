//! Request configuration: types, library defaults, and the three-layer merge.
//!
//! Configuration comes in three layers — library defaults, instance
//! [`Defaults`], and the per-call [`RequestConfig`] — merged field by field
//! into one [`EffectiveConfig`] that is immutable for the rest of the
//! pipeline.

pub mod constants;
mod defaults;
mod merge;
mod types;

pub use merge::merge_config;
pub use types::{
    Credentials, Defaults, EffectiveConfig, HeaderDefaults, InvalidMethod, Method, RequestConfig,
    ResponseType, StatusValidator,
};
