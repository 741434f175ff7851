//! Cooperative request cancellation.
//!
//! A [`CancelToken`] is a one-shot signal: it transitions at most once from
//! pending to cancelled, carries the [`Cancel`] reason for that transition,
//! and can be observed either synchronously ([`CancelToken::check`]) or by
//! awaiting settlement ([`CancelToken::cancelled`]).

mod token;

pub use token::{Cancel, CancelSource, CancelToken};
