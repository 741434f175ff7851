//! Header and content-type constants used by defaults and transforms.

/// `Accept` header name.
pub const HEADER_ACCEPT: &str = "Accept";
/// `Authorization` header name.
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// `Content-Type` header name.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// Default `Accept` value advertised on every request.
pub const DEFAULT_ACCEPT: &str = "application/json, text/plain, */*";

/// Content type set by the default request transform for JSON bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";
/// Content type set by the default request transform for form bodies.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Default success-range bounds for status validation: `[lower, upper)`.
pub const DEFAULT_STATUS_LOWER: u16 = 200;
/// Upper (exclusive) bound of the default success range.
pub const DEFAULT_STATUS_UPPER: u16 = 300;
