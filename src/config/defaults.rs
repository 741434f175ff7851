//! The library configuration, built pure at construction time.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::constants::{DEFAULT_ACCEPT, DEFAULT_STATUS_LOWER, DEFAULT_STATUS_UPPER, HEADER_ACCEPT};
use super::types::{Defaults, HeaderDefaults, Method, ResponseType};
use crate::headers::Headers;
use crate::transform;

/// Builds the library defaults: `get`, no timeout, JSON responses, the
/// standard `Accept` header, a `[200,300)` success range, and the JSON codec
/// transform stages.
///
/// Pure: constructs a fresh value every call and touches no shared state.
pub(super) fn library_defaults() -> Defaults {
    let mut common = Headers::new();
    common.set(HEADER_ACCEPT, DEFAULT_ACCEPT);

    let per_method = Method::ALL
        .iter()
        .map(|&method| (method, Headers::new()))
        .collect::<HashMap<_, _>>();

    Defaults {
        method: Method::Get,
        timeout: Duration::ZERO,
        response_type: ResponseType::Json,
        base_url: None,
        headers: HeaderDefaults { common, per_method },
        auth: None,
        validate_status: Arc::new(|status| {
            (DEFAULT_STATUS_LOWER..DEFAULT_STATUS_UPPER).contains(&status)
        }),
        transform_request: transform::default_request_transforms(),
        transform_response: transform::default_response_transforms(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_defaults_shape() {
        let defaults = library_defaults();
        assert_eq!(defaults.method, Method::Get);
        assert_eq!(defaults.timeout, Duration::ZERO);
        assert_eq!(defaults.response_type, ResponseType::Json);
        assert_eq!(defaults.headers.common.get("accept"), Some(DEFAULT_ACCEPT));
        assert_eq!(defaults.headers.per_method.len(), Method::ALL.len());
    }

    #[test]
    fn default_status_predicate_accepts_exactly_2xx() {
        let defaults = library_defaults();
        assert!(!(defaults.validate_status)(199));
        assert!((defaults.validate_status)(200));
        assert!((defaults.validate_status)(204));
        assert!((defaults.validate_status)(299));
        assert!(!(defaults.validate_status)(300));
        assert!(!(defaults.validate_status)(404));
    }
}
