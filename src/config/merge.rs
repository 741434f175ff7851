//! Field-by-field merge of instance defaults and call-site config.

use super::types::{Defaults, EffectiveConfig, RequestConfig};

/// Merges instance defaults with a call-site config into the effective
/// configuration for one request.
///
/// Strategy per field:
/// - scalars (`method`, `timeout`, `response_type`, `base_url`, `auth`):
///   call-site overrides defaults; an unset call-site value never does;
/// - `headers`: flattened as common, then the resolved method's defaults,
///   then call-site, each layer overriding case-insensitively;
/// - functions (`validate_status`, transform stages): call-site replaces the
///   default wholesale — stage sequences are never concatenated;
/// - `params`, `data`, `cancel_token`: call-site only.
pub fn merge_config(defaults: &Defaults, request: RequestConfig) -> EffectiveConfig {
    let method = request.method.unwrap_or(defaults.method);

    let mut headers = defaults.headers.common.clone();
    if let Some(method_defaults) = defaults.headers.per_method.get(&method) {
        headers.extend(method_defaults);
    }
    headers.extend(&request.headers);

    EffectiveConfig {
        url: request.url,
        method,
        base_url: request.base_url.or_else(|| defaults.base_url.clone()),
        headers,
        params: request.params,
        data: request.data,
        timeout: request.timeout.unwrap_or(defaults.timeout),
        response_type: request.response_type.unwrap_or(defaults.response_type),
        auth: request.auth.or_else(|| defaults.auth.clone()),
        validate_status: request
            .validate_status
            .unwrap_or_else(|| defaults.validate_status.clone()),
        transform_request: request
            .transform_request
            .unwrap_or_else(|| defaults.transform_request.clone()),
        transform_response: request
            .transform_response
            .unwrap_or_else(|| defaults.transform_response.clone()),
        cancel_token: request.cancel_token,
    }
}
