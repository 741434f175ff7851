//! Request URL construction: base joining and query-string building.

use anyhow::{bail, Result};
use url::form_urlencoded;

/// Whether `url` names its own origin: scheme-prefixed (`https://...`) or
/// protocol-relative (`//host/...`).
pub fn is_absolute(url: &str) -> bool {
    if url.starts_with("//") {
        return true;
    }
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Joins an instance base URL with a request URL.
///
/// Absolute request URLs are returned as-is; relative ones are appended to the
/// base with exactly one slash between them.
pub fn combine(base_url: &str, url: &str) -> String {
    if url.is_empty() {
        return base_url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// Builds the final transport URL from the effective config's pieces.
///
/// Any fragment is stripped before the query is appended; an existing query
/// string is extended with `&`. Parameter names and values are
/// percent-encoded as UTF-8.
///
/// # Errors
///
/// Fails when the resulting URL is relative (no base URL to resolve it
/// against) or does not parse.
pub fn build_url(
    base_url: Option<&str>,
    url: &str,
    params: &[(String, String)],
) -> Result<String> {
    let mut full = match base_url {
        Some(base) if !is_absolute(url) => combine(base, url),
        _ => url.to_string(),
    };

    // Fragments are a client-side artifact; they never reach the wire.
    if let Some(hash) = full.find('#') {
        full.truncate(hash);
    }

    if !params.is_empty() {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        let separator = if full.contains('?') { '&' } else { '?' };
        full.push(separator);
        full.push_str(&query);
    }

    if url::Url::parse(&full).is_err() {
        bail!("invalid request URL: {full}");
    }
    Ok(full)
}
