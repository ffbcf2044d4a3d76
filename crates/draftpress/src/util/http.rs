// Shared HTTP utilities for provider adapters.

use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::Value;

/// Parse the `Retry-After` header as either numeric seconds or HTTP-date
/// (RFC 7231). Returns `None` if the header is missing, cannot be parsed, or
/// the date is in the past.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get("retry-after")?.to_str().ok()?;

    // Try numeric seconds first (most common for APIs).
    // Guard against negative, NaN, and infinity values that would panic in
    // Duration::from_secs_f64().
    if let Ok(secs) = value.parse::<f64>() {
        if secs >= 0.0 && secs.is_finite() {
            return Some(Duration::from_secs_f64(secs));
        }
        return None;
    }

    // Try HTTP-date format (RFC 7231)
    if let Ok(date) = httpdate::parse_http_date(value) {
        let now = std::time::SystemTime::now();
        if let Ok(duration) = date.duration_since(now) {
            return Some(duration);
        }
        // Date is in the past — return None
    }

    None
}

/// Walk a nested JSON value using an array of string keys.
/// Returns `Some(&Value)` at the end of the path, or `None` if any key is missing.
pub fn extract_json_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    Some(current)
}

/// Extract an error message and optional error code from a JSON body
/// using configurable JSON paths.
///
/// Returns `(message, Option<code>)`. If the message path doesn't resolve,
/// falls back to the full JSON body serialized as a string.
pub fn parse_provider_error_message(
    body: &Value,
    message_path: &[&str],
    code_path: &[&str],
) -> (String, Option<String>) {
    let message = extract_json_path(body, message_path)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| body.to_string());

    let code = extract_json_path(body, code_path)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    (message, code)
}
