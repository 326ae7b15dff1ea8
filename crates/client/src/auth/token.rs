//! Bearer-token normalization.
//!
//! The staff login endpoint has shipped its token in three shapes across
//! backend iterations: raw text, a JSON-quoted string, and a JSON object
//! with one of several field names. Everything downstream wants exactly one
//! shape - the bare token - so both entry points here reduce to that, and
//! malformed input degrades to the empty string ("not authenticated")
//! instead of an error.

/// Strip surrounding quotes, a `Bearer ` prefix, and whitespace.
///
/// Idempotent: normalizing an already-bare token changes nothing.
#[must_use]
pub fn normalize_token(raw: &str) -> String {
    let mut token = raw.trim();

    // Remove one matching pair of surrounding quotes
    if token.len() >= 2
        && ((token.starts_with('"') && token.ends_with('"'))
            || (token.starts_with('\'') && token.ends_with('\'')))
    {
        token = token.get(1..token.len() - 1).unwrap_or_default();
    }

    let token = token.trim();

    // Remove a Bearer prefix, case-insensitively
    let bare = token
        .get(..7)
        .filter(|prefix| prefix.eq_ignore_ascii_case("bearer "))
        .and_then(|_| token.get(7..))
        .unwrap_or(token);

    bare.trim().to_owned()
}

/// Extract the bearer token from a raw login response body.
///
/// Accepts plain text, a JSON string, or a JSON object exposing `token`,
/// `accessToken` or `access_token` (checked in that order). Anything else
/// yields the empty string.
#[must_use]
pub fn extract_token(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => normalize_token(&s),
        Ok(serde_json::Value::Object(map)) => ["token", "accessToken", "access_token"]
            .iter()
            .find_map(|field| map.get(*field))
            .and_then(|value| value.as_str())
            .map(normalize_token)
            .unwrap_or_default(),
        // JSON, but no token-bearing shape
        Ok(_) => String::new(),
        // Not JSON at all: treat the body itself as the token.
        Err(_) => normalize_token(body),
    }
}
