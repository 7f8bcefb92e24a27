//! Wire-to-model key normalization.
//!
//! The backend speaks snake_case JSON; the in-memory model is camelCase.
//! Every inbound response body is passed through [`camelize`] exactly once
//! by the transport; the function is a pure, total map over
//! [`serde_json::Value`] and is idempotent, so an accidental second pass is
//! harmless.

use serde_json::Value;

/// Rewrite a single underscore-separated key to camelCase.
///
/// Only an underscore followed by an ASCII lowercase letter is collapsed
/// (`token_balance` → `tokenBalance`); underscores followed by digits,
/// uppercase letters or nothing are kept as-is. Keys already in camelCase
/// are returned unchanged.
pub fn camelize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(ch) = chars.next() {
        match chars.peek() {
            Some(&next) if ch == '_' && next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Recursively camelize every object key in a JSON value.
///
/// Arrays are mapped element-wise, primitives pass through unchanged, and
/// string *values* are never touched (enum wire values like `admin_credit`
/// stay snake_case).
pub fn camelize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (camelize_key(&k), camelize(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camelize).collect()),
        primitive => primitive,
    }
}
