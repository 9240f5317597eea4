//! Query string and URL parsing.

use crate::cryptokit::url_decode;
use crate::utils::error::{KitError, Result};
use bitflags::bitflags;
use serde_json::{Map, Value};
use std::collections::HashMap;
use url::Url;

fn type_conflict(expected: &str, key: &str, found: &Value) -> KitError {
    let found = match found {
        Value::Array(_) => "array",
        Value::Object(_) => "map",
        _ => "string",
    };
    KitError::parse(format!(
        "expected {} for key '{}', but got {}",
        expected, key, found
    ))
}

fn build(result: &mut Map<String, Value>, keys: &[String], value: String) -> Result<()> {
    let key = keys[0].trim_matches(|c| c == '\'' || c == '"').to_string();
    if keys.len() == 1 {
        result.insert(key, Value::String(value));
        return Ok(());
    }

    // f[] and f[a][]
    if keys[1].is_empty() && keys.len() == 2 {
        // Nested slices are not supported.
        if key.is_empty() {
            return Ok(());
        }
        match result.entry(key.clone()).or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(items) => items.push(Value::String(value)),
            other => return Err(type_conflict("array", &key, other)),
        }
        return Ok(());
    }

    // f[][a]
    if keys[1].is_empty() && !keys[2].is_empty() {
        let items = match result.entry(key.clone()).or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(items) => items,
            other => return Err(type_conflict("array", &key, other)),
        };
        // Keep filling the last element until one of its keys repeats.
        if let Some(Value::Object(last)) = items.last_mut() {
            if !last.contains_key(&keys[2]) {
                let _ = build(last, &keys[2..], value);
                return Ok(());
            }
        }
        let mut child = Map::new();
        let _ = build(&mut child, &keys[2..], value);
        items.push(Value::Object(child));
        return Ok(());
    }

    // f[a] and f[a][b]
    match result.entry(key.clone()).or_insert_with(|| Value::Object(Map::new())) {
        Value::Object(children) => build(children, &keys[1..], value),
        other => Err(type_conflict("map", &key, other)),
    }
}

/// `f[a][b]` becomes `["f", "a", "b"]`. Anything after the first
/// unbracketed tail is dropped, as in `f[a]x[b]`.
fn split_keys(key: &str) -> Vec<String> {
    let bytes = key.as_bytes();
    let mut keys = Vec::new();
    let mut left = 0;
    for (i, ch) in key.char_indices() {
        if ch == '[' && left == 0 {
            left = i;
        } else if ch == ']' && left > 0 {
            if keys.is_empty() {
                keys.push(key[..left].to_string());
            }
            keys.push(key[left + 1..i].to_string());
            left = 0;
            if i + 1 < bytes.len() && bytes[i + 1] != b'[' {
                break;
            }
        }
    }
    if keys.is_empty() {
        keys.push(key.to_string());
    }
    keys
}

/// PHP mangles ` `, `.` and an unmatched `[` in the top-level name to `_`.
fn mangle_first_key(first: &str) -> String {
    let mut mangled = String::with_capacity(first.len());
    for (i, ch) in first.char_indices() {
        match ch {
            ' ' | '.' => mangled.push('_'),
            '[' => {
                mangled.push('_');
                mangled.push_str(&first[i + 1..]);
                break;
            }
            _ => mangled.push(ch),
        }
    }
    mangled
}

/// Parse a query string into nested maps and lists the way PHP's `parse_str` does.
///
/// - `f1=m&f2=n` gives `{"f1": "m", "f2": "n"}`
/// - `f[a]=m&f[b]=n` gives `{"f": {"a": "m", "b": "n"}}`
/// - `f[]=m&f[]=n` gives `{"f": ["m", "n"]}`
/// - `f[][a]=m&f[][b]=n` gives `{"f": [{"a": "m", "b": "n"}]}`
/// - `f=m&f[a]=n` is an error
pub fn parse_str(encoded: &str) -> Result<Map<String, Value>> {
    let mut result = Map::new();
    for part in encoded.split('&') {
        let Some(pos) = part.find('=').filter(|pos| *pos > 0) else {
            continue;
        };
        let key = url_decode(&part[..pos])?;
        let key = key.trim_start_matches(' ');
        if key.is_empty() || key.starts_with('[') {
            continue;
        }
        let value = url_decode(&part[pos + 1..])?;

        let mut keys = split_keys(key);
        keys[0] = mangle_first_key(&keys[0]);
        build(&mut result, &keys, value)?;
    }
    Ok(result)
}

bitflags! {
    /// Parts of a URL selected by [`parse_url`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UrlComponent: u32 {
        const SCHEME = 1;
        const HOST = 2;
        const PORT = 4;
        const USER = 8;
        const PASS = 16;
        const PATH = 32;
        const QUERY = 64;
        const FRAGMENT = 128;
    }
}

/// Split a URL into the requested components.
///
/// Relative references such as `/a/b?x=1` are accepted: scheme, host,
/// port and credentials are then empty. A default port (`:80` on http)
/// is not reported.
pub fn parse_url(str: &str, components: UrlComponent) -> Result<HashMap<&'static str, String>> {
    let (url, relative) = match Url::parse(str) {
        Ok(url) => (url, false),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("relative:///")?;
            (base.join(str)?, true)
        }
        Err(e) => return Err(e.into()),
    };

    let absolute = |s: String| if relative { String::new() } else { s };
    let mut parts = HashMap::new();
    if components.contains(UrlComponent::SCHEME) {
        parts.insert("scheme", absolute(url.scheme().to_string()));
    }
    if components.contains(UrlComponent::HOST) {
        parts.insert("host", absolute(url.host_str().unwrap_or_default().to_string()));
    }
    if components.contains(UrlComponent::PORT) {
        parts.insert(
            "port",
            url.port().map(|p| p.to_string()).unwrap_or_default(),
        );
    }
    if components.contains(UrlComponent::USER) {
        parts.insert("user", url.username().to_string());
    }
    if components.contains(UrlComponent::PASS) {
        parts.insert("pass", url.password().unwrap_or_default().to_string());
    }
    if components.contains(UrlComponent::PATH) {
        parts.insert("path", url.path().to_string());
    }
    if components.contains(UrlComponent::QUERY) {
        parts.insert("query", url.query().unwrap_or_default().to_string());
    }
    if components.contains(UrlComponent::FRAGMENT) {
        parts.insert("fragment", url.fragment().unwrap_or_default().to_string());
    }
    Ok(parts)
}
