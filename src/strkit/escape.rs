use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HTML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("valid regex")
});

/// Replace every line break (`\r\n`, `\n\r`, `\r`, `\n`) with a `<br>` tag.
pub fn nl2br(str: &str, is_xhtml: bool) -> String {
    let br = if is_xhtml { "<br />" } else { "<br>" };
    let mut result = String::with_capacity(str.len());
    let mut chars = str.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                let pair = if c == '\r' { '\n' } else { '\r' };
                if chars.peek() == Some(&pair) {
                    chars.next();
                }
                result.push_str(br);
            }
            other => result.push(other),
        }
    }
    result
}

pub fn addslashes(str: &str) -> String {
    let mut result = String::with_capacity(str.len());
    for c in str.chars() {
        if matches!(c, '\'' | '"' | '\\') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Undo [`addslashes`]: drop single backslashes, keep one of every escaped pair.
pub fn stripslashes(str: &str) -> String {
    let mut result = String::with_capacity(str.len());
    let mut chars = str.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if chars.peek() == Some(&'\\') {
                chars.next();
                result.push('\\');
            }
            continue;
        }
        result.push(c);
    }
    result
}

pub fn quotemeta(str: &str) -> String {
    let mut result = String::with_capacity(str.len());
    for c in str.chars() {
        if matches!(
            c,
            '.' | '+' | '\\' | '(' | '$' | ')' | '[' | '^' | ']' | '*' | '?'
        ) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

pub fn htmlentities(str: &str) -> String {
    let mut result = String::with_capacity(str.len());
    for c in str.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '\'' => result.push_str("&#39;"),
            '"' => result.push_str("&#34;"),
            other => result.push(other),
        }
    }
    result
}

/// Decode named entities for the escaped set plus `&nbsp;`, and any numeric
/// entity. Unknown entities are left as they are.
pub fn html_entity_decode(str: &str) -> String {
    HTML_ENTITY
        .replace_all(str, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match body {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "amp" => Some('&'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
