//! String helpers modelled on their PHP namesakes.
//!
//! Byte offsets are returned wherever PHP returns a position, so results can be
//! fed straight back into slicing. Helpers that cut strings work on chars.

mod case;
mod escape;
mod search;
mod segment;
mod text;
mod unique;

pub use case::{camel_to_snake, method_name_to_camel, snake_to_camel_case, snake_to_pascal_case};
pub use escape::{addslashes, html_entity_decode, htmlentities, nl2br, quotemeta, stripslashes};
pub use search::{str_replace, stripos, strpos, strripos, strrpos, strstr, strtr, strtr_pairs};
pub use segment::{explode, explode_and_trim, get_last_segment, get_segment, get_suffix};
pub use text::{
    chunk_split, lcfirst, ltrim, remove_space, rtrim, strrev, substr, trim, trim_comma, ucfirst,
    ucwords, wordwrap, TrimMode,
};
pub use unique::{create_nonce_str, str_shuffle, unique_number, unique_string};

use serde_json::Value;

/// Render a JSON value the way it would be printed in a query string:
/// `3.0` becomes `"3"`, strings are left unquoted, containers become JSON text.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_clamped(str: &str, min: i128, max: i128) -> i128 {
    match str.parse::<i128>() {
        Ok(v) => v.clamp(min, max),
        Err(_) => {
            // Overflowing digit strings saturate, anything else is zero.
            let digits = str.strip_prefix(['+', '-']).unwrap_or(str);
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                if str.starts_with('-') {
                    min
                } else {
                    max
                }
            } else {
                0
            }
        }
    }
}

pub fn parse_int(str: &str) -> i64 {
    parse_clamped(str, i64::MIN as i128, i64::MAX as i128) as i64
}

pub fn parse_int8(str: &str) -> i8 {
    parse_clamped(str, i8::MIN as i128, i8::MAX as i128) as i8
}

pub fn parse_int32(str: &str) -> i32 {
    parse_clamped(str, i32::MIN as i128, i32::MAX as i128) as i32
}

pub fn parse_int64(str: &str) -> i64 {
    parse_int(str)
}

pub fn string_to_float64(str: &str) -> f64 {
    str.parse().unwrap_or(0.0)
}

pub fn strtoupper(str: &str) -> String {
    str.to_uppercase()
}

pub fn strtolower(str: &str) -> String {
    str.to_lowercase()
}

pub fn start_with(str: &str, prefix: &str) -> bool {
    str.starts_with(prefix)
}

pub fn end_with(str: &str, suffix: &str) -> bool {
    str.ends_with(suffix)
}

pub fn str_repeat(input: &str, multiplier: usize) -> String {
    input.repeat(multiplier)
}

pub fn mb_strlen(str: &str) -> usize {
    str.chars().count()
}

/// Code point to string. Invalid code points give an empty string.
pub fn chr(code: u32) -> String {
    char::from_u32(code).map(String::from).unwrap_or_default()
}

/// Code point of the first char, 0 for an empty string.
pub fn ord(char: &str) -> u32 {
    char.chars().next().map(|c| c as u32).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&json!(3.0)), "3");
        assert_eq!(to_string(&json!(3.25)), "3.25");
        assert_eq!(to_string(&json!(-7)), "-7");
        assert_eq!(to_string(&json!("raw")), "raw");
        assert_eq!(to_string(&Value::Null), "");
        assert_eq!(to_string(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(to_string(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("x42"), 0);
        assert_eq!(parse_int8("300"), 127);
        assert_eq!(parse_int8("-300"), -128);
        assert_eq!(parse_int32("-5"), -5);
        assert_eq!(parse_int64("99999999999999999999"), i64::MAX);
        assert_eq!(string_to_float64("1.5"), 1.5);
        assert_eq!(string_to_float64("abc"), 0.0);
    }

    #[test]
    fn test_chr_ord() {
        assert_eq!(chr(65), "A");
        assert_eq!(chr(0x4e2d), "中");
        assert_eq!(ord("A"), 65);
        assert_eq!(ord("中文"), 0x4e2d);
        assert_eq!(ord(""), 0);
        assert_eq!(mb_strlen("中文ab"), 4);
    }
}
