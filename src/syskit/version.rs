use crate::utils::error::{KitError, Result};
use std::cmp::Ordering;

// Longer names first so "alpha" wins over "a" and "pl" over "p".
const SPECIAL_FORMS: &[(&str, i32)] = &[
    ("dev", 0),
    ("alpha", 1),
    ("a", 1),
    ("beta", 2),
    ("b", 2),
    ("RC", 3),
    ("rc", 3),
    ("#", 4),
    ("pl", 5),
    ("p", 5),
];

// Stands in for a missing part when one version has more segments.
const NUMBER_SENTINEL: &str = "#N#";

fn starts_with_digit(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

/// Put a `.` between every run of digits and non-digits and turn
/// `-`, `_`, `+` and other punctuation into `.`: `1.2.3RC7` becomes `1.2.3.RC.7`.
fn canonicalize(version: &str) -> String {
    let bytes = version.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() * 2);
    let last_is_dot = |out: &Vec<u8>| out.last() == Some(&b'.');

    for (i, &b) in bytes.iter().enumerate() {
        let next = bytes.get(i + 1).copied();
        let next_is_digit = next.is_some_and(|n| n.is_ascii_digit());

        if matches!(b, b'-' | b'_' | b'+') {
            if !out.is_empty() && !last_is_dot(&out) {
                out.push(b'.');
            }
        } else if (next.is_some() && !next_is_digit && b.is_ascii_digit())
            || (!b.is_ascii_digit() && next_is_digit)
        {
            out.push(b);
            if b != b'.' && next != Some(b'.') {
                out.push(b'.');
            }
        } else if !b.is_ascii_alphanumeric() {
            if !out.is_empty() && !last_is_dot(&out) {
                out.push(b'.');
            }
        } else {
            out.push(b);
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn special_order(form: &str) -> i32 {
    SPECIAL_FORMS
        .iter()
        .find(|(name, _)| form.starts_with(name))
        .map(|(_, order)| *order)
        .unwrap_or(-1)
}

fn compare_special(form1: &str, form2: &str) -> Ordering {
    special_order(form1).cmp(&special_order(form2))
}

fn compare_part(p1: &str, p2: &str) -> Ordering {
    match (starts_with_digit(p1), starts_with_digit(p2)) {
        (true, true) => {
            let n1 = p1.parse::<u128>().unwrap_or(0);
            let n2 = p2.parse::<u128>().unwrap_or(0);
            n1.cmp(&n2)
        }
        (false, false) => compare_special(p1, p2),
        (true, false) => compare_special(NUMBER_SENTINEL, p2),
        (false, true) => compare_special(p1, NUMBER_SENTINEL),
    }
}

fn compare_versions(orig1: &str, orig2: &str) -> Ordering {
    match (orig1.is_empty(), orig2.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let prepare = |v: &str| {
        if v.starts_with('#') {
            v.to_string()
        } else {
            canonicalize(v)
        }
    };
    let v1 = prepare(orig1);
    let v2 = prepare(orig2);
    let mut rest1: Option<&str> = Some(&v1);
    let mut rest2: Option<&str> = Some(&v2);

    let mut compare = Ordering::Equal;
    while let (Some(r1), Some(r2)) = (rest1, rest2) {
        let (p1, tail1) = match r1.split_once('.') {
            Some((p, t)) => (p, Some(t)),
            None => (r1, None),
        };
        let (p2, tail2) = match r2.split_once('.') {
            Some((p, t)) => (p, Some(t)),
            None => (r2, None),
        };
        rest1 = tail1;
        rest2 = tail2;

        compare = compare_part(p1, p2);
        if compare != Ordering::Equal {
            break;
        }
    }

    if compare == Ordering::Equal {
        // Same prefix. The version with more parts decides.
        let left = rest1.unwrap_or("");
        let right = rest2.unwrap_or("");
        if !left.is_empty() {
            compare = if starts_with_digit(left) {
                Ordering::Greater
            } else {
                compare_versions(left, NUMBER_SENTINEL)
            };
        } else if !right.is_empty() {
            compare = if starts_with_digit(right) {
                Ordering::Less
            } else {
                compare_versions(NUMBER_SENTINEL, right)
            };
        }
    }
    compare
}

/// Compare two version strings the way PHP's `version_compare` does.
///
/// Special forms order as: (anything else) < `dev` < `alpha` = `a` <
/// `beta` = `b` < `RC` = `rc` < `#` < `pl` = `p`.
/// Operators: `<` `lt` `<=` `le` `>` `gt` `>=` `ge` `==` `=` `eq` `!=` `<>` `ne`.
pub fn version_compare(version1: &str, version2: &str, operator: &str) -> Result<bool> {
    let compare = compare_versions(version1, version2);
    let result = match operator {
        "<" | "lt" => compare == Ordering::Less,
        "<=" | "le" => compare != Ordering::Greater,
        ">" | "gt" => compare == Ordering::Greater,
        ">=" | "ge" => compare != Ordering::Less,
        "==" | "=" | "eq" => compare == Ordering::Equal,
        "!=" | "<>" | "ne" => compare != Ordering::Equal,
        _ => {
            return Err(KitError::invalid_argument(format!(
                "unknown version operator '{}'",
                operator
            )))
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("1.2.3RC7"), "1.2.3.RC.7");
        assert_eq!(canonicalize("1.2.3-alpha"), "1.2.3.alpha");
        assert_eq!(canonicalize("1.1_dev"), "1.1.dev");
        assert_eq!(canonicalize("5.3.0-rc+2"), "5.3.0.rc.2");
    }

    #[test]
    fn test_special_forms() {
        assert!(!version_compare("1.2.3-alpha", "1.2.3RC7", ">=").unwrap());
        assert!(version_compare("1.2.3-beta", "1.2.3pl", "lt").unwrap());
        assert!(!version_compare("1.1_dev", "1.2any", "eq").unwrap());
        assert!(version_compare("1.0-dev", "1.0", "<").unwrap());
        assert!(version_compare("1.0rc1", "1.0", "<").unwrap());
        assert!(version_compare("1.0", "1.0pl1", "<").unwrap());
        assert!(version_compare("1.0a", "1.0alpha", "==").unwrap());
    }

    #[test]
    fn test_numeric_parts() {
        assert!(version_compare("5.2", "5.10", "<").unwrap());
        assert!(version_compare("1.0", "1.0.0", "lt").unwrap());
        assert!(version_compare("8.1.0", "8.1.0", "eq").unwrap());
        assert!(version_compare("2.0", "1.99.99", "ge").unwrap());
        assert!(version_compare("1.0", "1.1", "<>").unwrap());
        assert!(version_compare("", "0", "<").unwrap());
    }

    #[test]
    fn test_unknown_operator() {
        assert!(matches!(
            version_compare("1", "2", "~="),
            Err(KitError::InvalidArgument { .. })
        ));
    }
}
