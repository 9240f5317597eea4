use std::collections::HashMap;

/// Resolve a PHP-style offset against `length`. Negative offsets count from the end.
fn resolve_offset(length: usize, offset: i64) -> Option<usize> {
    let len = length as i64;
    if length == 0 || offset > len || offset.unsigned_abs() > length as u64 {
        return None;
    }
    Some(if offset < 0 { (offset + len) as usize } else { offset as usize })
}

/// First occurrence of `find` at or after `offset`.
pub fn strpos(haystack: &str, find: &str, offset: i64) -> Option<usize> {
    let start = resolve_offset(haystack.len(), offset)?;
    haystack.get(start..)?.find(find).map(|pos| pos + start)
}

/// Case-insensitive [`strpos`]. Only ASCII letters fold, so byte offsets stay valid.
pub fn stripos(haystack: &str, needle: &str, offset: i64) -> Option<usize> {
    strpos(
        &haystack.to_ascii_lowercase(),
        &needle.to_ascii_lowercase(),
        offset,
    )
}

/// Last occurrence of `needle`. A positive offset skips that many leading bytes.
/// A negative offset makes the search start that many bytes before the end.
pub fn strrpos(haystack: &str, needle: &str, offset: i64) -> Option<usize> {
    let len = haystack.len() as i64;
    if len == 0 || offset > len || offset.unsigned_abs() > haystack.len() as u64 {
        return None;
    }
    if offset < 0 {
        let end = ((offset + len) as usize + needle.len()).min(haystack.len());
        haystack.get(..end)?.rfind(needle)
    } else {
        let start = offset as usize;
        haystack.get(start..)?.rfind(needle).map(|pos| pos + start)
    }
}

pub fn strripos(haystack: &str, needle: &str, offset: i64) -> Option<usize> {
    strrpos(
        &haystack.to_ascii_lowercase(),
        &needle.to_ascii_lowercase(),
        offset,
    )
}

/// The part of `haystack` starting at the first `needle`, or `""`.
pub fn strstr(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return String::new();
    }
    haystack
        .find(needle)
        .map(|idx| haystack[idx..].to_string())
        .unwrap_or_default()
}

/// Character translation: each char of `from` maps to the char at the same
/// position in `to`. Extra chars in the longer argument are ignored.
pub fn strtr(haystack: &str, from: &str, to: &str) -> String {
    let table: HashMap<char, char> = from.chars().zip(to.chars()).collect();
    if table.is_empty() {
        return haystack.to_string();
    }
    haystack
        .chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Substring translation. At each position the longest matching key wins and
/// replaced text is never scanned again. An empty key disables translation.
pub fn strtr_pairs(haystack: &str, pairs: &HashMap<String, String>) -> String {
    if pairs.is_empty() || pairs.keys().any(|k| k.is_empty()) {
        return haystack.to_string();
    }
    let mut keys: Vec<&String> = pairs.keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut result = String::with_capacity(haystack.len());
    let mut rest = haystack;
    'outer: while !rest.is_empty() {
        for key in &keys {
            if rest.starts_with(key.as_str()) {
                result.push_str(&pairs[*key]);
                rest = &rest[key.len()..];
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            result.push(c);
        }
        rest = chars.as_str();
    }
    result
}

/// Replace `old` with `new`. `count` of `None` replaces every occurrence.
pub fn str_replace(old: &str, new: &str, subject: &str, count: Option<usize>) -> String {
    match count {
        None => subject.replace(old, new),
        Some(n) => subject.replacen(old, new, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strpos_offsets() {
        assert_eq!(strpos("hello world", "o", 0), Some(4));
        assert_eq!(strpos("hello world", "o", 5), Some(7));
        assert_eq!(strpos("hello world", "o", -4), Some(7));
        assert_eq!(strpos("hello world", "z", 0), None);
        assert_eq!(strpos("", "a", 0), None);
        assert_eq!(strpos("abc", "a", 10), None);
    }

    #[test]
    fn test_case_insensitive_search() {
        assert_eq!(stripos("Hello World", "WORLD", 0), Some(6));
        assert_eq!(strripos("aXbxc", "X", 0), Some(3));
    }

    #[test]
    fn test_strrpos() {
        let foo = "0123456789a123456789b123456789c";
        assert_eq!(strrpos(foo, "7", 0), Some(27));
        assert_eq!(strrpos(foo, "7", i64::MIN), None);
        assert_eq!(strpos(foo, "7", i64::MIN), None);
        assert_eq!(strpos(foo, "7", i64::MAX), None);
        assert_eq!(strrpos(foo, "7", 20), Some(27));
        assert_eq!(strrpos(foo, "7", 28), None);
        assert_eq!(strrpos(foo, "7", -5), Some(17));
    }

    #[test]
    fn test_strstr() {
        assert_eq!(strstr("user@example.com", "@"), "@example.com");
        assert_eq!(strstr("abc", "z"), "");
        assert_eq!(strstr("abc", ""), "");
    }

    #[test]
    fn test_strtr() {
        assert_eq!(strtr("baab", "ab", "01"), "1001");
        assert_eq!(strtr("baab", "a", "01"), "b00b");
        assert_eq!(strtr("baab", "", "01"), "baab");

        let mut pairs = HashMap::new();
        pairs.insert("ab".to_string(), "01".to_string());
        assert_eq!(strtr_pairs("baab", &pairs), "ba01");

        pairs.insert("a".to_string(), "x".to_string());
        pairs.insert("hi".to_string(), "hello".to_string());
        assert_eq!(strtr_pairs("hi all, ab", &pairs), "hello xll, 01");
    }

    #[test]
    fn test_str_replace() {
        assert_eq!(str_replace("a", "b", "aaa", None), "bbb");
        assert_eq!(str_replace("a", "b", "aaa", Some(1)), "baa");
        assert_eq!(str_replace("a", "b", "aaa", Some(0)), "aaa");
    }
}
