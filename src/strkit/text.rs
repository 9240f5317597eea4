use crate::utils::error::{KitError, Result};

pub fn ucfirst(str: &str) -> String {
    let mut chars = str.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lcfirst(str: &str) -> String {
    let mut chars = str.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first letter of every word. Any char that is not
/// alphanumeric or `_` separates words.
pub fn ucwords(str: &str) -> String {
    let mut result = String::with_capacity(str.len());
    let mut at_boundary = true;
    for c in str.chars() {
        if at_boundary {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_boundary = !(c.is_alphanumeric() || c == '_');
    }
    result
}

/// Char-based substring. `length` of `None` takes the rest of the string.
pub fn substr(str: &str, start: usize, length: Option<usize>) -> String {
    let chars = str.chars().skip(start);
    match length {
        None => chars.collect(),
        Some(n) => chars.take(n).collect(),
    }
}

pub fn strrev(str: &str) -> String {
    str.chars().rev().collect()
}

/// Trim whitespace, or every char in `mask` when one is given.
pub fn trim(str: &str, mask: Option<&str>) -> String {
    match mask {
        None => str.trim().to_string(),
        Some(mask) => str.trim_matches(|c| mask.contains(c)).to_string(),
    }
}

pub fn ltrim(str: &str, mask: Option<&str>) -> String {
    match mask {
        None => str.trim_start().to_string(),
        Some(mask) => str.trim_start_matches(|c| mask.contains(c)).to_string(),
    }
}

pub fn rtrim(str: &str, mask: Option<&str>) -> String {
    match mask {
        None => str.trim_end().to_string(),
        Some(mask) => str.trim_end_matches(|c| mask.contains(c)).to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimMode {
    Left,
    Right,
    #[default]
    Both,
}

/// Strip one leading and/or trailing comma after trimming whitespace.
/// When stripping would leave nothing, the trimmed input is returned.
pub fn trim_comma(str: &str, mode: TrimMode) -> String {
    if str.is_empty() || str == "," {
        return String::new();
    }
    let trimmed = str.trim();
    let mut ret = trimmed;
    if matches!(mode, TrimMode::Left | TrimMode::Both) {
        ret = ret.strip_prefix(',').unwrap_or(ret);
    }
    if matches!(mode, TrimMode::Right | TrimMode::Both) {
        ret = ret.strip_suffix(',').unwrap_or(ret);
    }
    if ret.is_empty() {
        trimmed.to_string()
    } else {
        ret.to_string()
    }
}

/// Remove spaces, tabs, newlines and carriage returns.
pub fn remove_space(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\n' | '\r'))
        .collect()
}

/// Split `body` into chunks of `chunklen` chars, each followed by `end`
/// (`"\r\n"` when `end` is empty).
pub fn chunk_split(body: &str, chunklen: usize, end: &str) -> String {
    let end = if end.is_empty() { "\r\n" } else { end };
    let chars: Vec<char> = body.chars().collect();
    if chars.len() <= 1 || chars.len() < chunklen || chunklen == 0 {
        return format!("{}{}", body, end);
    }
    let mut result = String::with_capacity(body.len() + end.len() * (chars.len() / chunklen + 1));
    for chunk in chars.chunks(chunklen) {
        result.extend(chunk);
        result.push_str(end);
    }
    result
}

/// Wrap `str` at `width` bytes using `brk`. With `cut`, words longer than
/// `width` are broken too.
pub fn wordwrap(str: &str, width: usize, brk: &str, cut: bool) -> Result<String> {
    let s = str.as_bytes();
    let b = brk.as_bytes();
    let (strlen, brlen, linelen) = (s.len(), b.len(), width);

    if strlen == 0 {
        return Ok(String::new());
    }
    if brlen == 0 {
        return Err(KitError::invalid_argument("break string cannot be empty"));
    }
    if linelen == 0 && cut {
        return Err(KitError::invalid_argument(
            "can't force cut when width is zero",
        ));
    }

    let mut ns: Vec<u8> = Vec::with_capacity(strlen + brlen);
    let (mut current, mut laststart, mut lastspace) = (0usize, 0usize, 0usize);
    while current < strlen {
        if s[current] == b[0] && current + brlen < strlen && &s[current..current + brlen] == b {
            ns.extend_from_slice(&s[laststart..current + brlen]);
            current += brlen - 1;
            lastspace = current + 1;
            laststart = lastspace;
        } else if s[current] == b' ' {
            if current - laststart >= linelen {
                ns.extend_from_slice(&s[laststart..current]);
                ns.extend_from_slice(b);
                laststart = current + 1;
            }
            lastspace = current;
        } else if current - laststart >= linelen && cut && laststart >= lastspace {
            ns.extend_from_slice(&s[laststart..current]);
            ns.extend_from_slice(b);
            laststart = current;
            lastspace = current;
        } else if current - laststart >= linelen && laststart < lastspace {
            ns.extend_from_slice(&s[laststart..lastspace]);
            ns.extend_from_slice(b);
            lastspace += 1;
            laststart = lastspace;
        }
        current += 1;
    }
    if laststart < current {
        ns.extend_from_slice(&s[laststart..current]);
    }

    Ok(String::from_utf8(ns).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_letter_case() {
        assert_eq!(ucfirst("hello"), "Hello");
        assert_eq!(lcfirst("Hello"), "hello");
        assert_eq!(ucfirst(""), "");
        assert_eq!(ucwords("hello big-world foo_bar"), "Hello Big-World Foo_bar");
    }

    #[test]
    fn test_substr() {
        assert_eq!(substr("hello", 1, Some(3)), "ell");
        assert_eq!(substr("hello", 1, None), "ello");
        assert_eq!(substr("hello", 2, Some(0)), "");
        assert_eq!(substr("hello", 10, None), "");
        assert_eq!(substr("中文字符", 1, Some(2)), "文字");
    }

    #[test]
    fn test_trim_family() {
        assert_eq!(trim("  a b \n", None), "a b");
        assert_eq!(trim("xxaxx", Some("x")), "a");
        assert_eq!(ltrim("  a ", None), "a ");
        assert_eq!(rtrim("  a ", None), "  a");
        assert_eq!(rtrim("a,,;", Some(",;")), "a");
        assert_eq!(strrev("abc中"), "中cba");
    }

    #[test]
    fn test_trim_comma() {
        assert_eq!(trim_comma(",a,b,", TrimMode::Both), "a,b");
        assert_eq!(trim_comma(",a,b,", TrimMode::Left), "a,b,");
        assert_eq!(trim_comma(",a,b,", TrimMode::Right), ",a,b");
        assert_eq!(trim_comma(" ,a ", TrimMode::Both), "a");
        assert_eq!(trim_comma(",", TrimMode::Both), "");
        assert_eq!(trim_comma("", TrimMode::Both), "");
    }

    #[test]
    fn test_remove_space() {
        assert_eq!(remove_space(" a\tb\nc\rd "), "abcd");
    }

    #[test]
    fn test_chunk_split() {
        assert_eq!(chunk_split("tangsan", 1, "."), "t.a.n.g.s.a.n.");
        assert_eq!(chunk_split("abcd", 3, "|"), "abc|d|");
        assert_eq!(chunk_split("ab", 5, "|"), "ab|");
        assert_eq!(chunk_split("abcd", 2, ""), "ab\r\ncd\r\n");
    }

    #[test]
    fn test_wordwrap() {
        assert_eq!(
            wordwrap("The quick brown fox", 10, "\n", true).unwrap(),
            "The quick\nbrown fox"
        );
        assert_eq!(
            wordwrap("A very long woooooooooooord.", 8, "\n", true).unwrap(),
            "A very\nlong\nwooooooo\nooooord."
        );
        assert_eq!(
            wordwrap("A very long woooooooooooord.", 8, "\n", false).unwrap(),
            "A very\nlong\nwoooooooooooord."
        );
        assert_eq!(wordwrap("", 10, "\n", false).unwrap(), "");
        assert!(wordwrap("abc", 10, "", false).is_err());
        assert!(wordwrap("abc", 0, "\n", true).is_err());
    }
}
