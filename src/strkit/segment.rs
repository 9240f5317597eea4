/// Split `str` on `delimiter`. An empty input gives an empty vec and an empty
/// delimiter splits into single chars.
pub fn explode(delimiter: &str, str: &str) -> Vec<String> {
    if str.is_empty() {
        return Vec::new();
    }
    if delimiter.is_empty() {
        return str.chars().map(String::from).collect();
    }
    str.split(delimiter).map(String::from).collect()
}

pub fn explode_and_trim(delimiter: &str, str: &str) -> Vec<String> {
    str.split(delimiter).map(|part| part.trim().to_string()).collect()
}

/// The `index`-th segment, counting from 1. Out of range gives `""`.
pub fn get_segment(str: &str, sep: &str, index: usize) -> String {
    if index == 0 {
        return String::new();
    }
    str.split(sep).nth(index - 1).unwrap_or_default().to_string()
}

pub fn get_last_segment(str: &str, sep: &str) -> String {
    str.rsplit(sep).next().unwrap_or_default().to_string()
}

/// Extension without the dot, `""` when the name has none.
pub fn get_suffix(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explode() {
        assert_eq!(explode("-", "a-b-c"), vec!["a", "b", "c"]);
        assert!(explode("-", "").is_empty());
        assert_eq!(explode("", "ab"), vec!["a", "b"]);
        assert_eq!(explode_and_trim(",", " a , b,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_segments() {
        assert_eq!(get_segment("a/b/c", "/", 1), "a");
        assert_eq!(get_segment("a/b/c", "/", 3), "c");
        assert_eq!(get_segment("a/b/c", "/", 4), "");
        assert_eq!(get_segment("a/b/c", "/", 0), "");
        assert_eq!(get_last_segment("a/b/c", "/"), "c");
        assert_eq!(get_last_segment("abc", "/"), "abc");
    }

    #[test]
    fn test_get_suffix() {
        assert_eq!(get_suffix("photo.jpg"), "jpg");
        assert_eq!(get_suffix("archive.tar.gz"), "gz");
        assert_eq!(get_suffix("README"), "");
    }
}
