use super::text::ucfirst;
use once_cell::sync::Lazy;
use regex::Regex;

static MATCH_FIRST_CAP: Lazy<Regex> =
    Lazy::new(|| Regex::new("([a-z0-9])([A-Z])").expect("valid regex"));
static MATCH_ALL_CAP: Lazy<Regex> =
    Lazy::new(|| Regex::new("([A-Z])([A-Z][a-z])").expect("valid regex"));

/// `"get-user-info"` -> `"GetUserInfo"`.
pub fn method_name_to_camel(str: &str) -> String {
    str.split('-').map(ucfirst).collect()
}

/// PascalCase or camelCase to snake_case, keeping acronyms together.
pub fn camel_to_snake(s: &str) -> String {
    let snake = MATCH_FIRST_CAP.replace_all(s, "${1}_${2}");
    let snake = MATCH_ALL_CAP.replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}

pub fn snake_to_pascal_case(input: &str) -> String {
    input.split('_').map(ucfirst).collect()
}

pub fn snake_to_camel_case(input: &str) -> String {
    input
        .split('_')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                super::text::lcfirst(word)
            } else {
                ucfirst(word)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_name_to_camel() {
        assert_eq!(method_name_to_camel("get-user-info"), "GetUserInfo");
        assert_eq!(method_name_to_camel("index"), "Index");
    }

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("UserName"), "user_name");
        assert_eq!(camel_to_snake("userID"), "user_id");
        assert_eq!(camel_to_snake("HTTPServer"), "http_server");
        assert_eq!(camel_to_snake("getHTTPResponseCode"), "get_http_response_code");
    }

    #[test]
    fn test_snake_conversions() {
        assert_eq!(snake_to_pascal_case("user_name_id"), "UserNameId");
        assert_eq!(snake_to_pascal_case("a__b"), "AB");
        assert_eq!(snake_to_camel_case("User_name_id"), "userNameId");
    }
}
