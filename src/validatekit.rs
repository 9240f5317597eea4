use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"));

/// A deliberately loose `local@domain.tld` check.
pub fn is_email(email: &str) -> bool {
    matches!(&*EMAIL, Ok(re) if re.is_match(email))
}
