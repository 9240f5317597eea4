use crate::utils::error::Result;
use url::Url;

/// A raw query parameter with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataConverter {
    value: String,
}

impl DataConverter {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The value, or `default` when it is empty.
    pub fn string(&self, default: &str) -> String {
        if self.value.is_empty() {
            default.to_string()
        } else {
            self.value.clone()
        }
    }

    /// `default` when empty, 0 when the value is not an integer.
    pub fn int(&self, default: i64) -> i64 {
        if self.value.is_empty() {
            return default;
        }
        self.value.trim().parse().unwrap_or(0)
    }
}

/// First value of the query parameter `name` in `url`. A missing parameter is empty.
pub fn param(url: &str, name: &str) -> Result<DataConverter> {
    let parsed = Url::parse(url)?;
    let value = parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned());

    if value.is_none() {
        tracing::debug!("Query parameter '{}' not present in {}", name, url);
    }
    Ok(DataConverter::new(value.unwrap_or_default()))
}
