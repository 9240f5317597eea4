use std::fmt;
use thiserror::Error;

/// Every error collected during one decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.errors))]
pub struct DecodeError {
    pub errors: Vec<String>,
    // Whether the messages already name the field they belong to.
    located: bool,
}

fn render(errors: &[String]) -> String {
    let points: Vec<String> = errors.iter().map(|e| format!("* {}", e)).collect();
    format!("{} error(s) decoding:\n\n{}", errors.len(), points.join("\n"))
}

impl DecodeError {
    pub fn new(errors: Vec<String>) -> Self {
        Self {
            errors,
            located: true,
        }
    }

    pub(crate) fn located(message: impl Into<String>) -> Self {
        Self::new(vec![message.into()])
    }

    /// Name `path` in messages that came from serde without a location.
    pub(crate) fn at(mut self, path: &str) -> Self {
        if !self.located {
            if !path.is_empty() {
                self.errors = self
                    .errors
                    .into_iter()
                    .map(|e| format!("'{}': {}", path, e))
                    .collect();
            }
            self.located = true;
        }
        self
    }

    pub(crate) fn prepend(mut self, earlier: Vec<String>) -> Self {
        if !earlier.is_empty() {
            let mut errors = earlier;
            errors.append(&mut self.errors);
            self.errors = errors;
        }
        self
    }
}

impl serde::de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self {
            errors: vec![msg.to_string()],
            located: false,
        }
    }
}
