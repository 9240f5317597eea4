use crate::mapkit::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KitError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Glob pattern error: {0}")]
    GlobError(#[from] glob::PatternError),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Crypto error: {message}")]
    CryptoError { message: String },

    #[error("Token is invalid or expired")]
    InvalidToken,

    #[error("Command failed: {message}")]
    CommandError { message: String },
}

impl KitError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        KitError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        KitError::ParseError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KitError>;
