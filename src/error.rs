use std::path::PathBuf;
use thiserror::Error;

/// srcml2mse error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A string bound for the MSE output contains the string delimiter
    #[error("String contains \"'\": \"{value}\"")]
    InvalidStringContent { value: String },

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for srcml2mse operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create an invalid string content error
    pub fn invalid_string(value: impl Into<String>) -> Self {
        Error::InvalidStringContent {
            value: value.into(),
        }
    }

    /// Create a conversion error
    pub fn conversion(msg: impl Into<String>) -> Self {
        Error::Conversion(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
