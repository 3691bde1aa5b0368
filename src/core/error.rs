//! Error taxonomy shared by every operation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Provider error: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl FxError {
    pub fn configuration(message: impl Into<String>) -> Self {
        FxError::Configuration {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        FxError::Validation {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        FxError::Parse {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        FxError::Provider {
            message: message.into(),
            source: None,
        }
    }

    pub fn request(message: impl Into<String>, source: reqwest::Error) -> Self {
        FxError::Provider {
            message: message.into(),
            source: Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, FxError>;
