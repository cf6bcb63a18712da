use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Error parsing {format} file: {source:#}")]
    Import {
        format: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl QuoteError {
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    pub fn import(format: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Import {
            format: format.into(),
            source,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::Import { .. } => "IMPORT_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::UnsupportedFormat { .. } => 415,
            Self::Import { .. } => 422,
            Self::Validation { .. } => 400,
            Self::Configuration { .. } => 500,
        }
    }
}

pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<QuoteError> for ErrorResponse {
    fn from(error: QuoteError) -> Self {
        let details = match &error {
            QuoteError::UnsupportedFormat { extension } => {
                Some(serde_json::json!({ "extension": extension }))
            }
            QuoteError::Import { format, .. } => Some(serde_json::json!({ "format": format })),
            QuoteError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        };

        Self {
            error: error.error_code().to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl From<config::ConfigError> for QuoteError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
