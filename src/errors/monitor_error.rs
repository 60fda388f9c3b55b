//! Custom error types for the monitor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Validation failed: {field} - {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Rule not found: {id}")]
    NotFound {
        id: String,
    },

    #[error("Bad payload format: {reason}")]
    Format {
        reason: String,
    },

    #[error("Storage error: {context}")]
    Storage {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        retry_count: u32,
    },
}

impl MonitorError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn storage(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            context: context.into(),
            source: source.into(),
        }
    }
}

pub type MonitorResult<T> = Result<T, MonitorError>;
