//! Application error types.
//!
//! Every fallible operation in the crate returns [`AppError`]. The binary
//! maps each variant to a process exit status with [`AppError::exit_code`].

use thiserror::Error;

/// Exit status for configuration problems detected before any network call.
pub const EXIT_CONFIGURATION: u8 = 1;

/// Exit status for every other fatal error.
pub const EXIT_FAILURE: u8 = 2;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required configuration is missing or malformed.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// GitLab API request failed.
    #[error("GitLab API error: {message}")]
    GitLabApi {
        message: String,
        status_code: Option<u16>,
        endpoint: Option<String>,
    },

    /// Network request failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Authentication token expired or revoked.
    #[error("Token expired: {message}")]
    AuthenticationExpired { message: String },

    /// Invalid input provided.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Internal application error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a GitLab API error.
    pub fn gitlab_api(message: impl Into<String>) -> Self {
        Self::GitLabApi {
            message: message.into(),
            status_code: None,
            endpoint: None,
        }
    }

    /// Create a GitLab API error with status code and endpoint.
    pub fn gitlab_api_full(
        message: impl Into<String>,
        status_code: u16,
        endpoint: impl Into<String>,
    ) -> Self {
        Self::GitLabApi {
            message: message.into(),
            status_code: Some(status_code),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an authentication expired error.
    pub fn authentication_expired(message: impl Into<String>) -> Self {
        Self::AuthenticationExpired {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
        }
    }

    /// Create an invalid input error with field name.
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code carried by a GitLab API error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::GitLabApi { status_code, .. } => *status_code,
            Self::AuthenticationExpired { .. } => Some(401),
            _ => None,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration { .. } => EXIT_CONFIGURATION,
            _ => EXIT_FAILURE,
        }
    }
}

// Conversions from common error types

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("Request timed out")
        } else if err.is_connect() {
            Self::network("Failed to connect to server")
        } else if err.is_status() {
            Self::gitlab_api(format!("HTTP error: {}", err))
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::invalid_input(format!("I/O error: {}", err))
    }
}
