//! Error types and handling for the airdash dashboard

use thiserror::Error;

/// Main error type for the dashboard
///
/// `NotFound` and `DataUnavailable` display as their bare message, since that
/// text is shown verbatim in the error banner.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The geocoder found no match for the requested city
    #[error("{message}")]
    NotFound { message: String },

    /// An upstream provider signalled failure for the request
    #[error("{message}")]
    DataUnavailable { message: String },

    /// Transport or decoding failures while talking to an upstream provider
    #[error("Network error: {message}")]
    Network { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl DashboardError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new data-unavailable error
    pub fn data_unavailable<S: Into<String>>(message: S) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::NotFound { message } | DashboardError::DataUnavailable { message } => {
                message.clone()
            }
            DashboardError::Network { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            DashboardError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the request url in its display, which carries the api keys
        DashboardError::network(err.without_url().to_string())
    }
}
