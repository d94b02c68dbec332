//! Error handling for site checking operations.
//!
//! This module defines the error type shared by the whole pipeline. Fatal
//! setup failures (home directory, config directory) abort a run, while
//! transport failures are carried in-band inside a `SiteStatusReport`.

use std::fmt;

/// Main error type for site checking operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteCheckError {
    /// The current user's home directory could not be determined
    HomeDirUnavailable,

    /// The directory holding site config files could not be listed
    ConfigDirUnreadable {
        path: String,
        message: String,
    },

    /// Transport-level failure (DNS, refused connection, TLS, bad URL)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Invalid settings (empty markers, zero concurrency, etc.)
    ConfigError {
        message: String,
    },
}

impl SiteCheckError {
    /// Create a new config directory error.
    pub fn config_dir<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::ConfigDirUnreadable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Whether this error ends the run before any report is produced.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::HomeDirUnavailable | Self::ConfigDirUnreadable { .. } | Self::ConfigError { .. }
        )
    }
}

impl fmt::Display for SiteCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HomeDirUnavailable => {
                write!(f, "Could not determine the home directory")
            }
            Self::ConfigDirUnreadable { path, message } => {
                write!(f, "Cannot read config directory '{}': {}", path, message)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "{}: {}", message, source)
                } else {
                    write!(f, "{}", message)
                }
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for SiteCheckError {}

impl From<reqwest::Error> for SiteCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else if err.is_builder() {
            Self::network_with_source("Invalid request", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display_includes_source() {
        let err = SiteCheckError::network_with_source("Connection failed", "refused");
        assert_eq!(err.to_string(), "Connection failed: refused");

        let err = SiteCheckError::network("dns lookup failed");
        assert_eq!(err.to_string(), "dns lookup failed");
    }

    #[test]
    fn test_config_dir_error_display() {
        let err = SiteCheckError::config_dir("/home/ops/sites-enabled", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Cannot read config directory '/home/ops/sites-enabled': No such file or directory"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(SiteCheckError::HomeDirUnavailable.is_fatal());
        assert!(SiteCheckError::config_dir("x", "y").is_fatal());
        assert!(SiteCheckError::config("empty prefix").is_fatal());
        assert!(!SiteCheckError::network("refused").is_fatal());
        assert!(!SiteCheckError::network_with_source("Connection failed", "refused").is_fatal());
    }

    #[test]
    fn test_reqwest_builder_error_conversion() {
        let err = reqwest::Client::new().get("https://not a domain").build().unwrap_err();
        let err = SiteCheckError::from(err);
        match &err {
            SiteCheckError::NetworkError { message, source } => {
                assert_eq!(message, "Invalid request");
                assert!(source.is_some());
            }
            other => panic!("unexpected variant: {:?}", other),
        }
        assert!(!err.is_fatal());
    }
}
