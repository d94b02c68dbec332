//! Core data types for site checking.
//!
//! This module defines the probe outcome records passed through the result
//! channel and the configuration that drives a run.

use crate::error::SiteCheckError;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// Status code recorded when a probe fails before any response arrives.
pub const TRANSPORT_FAILURE_CODE: u16 = 1;

/// Default directory, relative to the home directory, holding site configs.
pub const DEFAULT_CONF_SUBPATH: &str = "sites-enabled";

/// Marker every site config file name must contain before the domain.
pub const DEFAULT_PREFIX: &str = "mono.";

/// Marker every site config file name must contain after the domain.
pub const DEFAULT_SUFFIX: &str = ".conf";

/// Outcome of one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteStatus {
    /// The domain that was probed (e.g., "example.com")
    pub domain: String,

    /// True iff the response status was within 200..=303
    pub ok: bool,

    /// Raw HTTP status code, or `TRANSPORT_FAILURE_CODE`
    pub code: u16,
}

impl SiteStatus {
    /// Build a status from a received HTTP status code.
    pub fn from_code<D: Into<String>>(domain: D, code: u16) -> Self {
        Self {
            domain: domain.into(),
            ok: is_ok_status(code),
            code,
        }
    }

    /// Build the status recorded when no response was received.
    pub fn transport_failure<D: Into<String>>(domain: D) -> Self {
        Self {
            domain: domain.into(),
            ok: false,
            code: TRANSPORT_FAILURE_CODE,
        }
    }
}

/// Whether an HTTP status counts as a healthy site.
pub fn is_ok_status(code: u16) -> bool {
    (200..=303).contains(&code)
}

/// A probe outcome paired with the transport error, if any.
///
/// When `error` is present, `status.ok` is false and `status.code` is
/// `TRANSPORT_FAILURE_CODE`. HTTP-level failures (404, 500, ...) never carry
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteStatusReport {
    #[serde(flatten)]
    pub status: SiteStatus,

    #[serde(serialize_with = "serialize_error")]
    pub error: Option<SiteCheckError>,
}

impl SiteStatusReport {
    /// Report for a response that was received, whatever its status.
    pub fn responded<D: Into<String>>(domain: D, code: u16) -> Self {
        Self {
            status: SiteStatus::from_code(domain, code),
            error: None,
        }
    }

    /// Report for a probe that never got a response.
    pub fn transport_error<D: Into<String>>(domain: D, error: SiteCheckError) -> Self {
        Self {
            status: SiteStatus::transport_failure(domain),
            error: Some(error),
        }
    }

    pub fn domain(&self) -> &str {
        &self.status.domain
    }

    pub fn is_ok(&self) -> bool {
        self.status.ok
    }

    pub fn code(&self) -> u16 {
        self.status.code
    }

    /// Diagnostic line for a transport failure, `None` for every other report.
    ///
    /// Format: `<domain> <ok> <code> (<error>)`.
    pub fn failure_line(&self) -> Option<String> {
        self.error.as_ref().map(|error| {
            format!(
                "{} {} {} ({})",
                self.status.domain, self.status.ok, self.status.code, error
            )
        })
    }
}

fn serialize_error<S: Serializer>(
    error: &Option<SiteCheckError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Configuration options for a site check run.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    /// Directory under the home directory holding site configs
    /// Default: "sites-enabled"
    pub conf_subpath: PathBuf,

    /// Absolute directory override; when set the home directory is not consulted
    pub conf_dir: Option<PathBuf>,

    /// Marker preceding the domain in file names
    /// Default: "mono."
    pub prefix: String,

    /// Marker following the domain in file names
    /// Default: ".conf"
    pub suffix: String,

    /// Maximum number of probes in flight
    /// Default: None (one concurrent probe per qualifying file)
    pub concurrency: Option<usize>,

    /// URL scheme used to build probe targets
    /// Default: "https"
    pub scheme: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            conf_subpath: PathBuf::from(DEFAULT_CONF_SUBPATH),
            conf_dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            concurrency: None,
            scheme: "https".to_string(),
        }
    }
}

impl CheckConfig {
    /// Bound the number of simultaneous probes. Zero is clamped to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency.max(1));
        self
    }

    /// Read site configs from this directory instead of the home subpath.
    pub fn with_conf_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.conf_dir = Some(dir.into());
        self
    }

    /// Set the directory under the home directory holding site configs.
    pub fn with_conf_subpath<P: Into<PathBuf>>(mut self, subpath: P) -> Self {
        self.conf_subpath = subpath.into();
        self
    }

    /// Set the file name markers.
    pub fn with_markers<P: Into<String>, S: Into<String>>(mut self, prefix: P, suffix: S) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// Probe with another scheme, e.g. "http" for plain-text test servers.
    pub fn with_scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Reject settings that would make every file match or no probe run.
    pub fn validate(&self) -> Result<(), SiteCheckError> {
        if self.prefix.is_empty() {
            return Err(SiteCheckError::config("Prefix marker cannot be empty"));
        }
        if self.suffix.is_empty() {
            return Err(SiteCheckError::config("Suffix marker cannot be empty"));
        }
        if self.concurrency == Some(0) {
            return Err(SiteCheckError::config("Concurrency must be at least 1"));
        }
        Ok(())
    }
}
