//! HTTP reachability probe for a single site.
//!
//! A probe is one GET to `https://<domain>` with the client's defaults: no
//! request timeout, no retry and the standard redirect policy. Whatever
//! happens is folded into a `SiteStatusReport`.

use crate::error::SiteCheckError;
use crate::types::SiteStatusReport;
use tracing::debug;

/// HTTP client wrapper that probes sites and classifies the outcome.
#[derive(Clone, Debug)]
pub struct SiteProber {
    /// Shared HTTP client (cheap to clone, pools connections internally)
    http_client: reqwest::Client,
    /// Scheme used to build the probe URL
    scheme: String,
}

impl SiteProber {
    /// Create a prober that targets `https://<domain>`.
    pub fn new() -> Result<Self, SiteCheckError> {
        Self::with_scheme("https")
    }

    /// Create a prober for another scheme (e.g., "http").
    pub fn with_scheme<S: Into<String>>(scheme: S) -> Result<Self, SiteCheckError> {
        let http_client = reqwest::Client::builder().build().map_err(|e| {
            SiteCheckError::network_with_source("Failed to create HTTP client", e.to_string())
        })?;

        Ok(Self {
            http_client,
            scheme: scheme.into(),
        })
    }

    /// URL probed for a domain.
    pub fn url_for(&self, domain: &str) -> String {
        format!("{}://{}", self.scheme, domain)
    }

    /// Probe one domain.
    ///
    /// A received response always yields a report without error, whatever
    /// its status. Only failures before a response (DNS, refused connection,
    /// TLS, malformed URL) produce an error-carrying report with code 1.
    pub async fn probe(&self, domain: &str) -> SiteStatusReport {
        let url = self.url_for(domain);

        match self.http_client.get(&url).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                debug!(domain, code, "site responded");
                SiteStatusReport::responded(domain, code)
            }
            Err(e) => {
                debug!(domain, error = %e, "site unreachable");
                SiteStatusReport::transport_error(domain, SiteCheckError::from(e))
            }
        }
    }
}
