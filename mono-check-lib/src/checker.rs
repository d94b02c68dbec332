//! Main site checker implementation.
//!
//! This module provides the `SiteChecker` struct that ties the pipeline
//! together: locate the config directory, pick out site config files, fan
//! out one probe per file and drain the reports.

use crate::concurrent::{collect_reports, ConcurrentDispatcher};
use crate::error::SiteCheckError;
use crate::prober::SiteProber;
use crate::types::{CheckConfig, SiteStatusReport};
use crate::utils::filter_site_configs;
use std::fs;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Coordinates a full check of every site config in a directory.
///
/// # Example
///
/// ```rust,no_run
/// use mono_check_lib::{RunSummary, SiteChecker};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = SiteChecker::new()?;
///     let reports = checker.check_all().await?;
///     let summary = RunSummary::from_reports(&reports);
///     println!("ok: {} err: {}", summary.ok, summary.err);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct SiteChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Fan-out of probes over the result channel
    dispatcher: ConcurrentDispatcher,
}

impl SiteChecker {
    /// Create a checker with default configuration.
    ///
    /// Default settings:
    /// - Directory: `$HOME/sites-enabled`
    /// - Markers: `mono.` and `.conf`
    /// - Concurrency: one probe per file
    pub fn new() -> Result<Self, SiteCheckError> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError::ConfigError` for empty markers or zero
    /// concurrency, and a network error if the HTTP client cannot be built.
    pub fn with_config(config: CheckConfig) -> Result<Self, SiteCheckError> {
        config.validate()?;

        let prober = SiteProber::with_scheme(config.scheme.clone())?;
        let dispatcher = ConcurrentDispatcher::new(prober, &config.prefix, &config.suffix)
            .with_concurrency(config.concurrency);

        Ok(Self { config, dispatcher })
    }

    /// Directory that holds the site configs.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError::HomeDirUnavailable` when no override is set
    /// and the home directory cannot be determined.
    pub fn resolve_conf_dir(&self) -> Result<PathBuf, SiteCheckError> {
        if let Some(dir) = &self.config.conf_dir {
            return Ok(dir.clone());
        }

        let home = dirs::home_dir().ok_or(SiteCheckError::HomeDirUnavailable)?;
        Ok(home.join(&self.config.conf_subpath))
    }

    /// List the site config file names in the config directory.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be resolved or read. A directory with
    /// no matching files yields an empty list.
    pub fn scan(&self) -> Result<Vec<String>, SiteCheckError> {
        let dir = self.resolve_conf_dir()?;
        let unreadable =
            |e: std::io::Error| SiteCheckError::config_dir(dir.to_string_lossy(), e.to_string());

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        let files = filter_site_configs(&names, &self.config.prefix, &self.config.suffix);
        info!(
            dir = %dir.display(),
            entries = names.len(),
            sites = files.len(),
            "scanned config directory"
        );
        Ok(files)
    }

    /// Start probing the given files and return the result channel.
    ///
    /// The channel closes after one report per file has been sent.
    pub fn dispatch(&self, files: Vec<String>) -> mpsc::Receiver<SiteStatusReport> {
        self.dispatcher.dispatch(files)
    }

    /// Run the whole pipeline and return the reports in arrival order.
    pub async fn check_all(&self) -> Result<Vec<SiteStatusReport>, SiteCheckError> {
        let files = self.scan()?;
        let reports = collect_reports(self.dispatch(files)).await;
        debug!(reports = reports.len(), "all site probes finished");
        Ok(reports)
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "server {}\n").unwrap();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CheckConfig::default().with_markers("", ".conf");
        assert!(matches!(
            SiteChecker::with_config(config),
            Err(SiteCheckError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_resolve_conf_dir_override() {
        let config = CheckConfig::default().with_conf_dir("/srv/sites");
        let checker = SiteChecker::with_config(config).unwrap();
        assert_eq!(checker.resolve_conf_dir().unwrap(), PathBuf::from("/srv/sites"));
    }

    #[test]
    fn test_resolve_conf_dir_under_home() {
        let checker = SiteChecker::new().unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(checker.resolve_conf_dir().unwrap(), home.join("sites-enabled"));
        }
    }

    #[test]
    fn test_scan_filters_entries() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "mono.example.com.conf");
        touch(tmp.path(), "mono.shop.example.org.conf");
        touch(tmp.path(), "default");
        touch(tmp.path(), "legacy.example.conf");

        let config = CheckConfig::default().with_conf_dir(tmp.path());
        let checker = SiteChecker::with_config(config).unwrap();

        let mut files = checker.scan().unwrap();
        files.sort();
        assert_eq!(files, vec!["mono.example.com.conf", "mono.shop.example.org.conf"]);
    }

    #[test]
    fn test_scan_custom_markers() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "site-example.com.vhost");
        touch(tmp.path(), "mono.example.com.conf");

        let config = CheckConfig::default()
            .with_conf_dir(tmp.path())
            .with_markers("site-", ".vhost");
        let checker = SiteChecker::with_config(config).unwrap();

        assert_eq!(checker.scan().unwrap(), vec!["site-example.com.vhost"]);
    }

    #[test]
    fn test_scan_missing_directory_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let config = CheckConfig::default().with_conf_dir(tmp.path().join("missing"));
        let checker = SiteChecker::with_config(config).unwrap();

        let err = checker.scan().unwrap_err();
        assert!(matches!(err, SiteCheckError::ConfigDirUnreadable { .. }));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_check_all_no_matches() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "nginx.conf");
        touch(tmp.path(), "README");

        let config = CheckConfig::default().with_conf_dir(tmp.path());
        let checker = SiteChecker::with_config(config).unwrap();

        let reports = checker.check_all().await.unwrap();
        assert!(reports.is_empty());
    }
}
