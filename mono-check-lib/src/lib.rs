//! # Mono Check Library
//!
//! Scans a directory of `mono.<domain>.conf` site config files and checks that
//! every derived domain answers over HTTPS.
//!
//! Each qualifying file gets its own concurrent probe. Reports stream back over
//! a channel as probes finish and the channel closes once the last one is in.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mono_check_lib::{CheckConfig, RunSummary, SiteChecker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = SiteChecker::with_config(CheckConfig::default())?;
//!     let reports = checker.check_all().await?;
//!
//!     for line in mono_check_lib::failure_lines(&reports) {
//!         println!("{}", line);
//!     }
//!     let summary = RunSummary::from_reports(&reports);
//!     println!("ok: {}", summary.ok);
//!     println!("err: {}", summary.err);
//!     Ok(())
//! }
//! ```

// Re-export main public API types and functions
pub use checker::SiteChecker;
pub use concurrent::{collect_reports, ConcurrentDispatcher};
pub use config::{load_env_config, EnvConfig};
pub use error::SiteCheckError;
pub use prober::SiteProber;
pub use report::{failure_lines, RunSummary};
pub use types::{
    is_ok_status, CheckConfig, SiteStatus, SiteStatusReport, DEFAULT_CONF_SUBPATH,
    DEFAULT_PREFIX, DEFAULT_SUFFIX, TRANSPORT_FAILURE_CODE,
};
pub use utils::{extract_domain, filter_site_configs, is_site_config};

// Internal modules - these are not part of the public API
mod checker;
mod concurrent;
mod config;
mod error;
mod prober;
mod report;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SiteCheckError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
