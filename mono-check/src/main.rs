//! Mono Check CLI Application
//!
//! Probes every site listed as a `mono.<domain>.conf` file in the config
//! directory and prints the transport failures followed by ok/err counts.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use mono_check_lib::{
    collect_reports, failure_lines, load_env_config, CheckConfig, RunSummary, SiteChecker,
    SiteStatusReport,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for mono-check
#[derive(Parser, Debug)]
#[command(name = "mono-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check that every mono.<domain>.conf site answers over HTTPS")]
#[command(
    long_about = "Scan the site config directory for mono.<domain>.conf files, probe https://<domain> for each one concurrently, and report unreachable sites plus ok/err counts.\n\nA site is ok when it answers with a status between 200 and 303."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Directory holding the site configs (overrides $HOME/<subpath>)
    #[arg(long = "dir", value_name = "DIR", help_heading = "Site Selection")]
    pub dir: Option<PathBuf>,

    /// Site config directory relative to the home directory [default: sites-enabled]
    #[arg(long = "subpath", value_name = "PATH", help_heading = "Site Selection")]
    pub subpath: Option<PathBuf>,

    /// Marker preceding the domain in config file names [default: mono.]
    #[arg(long = "prefix", value_name = "MARKER", help_heading = "Site Selection")]
    pub prefix: Option<String>,

    /// Marker following the domain in config file names [default: .conf]
    #[arg(long = "suffix", value_name = "MARKER", help_heading = "Site Selection")]
    pub suffix: Option<String>,

    /// Max probes in flight (default: one per site)
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Output reports and summary as JSON
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Colored output with a header line
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Show debug logging
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// How the drained reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputMode {
    Text,
    Pretty,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    reports: &'a [SiteStatusReport],
    summary: RunSummary,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    init_tracing(&args);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if args.json && args.pretty {
        return Err("Cannot combine --json with --pretty".to_string());
    }

    if args.concurrency == Some(0) {
        return Err("Concurrency must be at least 1".to_string());
    }

    for (flag, value) in [("--prefix", &args.prefix), ("--suffix", &args.suffix)] {
        if matches!(value, Some(v) if v.is_empty()) {
            return Err(format!("{} cannot be empty", flag));
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only the report.
///
/// `RUST_LOG` wins over the verbosity flags when set.
fn init_tracing(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let (config, mode) = build_config(&args);
    debug!(?config, ?mode, "resolved configuration");

    let checker = SiteChecker::with_config(config)?;
    let dir = checker.resolve_conf_dir()?;
    let files = checker.scan()?;

    if mode == OutputMode::Pretty {
        ui::print_header(&dir, files.len(), checker.config().concurrency);
    }

    let spinner = if mode == OutputMode::Pretty && !files.is_empty() {
        ui::Spinner::start(format!("Probing {} sites...", files.len()))
    } else {
        None
    };

    let reports = collect_reports(checker.dispatch(files)).await;

    if let Some(s) = spinner {
        s.stop().await;
    }

    display_results(&reports, mode)
}

/// Build CheckConfig from CLI arguments and environment.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables (MC_*)
/// 3. Built-in defaults
fn build_config(args: &Args) -> (CheckConfig, OutputMode) {
    let env_config = load_env_config(args.verbose);
    let mut config = env_config.apply_to(CheckConfig::default());

    if let Some(dir) = &args.dir {
        config.conf_dir = Some(dir.clone());
    }
    if let Some(subpath) = &args.subpath {
        config.conf_subpath = subpath.clone();
    }
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(suffix) = &args.suffix {
        config.suffix = suffix.clone();
    }
    if args.concurrency.is_some() {
        config.concurrency = args.concurrency;
    }

    let mode = resolve_output_mode(args, env_config.json, env_config.pretty);
    (config, mode)
}

/// Explicit flags win; env toggles only apply when no flag was given.
fn resolve_output_mode(args: &Args, env_json: Option<bool>, env_pretty: Option<bool>) -> OutputMode {
    if args.json {
        OutputMode::Json
    } else if args.pretty {
        OutputMode::Pretty
    } else if env_json == Some(true) {
        OutputMode::Json
    } else if env_pretty == Some(true) {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

fn display_results(
    reports: &[SiteStatusReport],
    mode: OutputMode,
) -> Result<(), Box<dyn std::error::Error>> {
    match mode {
        OutputMode::Json => display_json_results(reports)?,
        OutputMode::Pretty => ui::print_pretty_results(reports),
        OutputMode::Text => {
            for line in text_report_lines(reports) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

/// Display results in JSON format
fn display_json_results(reports: &[SiteStatusReport]) -> Result<(), Box<dyn std::error::Error>> {
    let output = JsonOutput {
        reports,
        summary: RunSummary::from_reports(reports),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Plain text report: one line per transport failure, then the counts.
fn text_report_lines(reports: &[SiteStatusReport]) -> Vec<String> {
    let summary = RunSummary::from_reports(reports);
    let mut lines = failure_lines(reports);
    lines.push(format!("ok: {}", summary.ok));
    lines.push(format!("err: {}", summary.err));
    lines
}
