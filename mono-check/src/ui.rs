//! Pretty-mode display logic for mono-check.
//!
//! Handles all `--pretty` output: header, spinner, colored failure lines and
//! the summary. Plain text and JSON output live in `main.rs`.

use console::{style, Term};
use mono_check_lib::{RunSummary, SiteStatusReport};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a spinner with the given message. Returns `None` if stderr is not a TTY.
    pub fn start(message: String) -> Option<Self> {
        if !Term::stderr().is_term() {
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Some(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a pretty run.
pub fn print_header(dir: &Path, site_count: usize, concurrency: Option<usize>) {
    println!(
        "{} {} {}",
        style("mono-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Probing {} site{}",
            site_count,
            if site_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );

    let concurrency = match concurrency {
        Some(n) => n.to_string(),
        None => "unbounded".to_string(),
    };
    println!(
        "{}",
        style(format!("Directory: {} | Concurrency: {}", dir.display(), concurrency)).dim()
    );
    println!();
}

// ── Results ──────────────────────────────────────────────────────────────────

/// Print failure lines in red followed by the colored summary.
pub fn print_pretty_results(reports: &[SiteStatusReport]) {
    for report in reports {
        if let Some(error) = &report.error {
            println!(
                "  {} {} {} {}",
                style(report.domain()).white(),
                style(report.is_ok()).red().bold(),
                style(report.code()).red(),
                style(format!("({})", error)).dim(),
            );
        }
    }

    print_summary(&RunSummary::from_reports(reports));
}

/// Print the ok/err counts, keeping the `ok:`/`err:` labels.
pub fn print_summary(summary: &RunSummary) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!("  {} {}", style("ok:").green().bold(), style(summary.ok).green());
    println!("  {} {}", style("err:").red().bold(), style(summary.err).red());
}
