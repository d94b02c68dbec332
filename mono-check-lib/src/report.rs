//! Aggregation of drained probe reports.

use crate::types::SiteStatusReport;
use serde::Serialize;

/// Counts over one run. `ok + err == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub ok: usize,
    pub err: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[SiteStatusReport]) -> Self {
        let ok = reports.iter().filter(|r| r.is_ok()).count();
        Self {
            total: reports.len(),
            ok,
            err: reports.len() - ok,
        }
    }
}

/// Diagnostic lines for reports that failed before a response, in arrival order.
///
/// HTTP-level failures are deliberately absent; they only show up in
/// `RunSummary::err`.
pub fn failure_lines(reports: &[SiteStatusReport]) -> Vec<String> {
    reports.iter().filter_map(|r| r.failure_line()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiteCheckError;

    fn sample_reports() -> Vec<SiteStatusReport> {
        vec![
            SiteStatusReport::responded("example.com", 200),
            SiteStatusReport::responded("moved.example", 301),
            SiteStatusReport::responded("bad.example", 404),
            SiteStatusReport::transport_error("down.example", SiteCheckError::network("dns error")),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary::from_reports(&sample_reports());
        assert_eq!(summary, RunSummary { total: 4, ok: 2, err: 2 });
        assert_eq!(summary.ok + summary.err, summary.total);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(RunSummary::from_reports(&[]), RunSummary::default());
    }

    #[test]
    fn test_failure_lines_only_transport_errors() {
        let lines = failure_lines(&sample_reports());
        assert_eq!(lines, vec!["down.example false 1 (dns error)"]);
    }
}
