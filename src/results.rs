use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of visiting one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Pass,
    Fail,
}

impl AuditStatus {
    /// Marker used in the console report
    pub fn label(&self) -> &'static str {
        match self {
            AuditStatus::Pass => "✓ PASS",
            AuditStatus::Fail => "✗ FAIL",
        }
    }
}

/// Represents the audit outcome for one documentation page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAuditResult {
    /// Display name of the target
    pub name: String,

    /// Resolved URL that was visited
    pub url: String,

    pub status: AuditStatus,

    /// Screenshot written for this page (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,

    /// Console and uncaught page errors captured while auditing, in order
    #[serde(default)]
    pub console_errors: Vec<String>,

    /// Error text when the visit failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageAuditResult {
    /// Create a passing result
    pub fn pass(
        name: String,
        url: String,
        screenshot: PathBuf,
        console_errors: Vec<String>,
    ) -> Self {
        Self {
            name,
            url,
            status: AuditStatus::Pass,
            screenshot: Some(screenshot),
            console_errors,
            error: None,
        }
    }

    /// Create a failing result carrying the error text
    pub fn fail(name: String, url: String, error: String) -> Self {
        Self {
            name,
            url,
            status: AuditStatus::Fail,
            screenshot: None,
            console_errors: Vec::new(),
            error: Some(error),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == AuditStatus::Pass
    }
}

/// Pass/fail tally derived from a list of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_results(results: &[PageAuditResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
        }
    }

    /// Percentage of passing pages; 0.0 for an empty run
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pass: bool) -> PageAuditResult {
        if pass {
            PageAuditResult::pass(
                "Button".to_string(),
                "http://localhost:6006/?path=/docs/components-button--docs".to_string(),
                PathBuf::from("audit-button.png"),
                vec![],
            )
        } else {
            PageAuditResult::fail(
                "Card".to_string(),
                "http://localhost:6006/?path=/docs/components-card--docs".to_string(),
                "net::ERR_CONNECTION_REFUSED".to_string(),
            )
        }
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![sample(true), sample(false), sample(true)];
        let summary = RunSummary::from_results(&results);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.passed + summary.failed, summary.total);
        assert!((summary.success_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_summary_has_zero_rate() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate(), 0.0);
    }

    #[test]
    fn test_failed_result_has_no_screenshot() {
        let result = sample(false);
        assert!(!result.passed());
        assert!(result.screenshot.is_none());
        assert_eq!(result.error.as_deref(), Some("net::ERR_CONNECTION_REFUSED"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(sample(true)).unwrap();
        assert_eq!(json["status"], "pass");
        assert!(json.get("error").is_none());
    }
}
