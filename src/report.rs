//! Test run report
//!
//! Append-only list of scenario results. The summary is computed whenever it
//! is asked for, so it always reflects every record added so far.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::Result;

/// Default suite name
pub const DEFAULT_SUITE_NAME: &str = "QA Automation Test Suite";

/// Final status of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TestStatus::Passed => "PASSED",
            TestStatus::Failed => "FAILED",
            TestStatus::Skipped => "SKIPPED",
        })
    }
}

/// One scenario result
#[derive(Debug, Clone, Serialize)]
pub struct TestRecord {
    pub name: String,
    pub status: TestStatus,
    pub timestamp: String,
    pub error: Option<String>,
    pub screenshot: Option<PathBuf>,
}

/// Aggregated view of a report
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub test_suite: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub pass_rate: f64,
    pub failed_tests: Vec<String>,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    summary: ReportSummary,
    test_details: &'a [TestRecord],
}

/// Scenario results for one run
#[derive(Debug, Clone)]
pub struct TestReport {
    suite_name: String,
    start_time: DateTime<Local>,
    tests: Vec<TestRecord>,
}

impl Default for TestReport {
    fn default() -> Self {
        Self::new(DEFAULT_SUITE_NAME)
    }
}

impl TestReport {
    pub fn new<S: Into<String>>(suite_name: S) -> Self {
        Self {
            suite_name: suite_name.into(),
            start_time: Local::now(),
            tests: Vec::new(),
        }
    }

    /// Append a result
    pub fn add_result<S: Into<String>>(
        &mut self,
        name: S,
        status: TestStatus,
        error: Option<String>,
        screenshot: Option<PathBuf>,
    ) {
        self.tests.push(TestRecord {
            name: name.into(),
            status,
            timestamp: Local::now().to_rfc3339(),
            error,
            screenshot,
        });
    }

    pub fn records(&self) -> &[TestRecord] {
        &self.tests
    }

    fn count(&self, status: TestStatus) -> usize {
        self.tests.iter().filter(|t| t.status == status).count()
    }

    /// Whether any scenario failed
    pub fn has_failures(&self) -> bool {
        self.count(TestStatus::Failed) > 0
    }

    /// Summary as of now
    pub fn summary(&self) -> ReportSummary {
        let now = Local::now();
        let total = self.tests.len();
        let passed = self.count(TestStatus::Passed);

        ReportSummary {
            test_suite: self.suite_name.clone(),
            start_time: self.start_time.to_rfc3339(),
            end_time: now.to_rfc3339(),
            duration: format_duration(now - self.start_time),
            total_tests: total,
            passed,
            failed: self.count(TestStatus::Failed),
            skipped: self.count(TestStatus::Skipped),
            pass_rate: if total > 0 {
                passed as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            failed_tests: self
                .tests
                .iter()
                .filter(|t| t.status == TestStatus::Failed)
                .map(|t| t.name.clone())
                .collect(),
        }
    }

    /// `{summary, test_details}` document
    pub fn to_json(&self) -> Result<String> {
        let document = ReportDocument {
            summary: self.summary(),
            test_details: &self.tests,
        };

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        document.serialize(&mut serializer)?;

        String::from_utf8(out).map_err(|e| crate::Error::internal(e.to_string()))
    }

    /// Write `test_report_{timestamp}.json` under `dir`
    pub fn write_json<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let path = dir.join(format!("test_report_{}.json", crate::timestamp()));
        std::fs::write(&path, self.to_json()?)?;

        info!("Report written to {}", path.display());
        Ok(path)
    }

    /// Human-readable summary table
    pub fn render_console(&self) -> String {
        let summary = self.summary();
        let heavy = "=".repeat(60);
        let light = "-".repeat(60);
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "\n{}", heavy);
        let _ = writeln!(out, "TEST EXECUTION SUMMARY");
        let _ = writeln!(out, "{}", heavy);
        let _ = writeln!(out, "Test Suite: {}", summary.test_suite);
        let _ = writeln!(out, "Start Time: {}", summary.start_time);
        let _ = writeln!(out, "End Time: {}", summary.end_time);
        let _ = writeln!(out, "Duration: {}", summary.duration);
        let _ = writeln!(out, "{}", light);
        let _ = writeln!(out, "Total Tests: {}", summary.total_tests);
        let _ = writeln!(out, "Passed: {}", summary.passed);
        let _ = writeln!(out, "Failed: {}", summary.failed);
        let _ = writeln!(out, "Skipped: {}", summary.skipped);
        let _ = writeln!(out, "Pass Rate: {:.2}%", summary.pass_rate);

        if !summary.failed_tests.is_empty() {
            let _ = writeln!(out, "\n{}", light);
            let _ = writeln!(out, "FAILED TESTS:");
            for name in &summary.failed_tests {
                let _ = writeln!(out, "  - {}", name);
            }
        }

        let _ = writeln!(out, "{}", heavy);
        out
    }

    pub fn print_console_report(&self) {
        print!("{}", self.render_console());
    }
}

/// `H:MM:SS.ffffff`
fn format_duration(elapsed: chrono::TimeDelta) -> String {
    let micros = elapsed.num_microseconds().unwrap_or(0).max(0);
    let secs = micros / 1_000_000;
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        micros % 1_000_000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TestReport {
        let mut report = TestReport::new("Discover");
        report.add_result("test_navigation", TestStatus::Passed, None, None);
        report.add_result(
            "test_pagination",
            TestStatus::Failed,
            Some("next page not reached".into()),
            Some(PathBuf::from("screenshots/FAIL_test_pagination_20250101_120000.png")),
        );
        report.add_result("test_last_page", TestStatus::Skipped, Some("expected failure: 404".into()), None);
        report.add_result("test_search", TestStatus::Passed, None, None);
        report
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();

        assert_eq!(summary.test_suite, "Discover");
        assert_eq!(summary.total_tests, 4);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert!((summary.pass_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(summary.failed_tests, vec!["test_pagination"]);
    }

    #[test]
    fn test_empty_report_pass_rate() {
        let report = TestReport::default();
        assert_eq!(report.summary().pass_rate, 0.0);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_json_document_shape() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();

        assert_eq!(json["summary"]["total_tests"], 4);
        assert_eq!(json["test_details"][1]["status"], "FAILED");
        assert_eq!(json["test_details"][1]["error"], "next page not reached");
        assert!(json["test_details"][0]["screenshot"].is_null());
    }

    #[test]
    fn test_write_json_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports");

        let path = sample().write_json(&target).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("test_report_") && name.ends_with(".json"));
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("\n    \"summary\""));
    }

    #[test]
    fn test_console_lists_failures() {
        let text = sample().render_console();
        assert!(text.contains("TEST EXECUTION SUMMARY"));
        assert!(text.contains("Pass Rate: 50.00%"));
        assert!(text.contains("  - test_pagination"));
    }

    #[test]
    fn test_duration_format() {
        assert_eq!(format_duration(chrono::TimeDelta::milliseconds(3_723_500)), "1:02:03.500000");
    }
}
