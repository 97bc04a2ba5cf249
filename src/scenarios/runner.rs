//! Sequential scenario runner

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{Scenario, Verdict};
use crate::config::Config;
use crate::driver::SessionProvider;
use crate::element::WaitConfig;
use crate::pages::DiscoverPage;
use crate::report::{TestReport, TestStatus};
use crate::{Error, Result};

/// What happened inside one session
struct Attempt {
    result: Result<Verdict>,
    screenshot: Option<PathBuf>,
}

/// Runs scenarios one at a time, each in a fresh session
#[derive(Debug)]
pub struct SuiteRunner {
    provider: SessionProvider,
    config: Arc<Config>,
    report: TestReport,
}

impl SuiteRunner {
    pub fn new(provider: SessionProvider, config: Arc<Config>) -> Self {
        Self {
            provider,
            config,
            report: TestReport::default(),
        }
    }

    pub fn report(&self) -> &TestReport {
        &self.report
    }

    pub fn into_report(self) -> TestReport {
        self.report
    }

    /// Run every scenario in order
    pub async fn run_all(&mut self, scenarios: &[Scenario]) {
        info!("Running {} scenarios", scenarios.len());
        for scenario in scenarios {
            self.run_scenario(scenario).await;
        }
    }

    /// Run one scenario and record its result
    pub async fn run_scenario(&mut self, scenario: &Scenario) -> TestStatus {
        info!("Starting test: {}", scenario.name);

        let attempt = AssertUnwindSafe(self.attempt(scenario)).catch_unwind().await;
        let (result, screenshot) = match attempt {
            Ok(Ok(attempt)) => (attempt.result, attempt.screenshot),
            Ok(Err(e)) => (Err(e), None),
            Err(panic) => (Err(Error::internal(panic_message(panic.as_ref()))), None),
        };

        let (status, detail) = match (result, scenario.known_issue) {
            (Ok(Verdict::Passed(_)), _) => (TestStatus::Passed, None),
            (Ok(Verdict::Skipped(reason)), _) => (TestStatus::Skipped, Some(reason)),
            (Err(e), Some(issue)) => {
                info!("{} failed as expected: {}", scenario.name, e);
                (
                    TestStatus::Skipped,
                    Some(format!("expected failure: {}: {}", issue, e)),
                )
            }
            (Err(e), None) => {
                error!("{} failed: {}", scenario.name, e);
                (TestStatus::Failed, Some(e.to_string()))
            }
        };

        info!("Finished test: {} {}", scenario.name, status);
        self.report
            .add_result(scenario.name, status, detail, screenshot);
        status
    }

    /// Acquire a session, open the site, run the body, and capture a screenshot on failure
    ///
    /// A panicking body is a failure too; the screenshot is taken while the browser is still open.
    async fn attempt(&self, scenario: &Scenario) -> Result<Attempt> {
        let config = Arc::clone(&self.config);
        let run = scenario.run;
        let name = scenario.name;

        self.provider
            .with_session(|session| async move {
                let discover = DiscoverPage::new(&session, WaitConfig::from(config.as_ref()));
                let (_, cause) = discover.open(&config.base_url).await.into_parts();

                let result = match cause {
                    Some(cause) => Err(cause),
                    None => AssertUnwindSafe(run(Arc::clone(&session), Arc::clone(&config)))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|panic| Err(Error::internal(panic_message(panic.as_ref())))),
                };

                let screenshot = if result.is_err() {
                    match session.save_screenshot(&format!("FAIL_{}", name)).await {
                        Ok(path) => Some(path),
                        Err(e) => {
                            warn!("Failed to save failure screenshot: {}", e);
                            None
                        }
                    }
                } else {
                    None
                };

                Ok(Attempt { result, screenshot })
            })
            .await
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("scenario panicked: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("scenario panicked: {}", msg)
    } else {
        "scenario panicked".to_string()
    }
}
