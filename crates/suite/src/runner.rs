//! Test runner that executes scenarios against the fixture service

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::context::SuiteContext;
use crate::error::{Error, Result};
use crate::scenario::{catalogue, filter_by_tag, Outcome, Tag, TestCase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
}

/// Result of running a single case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub description: String,
    pub tags: Vec<Tag>,
    pub status: CaseStatus,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl TestResult {
    pub fn success(&self) -> bool {
        self.status != CaseStatus::Failed
    }
}

/// Result of running a selection of cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn from_results(results: Vec<TestResult>, duration_ms: u64) -> Self {
        let count = |status| results.iter().filter(|r| r.status == status).count();
        Self {
            total: results.len(),
            passed: count(CaseStatus::Passed),
            failed: count(CaseStatus::Failed),
            skipped: count(CaseStatus::Skipped),
            duration_ms,
            results,
        }
    }
}

/// Runs cases one at a time; a failing case never stops the others
pub struct TestRunner {
    context: SuiteContext,
}

impl TestRunner {
    pub fn new(context: SuiteContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &SuiteContext {
        &self.context
    }

    /// Run every case in the catalogue
    pub async fn run_all(&self) -> Result<TestSuiteResult> {
        self.run_cases(&catalogue()).await
    }

    /// Run cases carrying a tag
    pub async fn run_tagged(&self, tag: Tag) -> Result<TestSuiteResult> {
        self.run_cases(&filter_by_tag(&catalogue(), tag)).await
    }

    /// Run a specific case by name
    pub async fn run_test(&self, name: &str) -> Result<TestResult> {
        let case = catalogue()
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::Config(format!("Test not found: {}", name)))?;

        self.run_case(&case).await
    }

    /// Run a list of cases in order.
    ///
    /// Configuration errors abort the run; every other error only fails the
    /// case that raised it.
    pub async fn run_cases(&self, cases: &[TestCase]) -> Result<TestSuiteResult> {
        let start = Instant::now();
        let mut results = Vec::with_capacity(cases.len());

        info!("Running {} test(s)...", cases.len());

        for case in cases {
            let result = self.run_case(case).await?;
            match result.status {
                CaseStatus::Passed => info!("✓ {} ({} ms)", result.name, result.duration_ms),
                CaseStatus::Skipped => warn!(
                    "- {} skipped: {}",
                    result.name,
                    result.error.as_deref().unwrap_or("no reason given")
                ),
                CaseStatus::Failed => error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                ),
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let suite = TestSuiteResult::from_results(results, duration_ms);

        info!(
            "Test Results: {} passed, {} failed, {} skipped ({} ms)",
            suite.passed, suite.failed, suite.skipped, suite.duration_ms
        );

        Ok(suite)
    }

    /// Run a single case
    pub async fn run_case(&self, case: &TestCase) -> Result<TestResult> {
        let start = Instant::now();
        debug!("Running test: {} ({})", case.name, case.description);

        let (status, error) = match case.scenario.run(&self.context).await {
            Ok(Outcome::Passed) => (CaseStatus::Passed, None),
            Ok(Outcome::Skipped(reason)) => (CaseStatus::Skipped, Some(reason)),
            Err(e) if e.is_configuration() => return Err(e),
            Err(e) => (CaseStatus::Failed, Some(e.to_string())),
        };

        Ok(TestResult {
            name: case.name.clone(),
            description: case.description.to_string(),
            tags: case.tags().to_vec(),
            status,
            duration_ms: start.elapsed().as_millis() as u64,
            error,
        })
    }

    /// Write suite results to `test-results.json` in the output directory
    pub fn write_results(&self, results: &TestSuiteResult) -> Result<PathBuf> {
        let output_dir = &self.context.config().output_dir;
        std::fs::create_dir_all(output_dir)?;

        let path = output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}
