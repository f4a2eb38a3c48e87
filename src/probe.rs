//! Diagnostic Sweep Runner
//!
//! Executes named steps in order and keeps going: a failed probe is
//! classified, printed with its remediation hint, and the sweep moves to
//! the next independent step. Only Configuration and Authentication
//! failures are worth stopping for; the caller decides by checking the
//! returned class. No step is ever retried.

use std::future::Future;

use crate::models::errors::{ErrorClass, ProbeError, ProbeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
}

/// Outcome of one sweep step, kept for the final summary
#[derive(Debug)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
    pub detail: Option<String>,
}

/// Best-effort diagnostic sweep over independent steps
#[derive(Default)]
pub struct Sweep {
    steps: Vec<StepReport>,
}

impl Sweep {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_no(&self) -> usize {
        self.steps.len() + 1
    }

    /// Run one best-effort step. A failure is printed and recorded, and
    /// the sweep continues; the caller gets None.
    pub async fn step<T, F>(&mut self, name: &str, fut: F) -> Option<T>
    where
        F: Future<Output = ProbeResult<T>>,
    {
        println!("\n--- Step {}: {} ---", self.next_no(), name);
        match fut.await {
            Ok(value) => {
                self.steps.push(StepReport {
                    name: name.to_string(),
                    status: StepStatus::Passed,
                    detail: None,
                });
                Some(value)
            }
            Err(err) => {
                print_failure(&err);
                self.steps.push(StepReport {
                    name: name.to_string(),
                    status: StepStatus::Failed,
                    detail: Some(err.to_string()),
                });
                None
            }
        }
    }

    /// Run a step nothing downstream can survive without (configuration,
    /// authentication). The error propagates so the binary stops.
    pub async fn step_fatal<T, F>(&mut self, name: &str, fut: F) -> ProbeResult<T>
    where
        F: Future<Output = ProbeResult<T>>,
    {
        println!("\n--- Step {}: {} ---", self.next_no(), name);
        match fut.await {
            Ok(value) => {
                self.steps.push(StepReport {
                    name: name.to_string(),
                    status: StepStatus::Passed,
                    detail: None,
                });
                Ok(value)
            }
            Err(err) => {
                print_failure(&err);
                self.steps.push(StepReport {
                    name: name.to_string(),
                    status: StepStatus::Failed,
                    detail: Some(err.to_string()),
                });
                Err(err)
            }
        }
    }

    /// Record a step that cannot run (service not configured, earlier
    /// dependency failed)
    pub fn skip(&mut self, name: &str, reason: &str) {
        println!("\n--- Step {}: {} ---", self.next_no(), name);
        println!("⏭️  Skipped: {}", reason);
        self.steps.push(StepReport {
            name: name.to_string(),
            status: StepStatus::Skipped,
            detail: Some(reason.to_string()),
        });
    }

    pub fn passed(&self) -> usize {
        self.count(StepStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(StepStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(StepStatus::Skipped)
    }

    fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    pub fn reports(&self) -> &[StepReport] {
        &self.steps
    }

    /// Final tally in the shutdown-statistics style
    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("SUMMARY:");
        println!("{}", "=".repeat(60));
        for report in &self.steps {
            let mark = match report.status {
                StepStatus::Passed => "✅",
                StepStatus::Failed => "❌",
                StepStatus::Skipped => "⏭️ ",
            };
            match &report.detail {
                Some(detail) if report.status != StepStatus::Passed => {
                    println!("   {} {} — {}", mark, report.name, detail)
                }
                _ => println!("   {} {}", mark, report.name),
            }
        }
        println!(
            "\n   Passed:  {}\n   Failed:  {}\n   Skipped: {}",
            self.passed(),
            self.failed(),
            self.skipped()
        );
    }
}

/// Print a classified failure with its remediation hint
pub fn print_failure(err: &ProbeError) {
    println!("❌ {}", err);
    if let Some(hint) = err.remediation() {
        println!("   💡 {}", hint);
    }
}

/// Whether a failure should stop a run outright
pub fn is_fatal(err: &ProbeError) -> bool {
    matches!(
        err.class(),
        ErrorClass::Configuration | ErrorClass::Authentication
    )
}

/// Top banner used by every binary
pub fn heading(title: &str) {
    println!("🚀 {}", title);
    println!("{}", "=".repeat(60));
}

/// Section divider inside a binary
pub fn section(title: &str) {
    println!("\n{}", title);
    println!("{}", "=".repeat(50));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_continues_after_failure() {
        let mut sweep = Sweep::new();

        let first: Option<u32> = sweep
            .step("failing step", async { Err(ProbeError::not_found("missing surface")) })
            .await;
        assert!(first.is_none());

        // The sweep must still run later, unrelated steps
        let second = sweep.step("passing step", async { Ok(42u32) }).await;
        assert_eq!(second, Some(42));

        assert_eq!(sweep.failed(), 1);
        assert_eq!(sweep.passed(), 1);
    }

    #[tokio::test]
    async fn test_fatal_step_propagates() {
        let mut sweep = Sweep::new();
        let result: ProbeResult<u32> = sweep
            .step_fatal("config", async { Err(ProbeError::missing_env("SEARCH_ENDPOINT")) })
            .await;
        assert!(result.is_err());
        assert!(is_fatal(&result.unwrap_err()));
    }

    #[tokio::test]
    async fn test_skip_is_recorded() {
        let mut sweep = Sweep::new();
        sweep.skip("storage probe", "AZURE_STORAGE_CONNECTION_STRING not set");
        assert_eq!(sweep.skipped(), 1);
        assert_eq!(sweep.reports()[0].status, StepStatus::Skipped);
    }
}
