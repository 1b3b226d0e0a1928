//! Mock analyzer for testing, returns preconfigured reports
//!
//! Responses are keyed by province name. A province can also be "held":
//! its call parks until the test releases it, which lets tests interleave
//! completions deterministically.

use super::traits::RainfallAnalyzer;
use super::types::{AnalysisError, AnalysisResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type FailureFactory = Box<dyn Fn() -> AnalysisError + Send + Sync>;

enum Scripted {
    Report(AnalysisResult),
    Failure(FailureFactory),
}

/// Handle that releases a held province call
#[derive(Clone)]
pub struct MockGate {
    notify: Arc<Notify>,
}

impl MockGate {
    /// Let the next parked call for this province finish
    pub fn release(&self) {
        self.notify.notify_one();
    }
}

pub struct MockAnalyzer {
    available: bool,
    scripted: HashMap<String, Scripted>,
    gates: HashMap<String, Arc<Notify>>,
    calls: Mutex<Vec<String>>,
}

impl MockAnalyzer {
    /// Create a mock analyzer that reports as available.
    pub fn available() -> Self {
        Self {
            available: true,
            scripted: HashMap::new(),
            gates: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock analyzer whose every call fails.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::available()
        }
    }

    /// Register a report for a province.
    pub fn with_report(mut self, province_name: impl Into<String>, report: AnalysisResult) -> Self {
        self.scripted
            .insert(province_name.into(), Scripted::Report(report));
        self
    }

    /// Register a failure for a province.
    pub fn with_failure<F>(mut self, province_name: impl Into<String>, make_error: F) -> Self
    where
        F: Fn() -> AnalysisError + Send + Sync + 'static,
    {
        self.scripted
            .insert(province_name.into(), Scripted::Failure(Box::new(make_error)));
        self
    }

    /// Park calls for a province until the returned gate is released.
    ///
    /// Each `release` lets exactly one call through.
    pub fn hold(&mut self, province_name: impl Into<String>) -> MockGate {
        let notify = Arc::new(Notify::new());
        self.gates.insert(province_name.into(), notify.clone());
        MockGate { notify }
    }

    /// Province names passed to `analyze`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RainfallAnalyzer for MockAnalyzer {
    fn id(&self) -> &str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn analyze(&self, province_name: &str) -> Result<AnalysisResult, AnalysisError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(province_name.to_string());
        }

        if let Some(gate) = self.gates.get(province_name) {
            gate.notified().await;
        }

        if !self.available {
            return Err(AnalysisError::Unavailable(
                "mock analyzer configured as unavailable".to_string(),
            ));
        }

        match self.scripted.get(province_name) {
            Some(Scripted::Report(report)) => Ok(report.clone()),
            Some(Scripted::Failure(make_error)) => Err(make_error()),
            None => Err(AnalysisError::Unavailable(format!(
                "no mock report for province '{}'",
                province_name
            ))),
        }
    }
}

/// Helper to construct a small but complete report for testing.
pub fn mock_report(province_name: &str) -> AnalysisResult {
    AnalysisResult::new(province_name)
        .with_summary(format!("Lượng mưa tại {} ổn định trong 10 năm qua.", province_name))
        .with_year(2023, 1850.0)
        .with_year(2024, 2100.0)
}
