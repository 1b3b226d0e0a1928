//! Analyzer trait defining the rainfall analysis service interface

use super::types::{AnalysisError, AnalysisResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Produces a rainfall report for a province name.
///
/// Abstracts over how the report is produced (Gemini over HTTP, a mock in
/// tests) so the session controller only depends on the name-in/report-out
/// contract.
///
/// # Example
///
/// ```ignore
/// struct CannedAnalyzer;
///
/// #[async_trait]
/// impl RainfallAnalyzer for CannedAnalyzer {
///     fn id(&self) -> &str { "canned" }
///
///     async fn analyze(&self, province_name: &str) -> Result<AnalysisResult, AnalysisError> {
///         Ok(AnalysisResult::new(province_name))
///     }
/// }
/// ```
#[async_trait]
pub trait RainfallAnalyzer: Send + Sync {
    /// Short identifier used in logs
    fn id(&self) -> &str;

    /// Check if the service can be reached at all.
    ///
    /// Default assumes it can; implementations with cheap local checks
    /// (missing credentials) override this.
    async fn is_available(&self) -> bool {
        true
    }

    /// Analyze rainfall for the named province.
    ///
    /// Never retries internally.
    async fn analyze(&self, province_name: &str) -> Result<AnalysisResult, AnalysisError>;
}

#[async_trait]
impl<T: RainfallAnalyzer + ?Sized> RainfallAnalyzer for Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    async fn is_available(&self) -> bool {
        (**self).is_available().await
    }

    async fn analyze(&self, province_name: &str) -> Result<AnalysisResult, AnalysisError> {
        (**self).analyze(province_name).await
    }
}
