//! Rainfall analysis service boundary
//!
//! The session controller talks to the analysis service only through the
//! [`RainfallAnalyzer`] trait. Two implementations ship with the crate:
//!
//! - **GeminiAnalyzer**: calls Gemini `generateContent` over HTTP, grounded
//!   with Google Search (production)
//! - **MockAnalyzer**: scripted reports and failures (testing)
//!
//! Reports use the versioned [`AnalysisResult`] schema. Fields the crate does
//! not model are preserved in `extra`.
//!
//! # Example
//!
//! ```ignore
//! use vinarain::analysis::{GeminiAnalyzer, GeminiConfig, RainfallAnalyzer};
//!
//! let analyzer = GeminiAnalyzer::new(GeminiConfig {
//!     api_key: Some(key),
//!     ..GeminiConfig::default()
//! })?;
//! let report = analyzer.analyze("Quảng Nam").await?;
//! println!("{}", report.summary);
//! ```

mod gemini;
mod mock;
mod traits;
mod types;

pub use gemini::{parse_response, GeminiAnalyzer, GeminiConfig};
pub use mock::{mock_report, MockAnalyzer, MockGate};
pub use traits::RainfallAnalyzer;
pub use types::{
    AnalysisError, AnalysisResult, RiskLevel, SourceLink, YearlyRainfall, SCHEMA_VERSION,
};
