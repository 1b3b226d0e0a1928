//! VinaRain: province rainfall and disaster-risk analysis for Vietnam
//!
//! Search a province by name, then ask an AI analysis service for a rainfall
//! report covering the last decade, La Niña influence and the outlook for the
//! coming season.
//!
//! # Core Concepts
//!
//! - **Province index**: static, ordered province list with case-insensitive
//!   substring lookup for autocomplete
//! - **Analysis session**: the Idle → Loading → Success | Error state machine
//!   that owns the search text and the current selection
//! - **Rainfall analyzer**: the external service boundary (Gemini in
//!   production, a mock in tests)
//!
//! # Example
//!
//! ```
//! use vinarain::ProvinceIndex;
//!
//! let index = ProvinceIndex::builtin();
//! let hits = index.filter("hà");
//! assert!(hits.iter().any(|p| p.name == "Hà Nội"));
//! ```

pub mod analysis;
pub mod config;
pub mod province;
pub mod repl;
pub mod session;
pub mod view;

pub use analysis::{
    AnalysisError, AnalysisResult, GeminiAnalyzer, GeminiConfig, MockAnalyzer, RainfallAnalyzer,
    RiskLevel,
};
pub use config::{ConfigError, VinarainConfig};
pub use province::{ProvinceError, ProvinceIndex, ProvinceRecord};
pub use session::{
    AnalysisCompletion, AnalysisSession, AnalysisTicket, SessionPhase, SessionState,
    ANALYSIS_FAILED_MESSAGE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
