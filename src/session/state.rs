//! SessionState: the four mutually exclusive interaction states

use crate::analysis::AnalysisResult;
use crate::province::ProvinceRecord;
use std::fmt;

/// Message shown for every analysis failure, whatever the cause
pub const ANALYSIS_FAILED_MESSAGE: &str = "Không thể lấy dữ liệu. Vui lòng thử lại sau.";

/// Current state of an analysis session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Nothing selected yet
    #[default]
    Idle,
    /// One call for this province is current
    Loading(ProvinceRecord),
    /// Report for the latest selection
    Success(AnalysisResult),
    /// User-facing failure message
    Error(String),
}

/// Payload-free tag for a [`SessionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Idle,
    Loading,
    Success,
    Error,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Loading => "loading",
            SessionPhase::Success => "success",
            SessionPhase::Error => "error",
        };
        f.write_str(s)
    }
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Loading(_) => SessionPhase::Loading,
            SessionState::Success(_) => SessionPhase::Success,
            SessionState::Error(_) => SessionPhase::Error,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading(_))
    }

    /// Province being analyzed, only while loading
    pub fn loading_province(&self) -> Option<&ProvinceRecord> {
        match self {
            SessionState::Loading(province) => Some(province),
            _ => None,
        }
    }

    /// Displayed report, only in `Success`
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SessionState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Displayed error message, only in `Error`
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_variant() {
        let loading = SessionState::Loading(ProvinceRecord::new("hn", "Hà Nội", "North"));
        assert_eq!(loading.phase(), SessionPhase::Loading);
        assert_eq!(loading.loading_province().unwrap().name, "Hà Nội");
        assert!(loading.result().is_none());
        assert!(loading.error_message().is_none());

        let failed = SessionState::Error(ANALYSIS_FAILED_MESSAGE.to_string());
        assert_eq!(failed.error_message(), Some(ANALYSIS_FAILED_MESSAGE));
        assert!(failed.result().is_none());

        let done = SessionState::Success(AnalysisResult::new("Hà Nội"));
        assert_eq!(done.result().unwrap().province_name, "Hà Nội");
        assert!(!done.is_loading());
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
        assert_eq!(SessionState::Idle.phase().to_string(), "idle");
    }
}
