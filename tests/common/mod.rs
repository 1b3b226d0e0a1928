//! Shared fixtures for VinaRain integration tests
//!
//! Builds small province indexes and scripted analyzers so scenarios read
//! like the user flows they exercise.

use std::sync::Arc;
use vinarain::analysis::{mock_report, MockAnalyzer};
use vinarain::{AnalysisSession, ProvinceIndex, ProvinceRecord};

/// The two-city index used by the documented scenarios
pub fn two_city_index() -> Arc<ProvinceIndex> {
    Arc::new(
        ProvinceIndex::from_records(vec![
            ProvinceRecord::new("hn", "Hà Nội", "North"),
            ProvinceRecord::new("hcm", "Hồ Chí Minh", "South"),
        ])
        .expect("fixture ids are unique"),
    )
}

/// Mock analyzer with a report for every province in the index
pub fn reporting_analyzer(index: &ProvinceIndex) -> MockAnalyzer {
    index
        .records()
        .iter()
        .fold(MockAnalyzer::available(), |analyzer, p| {
            analyzer.with_report(p.name.clone(), mock_report(&p.name))
        })
}

pub fn session(index: Arc<ProvinceIndex>, analyzer: MockAnalyzer) -> AnalysisSession {
    AnalysisSession::new(index, Arc::new(analyzer))
}
