//! Live Gemini round trip
//!
//! Needs network access and an API key:
//! `GEMINI_API_KEY=... cargo test --features real_llm --test gemini_live -- --nocapture`

#![cfg(feature = "real_llm")]

use vinarain::{GeminiAnalyzer, RainfallAnalyzer, VinarainConfig};

#[tokio::test]
async fn live_report_for_da_nang() {
    let mut config = VinarainConfig::default();
    config.apply_env();
    let analyzer = GeminiAnalyzer::new(config.gemini()).unwrap();
    assert!(analyzer.is_available().await, "set GEMINI_API_KEY");

    let report = analyzer.analyze("Đà Nẵng").await.unwrap();
    println!("{:#?}", report);

    assert_eq!(report.province_name, "Đà Nẵng");
    assert!(!report.summary.is_empty());
}
