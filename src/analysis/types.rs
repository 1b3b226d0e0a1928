//! Report schema and error types for the analysis service boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Highest report schema version this crate understands
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn schema_version_or_current<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(SCHEMA_VERSION))
}

/// Models write `null` for fields they could not fill; treat it as absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Cited sources, without entries that carry no link
fn linked_sources<'de, D>(deserializer: D) -> Result<Vec<SourceLink>, D::Error>
where
    D: Deserializer<'de>,
{
    let sources: Vec<SourceLink> = null_as_default(deserializer)?;
    Ok(sources
        .into_iter()
        .filter(|s| !s.uri.trim().is_empty())
        .collect())
}

/// Rainfall report for one province.
///
/// Only `province_name` is load-bearing for the session; everything else is
/// carried through to the presentation layer. Unknown top-level keys land in
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(
        default = "default_schema_version",
        deserialize_with = "schema_version_or_current"
    )]
    pub schema_version: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub province_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,

    /// Yearly totals, oldest first as returned by the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub historical_data: Vec<YearlyRainfall>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub la_nina_impact: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub forecast: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_level: RiskLevel,

    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,

    #[serde(default, deserialize_with = "linked_sources")]
    pub sources: Vec<SourceLink>,

    /// Set locally when the report is received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AnalysisResult {
    /// An empty report for a province
    pub fn new(province_name: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            province_name: province_name.into(),
            summary: String::new(),
            historical_data: Vec::new(),
            la_nina_impact: String::new(),
            forecast: String::new(),
            risk_level: RiskLevel::Unknown,
            recommendations: Vec::new(),
            sources: Vec::new(),
            generated_at: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    pub fn with_year(mut self, year: i32, rainfall_mm: f64) -> Self {
        self.historical_data.push(YearlyRainfall {
            year,
            rainfall_mm,
            note: None,
        });
        self
    }

    /// Mean of the yearly totals, if any
    pub fn average_rainfall_mm(&self) -> Option<f64> {
        if self.historical_data.is_empty() {
            return None;
        }
        let total: f64 = self.historical_data.iter().map(|y| y.rainfall_mm).sum();
        Some(total / self.historical_data.len() as f64)
    }

    /// Wettest recorded year
    pub fn peak_year(&self) -> Option<&YearlyRainfall> {
        self.historical_data
            .iter()
            .max_by(|a, b| a.rainfall_mm.total_cmp(&b.rainfall_mm))
    }
}

/// Total rainfall for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRainfall {
    pub year: i32,
    pub rainfall_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Overall disaster risk band reported by the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Extreme => "extreme",
            RiskLevel::Unknown => "unknown",
        }
    }

    /// Vietnamese display label
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Thấp",
            RiskLevel::Medium => "Trung bình",
            RiskLevel::High => "Cao",
            RiskLevel::Extreme => "Rất cao",
            RiskLevel::Unknown => "Chưa xác định",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A web page the service cited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
}

/// Errors from the analysis service.
///
/// Callers above the session boundary never see the variant; it is kept for
/// diagnostics only.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis service not available: {0}")]
    Unavailable(String),

    #[error("no API key configured")]
    MissingApiKey,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned no content")]
    EmptyResponse,

    #[error("request blocked: {0}")]
    Blocked(String),

    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported report schema version {0}")]
    UnsupportedSchema(u32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_report_fills_defaults() {
        let report: AnalysisResult =
            serde_json::from_value(json!({ "provinceName": "Huế" })).unwrap();

        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.province_name, "Huế");
        assert_eq!(report.risk_level, RiskLevel::Unknown);
        assert!(report.historical_data.is_empty());
        assert!(report.extra.is_empty());
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let report: AnalysisResult = serde_json::from_value(json!({
            "provinceName": "Cà Mau",
            "floodZones": ["U Minh", "Năm Căn"],
            "riskLevel": "high"
        }))
        .unwrap();

        assert_eq!(report.risk_level, RiskLevel::High);
        assert_eq!(report.extra["floodZones"], json!(["U Minh", "Năm Căn"]));

        let back = serde_json::to_value(&report).unwrap();
        assert_eq!(back["floodZones"], json!(["U Minh", "Năm Căn"]));
        assert_eq!(back["provinceName"], json!("Cà Mau"));
    }

    #[test]
    fn unrecognized_risk_level_maps_to_unknown() {
        let report: AnalysisResult = serde_json::from_value(json!({
            "provinceName": "Lào Cai",
            "riskLevel": "catastrophic"
        }))
        .unwrap();
        assert_eq!(report.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn null_text_fields_read_as_empty() {
        let report: AnalysisResult = serde_json::from_value(json!({
            "provinceName": "Huế",
            "summary": null,
            "laNinaImpact": null,
            "forecast": "Mưa lớn cuối tháng 10"
        }))
        .unwrap();

        assert_eq!(report.province_name, "Huế");
        assert!(report.summary.is_empty());
        assert!(report.la_nina_impact.is_empty());
        assert_eq!(report.forecast, "Mưa lớn cuối tháng 10");
    }

    #[test]
    fn null_lists_read_as_empty() {
        let report: AnalysisResult = serde_json::from_value(json!({
            "provinceName": "Quảng Nam",
            "historicalData": null,
            "recommendations": null,
            "sources": null
        }))
        .unwrap();

        assert!(report.historical_data.is_empty());
        assert!(report.recommendations.is_empty());
        assert!(report.sources.is_empty());
    }

    #[test]
    fn null_risk_level_and_schema_version_use_defaults() {
        let report: AnalysisResult = serde_json::from_value(json!({
            "schemaVersion": null,
            "provinceName": "Hà Tĩnh",
            "riskLevel": null
        }))
        .unwrap();

        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn sources_without_link_are_dropped() {
        let report: AnalysisResult = serde_json::from_value(json!({
            "provinceName": "Đà Nẵng",
            "sources": [
                { "title": "Trung tâm Dự báo KTTV" },
                { "title": null, "uri": "https://nchmf.gov.vn" },
                { "title": "blank", "uri": "  " }
            ]
        }))
        .unwrap();

        assert_eq!(report.sources.len(), 1);
        assert_eq!(report.sources[0].uri, "https://nchmf.gov.vn");
        assert!(report.sources[0].title.is_empty());
    }

    #[test]
    fn historical_statistics() {
        let report = AnalysisResult::new("Quảng Bình")
            .with_year(2020, 3100.0)
            .with_year(2021, 2400.0)
            .with_year(2022, 2000.0);

        assert_eq!(report.average_rainfall_mm(), Some(2500.0));
        assert_eq!(report.peak_year().unwrap().year, 2020);
        assert_eq!(AnalysisResult::new("x").average_rainfall_mm(), None);
    }
}
