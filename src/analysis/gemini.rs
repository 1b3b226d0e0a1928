//! Gemini analyzer: rainfall reports from the Google Generative Language API
//!
//! Sends one `generateContent` request per province, optionally grounded with
//! the `google_search` tool. Search grounding rules out JSON response mode, so
//! the model is asked for JSON in the prompt and the text part is unwrapped
//! from any markdown fence before parsing.

use super::traits::RainfallAnalyzer;
use super::types::{AnalysisError, AnalysisResult, SourceLink, SCHEMA_VERSION};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Longest error body kept in `AnalysisError::Status`
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Configuration for the Gemini analyzer
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-2.5-flash`
    pub model: String,
    /// API base URL without trailing `/models`
    pub endpoint: String,
    /// Attach the `google_search` tool to each request
    pub search_grounding: bool,
    /// Overall HTTP timeout; `None` waits for the service
    pub request_timeout: Option<Duration>,
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            search_grounding: true,
            request_timeout: None,
            temperature: 0.4,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Prompt and parsing
// ---------------------------------------------------------------------------

/// Build the analysis prompt for a province
pub(crate) fn build_prompt(province_name: &str) -> String {
    format!(
        r#"Bạn là chuyên gia khí tượng thủy văn Việt Nam. Hãy tìm kiếm và tổng hợp số liệu lượng mưa thực tế trong 10 năm gần nhất tại tỉnh/thành phố "{province}", đánh giá ảnh hưởng của hiện tượng La Nina và dự báo xu thế mưa, rủi ro thiên tai (lũ, sạt lở, ngập úng) cho năm 2025.

Chỉ trả về MỘT đối tượng JSON hợp lệ, không kèm giải thích, theo cấu trúc:
{{
  "schemaVersion": {version},
  "provinceName": "{province}",
  "summary": "tóm tắt ngắn gọn",
  "historicalData": [{{ "year": 2015, "rainfallMm": 1800.5, "note": "ghi chú tùy chọn" }}],
  "laNinaImpact": "phân tích ảnh hưởng của La Nina",
  "forecast": "dự báo xu thế năm 2025",
  "riskLevel": "low | medium | high | extreme",
  "recommendations": ["khuyến nghị cho người dân và chính quyền"]
}}"#,
        province = province_name,
        version = SCHEMA_VERSION,
    )
}

/// Extract the JSON object from model text.
///
/// Accepts a fenced block (```json ... ``` or ``` ... ```) or bare text, and
/// narrows to the outermost `{ ... }`.
pub(crate) fn extract_json(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(start) = body.find("```") {
        let after_fence = &body[start + 3..];
        // Skip the info string ("json") up to the end of the fence line
        let content_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let content = &after_fence[content_start..];
        body = match content.find("```") {
            Some(end) => &content[..end],
            None => content,
        };
    }

    match (body.find('{'), body.rfind('}')) {
        (Some(open), Some(close)) if open < close => &body[open..=close],
        _ => body.trim(),
    }
}

/// Turn a raw `generateContent` response body into a report for `province_name`
pub fn parse_response(raw: &str, province_name: &str) -> Result<AnalysisResult, AnalysisError> {
    let response: GenerateContentResponse = serde_json::from_str(raw)?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => AnalysisError::Blocked(reason),
            None => AnalysisError::EmptyResponse,
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_default();
        let blocked = matches!(reason.as_str(), "SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT");
        return Err(if blocked {
            AnalysisError::Blocked(reason)
        } else {
            AnalysisError::EmptyResponse
        });
    }

    let mut report: AnalysisResult = serde_json::from_str(extract_json(&text))?;

    if report.schema_version > SCHEMA_VERSION {
        return Err(AnalysisError::UnsupportedSchema(report.schema_version));
    }

    if report.province_name != province_name {
        debug!(
            requested = province_name,
            returned = %report.province_name,
            "normalizing province name in report"
        );
        report.province_name = province_name.to_string();
    }

    let chunks = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default();
    for web in chunks.into_iter().filter_map(|c| c.web) {
        let Some(uri) = web.uri else { continue };
        if report.sources.iter().any(|s| s.uri == uri) {
            continue;
        }
        report.sources.push(SourceLink {
            title: web.title.unwrap_or_else(|| uri.clone()),
            uri,
        });
    }

    report.generated_at = Some(Utc::now());
    Ok(report)
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

// ---------------------------------------------------------------------------
// GeminiAnalyzer
// ---------------------------------------------------------------------------

/// HTTP client for the Gemini `generateContent` endpoint
pub struct GeminiAnalyzer {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiAnalyzer {
    pub fn new(config: GeminiConfig) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_for(&self, province_name: &str) -> GenerateContentRequest {
        let tools = if self.config.search_grounding {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: build_prompt(province_name),
                }],
            }],
            tools,
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        }
    }
}

#[async_trait]
impl RainfallAnalyzer for GeminiAnalyzer {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn is_available(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    async fn analyze(&self, province_name: &str) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AnalysisError::MissingApiKey)?;

        debug!(
            province = province_name,
            model = %self.config.model,
            grounding = self.config.search_grounding,
            "requesting rainfall analysis"
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&self.request_for(province_name))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "analysis service rejected request");
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        debug!(bytes = body.len(), "analysis response received");
        parse_response(&body, province_name)
    }
}
