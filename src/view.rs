//! Text rendering of the session for a terminal.
//!
//! Exactly one panel is rendered per [`SessionState`]: welcome, loading,
//! error with retry, or the report.

use crate::analysis::AnalysisResult;
use crate::province::ProvinceRecord;
use crate::session::SessionState;

pub const APP_TITLE: &str = "VinaRain AI Expert";
pub const APP_TAGLINE: &str = "Chuyên gia phân tích lượng mưa & thiên tai";
pub const RETRY_LABEL: &str = "Thử lại ngay";

const RULE_WIDTH: usize = 64;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push("─".repeat(title.chars().count()));
}

/// Application header
pub fn render_header() -> String {
    format!("{}\n{}\n{}", APP_TITLE, APP_TAGLINE, rule())
}

/// Render the panel for the current state
pub fn render_state(state: &SessionState) -> String {
    match state {
        SessionState::Idle => render_idle(),
        SessionState::Loading(province) => render_loading(province),
        SessionState::Error(message) => render_error(message),
        SessionState::Success(result) => render_success(result),
    }
}

fn render_idle() -> String {
    [
        "Tra cứu lượng mưa & Dự báo 2025",
        "",
        "Hệ thống sử dụng trí tuệ nhân tạo Gemini 2.5 Flash kết hợp với Google Search",
        "để tổng hợp dữ liệu lượng mưa thực tế trong 10 năm qua tại Việt Nam.",
        "Đặc biệt tập trung phân tích ảnh hưởng của La Nina đến xu thế thời tiết năm 2025.",
        "",
        "» Nhập tên tỉnh thành để bắt đầu",
    ]
    .join("\n")
}

fn render_loading(province: &ProvinceRecord) -> String {
    format!(
        "⟳ Đang phân tích dữ liệu...\n\nHệ thống đang tìm kiếm số liệu lượng mưa và đánh giá rủi ro La Nina cho {}.",
        province.name
    )
}

fn render_error(message: &str) -> String {
    format!("✗ Đã xảy ra lỗi\n\n{}\n\n[ {} ] (gõ :r)", message, RETRY_LABEL)
}

fn render_success(result: &AnalysisResult) -> String {
    format!(
        "▌ Báo cáo: {}\n{}",
        result.province_name,
        render_report(result)
    )
}

/// Report body; empty sections are skipped
pub fn render_report(result: &AnalysisResult) -> String {
    let mut lines = Vec::new();

    if !result.summary.is_empty() {
        heading(&mut lines, "Tóm tắt");
        lines.push(result.summary.clone());
    }

    if !result.historical_data.is_empty() {
        heading(&mut lines, "Lượng mưa 10 năm qua (mm)");
        for year in &result.historical_data {
            let mut row = format!("{:>6}  {:>9.1}", year.year, year.rainfall_mm);
            if let Some(note) = &year.note {
                row.push_str("  ");
                row.push_str(note);
            }
            lines.push(row);
        }
        if let Some(average) = result.average_rainfall_mm() {
            lines.push(format!("{:>6}  {:>9.1}", "TB", average));
        }
        if let Some(peak) = result.peak_year() {
            lines.push(format!("Năm mưa nhiều nhất: {}", peak.year));
        }
    }

    if !result.la_nina_impact.is_empty() {
        heading(&mut lines, "Ảnh hưởng của La Nina");
        lines.push(result.la_nina_impact.clone());
    }

    if !result.forecast.is_empty() {
        heading(&mut lines, "Dự báo 2025");
        lines.push(result.forecast.clone());
    }

    lines.push(String::new());
    lines.push(format!("Mức độ rủi ro: {}", result.risk_level.label()));

    if !result.recommendations.is_empty() {
        heading(&mut lines, "Khuyến nghị");
        lines.extend(result.recommendations.iter().map(|r| format!("• {}", r)));
    }

    if !result.sources.is_empty() {
        heading(&mut lines, "Nguồn tham khảo");
        lines.extend(
            result
                .sources
                .iter()
                .map(|s| format!("- {} <{}>", s.title, s.uri)),
        );
    }

    lines.join("\n")
}

/// Numbered suggestion dropdown (1-based, matching `:N` selection)
pub fn render_suggestions(suggestions: &[&ProvinceRecord]) -> String {
    suggestions
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:>3}. {:<24} {}", i + 1, p.name, p.region))
        .collect::<Vec<_>>()
        .join("\n")
}
