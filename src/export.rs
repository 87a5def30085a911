//! 推薦結果のファイル出力

use crate::error::Result;
use crate::recommend::Recommendation;
use chrono::Local;
use recipe_scanner_common::render::escape_html;
use recipe_scanner_common::RenderFormat;
use std::path::Path;

/// HTML文書として包む
pub fn html_document(recommendation: &Recommendation, detected: &[String], format: RenderFormat) -> String {
    let body = match format {
        RenderFormat::Html => recommendation.body.clone(),
        RenderFormat::Text => format!("<pre>{}</pre>", escape_html(&recommendation.body)),
    };
    let detected = detected
        .iter()
        .map(|d| escape_html(d))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>Recipe Recommendations</title>\n</head>\n<body>\n<p>Detected: {}</p>\n{}\n<p><small>Generated {}</small></p>\n</body>\n</html>\n",
        detected,
        body,
        Local::now().format("%Y-%m-%d %H:%M:%S"),
    )
}

/// 推薦結果を書き出す
///
/// `.html` / `.htm` は文書として、それ以外は本文をそのまま書く。
pub fn write_report(
    output: &Path,
    recommendation: &Recommendation,
    detected: &[String],
    format: RenderFormat,
) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let is_html = output
        .extension()
        .map(|e| {
            let e = e.to_string_lossy().to_lowercase();
            e == "html" || e == "htm"
        })
        .unwrap_or(false);

    let content = if is_html {
        html_document(recommendation, detected, format)
    } else {
        recommendation.body.clone()
    };
    std::fs::write(output, content)?;
    Ok(())
}
