//! ラベラー応答パーサー
//!
//! 外部推論コマンドの標準出力からJSONを抽出し、ラベル配列をパースする

use crate::error::{Error, Result};
use crate::types::Label;

/// 応答からJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
/// 3. エラー
///
/// # Examples
/// ```
/// use recipe_scanner_common::extract_json;
///
/// let response = "labels: [{\"label\": \"egg\", \"confidence\": 0.9}]";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('['));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON array found in labeler output".into()))
}

/// ラベル配列をパース
///
/// 空配列は正常（ラベルなし）として扱う。
pub fn parse_labels(response: &str) -> Result<Vec<Label>> {
    let json_str = extract_json(response)?;
    let labels: Vec<Label> = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("label JSON: {}", e)))?;
    Ok(labels)
}
