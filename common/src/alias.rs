//! 食材エイリアス変換
//!
//! ラベラーが返す表記ゆれ（"Eggs", "Tomatoes" など）を
//! カタログの食材名にそろえてから検出リストに追加する。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// ラベル → カタログ食材名 の対応表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientAliases {
    entries: HashMap<String, String>,
}

impl IngredientAliases {
    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列 `{"Eggs": "egg", ...}` から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let aliases: Self = serde_json::from_str(json)?;
        Ok(aliases)
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.entries.insert(from.into(), to.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ラベルを正規化
    ///
    /// 完全一致を優先し、なければ前後空白を除いた大文字小文字無視で探す。
    /// 対応がなければ前後空白を除いたラベルをそのまま返す。
    pub fn resolve(&self, label: &str) -> String {
        let trimmed = label.trim();
        if let Some(target) = self.entries.get(trimmed) {
            return target.clone();
        }

        let lowered = trimmed.to_lowercase();
        self.entries
            .iter()
            .find(|(from, _)| from.trim().to_lowercase() == lowered)
            .map(|(_, to)| to.clone())
            .unwrap_or_else(|| trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact() {
        let aliases = IngredientAliases::from_json(r#"{"Eggs": "egg", "Tomatoes": "tomato"}"#).unwrap();
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.resolve("Eggs"), "egg");
        assert_eq!(aliases.resolve("Tomatoes"), "tomato");
    }

    #[test]
    fn test_resolve_case_insensitive_fallback() {
        let mut aliases = IngredientAliases::default();
        aliases.insert("Eggs", "egg");
        assert_eq!(aliases.resolve(" eggs "), "egg");
    }

    #[test]
    fn test_resolve_passthrough() {
        let aliases = IngredientAliases::default();
        assert!(aliases.is_empty());
        assert_eq!(aliases.resolve(" Paneer "), "Paneer");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(IngredientAliases::from_json(r#"["egg"]"#).is_err());
    }
}
