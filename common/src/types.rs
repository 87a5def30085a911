//! 共有される型定義
//!
//! - Recipe: カタログ内のレシピ（読み込み後は不変）
//! - Label: 画像ラベラーが返す (ラベル, 信頼度) の組
//! - MatchResult: 検出食材とレシピの照合結果（推薦ごとに再計算）

use serde::{Deserialize, Serialize};

/// カタログのレシピ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub link: String,
}

impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: &[&str], link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            link: link.into(),
        }
    }
}

/// 画像分類の1ラベル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(alias = "text", alias = "name")]
    pub label: String,

    #[serde(alias = "score", alias = "probability")]
    pub confidence: f32,
}

impl Label {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// レシピ1件の照合結果
///
/// `matched` と `missing` はどちらも `recipe.ingredients` の部分列で、
/// 合わせると元の食材リストと多重集合として一致する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,
    pub matched: Vec<&'a str>,
    pub missing: Vec<&'a str>,
}

impl MatchResult<'_> {
    /// 一致した食材数（順位付けのキー）
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }
}
