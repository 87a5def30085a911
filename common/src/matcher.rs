//! 食材照合と順位付け
//!
//! - match_recipes: 各レシピの食材を検出済み/不足に分割し、一致ゼロのレシピを除外
//! - rank: 一致数の降順に安定ソート（同数ならカタログ順を維持）

use crate::types::{MatchResult, Recipe};
use std::collections::HashSet;

/// 検出食材とカタログを照合
///
/// 比較は大文字小文字を区別する完全一致。
/// 検出食材やカタログが空なら空の結果を返す。
pub fn match_recipes<'a, S: AsRef<str>>(detected: &[S], catalog: &'a [Recipe]) -> Vec<MatchResult<'a>> {
    let detected: HashSet<&str> = detected.iter().map(|s| s.as_ref()).collect();
    if detected.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .map(|recipe| {
            let (matched, missing): (Vec<&str>, Vec<&str>) = recipe
                .ingredients
                .iter()
                .map(String::as_str)
                .partition(|ingredient| detected.contains(ingredient));
            MatchResult {
                recipe,
                matched,
                missing,
            }
        })
        .filter(|result| !result.matched.is_empty())
        .collect()
}

/// 一致数の降順に並べ替え
///
/// `sort_by` は安定ソートなので、同じ一致数のレシピは入力順のまま残る。
pub fn rank(mut results: Vec<MatchResult<'_>>) -> Vec<MatchResult<'_>> {
    results.sort_by(|a, b| b.matched_count().cmp(&a.matched_count()));
    results
}

/// 照合してから順位付け
pub fn recommend_ranked<'a, S: AsRef<str>>(detected: &[S], catalog: &'a [Recipe]) -> Vec<MatchResult<'a>> {
    rank(match_recipes(detected, catalog))
}
