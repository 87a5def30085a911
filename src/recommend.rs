//! レシピ推薦
//!
//! 検出食材のスナップショットとカタログから推薦表示を組み立てる。
//! どの失敗も利用者向けメッセージに変換し、呼び出し側には返さない。

use crate::error::{Result, ScannerError};
use recipe_scanner_common::render::{NO_INGREDIENTS_MESSAGE, NO_RECIPES_MESSAGE};
use recipe_scanner_common::{parse_catalog, recommend_ranked, render, Recipe, RenderOptions};
use std::path::PathBuf;
use tracing::{info, warn};

/// 同梱のレシピカタログ
pub const BUNDLED_CATALOG: &str = include_str!("../data/dataset.json");

/// カタログの読み込み元
#[derive(Debug, Clone, Default)]
pub enum CatalogSource {
    #[default]
    Bundled,
    File(PathBuf),
}

impl CatalogSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(CatalogSource::File).unwrap_or_default()
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Bundled => "同梱カタログ".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}

/// カタログを読み込む。失敗はすべて `CatalogUnavailable`
pub fn load_catalog(source: &CatalogSource) -> Result<Vec<Recipe>> {
    let parsed = match source {
        CatalogSource::Bundled => parse_catalog(BUNDLED_CATALOG),
        CatalogSource::File(path) => std::fs::read_to_string(path)
            .map_err(recipe_scanner_common::Error::from)
            .and_then(|json| parse_catalog(&json)),
    };

    let catalog = parsed
        .map_err(|e| ScannerError::CatalogUnavailable(format!("{}: {}", source.describe(), e)))?;
    info!(source = %source.describe(), recipes = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// 推薦結果の種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationKind {
    NoIngredients,
    CatalogUnavailable,
    NoRecipes,
    Recipes(usize),
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    /// 表示面にそのまま渡すブロック
    pub body: String,
}

/// 推薦を計算して表示用ブロックを生成
pub fn recommend(detected: &[String], source: &CatalogSource, options: &RenderOptions) -> Recommendation {
    if detected.is_empty() {
        return Recommendation {
            kind: RecommendationKind::NoIngredients,
            body: NO_INGREDIENTS_MESSAGE.to_string(),
        };
    }

    let catalog = match load_catalog(source) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "catalog unavailable");
            return Recommendation {
                kind: RecommendationKind::CatalogUnavailable,
                body: format!("No recommendations available: {}", e),
            };
        }
    };

    let ranked = recommend_ranked(detected, &catalog);
    if ranked.is_empty() {
        return Recommendation {
            kind: RecommendationKind::NoRecipes,
            body: NO_RECIPES_MESSAGE.to_string(),
        };
    }

    Recommendation {
        kind: RecommendationKind::Recipes(ranked.len()),
        body: render(&ranked, options),
    }
}
