//! レシピカタログの読み込み
//!
//! 不正なレコードが1件でもあればカタログ全体を失敗扱いにする。
//! 一部だけ読み込んだカタログは推薦結果を再現できないため。

use crate::error::{Error, Result};
use crate::types::Recipe;

/// JSON配列 `[{name, ingredients, link}, ...]` からカタログを構築
pub fn parse_catalog(json: &str) -> Result<Vec<Recipe>> {
    let recipes: Vec<Recipe> = serde_json::from_str(json)?;
    validate(&recipes)?;
    Ok(recipes)
}

fn validate(recipes: &[Recipe]) -> Result<()> {
    for (index, recipe) in recipes.iter().enumerate() {
        if recipe.name.trim().is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "recipe #{} has an empty name",
                index + 1
            )));
        }
    }
    Ok(())
}
