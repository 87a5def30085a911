//! Recipe Scanner Common Library
//!
//! CLIと対話セッションで共有される型とロジック:
//! レシピカタログ、食材照合・順位付け、推薦表示の生成

pub mod types;
pub mod error;
pub mod catalog;
pub mod matcher;
pub mod render;
pub mod parser;
pub mod alias;

pub use types::{Label, MatchResult, Recipe};
pub use error::{Error, Result};
pub use catalog::parse_catalog;
pub use matcher::{match_recipes, rank, recommend_ranked};
pub use render::{render, search_link, RenderFormat, RenderOptions};
pub use parser::{extract_json, parse_labels};
pub use alias::IngredientAliases;
