//! 推薦結果の表示生成
//!
//! HTML（WebView等の表示面向け）とテキスト（端末向け）の2形式。
//! 食材名はURLエンコード、表示テキストと属性値はHTMLエスケープする。
//! リンクにするのは http(s) のURLだけ。

use crate::types::MatchResult;

/// 検出食材がない場合のメッセージ
pub const NO_INGREDIENTS_MESSAGE: &str = "No ingredients detected.";

/// 一致するレシピがない場合のメッセージ
pub const NO_RECIPES_MESSAGE: &str = "No recipes found for the detected ingredients.";

/// 既定の買い物検索URL（末尾に食材名を連結）
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.zeptonow.com/search?query=";

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderFormat {
    #[default]
    Html,
    Text,
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(RenderFormat::Html),
            "text" | "txt" => Ok(RenderFormat::Text),
            _ => Err(format!("Unknown format: {}. Use html or text", s)),
        }
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderFormat::Html => write!(f, "html"),
            RenderFormat::Text => write!(f, "text"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub format: RenderFormat,
    pub search_base_url: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: RenderFormat::default(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
        }
    }
}

/// 不足食材の買い物検索リンク
pub fn search_link(base_url: &str, ingredient: &str) -> String {
    format!("{}{}", base_url, urlencoding::encode(ingredient))
}

/// 順位付け済みの結果を1つの表示ブロックに変換
///
/// 結果が空なら `NO_RECIPES_MESSAGE` を返す。
pub fn render(results: &[MatchResult<'_>], options: &RenderOptions) -> String {
    if results.is_empty() {
        return NO_RECIPES_MESSAGE.to_string();
    }

    match options.format {
        RenderFormat::Html => results
            .iter()
            .map(|r| render_html_block(r, &options.search_base_url))
            .collect::<Vec<_>>()
            .join("<br><br>"),
        RenderFormat::Text => results
            .iter()
            .map(|r| render_text_block(r, &options.search_base_url))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn render_html_block(result: &MatchResult<'_>, base_url: &str) -> String {
    let recipe = result.recipe;
    let link = escape_html(&recipe.link);

    let mut lines = vec![
        format!("<b>{}:</b>", escape_html(&recipe.name)),
        anchor(&recipe.link, &link),
        format!("Missing Ingredients: {}", escape_html(&missing_list(result))),
    ];
    for ingredient in &result.missing {
        lines.push(anchor(
            &search_link(base_url, ingredient),
            &format!("Shop for {}", escape_html(ingredient)),
        ));
    }

    lines.join("<br>\n")
}

fn render_text_block(result: &MatchResult<'_>, base_url: &str) -> String {
    let recipe = result.recipe;

    let mut lines = vec![
        format!("{} ({}/{} ingredients)", recipe.name, result.matched_count(), recipe.ingredients.len()),
        format!("  Recipe: {}", recipe.link),
        format!("  Missing Ingredients: {}", missing_list(result)),
    ];
    for ingredient in &result.missing {
        lines.push(format!("  - {}: {}", ingredient, search_link(base_url, ingredient)));
    }

    lines.join("\n")
}

fn missing_list(result: &MatchResult<'_>) -> String {
    if result.missing.is_empty() {
        "none".to_string()
    } else {
        result.missing.join(", ")
    }
}

/// http(s) のリンクだけを `<a>` にする。それ以外は本文のみ
fn anchor(href: &str, body: &str) -> String {
    if is_web_link(href) {
        format!("<a href=\"{}\">{}</a>", escape_html(href), body)
    } else {
        body.to_string()
    }
}

/// `http://` / `https://` で始まるか（大文字小文字は区別しない）
pub fn is_web_link(link: &str) -> bool {
    let link = link.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        link.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// HTML本文・属性値用のエスケープ
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
