//! 対話モード
//!
//! 撮影 → 検出 → (繰り返し) → 推薦 の流れを端末上で行う。
//! 失敗はメッセージ表示のみで、セッションは使い続けられる。

use crate::classifier::ImageLabeler;
use crate::error::Result;
use crate::recommend::{recommend, CatalogSource};
use crate::scanner::load_image;
use crate::session::{ScanOutcome, ScanSession};
use dialoguer::{Input, Select};
use recipe_scanner_common::RenderOptions;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// 対話アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// 写真を読み込んで分類
    Capture,
    /// 検出済み食材を表示
    ShowDetected,
    /// 検出済み食材をクリア
    Reset,
    /// レシピを推薦
    Recommend,
    /// 終了
    Quit,
}

impl SessionAction {
    pub const ALL: [SessionAction; 5] = [
        SessionAction::Capture,
        SessionAction::ShowDetected,
        SessionAction::Reset,
        SessionAction::Recommend,
        SessionAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::Capture => "撮影（写真を読み込む）",
            SessionAction::ShowDetected => "検出済み食材を表示",
            SessionAction::Reset => "リセット",
            SessionAction::Recommend => "レシピを推薦",
            SessionAction::Quit => "終了",
        }
    }
}

pub struct InteractiveOptions {
    pub catalog: CatalogSource,
    pub render: RenderOptions,
    pub max_image_size: u32,
    pub timeout: Duration,
}

/// 検出済み食材の表示用文字列
pub fn format_detected(detected: &[String]) -> String {
    if detected.is_empty() {
        "(なし)".to_string()
    } else {
        detected
            .iter()
            .enumerate()
            .map(|(i, d)| format!("{}. {}", i + 1, d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn prompt_action() -> Result<SessionAction> {
    let labels: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();
    let index = Select::new()
        .with_prompt("操作を選択")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(SessionAction::ALL[index])
}

fn prompt_photo_path() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("写真のパス")
        .interact_text()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(PathBuf::from(input.trim()))
}

/// 入力が読めない（EOF・Ctrl-D など）場合は終了として扱う
fn action_or_quit(action: Result<SessionAction>) -> SessionAction {
    action.unwrap_or_else(|e| {
        warn!(error = %e, "input closed, quitting");
        SessionAction::Quit
    })
}

fn finish(session: &mut ScanSession) {
    session.close();
    println!("終了します");
}

pub async fn run_interactive(
    labeler: &dyn ImageLabeler,
    session: &mut ScanSession,
    options: &InteractiveOptions,
) -> Result<()> {
    println!("🥕 recipe-scanner - 対話モード");
    println!("---");

    loop {
        match action_or_quit(prompt_action()) {
            SessionAction::Capture => {
                let path = match prompt_photo_path() {
                    Ok(path) => path,
                    Err(e) => {
                        warn!(error = %e, "input closed, quitting");
                        finish(session);
                        return Ok(());
                    }
                };
                let outcome = match load_image(&path, options.max_image_size) {
                    Ok(image) => session.scan(labeler, &image, options.timeout).await,
                    Err(e) => ScanOutcome::Failed(e.to_string()),
                };
                println!("  → {}\n", outcome.message());
            }
            SessionAction::ShowDetected => {
                println!("{}\n", format_detected(session.detected().as_slice()));
            }
            SessionAction::Reset => {
                session.reset();
                println!("  → 検出済み食材をクリアしました\n");
            }
            SessionAction::Recommend => {
                let snapshot = session.detected().snapshot();
                let recommendation = recommend(&snapshot, &options.catalog, &options.render);
                println!("{}\n", recommendation.body);
            }
            SessionAction::Quit => {
                finish(session);
                return Ok(());
            }
        }
    }
}
