//! スキャンセッション
//!
//! 1回の利用セッションで検出された食材を撮影順に蓄積する。
//! 分類は非同期に完了するため、開始時に受け取ったチケットで
//! 完了時点のセッションがまだ有効かを確認してから結果を反映する。

use crate::classifier::{select_top_label, ImageLabeler};
use crate::error::{Result, ScannerError};
use crate::scanner::{load_image, CapturedImage, ImageInfo};
use indicatif::ProgressBar;
use recipe_scanner_common::{IngredientAliases, Label};
use std::time::Duration;
use tracing::{debug, info, warn};

/// 検出済み食材（撮影順、重複除去なし）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedIngredients {
    items: Vec<String>,
}

impl DetectedIngredients {
    pub fn push(&mut self, ingredient: impl Into<String>) {
        self.items.push(ingredient.into());
    }

    pub fn reset(&mut self) {
        self.items.clear();
    }

    /// 推薦処理に渡すコピー
    pub fn snapshot(&self) -> Vec<String> {
        self.items.clone()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 分類開始時に発行されるチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket {
    generation: u64,
}

/// 1回のスキャンの結果
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// 食材を検出して追加した
    Detected(String),
    /// 採用できるラベルがなかった
    NoLabels,
    /// 分類に失敗した（検出リストは変更なし）
    Failed(String),
    /// リセットまたは終了後に完了したため破棄した
    Discarded,
}

impl ScanOutcome {
    /// 利用者向けメッセージ
    pub fn message(&self) -> String {
        match self {
            ScanOutcome::Detected(name) => format!("Detected: {}", name),
            ScanOutcome::NoLabels => "No ingredient detected.".to_string(),
            ScanOutcome::Failed(reason) => format!("Error: {}", reason),
            ScanOutcome::Discarded => "Scan result discarded.".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ScanSession {
    detected: DetectedIngredients,
    generation: u64,
    alive: bool,
    confidence_threshold: f32,
    aliases: IngredientAliases,
}

impl ScanSession {
    pub fn new(confidence_threshold: f32) -> Self {
        Self {
            detected: DetectedIngredients::default(),
            generation: 0,
            alive: true,
            confidence_threshold,
            aliases: IngredientAliases::default(),
        }
    }

    pub fn with_aliases(mut self, aliases: IngredientAliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn detected(&self) -> &DetectedIngredients {
        &self.detected
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn begin_scan(&self) -> ScanTicket {
        ScanTicket {
            generation: self.generation,
        }
    }

    /// 分類結果を反映
    ///
    /// チケット発行後にリセットや終了があった場合は何も変更しない。
    pub fn complete_scan(&mut self, ticket: ScanTicket, result: Result<Vec<Label>>) -> ScanOutcome {
        if !self.alive || ticket.generation != self.generation {
            debug!(ticket = ticket.generation, current = self.generation, "discarding stale scan result");
            return ScanOutcome::Discarded;
        }

        match result {
            Ok(labels) => match select_top_label(&labels, self.confidence_threshold) {
                Some(top) => {
                    let ingredient = self.aliases.resolve(&top.label);
                    info!(label = %top.label, confidence = top.confidence, ingredient = %ingredient, "ingredient detected");
                    self.detected.push(ingredient.clone());
                    ScanOutcome::Detected(ingredient)
                }
                None => ScanOutcome::NoLabels,
            },
            Err(e) => {
                warn!(error = %e, "classification failed");
                ScanOutcome::Failed(e.to_string())
            }
        }
    }

    /// 1枚分のスキャン（分類 + 反映）
    pub async fn scan(
        &mut self,
        labeler: &dyn ImageLabeler,
        image: &CapturedImage,
        timeout: Duration,
    ) -> ScanOutcome {
        let ticket = self.begin_scan();
        let result = match tokio::time::timeout(timeout, labeler.classify(image)).await {
            Ok(result) => result,
            Err(_) => Err(ScannerError::Timeout(timeout)),
        };
        self.complete_scan(ticket, result)
    }

    /// 写真ファイルを順に読み込んでスキャン
    ///
    /// 読み込みに失敗した写真は `Failed` として記録し、残りを続ける。
    pub async fn scan_files(
        &mut self,
        labeler: &dyn ImageLabeler,
        images: &[ImageInfo],
        max_image_size: u32,
        timeout: Duration,
        progress: &ProgressBar,
    ) -> Vec<(String, ScanOutcome)> {
        let mut outcomes = Vec::with_capacity(images.len());

        for info in images {
            progress.set_message(info.file_name.clone());
            let outcome = match load_image(&info.path, max_image_size) {
                Ok(image) => self.scan(labeler, &image, timeout).await,
                Err(e) => {
                    warn!(file = %info.file_name, error = %e, "image load failed");
                    ScanOutcome::Failed(e.to_string())
                }
            };
            outcomes.push((info.file_name.clone(), outcome));
            progress.inc(1);
        }

        outcomes
    }

    /// 検出リストを空にし、実行中の分類結果を無効化
    pub fn reset(&mut self) {
        self.detected.reset();
        self.generation += 1;
    }

    /// セッション終了。以降の完了結果はすべて破棄される
    pub fn close(&mut self) {
        self.alive = false;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_scan_appends_top_label() {
        let mut session = ScanSession::new(0.5);
        let ticket = session.begin_scan();
        let outcome = session.complete_scan(
            ticket,
            Ok(vec![Label::new("milk", 0.6), Label::new("egg", 0.9)]),
        );

        assert_eq!(outcome, ScanOutcome::Detected("egg".into()));
        assert_eq!(session.detected().as_slice(), ["egg".to_string()]);
    }

    #[test]
    fn test_detected_keeps_order_and_duplicates() {
        let mut session = ScanSession::new(0.0);
        for name in ["egg", "milk", "egg"] {
            let ticket = session.begin_scan();
            session.complete_scan(ticket, Ok(vec![Label::new(name, 0.9)]));
        }
        assert_eq!(session.detected().snapshot(), vec!["egg", "milk", "egg"]);
    }

    #[test]
    fn test_no_labels_is_noop() {
        let mut session = ScanSession::new(0.5);
        let ticket = session.begin_scan();
        assert_eq!(session.complete_scan(ticket, Ok(vec![])), ScanOutcome::NoLabels);

        let ticket = session.begin_scan();
        let outcome = session.complete_scan(ticket, Ok(vec![Label::new("egg", 0.2)]));
        assert_eq!(outcome, ScanOutcome::NoLabels);
        assert!(session.detected().is_empty());
    }

    #[test]
    fn test_failure_leaves_state_unchanged() {
        let mut session = ScanSession::new(0.5);
        let ticket = session.begin_scan();
        session.complete_scan(ticket, Ok(vec![Label::new("egg", 0.9)]));

        let ticket = session.begin_scan();
        let outcome = session.complete_scan(
            ticket,
            Err(ScannerError::Classification("model unavailable".into())),
        );

        assert!(matches!(outcome, ScanOutcome::Failed(ref msg) if msg.contains("model unavailable")));
        assert_eq!(session.detected().snapshot(), vec!["egg"]);
        assert!(session.is_alive());
    }

    #[test]
    fn test_result_after_reset_is_discarded() {
        let mut session = ScanSession::new(0.5);
        let ticket = session.begin_scan();
        session.reset();

        let outcome = session.complete_scan(ticket, Ok(vec![Label::new("egg", 0.9)]));
        assert_eq!(outcome, ScanOutcome::Discarded);
        assert!(session.detected().is_empty());

        // 新しいチケットは有効
        let ticket = session.begin_scan();
        let outcome = session.complete_scan(ticket, Ok(vec![Label::new("egg", 0.9)]));
        assert_eq!(outcome, ScanOutcome::Detected("egg".into()));
    }

    #[test]
    fn test_result_after_close_is_discarded() {
        let mut session = ScanSession::new(0.5);
        let ticket = session.begin_scan();
        session.close();

        let outcome = session.complete_scan(ticket, Ok(vec![Label::new("egg", 0.9)]));
        assert_eq!(outcome, ScanOutcome::Discarded);
        assert!(!session.is_alive());

        let ticket = session.begin_scan();
        assert_eq!(session.complete_scan(ticket, Ok(vec![Label::new("egg", 0.9)])), ScanOutcome::Discarded);
    }

    #[test]
    fn test_reset_clears() {
        let mut session = ScanSession::new(0.0);
        let ticket = session.begin_scan();
        session.complete_scan(ticket, Ok(vec![Label::new("egg", 0.9)]));
        session.reset();
        assert!(session.detected().is_empty());
    }

    #[test]
    fn test_aliases_are_applied() {
        let mut aliases = IngredientAliases::default();
        aliases.insert("Eggs", "egg");
        let mut session = ScanSession::new(0.5).with_aliases(aliases);

        let ticket = session.begin_scan();
        let outcome = session.complete_scan(ticket, Ok(vec![Label::new("Eggs", 0.9)]));
        assert_eq!(outcome, ScanOutcome::Detected("egg".into()));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut session = ScanSession::new(0.0);
        let ticket = session.begin_scan();
        session.complete_scan(ticket, Ok(vec![Label::new("egg", 0.9)]));

        let snapshot = session.detected().snapshot();
        session.reset();
        assert_eq!(snapshot, vec!["egg"]);
    }
}
