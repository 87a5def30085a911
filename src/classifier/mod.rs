//! 画像分類アダプタ
//!
//! 推論そのものは外部の学習済みモデルに任せ、ここでは
//! 呼び出しの抽象化と、最も信頼度の高いラベルの選択だけを行う。

pub mod cache;
mod command;
mod sidecar;

pub use cache::{CachedLabeler, LabelCache};
pub use command::CommandLabeler;
pub use sidecar::SidecarLabeler;

use crate::config::Config;
use crate::error::{Result, ScannerError};
use crate::scanner::CapturedImage;
use async_trait::async_trait;
use clap::ValueEnum;
use recipe_scanner_common::Label;

/// 画像 → (ラベル, 信頼度) 列
///
/// 返される順序は信頼度順とは限らない。
#[async_trait]
pub trait ImageLabeler: Send + Sync {
    /// キャッシュキーやログに使う識別名
    fn name(&self) -> &str;

    async fn classify(&self, image: &CapturedImage) -> Result<Vec<Label>>;

    /// 保持している状態をディスクへ書き出す（キャッシュ付きのみ）
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// ラベラーの種類
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum LabelerKind {
    /// 設定された推論コマンドを実行
    #[default]
    Command,
    /// 画像の隣の `<画像名>.labels.json` を読む
    Sidecar,
}

impl LabelerKind {
    pub fn build(&self, config: &Config) -> Result<Box<dyn ImageLabeler>> {
        match self {
            LabelerKind::Command => {
                let command_line = config.get_labeler_command()?;
                Ok(Box::new(CommandLabeler::from_command_line(&command_line)?))
            }
            LabelerKind::Sidecar => Ok(Box::new(SidecarLabeler)),
        }
    }
}

/// 初期化に失敗したラベラーの代役
///
/// 対話モードはラベラーなしでも起動し、撮影のたびに理由を返す。
pub struct UnavailableLabeler {
    reason: String,
}

impl UnavailableLabeler {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl ImageLabeler for UnavailableLabeler {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn classify(&self, _image: &CapturedImage) -> Result<Vec<Label>> {
        Err(ScannerError::Classification(self.reason.clone()))
    }
}

/// 閾値以上で最も信頼度の高いラベルを選ぶ
///
/// 先頭要素ではなく最大値を探す。同じ信頼度なら先に現れた方を採用。
/// 空白だけのラベルとNaNの信頼度は無視する。
pub fn select_top_label(labels: &[Label], threshold: f32) -> Option<&Label> {
    labels
        .iter()
        .filter(|l| !l.label.trim().is_empty())
        .filter(|l| !l.confidence.is_nan() && l.confidence >= threshold)
        .fold(None, |best: Option<&Label>, label| match best {
            Some(b) if b.confidence >= label.confidence => Some(b),
            _ => Some(label),
        })
}
