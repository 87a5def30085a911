//! 外部推論コマンド連携
//!
//! 縮小済み画像をPNGで一時ディレクトリに書き出し、そのパスを最後の引数として
//! コマンドを実行する。標準出力の `[{"label": ..., "confidence": ...}]` をパースする。
//! 分類が途中で破棄された場合も、子プロセスと一時PNGは片付けられる。

use super::ImageLabeler;
use crate::error::{Result, ScannerError};
use crate::scanner::CapturedImage;
use async_trait::async_trait;
use recipe_scanner_common::{parse_labels, Label};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

pub struct CommandLabeler {
    program: String,
    args: Vec<String>,
    temp_dir: PathBuf,
}

impl CommandLabeler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            temp_dir: std::env::temp_dir().join("recipe-scanner-images"),
        }
    }

    /// 空白区切りのコマンドラインから構築（引用符は解釈しない）
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ScannerError::Config("ラベラーコマンドが空です".into()))?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    async fn run(&self, image_path: &std::path::Path) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(image_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ScannerError::Classification(format!("{} の実行に失敗: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScannerError::Classification(format!(
                "{} failed (code {:?}): {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl ImageLabeler for CommandLabeler {
    fn name(&self) -> &str {
        &self.program
    }

    async fn classify(&self, image: &CapturedImage) -> Result<Vec<Label>> {
        std::fs::create_dir_all(&self.temp_dir)?;
        // futureと一緒にdropされ、タイムアウト時も削除される
        let input = tempfile::Builder::new()
            .prefix("scan-")
            .suffix(".png")
            .tempfile_in(&self.temp_dir)?;
        image.write_png(input.path())?;

        debug!(program = %self.program, input = %input.path().display(), "running labeler");
        let response = self.run(input.path()).await?;
        drop(input);

        let preview: String = response.chars().take(200).collect();
        debug!(response = %preview, "labeler output");

        parse_labels(&response).map_err(|e| ScannerError::LabelParse(e.to_string()))
    }
}
