//! 事前計算済みラベルファイルの読み込み
//!
//! `photo.jpg` に対して `photo.jpg.labels.json` を読む。
//! 端末外で推論した結果の再生やテスト用。

use super::ImageLabeler;
use crate::error::{Result, ScannerError};
use crate::scanner::CapturedImage;
use async_trait::async_trait;
use recipe_scanner_common::{parse_labels, Label};
use std::path::{Path, PathBuf};

pub struct SidecarLabeler;

impl SidecarLabeler {
    pub fn sidecar_path(image_path: &Path) -> PathBuf {
        let mut name = image_path.as_os_str().to_os_string();
        name.push(".labels.json");
        PathBuf::from(name)
    }
}

#[async_trait]
impl ImageLabeler for SidecarLabeler {
    fn name(&self) -> &str {
        "sidecar"
    }

    async fn classify(&self, image: &CapturedImage) -> Result<Vec<Label>> {
        let path = Self::sidecar_path(&image.path);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ScannerError::Classification(format!("{}: {}", path.display(), e)))?;
        parse_labels(&content).map_err(|e| ScannerError::LabelParse(e.to_string()))
    }
}
