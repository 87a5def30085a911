use crate::error::{Result, ScannerError};
use recipe_scanner_common::render::DEFAULT_SEARCH_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ラベラーコマンドを上書きする環境変数
pub const LABELER_ENV: &str = "RECIPE_SCANNER_LABELER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// レシピカタログ（未設定なら同梱カタログ）
    pub catalog_path: Option<PathBuf>,
    /// 不足食材の買い物検索URL
    pub search_base_url: String,
    /// 端末上の推論コマンド（画像パスを最後の引数として受け取る）
    pub labeler_command: Option<String>,
    /// これ未満の信頼度のラベルは採用しない
    pub confidence_threshold: f32,
    /// モデル入力に合わせた縮小サイズ（長辺px）
    pub max_image_size: u32,
    pub timeout_seconds: u64,
    /// 食材エイリアスJSON
    pub alias_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            search_base_url: DEFAULT_SEARCH_BASE_URL.into(),
            labeler_command: None,
            confidence_threshold: 0.5,
            max_image_size: 224,
            timeout_seconds: 30,
            alias_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ScannerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("recipe-scanner").join("config.json"))
    }

    pub fn get_labeler_command(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(command) = std::env::var(LABELER_ENV) {
            if !command.trim().is_empty() {
                return Ok(command);
            }
        }

        self.labeler_command.clone().ok_or(ScannerError::MissingLabeler)
    }
}
