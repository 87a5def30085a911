//! ラベル結果キャッシュモジュール
//!
//! 画像のSHA-256ハッシュをキーにして分類結果をキャッシュし、
//! 同じ写真の再推論をスキップする。

use super::ImageLabeler;
use crate::error::Result;
use crate::scanner::CapturedImage;
use async_trait::async_trait;
use recipe_scanner_common::Label;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

const CACHE_FILE_NAME: &str = ".label-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelCache {
    /// バージョン（互換性チェック用）
    version: u32,
    /// "ラベラー名:画像ハッシュ" → 分類結果
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub labels: Vec<Label>,
}

impl LabelCache {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// 既定のキャッシュフォルダ
    pub fn default_folder() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("recipe-scanner")
    }

    /// キャッシュファイルを読み込み（壊れている場合は空として扱う）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, LabelCache>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                warn!(path = %cache_path.display(), "cache version mismatch, starting fresh");
                Self::default()
            }
            Err(e) => {
                warn!(path = %cache_path.display(), error = %e, "unreadable cache, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        std::fs::create_dir_all(folder)?;
        let file = File::create(Self::cache_path(folder))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// キャッシュファイルを削除。存在しなければ `Ok(false)`
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<&[Label]> {
        self.entries.get(key).map(|e| e.labels.as_slice())
    }

    pub fn insert(&mut self, key: String, file_name: String, labels: Vec<Label>) {
        self.entries.insert(key, CacheEntry { file_name, labels });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LabelCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像バイト列のハッシュ（SHA-256, hex）
pub fn compute_image_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// キャッシュ付きラベラー
pub struct CachedLabeler {
    inner: Box<dyn ImageLabeler>,
    folder: PathBuf,
    cache: Mutex<LabelCache>,
}

impl CachedLabeler {
    pub fn new(inner: Box<dyn ImageLabeler>, folder: PathBuf) -> Self {
        let cache = LabelCache::load(&folder);
        Self {
            inner,
            folder,
            cache: Mutex::new(cache),
        }
    }

    fn key(&self, image: &CapturedImage) -> String {
        format!("{}:{}", self.inner.name(), compute_image_hash(&image.bytes))
    }

    pub fn cached_count(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl ImageLabeler for CachedLabeler {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn classify(&self, image: &CapturedImage) -> Result<Vec<Label>> {
        let key = self.key(image);
        let cached = {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            cache.get(&key).map(|labels| labels.to_vec())
        };
        if let Some(labels) = cached {
            debug!(file = %image.file_name, "label cache hit");
            return Ok(labels);
        }

        debug!(file = %image.file_name, "label cache miss");
        let labels = self.inner.classify(image).await?;
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(key, image.file_name.clone(), labels.clone());
        Ok(labels)
    }

    fn flush(&self) -> Result<()> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.save(&self.folder)
    }
}
