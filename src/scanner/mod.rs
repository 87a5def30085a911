//! 撮影画像の取り込み
//!
//! カメラ撮影の代わりに写真ファイルを読み込み、モデル入力サイズに縮小して
//! メモリ上に保持する。

use crate::error::{Result, ScannerError};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

/// 読み込み済みの撮影画像
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub file_name: String,
    pub path: PathBuf,
    /// 元ファイルのバイト列（キャッシュキーの計算用）
    pub bytes: Vec<u8>,
    /// 縮小済みのピクセルバッファ
    pub pixels: DynamicImage,
}

impl CapturedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// 推論コマンドに渡すPNGを書き出す
    pub fn write_png(&self, dest: &Path) -> Result<()> {
        self.pixels
            .save_with_format(dest, ImageFormat::Png)
            .map_err(|e| ScannerError::ImageLoad(format!("{}: {}", dest.display(), e)))
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(ScannerError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_image_path(path) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        images.push(ImageInfo {
            path: path.to_path_buf(),
            file_name,
        });
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// 画像ファイルまたはフォルダのリストを画像リストに展開
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<ImageInfo>> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path)?);
        } else if path.is_file() {
            images.push(ImageInfo {
                path: path.clone(),
                file_name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            });
        } else {
            return Err(ScannerError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(images)
}

/// 画像を読み込み、長辺が `max_size` を超える場合は縮小（縦横比維持）
///
/// `max_size` が0なら縮小しない。
pub fn load_image(path: &Path, max_size: u32) -> Result<CapturedImage> {
    if !path.exists() {
        return Err(ScannerError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| ScannerError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let (width, height) = decoded.dimensions();
    let pixels = if max_size > 0 && (width > max_size || height > max_size) {
        decoded.resize(max_size, max_size, FilterType::Triangle)
    } else {
        decoded
    };

    Ok(CapturedImage {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        path: path.to_path_buf(),
        bytes,
        pixels,
    })
}
