//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use recipe_scanner::error::ScannerError;
use recipe_scanner::recommend::{load_catalog, CatalogSource};
use recipe_scanner::scanner;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(ScannerError::FolderNotFound(_))));
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("dataset.json"), "[]").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.unwrap().is_empty());
}

/// 存在しないパスを指定した場合
#[test]
fn test_collect_missing_path() {
    let result = scanner::collect_images(&[PathBuf::from("/nonexistent/egg.jpg")]);
    assert!(matches!(result, Err(ScannerError::FileNotFound(_))));
}

/// 壊れたカタログはCatalogUnavailable
#[test]
fn test_corrupt_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dataset.json");
    std::fs::write(&path, r#"[{"name": "A", "ingredients": ["egg"], "link": "u1"},"#).unwrap();

    let err = load_catalog(&CatalogSource::File(path)).unwrap_err();
    assert!(matches!(err, ScannerError::CatalogUnavailable(_)));
    assert!(format!("{}", err).contains("dataset.json"));
}

/// ScannerErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ScannerError::Config("テスト設定エラー".to_string()),
        ScannerError::FileNotFound("egg.jpg".to_string()),
        ScannerError::FolderNotFound("/path/to/folder".to_string()),
        ScannerError::ImageLoad("broken.png".to_string()),
        ScannerError::CatalogUnavailable("dataset.json".to_string()),
        ScannerError::Classification("model unavailable".to_string()),
        ScannerError::LabelParse("no JSON".to_string()),
        ScannerError::Timeout(std::time::Duration::from_secs(30)),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingLabelerエラーのメッセージ確認
#[test]
fn test_missing_labeler_message() {
    let display = format!("{}", ScannerError::MissingLabeler);
    assert!(display.contains("recipe-scanner config"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ScannerError = io_err.into();

    assert!(matches!(err, ScannerError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = recipe_scanner_common::Error::InvalidCatalog("recipe #1 has an empty name".to_string());
    let err: ScannerError = common_err.into();

    assert!(matches!(err, ScannerError::Common(_)));
    assert_eq!(format!("{}", err), "Invalid catalog: recipe #1 has an empty name");
}
