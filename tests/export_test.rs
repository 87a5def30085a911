//! 推薦結果ファイル出力の統合テスト

use recipe_scanner::export::{html_document, write_report};
use recipe_scanner::recommend::{recommend, CatalogSource};
use recipe_scanner_common::{RenderFormat, RenderOptions};
use tempfile::tempdir;

fn detected() -> Vec<String> {
    vec!["egg".to_string(), "milk".to_string()]
}

#[test]
fn test_write_html_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("report").join("recommendations.html");

    let recommendation = recommend(&detected(), &CatalogSource::Bundled, &RenderOptions::default());
    let result = write_report(&output_path, &recommendation, &detected(), RenderFormat::Html);
    assert!(result.is_ok(), "出力に失敗: {:?}", result.err());

    let content = std::fs::read_to_string(&output_path).expect("ファイル読み込み失敗");
    assert!(content.starts_with("<!DOCTYPE html>"));
    assert!(content.contains("<p>Detected: egg, milk</p>"));
    assert!(content.contains("<b>French Toast:</b>"));
    assert!(content.contains("Generated "));
}

#[test]
fn test_write_text_report_is_plain_body() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("recommendations.txt");

    let options = RenderOptions {
        format: RenderFormat::Text,
        ..Default::default()
    };
    let recommendation = recommend(&detected(), &CatalogSource::Bundled, &options);
    write_report(&output_path, &recommendation, &detected(), RenderFormat::Text).unwrap();

    let content = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(content, recommendation.body);
    assert!(!content.contains("<b>"));
}

#[test]
fn test_text_body_is_escaped_inside_html_document() {
    let options = RenderOptions {
        format: RenderFormat::Text,
        ..Default::default()
    };
    let detected = vec!["<egg>".to_string()];
    let recommendation = recommend(&detected, &CatalogSource::Bundled, &options);
    let html = html_document(&recommendation, &detected, RenderFormat::Text);

    assert!(html.contains("<p>Detected: &lt;egg&gt;</p>"));
    assert!(html.contains("<pre>No recipes found for the detected ingredients.</pre>"));
}

#[test]
fn test_empty_detected_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("empty.html");

    let recommendation = recommend(&[], &CatalogSource::Bundled, &RenderOptions::default());
    write_report(&output_path, &recommendation, &[], RenderFormat::Html).unwrap();

    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("No ingredients detected."));
}
