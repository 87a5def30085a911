use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use recipe_scanner::classifier::{
    CachedLabeler, ImageLabeler, LabelCache, LabelerKind, UnavailableLabeler,
};
use recipe_scanner::{cli, config, export, interactive, logging, recommend, scanner, session};
use recipe_scanner_common::{IngredientAliases, RenderFormat, RenderOptions};
use cli::{Cli, Commands};
use config::Config;
use recommend::{CatalogSource, Recommendation};
use session::{ScanOutcome, ScanSession};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// ラベラーを構築（必要ならキャッシュで包む）
fn build_labeler(kind: LabelerKind, config: &Config, use_cache: bool) -> anyhow::Result<Box<dyn ImageLabeler>> {
    let labeler = kind.build(config).context("ラベラーの初期化に失敗")?;
    if use_cache {
        Ok(Box::new(CachedLabeler::new(labeler, LabelCache::default_folder())))
    } else {
        Ok(labeler)
    }
}

fn build_session(config: &Config) -> anyhow::Result<ScanSession> {
    let session = ScanSession::new(config.confidence_threshold);
    match &config.alias_path {
        Some(path) => {
            let aliases = IngredientAliases::from_file(path)
                .with_context(|| format!("エイリアスファイルを読み込めません: {}", path.display()))?;
            Ok(session.with_aliases(aliases))
        }
        None => Ok(session),
    }
}

fn catalog_source(arg: Option<PathBuf>, config: &Config) -> CatalogSource {
    CatalogSource::from_path(arg.or_else(|| config.catalog_path.clone()))
}

fn render_options(format: RenderFormat, config: &Config) -> RenderOptions {
    RenderOptions {
        format,
        search_base_url: config.search_base_url.clone(),
    }
}

fn emit(recommendation: &Recommendation, detected: &[String], format: RenderFormat, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            export::write_report(path, recommendation, detected, format)
                .with_context(|| format!("出力に失敗: {}", path.display()))?;
            println!("✔ 推薦結果を保存: {}", path.display());
        }
        None => println!("{}", recommendation.body),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗")?;
    let timeout = Duration::from_secs(config.timeout_seconds);

    match cli.command {
        Commands::Scan { paths, labeler, recommend: do_recommend, catalog, format, output, use_cache } => {
            println!("📸 recipe-scanner - 食材スキャン\n");

            // 1. 画像収集
            println!("[1/2] 写真を収集中...");
            let images = scanner::collect_images(&paths)?;
            println!("✔ {}枚の写真を検出\n", images.len());

            // 2. 分類
            println!("[2/2] 食材を分類中...{}", if use_cache { " (キャッシュ有効)" } else { "" });
            let labeler = build_labeler(labeler, &config, use_cache)?;
            let mut session = build_session(&config)?;

            let progress = ProgressBar::new(images.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            let outcomes = session
                .scan_files(&*labeler, &images, config.max_image_size, timeout, &progress)
                .await;
            progress.finish_and_clear();

            for (file_name, outcome) in &outcomes {
                let mark = if matches!(outcome, ScanOutcome::Detected(_)) { "✔" } else { "-" };
                println!("  {} {}: {}", mark, file_name, outcome.message());
            }
            println!();

            labeler.flush().context("キャッシュの保存に失敗")?;

            let detected = session.detected().snapshot();
            println!("検出済み食材: {}", if detected.is_empty() { "(なし)".to_string() } else { detected.join(", ") });

            if do_recommend {
                println!();
                let source = catalog_source(catalog, &config);
                let recommendation = recommend::recommend(&detected, &source, &render_options(format, &config));
                emit(&recommendation, &detected, format, output.as_deref())?;
            }
            session.close();
        }

        Commands::Recommend { ingredients, catalog, format, output } => {
            let source = catalog_source(catalog, &config);
            let recommendation = recommend::recommend(&ingredients, &source, &render_options(format, &config));
            emit(&recommendation, &ingredients, format, output.as_deref())?;
        }

        Commands::Interactive { labeler, catalog, use_cache } => {
            // ラベラーがなくても推薦やリセットは使えるので起動する
            let labeler = build_labeler(labeler, &config, use_cache).unwrap_or_else(|e| -> Box<dyn ImageLabeler> {
                tracing::warn!(error = %e, "labeler unavailable");
                println!("⚠ {:#}", e);
                Box::new(UnavailableLabeler::new(format!("{:#}", e)))
            });
            let mut session = build_session(&config)?;
            let options = interactive::InteractiveOptions {
                catalog: catalog_source(catalog, &config),
                render: render_options(RenderFormat::Text, &config),
                max_image_size: config.max_image_size,
                timeout,
            };

            let result = interactive::run_interactive(&*labeler, &mut session, &options).await;

            labeler.flush().context("キャッシュの保存に失敗")?;
            result?;
        }

        Commands::Catalog { catalog } => {
            let source = catalog_source(catalog, &config);
            let recipes = recommend::load_catalog(&source)?;
            println!("カタログ: {} ({}件)", source.describe(), recipes.len());
            for recipe in &recipes {
                println!("  - {}: {}", recipe.name, recipe.ingredients.join(", "));
            }
        }

        Commands::Config { set_catalog, set_labeler, set_search_url, show } => {
            let mut config = config;
            let changed = set_catalog.is_some() || set_labeler.is_some() || set_search_url.is_some();

            if let Some(path) = set_catalog {
                config.catalog_path = Some(path);
            }
            if let Some(command) = set_labeler {
                config.labeler_command = Some(command);
            }
            if let Some(url) = set_search_url {
                config.search_base_url = url;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  カタログ: {}", catalog_source(None, &config).describe());
                println!("  ラベラー: {}", config.labeler_command.as_deref().unwrap_or("未設定"));
                println!("  検索URL: {}", config.search_base_url);
                println!("  信頼度閾値: {}", config.confidence_threshold);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(LabelCache::default_folder);
            let cache_path = LabelCache::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = LabelCache::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match LabelCache::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}
