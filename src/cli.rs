use crate::classifier::LabelerKind;
use clap::{Parser, Subcommand};
use recipe_scanner_common::RenderFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipe-scanner")]
#[command(about = "食材写真スキャン・レシピ推薦ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真を分類して食材を検出
    Scan {
        /// 写真ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// ラベラー (command/sidecar)
        #[arg(short, long, value_enum, default_value = "command")]
        labeler: LabelerKind,

        /// 検出後にレシピを推薦
        #[arg(short, long)]
        recommend: bool,

        /// レシピカタログJSON（省略時は設定値または同梱カタログ）
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 出力形式 (html/text)
        #[arg(short, long, default_value = "text")]
        format: RenderFormat,

        /// 推薦結果の出力ファイル
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// キャッシュを使用（再推論をスキップ）
        #[arg(long)]
        use_cache: bool,
    },

    /// 食材名を指定してレシピを推薦
    Recommend {
        /// 食材名（複数指定可）
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,

        /// レシピカタログJSON
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 出力形式 (html/text)
        #[arg(short, long, default_value = "text")]
        format: RenderFormat,

        /// 出力ファイル
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 対話モード（撮影・リセット・推薦）
    Interactive {
        /// ラベラー (command/sidecar)
        #[arg(short, long, value_enum, default_value = "command")]
        labeler: LabelerKind,

        /// レシピカタログJSON
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// キャッシュを使用
        #[arg(long)]
        use_cache: bool,
    },

    /// カタログを検証して一覧表示
    Catalog {
        /// レシピカタログJSON
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// カタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// ラベラーコマンドを設定
        #[arg(long)]
        set_labeler: Option<String>,

        /// 買い物検索URLを設定
        #[arg(long)]
        set_search_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時は既定のキャッシュフォルダ）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::parse_from([
            "recipe-scanner", "recommend", "-i", "egg", "-i", "green chilli", "--format", "html",
        ]);
        match cli.command {
            Commands::Recommend { ingredients, format, catalog, .. } => {
                assert_eq!(ingredients, vec!["egg", "green chilli"]);
                assert_eq!(format, RenderFormat::Html);
                assert!(catalog.is_none());
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_scan_defaults() {
        let cli = Cli::parse_from(["recipe-scanner", "-v", "scan", "photos/"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Scan { paths, labeler, recommend, format, use_cache, .. } => {
                assert_eq!(paths, vec![PathBuf::from("photos/")]);
                assert!(matches!(labeler, LabelerKind::Command));
                assert!(!recommend);
                assert_eq!(format, RenderFormat::Text);
                assert!(!use_cache);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_scan_requires_path() {
        assert!(Cli::try_parse_from(["recipe-scanner", "scan"]).is_err());
    }
}
