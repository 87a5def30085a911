use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("レシピカタログを読み込めません: {0}")]
    CatalogUnavailable(String),

    #[error("画像分類エラー: {0}")]
    Classification(String),

    #[error("ラベラー出力のパースに失敗: {0}")]
    LabelParse(String),

    #[error("画像分類がタイムアウトしました（{0:?}）")]
    Timeout(std::time::Duration),

    #[error("ラベラーが設定されていません。`recipe-scanner config --set-labeler COMMAND` で設定してください")]
    MissingLabeler,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] recipe_scanner_common::Error),
}

pub type Result<T> = std::result::Result<T, ScannerError>;
