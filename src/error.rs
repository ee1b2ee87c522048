use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`label-scan config --set-api-key YOUR_KEY` または環境変数 GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIエラー: status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("履歴に {index} 番はありません（{len} 件）")]
    HistoryIndex { index: usize, len: usize },

    #[error(transparent)]
    Common(#[from] label_scan_common::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LabelScanError>;
