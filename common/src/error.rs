//! エラー型定義
//!
//! - Error: ライブラリ内部のエラー（原因を保持）
//! - ScanError: ユーザーに表示するエラー分類（固定メッセージ）

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 画面に表示するエラー分類
///
/// 原因の詳細は表示せず、分類ごとに1つの固定メッセージを出す。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    #[error("حجم الملف كبير جداً. الحد الأقصى 5 ميغابايت.")]
    FileTooLarge,

    #[error("الملف المحدد ليس صورة.")]
    UnsupportedFile,

    #[error("تعذّر قراءة الملف.")]
    FileRead,

    #[error("تعذّر الوصول إلى الكاميرا. تحقق من الأذونات.")]
    CameraUnavailable,

    #[error("فشل تحليل الصورة. حاول مرة أخرى.")]
    AnalysisFailed,
}

impl From<&Error> for ScanError {
    fn from(error: &Error) -> Self {
        match error {
            Error::FileTooLarge { .. } => ScanError::FileTooLarge,
            Error::UnsupportedFormat(_) => ScanError::UnsupportedFile,
            Error::Json(_) | Error::Parse(_) | Error::Storage(_) => ScanError::AnalysisFailed,
        }
    }
}
