//! 画像取得まわりの共通処理
//!
//! - ファイルサイズ・形式の事前チェック（デコード前に実施）
//! - EncodedImage: data URL 形式のエンコード済み画像

use crate::error::{Error, Result};

/// アップロード可能なファイルサイズの上限（5 MiB）
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// カメラ撮影時のJPEG品質
pub const CAMERA_JPEG_QUALITY: f64 = 0.9;

/// ファイルをデコードする前のチェック
///
/// # Arguments
/// * `size` - ファイルサイズ（バイト）
/// * `mime_type` - ファイルのMIMEタイプ（不明なら空文字）
pub fn check_upload(size: u64, mime_type: &str) -> Result<()> {
    if size > MAX_FILE_BYTES {
        return Err(Error::FileTooLarge {
            size,
            limit: MAX_FILE_BYTES,
        });
    }
    if !mime_type.is_empty() && !mime_type.starts_with("image/") {
        return Err(Error::UnsupportedFormat(mime_type.to_string()));
    }
    Ok(())
}

/// エンコード済み画像（"data:image/jpeg;base64,..." 形式）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data_url: String,
}

impl EncodedImage {
    /// data URL から生成（base64部分がなければ None）
    pub fn from_data_url(data_url: impl Into<String>) -> Option<Self> {
        let data_url = data_url.into();
        if !data_url.starts_with("data:") {
            return None;
        }
        extract_base64_from_data_url(&data_url)?;
        Some(Self { data_url })
    }

    /// MIMEタイプとbase64データから生成
    pub fn from_base64(mime_type: &str, base64_data: &str) -> Self {
        Self {
            data_url: format!("data:{};base64,{}", mime_type, base64_data),
        }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn mime_type(&self) -> &str {
        extract_mime_type_from_data_url(&self.data_url)
    }

    pub fn base64_data(&self) -> &str {
        extract_base64_from_data_url(&self.data_url).unwrap_or_default()
    }
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, data)| data)
}

/// Data URLからMIMEタイプを抽出
///
/// 抽出失敗時は"image/jpeg"をデフォルトとして返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("image/jpeg")
}
