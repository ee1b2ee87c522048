//! ディスク上の画像ファイルを読み込み、送信用にエンコードする

use crate::error::{LabelScanError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use label_scan_common::{check_upload, EncodedImage, Error};
use std::path::Path;

/// 画像ファイルを読み込む
///
/// サイズ上限はファイルを読む前にメタデータで判定する。
/// MIMEタイプは拡張子ではなく先頭バイトから判定する。
pub fn load_image(path: &Path) -> Result<EncodedImage> {
    if !path.is_file() {
        return Err(LabelScanError::FileNotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    check_upload(size, "")?;

    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes)
        .map_err(|_| Error::UnsupportedFormat(path.display().to_string()))?;
    let mime_type = format.to_mime_type();
    check_upload(size, mime_type)?;

    log::info!("{}: {} bytes ({})", path.display(), size, mime_type);
    Ok(EncodedImage::from_base64(mime_type, &STANDARD.encode(&bytes)))
}
