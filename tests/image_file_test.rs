//! 画像ファイル読み込みテスト

use label_scan::image_file;
use tempfile::tempdir;

/// PNGシグネチャ + IHDR の最小ヘッダ
const PNG_HEADER: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

/// JPEG SOI + APP0
const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00];

#[test]
fn test_load_png_detects_mime_from_bytes() {
    let dir = tempdir().expect("Failed to create temp dir");
    // 拡張子ではなく中身で判定される
    let path = dir.path().join("label.dat");
    std::fs::write(&path, PNG_HEADER).unwrap();

    let image = image_file::load_image(&path).expect("読み込み失敗");
    assert_eq!(image.mime_type(), "image/png");
    assert!(image.data_url().starts_with("data:image/png;base64,"));
    assert_eq!(image.base64_data(), "iVBORw0KGgoAAAANSUhEUg==");
}

#[test]
fn test_load_jpeg() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("label.jpg");
    std::fs::write(&path, JPEG_HEADER).unwrap();

    let image = image_file::load_image(&path).expect("読み込み失敗");
    assert_eq!(image.mime_type(), "image/jpeg");
}
