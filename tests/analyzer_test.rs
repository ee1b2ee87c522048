//! Gemini クライアントのテスト
//!
//! ローカルのモックHTTPサーバーに対して1リクエストずつ応答を返す

use label_scan::analyzer::GeminiClient;
use label_scan::config::Config;
use label_scan::error::LabelScanError;
use label_scan_common::{EncodedImage, HealthGrade};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 1回だけ応答するモックサーバー。リクエスト本文を返す
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind失敗");
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}/v1beta/models", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn gemini_payload(text: &str) -> String {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
    .to_string()
}

fn test_config(endpoint: String) -> Config {
    Config {
        endpoint,
        timeout_seconds: 5,
        ..Default::default()
    }
}

fn sample_image() -> EncodedImage {
    EncodedImage::from_base64("image/png", "iVBORw0KGgo=")
}

// ============================================
// 正常系
// ============================================

#[tokio::test]
async fn test_analyze_success() {
    let analysis = json!({
        "product_name": "زبادي",
        "ingredients": ["حليب", "بكتيريا نافعة"],
        "nutrition": { "calories": 90, "protein": "5g", "carbs": 7, "sugar": 6, "fat": 3 },
        "allergens": ["حليب"],
        "health_grade": "b",
        "health_summary": "منتج جيد"
    });
    let text = format!("```json\n{}\n```", analysis);
    let (endpoint, server) = serve_once("200 OK", gemini_payload(&text)).await;

    let client = GeminiClient::with_api_key(&test_config(endpoint), "test-key").unwrap();
    let result = client.analyze(&sample_image()).await.expect("解析失敗");

    assert_eq!(result.product_name, "زبادي");
    assert_eq!(result.ingredients.len(), 2);
    assert_eq!(result.health_grade, HealthGrade::B);
    assert_eq!(result.nutrition.carbohydrates.to_string(), "7");
    assert!(result.has_allergens());

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v1beta/models/gemini-2.0-flash:generateContent?key=test-key"));
    assert!(request.contains("\"inline_data\""));
    assert!(request.contains("iVBORw0KGgo="));
}

// ============================================
// 異常系
// ============================================

#[tokio::test]
async fn test_analyze_http_error_status() {
    let (endpoint, server) =
        serve_once("403 Forbidden", r#"{"error":{"message":"denied"}}"#.to_string()).await;

    let client = GeminiClient::with_api_key(&test_config(endpoint), "bad-key").unwrap();
    let result = client.analyze(&sample_image()).await;

    match result {
        Err(LabelScanError::ApiStatus { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("denied"));
        }
        other => panic!("Expected ApiStatus, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_analyze_non_json_text() {
    let (endpoint, server) =
        serve_once("200 OK", gemini_payload("لا أستطيع قراءة الصورة")).await;

    let client = GeminiClient::with_api_key(&test_config(endpoint), "test-key").unwrap();
    let result = client.analyze(&sample_image()).await;

    assert!(matches!(result, Err(LabelScanError::Common(_))));
    server.await.unwrap();
}

#[tokio::test]
async fn test_analyze_empty_candidates() {
    let (endpoint, server) = serve_once("200 OK", r#"{"candidates":[]}"#.to_string()).await;

    let client = GeminiClient::with_api_key(&test_config(endpoint), "test-key").unwrap();
    assert!(client.analyze(&sample_image()).await.is_err());
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_error_hides_api_key() {
    // 接続先なし
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = test_config(format!("http://{}/v1beta/models", addr));
    let client = GeminiClient::with_api_key(&config, "secret-key-123").unwrap();
    let err = client.analyze(&sample_image()).await.unwrap_err();

    assert!(matches!(err, LabelScanError::ApiCall(_)));
    assert!(!err.to_string().contains("secret-key-123"));
}
