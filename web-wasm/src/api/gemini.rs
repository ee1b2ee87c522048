//! Gemini API連携（fetch）
//!
//! 画像1枚 + 固定プロンプトを送信し、LabelAnalysis を返す。
//! リトライはしない。

use crate::storage::Settings;
use label_scan_common::gemini::{
    build_label_request, generate_content_url, GeminiRequest, GeminiResponse, GEMINI_API_BASE,
};
use label_scan_common::{parse_analysis_response, EncodedImage, LabelAnalysis};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Gemini API呼び出し
async fn call_gemini_api(settings: &Settings, request: &GeminiRequest) -> Result<String, JsValue> {
    let url = generate_content_url(GEMINI_API_BASE, settings.model.trim(), settings.api_key.trim());
    let body = serde_json::to_string(request).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }

    let json = JsFuture::from(resp.json()?).await?;
    let response: GeminiResponse = serde_wasm_bindgen::from_value(json)?;

    response
        .into_text()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// ラベル画像を解析
pub async fn analyze_label(settings: &Settings, image: &EncodedImage) -> Result<LabelAnalysis, JsValue> {
    let request = build_label_request(image);
    let response_text = call_gemini_api(settings, &request).await?;

    parse_analysis_response(&response_text).map_err(|e| JsValue::from_str(&e.to_string()))
}
