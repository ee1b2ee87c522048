//! Gemini API のリクエスト/レスポンス型
//!
//! 通信処理自体はプラットフォームごと（WASM: fetch, CLI: reqwest）に実装し、
//! ここではJSONの形とリクエスト組み立てのみを共有する。

use crate::capture::EncodedImage;
use crate::error::{Error, Result};
use crate::prompts::build_label_prompt;
use serde::{Deserialize, Serialize};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// generateContent エンドポイントURL
pub fn generate_content_url(base: &str, model: &str, api_key: &str) -> String {
    format!(
        "{}/{}:generateContent?key={}",
        base.trim_end_matches('/'),
        model,
        api_key
    )
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: String,
}

impl GeminiResponse {
    /// 最初の候補の最初のテキスト
    pub fn into_text(self) -> Result<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Parse("Empty response".into()))
    }
}

/// ラベル解析リクエストを作成（固定プロンプト + 画像1枚）
pub fn build_label_request(image: &EncodedImage) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: build_label_prompt(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type().to_string(),
                        data: image.base64_data().to_string(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: 0.2,
            response_mime_type: "application/json".to_string(),
        },
    }
}
