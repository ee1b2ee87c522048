//! Gemini API クライアント（reqwest）

use crate::config::Config;
use crate::error::{LabelScanError, Result};
use label_scan_common::gemini::{build_label_request, generate_content_url, GeminiResponse};
use label_scan_common::{parse_analysis_response, EncodedImage, LabelAnalysis};
use std::time::Duration;

pub struct GeminiClient {
    client: reqwest::Client,
    url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        Self::with_api_key(config, &api_key)
    }

    pub fn with_api_key(config: &Config, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: generate_content_url(&config.endpoint, &config.model, api_key),
        })
    }

    /// ラベル画像を1回だけ解析（リトライなし）
    pub async fn analyze(&self, image: &EncodedImage) -> Result<LabelAnalysis> {
        let request = build_label_request(image);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LabelScanError::ApiCall(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LabelScanError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        // URLにAPIキーが含まれるためエラーからは外す
        let payload: GeminiResponse = response.json().await.map_err(|e| e.without_url())?;
        let text = payload.into_text()?;
        log::debug!("response text: {}", text);

        Ok(parse_analysis_response(&text)?)
    }
}
