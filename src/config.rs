use crate::error::{LabelScanError, Result};
use label_scan_common::gemini::{DEFAULT_MODEL, GEMINI_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            endpoint: GEMINI_API_BASE.into(),
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 設定・履歴を置くディレクトリ
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LabelScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("label-scan"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("history.json"))
    }

    /// APIキー（環境変数を優先）
    pub fn api_key(&self) -> Result<String> {
        Self::resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    fn resolve_api_key(env_key: Option<String>, stored: Option<&str>) -> Result<String> {
        env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| stored.filter(|k| !k.trim().is_empty()).map(str::to_string))
            .map(|k| k.trim().to_string())
            .ok_or(LabelScanError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }
}
