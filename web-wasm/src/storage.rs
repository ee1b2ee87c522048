//! LocalStorage への保存
//!
//! - LocalStorageSlot: 履歴・設定スナップショットの保存先
//! - Settings: APIキーとモデル名

use label_scan_common::gemini::DEFAULT_MODEL;
use label_scan_common::{Error, Result, SnapshotStore};
use serde::{Deserialize, Serialize};
use web_sys::Storage;

const SETTINGS_SLOT: LocalStorageSlot = LocalStorageSlot::new("labelScanSettings");

/// 利用できない環境（無効化・サンドボックス）では Storage エラー
fn require_storage(storage: Option<Storage>) -> Result<Storage> {
    storage.ok_or_else(|| Error::Storage("localStorage is not available".into()))
}

fn local_storage() -> Result<Storage> {
    require_storage(web_sys::window().and_then(|w| w.local_storage().ok().flatten()))
}

/// LocalStorage の1スロット
#[derive(Debug, Clone, Copy)]
pub struct LocalStorageSlot {
    key: &'static str,
}

impl LocalStorageSlot {
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl SnapshotStore for LocalStorageSlot {
    fn read(&self) -> Result<Option<String>> {
        local_storage()?
            .get_item(self.key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn write(&self, snapshot: &str) -> Result<()> {
        local_storage()?
            .set_item(self.key, snapshot)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

/// アプリ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // ビルド時に GEMINI_API_KEY が指定されていれば初期値にする
            api_key: option_env!("GEMINI_API_KEY").unwrap_or_default().to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Settings {
    pub fn is_ready(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.model.trim().is_empty()
    }
}

pub fn load_settings() -> Settings {
    let stored = SETTINGS_SLOT.read().and_then(|snapshot| match snapshot {
        Some(json) => Ok(serde_json::from_str::<Settings>(&json)?),
        None => Ok(Settings::default()),
    });
    stored.unwrap_or_else(|e| {
        log::warn!("settings not loaded: {}", e);
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    SETTINGS_SLOT.write(&serde_json::to_string(settings)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"api_key": "abc"}"#).expect("デシリアライズ失敗");
        assert_eq!(settings.api_key, "abc");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.is_ready());
    }

    #[test]
    fn test_missing_storage_is_storage_error() {
        let result = require_storage(None);
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_settings_not_ready_without_key() {
        let settings = Settings {
            api_key: "  ".to_string(),
            model: DEFAULT_MODEL.to_string(),
        };
        assert!(!settings.is_ready());
    }
}
