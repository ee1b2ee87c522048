//! スキャン履歴
//!
//! 新しい順に最大 `HISTORY_LIMIT` 件を保持する。
//! 変更のたびにスナップショット全体を書き直す（差分保存はしない）。

use crate::error::Result;
use crate::types::AnalysisResult;
use std::cell::RefCell;

/// 履歴の最大件数
pub const HISTORY_LIMIT: usize = 10;

/// 履歴スナップショットの保存先スロット名
pub const HISTORY_SLOT: &str = "labelScanHistory";

/// スナップショット保存先
///
/// Web: LocalStorage、CLI: JSONファイル
pub trait SnapshotStore {
    /// 保存済みスナップショットを読む（未保存ならNone）
    fn read(&self) -> Result<Option<String>>;

    /// スナップショットを上書き保存
    fn write(&self, snapshot: &str) -> Result<()>;
}

/// メモリ上のスナップショット（テスト用）
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(snapshot.into())),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&self, snapshot: &str) -> Result<()> {
        *self.slot.borrow_mut() = Some(snapshot.to_string());
        Ok(())
    }
}

/// 新しい順の履歴
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<AnalysisResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存先から読み込み
    ///
    /// 未保存・読込失敗・パース失敗はいずれも空の履歴になる（警告ログのみ）。
    pub fn load(store: &impl SnapshotStore) -> Self {
        let snapshot = match store.read() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("history read failed: {}", e);
                return Self::default();
            }
        };

        match Self::from_snapshot(&snapshot) {
            Ok(history) => history,
            Err(e) => {
                log::warn!("history snapshot is corrupt, starting empty: {}", e);
                Self::default()
            }
        }
    }

    /// スナップショット（JSON配列）から復元
    pub fn from_snapshot(snapshot: &str) -> Result<Self> {
        let mut entries: Vec<AnalysisResult> = serde_json::from_str(snapshot)?;
        entries.truncate(HISTORY_LIMIT);
        Ok(Self { entries })
    }

    pub fn to_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// 保存先へ全体を書き直す
    pub fn persist(&self, store: &impl SnapshotStore) -> Result<()> {
        store.write(&self.to_snapshot()?)
    }

    /// 先頭に追加し、上限を超えた古いものを捨てる
    pub fn push(&mut self, result: AnalysisResult) {
        self.entries.insert(0, result);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// 指定位置を削除（範囲外なら何もしない）
    pub fn remove(&mut self, index: usize) -> Option<AnalysisResult> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&AnalysisResult> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[AnalysisResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
