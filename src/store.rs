//! 履歴スナップショットのファイル保存

use label_scan_common::{Error, Result, SnapshotStore};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))
    }

    fn write(&self, snapshot: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(&self.path, snapshot)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))
    }
}
