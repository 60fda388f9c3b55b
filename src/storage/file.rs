//! File-backed key-value store

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{MonitorError, MonitorResult};

/// Persists each key as `<dir>/<key>.json`. Writes go through a temp file
/// and rename so a crash mid-write never leaves a truncated blob behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>) -> MonitorResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| MonitorError::storage(format!("create {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl super::KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> MonitorResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MonitorError::storage(format!("read {}", path.display()), e)),
        }
    }

    fn save(&self, key: &str, value: &str) -> MonitorResult<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)
            .map_err(|e| MonitorError::storage(format!("write {}", tmp.display()), e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| MonitorError::storage(format!("rename to {}", path.display()), e))
    }

    fn remove(&self, key: &str) -> MonitorResult<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(MonitorError::storage(format!("remove {}", path.display()), e)),
        }
    }
}
