use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::sync::Mutex;

use camino::Utf8PathBuf;
use directories::BaseDirs;
use tempfile::Builder;
use tracing::debug;

use crate::domain::{AssociationKey, WatchList};
use crate::error::WatchError;

/// Keyed persistence for watch lists.
///
/// `write` replaces the whole record. There is no version check, so two
/// read-modify-write sequences racing on one key resolve as last write wins.
pub trait WatchListStore: Send + Sync {
    /// Returns the list stored under `key`, or an empty list when none exists.
    fn read(&self, key: &AssociationKey) -> Result<WatchList, WatchError>;
    fn write(&self, key: &AssociationKey, list: &WatchList) -> Result<(), WatchError>;
}

/// One JSON file per association key under `<root>/watch-lists/`.
#[derive(Debug, Clone)]
pub struct FileWatchListStore {
    root: Utf8PathBuf,
}

impl FileWatchListStore {
    pub fn new() -> Result<Self, WatchError> {
        let root = BaseDirs::new()
            .and_then(|dirs| {
                Utf8PathBuf::from_path_buf(dirs.data_dir().join("hf-dataset-watch")).ok()
            })
            .ok_or_else(|| WatchError::Store("unable to resolve data directory".to_string()))?;
        Ok(Self { root })
    }

    pub fn new_with_root(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn record_path(&self, key: &AssociationKey) -> Utf8PathBuf {
        self.root
            .join("watch-lists")
            .join(format!("{}.json", file_stem(key)))
    }
}

impl WatchListStore for FileWatchListStore {
    fn read(&self, key: &AssociationKey) -> Result<WatchList, WatchError> {
        let path = self.record_path(key);
        debug!(key = %key, path = %path, "reading watch list");
        let content = match fs::read(path.as_std_path()) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(WatchList::new()),
            Err(err) => return Err(WatchError::Store(format!("read {path}: {err}"))),
        };
        serde_json::from_slice(&content).map_err(|err| WatchError::StoreDecode {
            key: key.to_string(),
            message: err.to_string(),
        })
    }

    fn write(&self, key: &AssociationKey, list: &WatchList) -> Result<(), WatchError> {
        let path = self.record_path(key);
        let parent = path
            .parent()
            .ok_or_else(|| WatchError::Store("invalid record path".to_string()))?;
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| WatchError::Store(err.to_string()))?;
        let content =
            serde_json::to_vec_pretty(list).map_err(|err| WatchError::Store(err.to_string()))?;
        let mut temp = Builder::new()
            .prefix("watch-list")
            .suffix(".json.tmp")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| WatchError::Store(err.to_string()))?;
        temp.write_all(&content)
            .map_err(|err| WatchError::Store(err.to_string()))?;
        temp.persist(path.as_std_path())
            .map_err(|err| WatchError::Store(err.to_string()))?;
        debug!(key = %key, path = %path, entries = list.len(), "wrote watch list");
        Ok(())
    }
}

/// In-process store for tests and hosts that persist records themselves.
#[derive(Debug, Default)]
pub struct MemoryWatchListStore {
    records: Mutex<HashMap<AssociationKey, WatchList>>,
}

impl MemoryWatchListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(key: AssociationKey, list: WatchList) -> Self {
        let store = Self::new();
        store.lock().insert(key, list);
        store
    }

    /// Whether any record, including an empty one, was ever written under `key`.
    pub fn has_record(&self, key: &AssociationKey) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AssociationKey, WatchList>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WatchListStore for MemoryWatchListStore {
    fn read(&self, key: &AssociationKey) -> Result<WatchList, WatchError> {
        Ok(self.lock().get(key).cloned().unwrap_or_default())
    }

    fn write(&self, key: &AssociationKey, list: &WatchList) -> Result<(), WatchError> {
        self.lock().insert(key.clone(), list.clone());
        Ok(())
    }
}

/// Maps a key to a file name. Unsafe bytes are hex-escaped so distinct keys
/// never share a file.
fn file_stem(key: &AssociationKey) -> String {
    let mut stem = String::with_capacity(key.as_str().len());
    for byte in key.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("~{byte:02x}"));
        }
    }
    stem
}
