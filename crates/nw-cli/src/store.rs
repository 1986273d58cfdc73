//! JSON file implementation of the engine's snapshot store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use nw_engine::host::SnapshotStore;
use nw_engine::{EngineError, EngineResult, SessionState};

/// Default session file name, one fixed key per working directory.
pub const DEFAULT_FILE: &str = "werewolf-host-assistant.json";

/// Persists the whole session snapshot as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> EngineResult<Option<SessionState>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| EngineError::Storage(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EngineError::Storage(e.to_string())),
        }
    }

    fn save(&self, state: &SessionState) -> EngineResult<()> {
        let json =
            serde_json::to_string_pretty(state).map_err(|e| EngineError::Storage(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| EngineError::Storage(e.to_string()))
    }

    fn clear(&self) -> EngineResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::Storage(e.to_string())),
        }
    }
}
