use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::game::GameState;
use crate::persistence::Snapshot;

/// Durable home for the latest game snapshot.
///
/// `save` overwrites whatever was stored before. `load` returns `Ok(None)`
/// when nothing has been saved yet, and never hands back a state that
/// breaks the game invariants.
pub trait SnapshotStore {
    fn save(&mut self, state: &GameState) -> Result<(), StoreError>;

    fn load(&self) -> Result<Option<GameState>, StoreError>;
}

fn decode(location: &str, json: &str) -> Result<GameState, StoreError> {
    Snapshot::from_json(json)
        .and_then(GameState::try_from)
        .map_err(|source| StoreError::Corrupt {
            location: location.to_string(),
            source,
        })
}

/// Stores the snapshot as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        let json = Snapshot::from(state).to_json().map_err(StoreError::Encode)?;

        // Write beside the target, then rename over it
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| StoreError::Write {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %self.path.display(), pieces = state.pieces().len(), "snapshot saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        decode(&self.path.display().to_string(), &json).map(Some)
    }
}

/// Keeps the snapshot document in memory. Useful for tests and for hosts
/// that handle durability themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing document, valid or not.
    pub fn with_document(document: impl Into<String>) -> Self {
        MemoryStore {
            document: Some(document.into()),
            saves: 0,
        }
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful saves so far
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        let json = Snapshot::from(state).to_json().map_err(StoreError::Encode)?;
        self.document = Some(json);
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>, StoreError> {
        self.document
            .as_deref()
            .map(|json| decode("memory", json))
            .transpose()
    }
}
