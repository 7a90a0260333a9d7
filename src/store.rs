use crate::config::Config;
use crate::game::Difficulty;
use enum_dispatch::enum_dispatch;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The values the game persists between sessions
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum StoreKey {
    Difficulty,
    HighScore,
}

#[enum_dispatch]
pub(crate) trait KeyValueStore {
    fn get(&self, key: StoreKey) -> Option<Value>;

    /// # Errors
    ///
    /// Returns `Err` if the store could not be written to.
    fn set(&mut self, key: StoreKey, value: Value) -> Result<(), SaveError>;

    /// # Errors
    ///
    /// Returns `Err` if the store could not be written to.
    fn remove(&mut self, key: StoreKey) -> Result<(), SaveError>;
}

#[enum_dispatch(KeyValueStore)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Store {
    FileStore,
    MemoryStore,
}

/// A store kept in a JSON file.  Every change is written straight back to
/// disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    path: PathBuf,
    data: BTreeMap<StoreKey, Value>,
}

impl FileStore {
    /// Read the store at `path`.  A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or parsed.
    pub(crate) fn load(path: PathBuf) -> Result<FileStore, LoadError> {
        let data = match fs_err::read(&path) {
            Ok(src) => serde_json::from_slice(&src).map_err(LoadError::deserialize)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(LoadError::read(e)),
        };
        Ok(FileStore { path, data })
    }

    /// A store at `path` that starts out with nothing in it, regardless of
    /// what the file currently holds.  The file is overwritten on the first
    /// change.
    pub(crate) fn empty(path: PathBuf) -> FileStore {
        FileStore {
            path,
            data: BTreeMap::new(),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&self.data).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StoreKey) -> Option<Value> {
        self.data.get(&key).cloned()
    }

    fn set(&mut self, key: StoreKey, value: Value) -> Result<(), SaveError> {
        self.data.insert(key, value);
        self.save()
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), SaveError> {
        if self.data.remove(&key).is_some() {
            self.save()
        } else {
            Ok(())
        }
    }
}

/// A store that is forgotten when the program exits
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(BTreeMap<StoreKey, Value>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Option<Value> {
        self.0.get(&key).cloned()
    }

    fn set(&mut self, key: StoreKey, value: Value) -> Result<(), SaveError> {
        self.0.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), SaveError> {
        let _ = self.0.remove(&key);
        Ok(())
    }
}

/// Typed access to the persisted difficulty & high score.  Anything missing
/// or unreadable is replaced with a default, and failures to save are logged
/// and otherwise ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    store: Store,
    default_difficulty: Difficulty,
}

impl Settings {
    pub(crate) fn new(store: Store, default_difficulty: Difficulty) -> Settings {
        Settings {
            store,
            default_difficulty,
        }
    }

    /// Open the store described by `config`: the data file if saving is
    /// enabled, or else an in-memory store.  A data file that cannot be
    /// parsed is started over from scratch; one that cannot be read at all
    /// is replaced with an in-memory store.
    pub(crate) fn open(config: &Config) -> Settings {
        let store = if !config.files.save_data {
            Store::from(MemoryStore::default())
        } else if let Some(path) = config.data_file() {
            match FileStore::load(path.clone()) {
                Ok(store) => {
                    tracing::debug!(path = %store.path().display(), "Loaded saved data");
                    Store::from(store)
                }
                Err(e) if e.is_corrupt() => {
                    tracing::warn!(
                        error = ?e,
                        path = %path.display(),
                        "Saved data is corrupt; starting afresh"
                    );
                    Store::from(FileStore::empty(path))
                }
                Err(e) => {
                    tracing::warn!(error = ?e, "Failed to load saved data; nothing will be saved");
                    Store::from(MemoryStore::default())
                }
            }
        } else {
            tracing::warn!(
                "Failed to determine path to local data directory; nothing will be saved"
            );
            Store::from(MemoryStore::default())
        };
        Settings::new(store, config.game.default_difficulty)
    }

    pub(crate) fn difficulty(&self) -> Difficulty {
        self.read(StoreKey::Difficulty)
            .unwrap_or(self.default_difficulty)
    }

    pub(crate) fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.write(StoreKey::Difficulty, difficulty);
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.read(StoreKey::HighScore).unwrap_or(0)
    }

    pub(crate) fn set_high_score(&mut self, score: u32) {
        self.write(StoreKey::HighScore, score);
    }

    pub(crate) fn reset_high_score(&mut self) {
        if let Err(e) = self.store.remove(StoreKey::HighScore) {
            tracing::warn!(error = ?e, "Failed to reset high score");
        } else {
            tracing::info!("High score reset");
        }
    }

    fn read<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let value = self.store.get(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(?key, error = %e, "Ignoring unreadable saved value");
                None
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: StoreKey, value: T) {
        let r = serde_json::to_value(value)
            .map_err(SaveError::serialize)
            .and_then(|v| self.store.set(key, v));
        if let Err(e) = r {
            tracing::warn!(?key, error = ?e, "Failed to save value");
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save game data to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize game data")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write game data to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read game data from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }

    /// Was the file read successfully but not understood?
    pub(crate) fn is_corrupt(&self) -> bool {
        matches!(self.0, LoadErrorSource::Deserialize(_))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read game data file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize game data")]
    Deserialize(#[source] serde_json::Error),
}
