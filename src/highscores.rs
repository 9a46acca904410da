//! Best-score persistence
//!
//! The simulation talks to a [`HighScoreStore`]: load once at startup, save on
//! every new record. Stores swallow their own failures; a broken store looks
//! like an empty one.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Load-at-startup / save-on-new-record collaborator
pub trait HighScoreStore {
    /// Stored best score, or 0 if nothing usable is stored
    fn load(&mut self) -> u32;

    /// Best-effort save; failures are never surfaced
    fn save(&mut self, score: u32);
}

/// Saved high score payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

#[derive(Debug, Default)]
struct MemoryInner {
    value: Option<u32>,
    saves: Vec<u32>,
}

/// In-process store; clones share the same slot so callers can inspect what
/// the session saved
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().value = Some(value);
        store
    }

    /// Currently stored value
    pub fn value(&self) -> Option<u32> {
        self.inner.borrow().value
    }

    /// Every value passed to `save`, oldest first
    pub fn saves(&self) -> Vec<u32> {
        self.inner.borrow().saves.clone()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.inner.borrow().value.unwrap_or(0)
    }

    fn save(&mut self, score: u32) {
        let mut inner = self.inner.borrow_mut();
        inner.value = Some(score);
        inner.saves.push(score);
    }
}

/// JSON file on disk (native only)
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::path::{Path, PathBuf};

    use super::{HighScoreRecord, HighScoreStore};
    use crate::persistence::{self, Envelope, PersistenceError};

    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Default location in the platform data directory
        pub fn default_location() -> Option<Self> {
            let dirs = directories::ProjectDirs::from("", "", "flappy-kiro")?;
            Some(Self::new(dirs.data_dir().join("highscore.json")))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn try_load(&self) -> Result<u32, PersistenceError> {
            let envelope: Envelope<HighScoreRecord> = persistence::read_json(&self.path)?;
            Ok(envelope.into_payload()?.high_score)
        }

        fn try_save(&self, score: u32) -> Result<(), PersistenceError> {
            let envelope = Envelope::new(HighScoreRecord { high_score: score });
            persistence::write_json_atomic(&self.path, &envelope)
        }
    }

    impl HighScoreStore for JsonFileStore {
        fn load(&mut self) -> u32 {
            match self.try_load() {
                Ok(score) => {
                    log::info!("Loaded high score {} from {}", score, self.path.display());
                    score
                }
                Err(PersistenceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    log::info!("No high score found, starting fresh");
                    0
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable high score file: {}", e);
                    0
                }
            }
        }

        fn save(&mut self, score: u32) {
            match self.try_save(score) {
                Ok(()) => log::debug!("High score {} saved", score),
                Err(e) => log::warn!("Failed to save high score: {}", e),
            }
        }
    }
}

/// Browser LocalStorage (wasm only)
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use super::{HighScoreRecord, HighScoreStore};
    use crate::persistence::Envelope;

    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        const STORAGE_KEY: &'static str = "flappy_kiro_highscore";

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl HighScoreStore for LocalStorageStore {
        fn load(&mut self) -> u32 {
            let Some(storage) = Self::storage() else {
                return 0;
            };
            let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) else {
                log::info!("No high score found, starting fresh");
                return 0;
            };
            serde_json::from_str::<Envelope<HighScoreRecord>>(&json)
                .ok()
                .and_then(|env| env.into_payload().ok())
                .map(|record| record.high_score)
                .unwrap_or(0)
        }

        fn save(&mut self, score: u32) {
            if let Some(storage) = Self::storage() {
                if let Ok(json) = serde_json::to_string(&Envelope::new(HighScoreRecord {
                    high_score: score,
                })) {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                }
            }
        }
    }
}
