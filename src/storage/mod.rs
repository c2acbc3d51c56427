//! Key→JSON persistence boundary.
//!
//! Domain stores serialize their state through [`Storage`], which sits on a
//! pluggable [`StorageBackend`]. Faults at this boundary never propagate:
//! reads degrade to the supplied default, writes are best-effort and logged.
//! An unavailable backend (headless or ephemeral contexts) silently no-ops.

pub mod memory;
pub mod sqlite;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::errors::StorageError;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// The fixed persistence keys. No two domain stores share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Settings,
    QuickLinks,
    Bookmarks,
    BookmarkFolders,
    ReadingList,
    NewsSources,
    WeatherCache,
}

impl StorageKey {
    /// Every key this application owns, in declaration order.
    pub const ALL: [StorageKey; 7] = [
        StorageKey::Settings,
        StorageKey::QuickLinks,
        StorageKey::Bookmarks,
        StorageKey::BookmarkFolders,
        StorageKey::ReadingList,
        StorageKey::NewsSources,
        StorageKey::WeatherCache,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Settings => "dp_settings",
            StorageKey::QuickLinks => "dp_quick_links",
            StorageKey::Bookmarks => "dp_bookmarks",
            StorageKey::BookmarkFolders => "dp_bookmark_folders",
            StorageKey::ReadingList => "dp_reading_list",
            StorageKey::NewsSources => "dp_news_sources",
            StorageKey::WeatherCache => "dp_weather_cache",
        }
    }
}

/// Raw string-payload store underneath [`Storage`].
pub trait StorageBackend {
    /// Whether the medium exists in this execution context. When `false`,
    /// the facade returns defaults and ignores writes.
    fn is_available(&self) -> bool {
        true
    }

    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed JSON layer over a backend.
pub struct Storage {
    backend: Option<Box<dyn StorageBackend>>,
}

impl Storage {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    /// A storage with no medium at all. Reads return defaults, writes are
    /// no-ops — the degraded mode for contexts without persistence.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    fn available_backend(&self) -> Option<&dyn StorageBackend> {
        self.backend
            .as_deref()
            .filter(|backend| backend.is_available())
    }

    /// Reads and deserializes the value under `key`. A missing medium,
    /// missing key or corrupt payload all yield `default`.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        let Some(backend) = self.available_backend() else {
            return default;
        };
        let Some(raw) = backend.read(key.as_str()) else {
            return default;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("discarding corrupt value under {}: {}", key.as_str(), err);
                default
            }
        }
    }

    /// Serializes and writes `value` under `key`. Best-effort: failures are
    /// logged and the in-memory state is never rolled back.
    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        let Some(backend) = self.available_backend() else {
            return;
        };
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                log::error!("failed to serialize value for {}: {}", key.as_str(), err);
                return;
            }
        };
        if let Err(err) = backend.write(key.as_str(), &payload) {
            log::error!("failed to persist {}: {}", key.as_str(), err);
        }
    }

    /// Removes the value under `key`, if any.
    pub fn remove(&self, key: StorageKey) {
        let Some(backend) = self.available_backend() else {
            return;
        };
        if let Err(err) = backend.delete(key.as_str()) {
            log::error!("failed to remove {}: {}", key.as_str(), err);
        }
    }

    /// Removes every key this application owns. Foreign keys sharing the
    /// medium are left alone.
    pub fn clear(&self) {
        for key in StorageKey::ALL {
            self.remove(key);
        }
    }
}
