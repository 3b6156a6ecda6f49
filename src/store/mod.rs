//! String key-value persistence used for history, streak and accounts.

mod background;
mod memory;
mod sqlite;

pub use background::BackgroundStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub const HISTORY_KEY: &str = "typing-history-v2";
pub const STREAK_KEY: &str = "typing-streak";
pub const SESSION_KEY: &str = "typingUserSession";
pub const USER_KEY_PREFIX: &str = "user-";

/// Storage key of a local account record.
pub fn user_key(email: &str) -> String {
    format!("{USER_KEY_PREFIX}{email}")
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage worker is no longer running")]
    Disconnected,

    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Read and decode a JSON value.
///
/// Missing keys, unreadable storage and malformed JSON all come back as
/// `None`; the failure is logged rather than returned.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("failed to read {key}: {e}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring malformed value under {key}: {e}");
            None
        }
    }
}

/// Encode a value as JSON and write it.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Store whose reads and writes always fail.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Disconnected)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Disconnected)
        }
    }
}
