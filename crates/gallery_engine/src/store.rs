use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

pub const MAX_KEY_LENGTH: usize = 128;

const VALUE_EXTENSION: &str = "kv";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// String key-value storage with whole-value overwrite semantics.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store; contents are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    values: HashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    writer: AtomicFileWriter,
}

impl FileKvStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }

    fn file_name(key: &str) -> String {
        format!("{key}.{VALUE_EXTENSION}")
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let path = self.dir().join(Self::file_name(key));
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.writer.write(&Self::file_name(key), value)?;
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let reason = if key.trim().is_empty() {
        "key cannot be empty"
    } else if key.len() > MAX_KEY_LENGTH {
        "key is too long"
    } else if key.contains("..") {
        "key cannot contain path traversal sequences"
    } else if key.contains(|c: char| c == '/' || c == '\\') {
        "key cannot contain path separators"
    } else if key.chars().any(char::is_control) {
        "key contains control characters"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidKey {
        key: key.chars().take(50).collect(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_keys() {
        assert!(validate_key("favoriteCats").is_ok());
        assert!(validate_key("a-b_c.1").is_ok());
    }

    #[test]
    fn rejects_unsafe_keys() {
        for key in ["", "  ", "../etc", "a/b", "a\\b", "a\0b", "line\nbreak"] {
            assert!(
                matches!(validate_key(key), Err(StoreError::InvalidKey { .. })),
                "key {key:?}"
            );
        }
        let long = "k".repeat(MAX_KEY_LENGTH + 1);
        assert!(validate_key(&long).is_err());
    }
}
