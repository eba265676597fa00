//! # JSON Store
//!
//! A small key/value store of JSON documents, one file per key, used to keep
//! report data between runs. Every operation fails soft: problems are logged
//! and the caller gets its fallback value (or `false`) instead of an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A directory of `<key>.json` files.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Use `dir` as the store. It is created on the first save.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`. Characters other than ASCII
    /// alphanumerics, `-`, `_` and `.` are replaced so keys cannot escape
    /// the store directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let safe = safe.trim_start_matches('.');
        let safe = if safe.is_empty() { "_" } else { safe };
        self.dir.join(format!("{}.json", safe))
    }

    /// Load the value stored under `key`, or `fallback` if it is missing or
    /// unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let path = self.path_for(key);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no stored value for {:?}", key);
                return fallback;
            }
            Err(e) => {
                log::warn!("failed to read {}: {}", path.display(), e);
                return fallback;
            }
        };
        match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("stored value for {:?} is not valid: {}", key, e);
                fallback
            }
        }
    }

    /// Store `value` under `key`. Returns whether it was written.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize value for {:?}: {}", key, e);
                return false;
            }
        };
        if let Err(e) = fs::create_dir_all(&self.dir) {
            log::warn!("failed to create store directory {}: {}", self.dir.display(), e);
            return false;
        }
        let path = self.path_for(key);
        match fs::write(&path, json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("failed to write {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Delete the value stored under `key`. Returns whether a value was
    /// removed.
    pub fn remove(&self, key: &str) -> bool {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                log::warn!("failed to remove {}: {}", path.display(), e);
                false
            }
        }
    }
}
