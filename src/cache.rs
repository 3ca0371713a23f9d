//! Durable per-reward cache of raw orders responses.
//!
//! One file per normalized reward key: the first line is a decimal
//! epoch timestamp, the rest is the verbatim response body. An
//! in-memory timestamp index mirrors the directory; it is built by a
//! single scan at startup and holds an entry iff a durable record
//! exists.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::error::CacheError;

/// Maximum age before a cached entry is considered stale.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Normalize a human-readable item name into the identifier used both
/// as the cache key and as the remote URL path segment.
pub fn cache_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

pub struct CacheStore {
    dir: PathBuf,
    index: HashMap<String, i64>,
}

impl CacheStore {
    /// Open the store, creating the directory if absent, and build the
    /// timestamp index from the leading line of every record. A record
    /// with a missing or non-numeric timestamp is fatal.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, CacheError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| CacheError::Dir {
            path: dir.clone(),
            source: e,
        })?;

        let mut index = HashMap::new();
        let entries = fs::read_dir(&dir).map_err(|e| CacheError::Dir {
            path: dir.clone(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| CacheError::Dir {
                path: dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let contents = fs::read_to_string(&path).map_err(|e| CacheError::ReadRecord {
                path: path.clone(),
                source: e,
            })?;
            let first_line = contents.lines().next().unwrap_or("");
            // Accept fractional epochs; older records stored them.
            let fetched_at: f64 = first_line.trim().parse().map_err(|_| {
                CacheError::MalformedTimestamp {
                    path: path.clone(),
                    reason: format!("expected numeric epoch, got '{first_line}'"),
                }
            })?;

            let key = entry.file_name().to_string_lossy().into_owned();
            index.insert(key, fetched_at as i64);
        }

        debug!(entries = index.len(), dir = %dir.display(), "cache index built");
        Ok(Self { dir, index })
    }

    /// Return the cached payload for `key` iff an index entry exists
    /// and is younger than `max_age`. The timestamp line is stripped.
    pub fn get(&self, key: &str, max_age: Duration) -> Result<Option<String>, CacheError> {
        let Some(&fetched_at) = self.index.get(key) else {
            return Ok(None);
        };

        let age = Utc::now().timestamp() - fetched_at;
        if age >= max_age.as_secs() as i64 {
            return Ok(None);
        }

        let path = self.dir.join(key);
        let contents = fs::read_to_string(&path).map_err(|e| CacheError::ReadRecord {
            path: path.clone(),
            source: e,
        })?;
        let body = contents
            .split_once('\n')
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_default();

        Ok(Some(body))
    }

    /// Overwrite the record for `key` with a fresh timestamp and the
    /// verbatim body, and update the index. No multi-version history.
    pub fn put(&mut self, key: &str, body: &str) -> Result<(), CacheError> {
        let now = Utc::now().timestamp();
        let path = self.dir.join(key);
        fs::write(&path, format!("{now}\n{body}")).map_err(|e| CacheError::WriteRecord {
            path: path.clone(),
            source: e,
        })?;

        self.index.insert(key.to_string(), now);
        Ok(())
    }
}
