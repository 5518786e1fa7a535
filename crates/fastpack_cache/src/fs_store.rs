use std::path::PathBuf;

use fastpack_error::cache_corruption;

use crate::{CacheEntry, CacheKey, CacheStore};

/// Content-addressed on-disk store: one JSON file per key under the cache
/// directory. Writes go through a temp file plus rename so a cancelled or
/// crashed build never leaves a partially-written entry behind.
pub struct FsCacheStore {
  dir: PathBuf,
}

impl FsCacheStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  fn entry_path(&self, key: &CacheKey) -> PathBuf {
    self.dir.join(format!("{}.json", key.storage_key()))
  }
}

impl CacheStore for FsCacheStore {
  fn get(&self, key: &CacheKey) -> anyhow::Result<Option<CacheEntry>> {
    let path = self.entry_path(key);
    let bytes = match std::fs::read(&path) {
      Ok(bytes) => bytes,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
      Err(err) => return Err(err.into()),
    };
    match serde_json::from_slice(&bytes) {
      Ok(entry) => Ok(Some(entry)),
      Err(err) => {
        // Stored entry is unreadable: treat as a miss and recompute.
        tracing::warn!("{}", cache_corruption(&key.storage_key(), err));
        let _ = std::fs::remove_file(&path);
        Ok(None)
      }
    }
  }

  fn put(&self, key: &CacheKey, entry: &CacheEntry) -> anyhow::Result<()> {
    std::fs::create_dir_all(&self.dir)?;
    let path = self.entry_path(key);
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_vec(entry)?)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
  }

  fn invalidate(&self, key: &CacheKey) -> anyhow::Result<()> {
    match std::fs::remove_file(self.entry_path(key)) {
      Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
      _ => Ok(()),
    }
  }
}
