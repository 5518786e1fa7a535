use dashmap::DashMap;

use crate::{CacheEntry, CacheKey, CacheStore};

/// In-memory store for tests and single-invocation builds.
#[derive(Default)]
pub struct MemoryCacheStore {
  entries: DashMap<String, CacheEntry>,
}

impl MemoryCacheStore {
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl CacheStore for MemoryCacheStore {
  fn get(&self, key: &CacheKey) -> anyhow::Result<Option<CacheEntry>> {
    Ok(self.entries.get(&key.storage_key()).map(|entry| entry.value().clone()))
  }

  fn put(&self, key: &CacheKey, entry: &CacheEntry) -> anyhow::Result<()> {
    self.entries.insert(key.storage_key(), entry.clone());
    Ok(())
  }

  fn invalidate(&self, key: &CacheKey) -> anyhow::Result<()> {
    self.entries.remove(&key.storage_key());
    Ok(())
  }
}
