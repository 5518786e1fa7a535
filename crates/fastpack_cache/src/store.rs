use crate::{CacheEntry, CacheKey};

/// Key-value persistence behind the build cache, swappable for an in-memory
/// store in tests. Implementations own their storage exclusively; the
/// [`crate::BuildCache`] serializes writers per key above this trait.
pub trait CacheStore: Send + Sync {
  /// `Ok(None)` is a miss. An unreadable entry is also a miss, never an
  /// error: corruption triggers recompute.
  fn get(&self, key: &CacheKey) -> anyhow::Result<Option<CacheEntry>>;

  fn put(&self, key: &CacheKey, entry: &CacheEntry) -> anyhow::Result<()>;

  fn invalidate(&self, key: &CacheKey) -> anyhow::Result<()>;
}

/// Store used when caching is disabled: always misses, never persists.
pub struct NullCacheStore;

impl CacheStore for NullCacheStore {
  fn get(&self, _key: &CacheKey) -> anyhow::Result<Option<CacheEntry>> {
    Ok(None)
  }

  fn put(&self, _key: &CacheKey, _entry: &CacheEntry) -> anyhow::Result<()> {
    Ok(())
  }

  fn invalidate(&self, _key: &CacheKey) -> anyhow::Result<()> {
    Ok(())
  }
}
