use std::{future::Future, sync::Arc};

use dashmap::DashMap;
use tokio::sync::OnceCell;

use fastpack_error::BuildResult;

use crate::{CacheEntry, CacheKey, CacheStore, NullCacheStore};

/// Per-module transform cache with at-most-one concurrent compute per key.
/// The second caller for an in-flight key awaits the first caller's result
/// instead of recomputing.
pub struct BuildCache {
  store: Arc<dyn CacheStore>,
  inflight: DashMap<CacheKey, Arc<OnceCell<CacheEntry>>>,
}

impl BuildCache {
  pub fn new(store: Arc<dyn CacheStore>) -> Self {
    Self { store, inflight: DashMap::default() }
  }

  pub fn disabled() -> Self {
    Self::new(Arc::new(NullCacheStore))
  }

  /// Returns the cached entry for `key`, computing and persisting it on a
  /// miss. `compute` failing leaves no trace in the store, so a cancelled
  /// build cannot commit partial entries.
  pub async fn get_or_compute<F, Fut>(&self, key: CacheKey, compute: F) -> BuildResult<CacheEntry>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = BuildResult<CacheEntry>>,
  {
    let cell = Arc::clone(self.inflight.entry(key.clone()).or_default().value());
    let result = cell
      .get_or_try_init(|| async {
        if let Some(hit) = self.store.get(&key).map_err(fastpack_error::BuildError::from)? {
          tracing::debug!(module = key.module_id, "cache hit");
          return Ok(hit);
        }
        tracing::debug!(module = key.module_id, "cache miss");
        let computed = compute().await?;
        self.store.put(&key, &computed).map_err(fastpack_error::BuildError::from)?;
        Ok(computed)
      })
      .await
      .cloned();
    // Deduplication only matters while the compute is running; once it has
    // settled, later callers are served (or retried) through the store.
    // Keeping settled cells around would retain one entry per content
    // fingerprint for the lifetime of the cache.
    self.inflight.remove(&key);
    result
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;
  use crate::MemoryCacheStore;

  fn entry(content: &str) -> CacheEntry {
    CacheEntry {
      transformed: content.to_string(),
      side_artifacts: vec![],
      static_specifiers: vec![],
      dynamic_specifiers: vec![],
    }
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
  async fn concurrent_requests_compute_once() {
    let cache = Arc::new(BuildCache::new(Arc::new(MemoryCacheStore::default())));
    let computed = Arc::new(AtomicUsize::new(0));
    let key = CacheKey::new("/app/a.js", "c1", "k1");

    let (first, second) = tokio::join!(
      {
        let cache = Arc::clone(&cache);
        let computed = Arc::clone(&computed);
        let key = key.clone();
        async move {
          cache
            .get_or_compute(key, || async {
              // Hold the in-flight slot long enough for the second caller
              // to pile up behind it.
              tokio::time::sleep(std::time::Duration::from_millis(20)).await;
              computed.fetch_add(1, Ordering::SeqCst);
              Ok(entry("result"))
            })
            .await
        }
      },
      {
        let cache = Arc::clone(&cache);
        let computed = Arc::clone(&computed);
        let key = key.clone();
        async move {
          cache
            .get_or_compute(key, || async {
              computed.fetch_add(1, Ordering::SeqCst);
              Ok(entry("result"))
            })
            .await
        }
      }
    );

    assert_eq!(computed.load(Ordering::SeqCst), 1);
    assert_eq!(first.unwrap().transformed, "result");
    assert_eq!(second.unwrap().transformed, "result");
  }

  #[tokio::test]
  async fn cached_result_is_byte_identical_to_fresh_compute() {
    let store = Arc::new(MemoryCacheStore::default());
    let cache = BuildCache::new(Arc::clone(&store) as Arc<dyn CacheStore>);
    let key = CacheKey::new("/app/a.js", "c1", "k1");

    let fresh = cache.get_or_compute(key.clone(), || async { Ok(entry("fresh")) }).await.unwrap();

    // Same fingerprints on a new cache front-end: must hit, not recompute.
    let cache = BuildCache::new(store as Arc<dyn CacheStore>);
    let hit = cache
      .get_or_compute(key, || async { panic!("unchanged fingerprint must not recompute") })
      .await
      .unwrap();
    assert_eq!(hit.transformed, fresh.transformed);
  }

  #[tokio::test]
  async fn settled_computes_leave_no_inflight_entries() {
    let cache = BuildCache::new(Arc::new(MemoryCacheStore::default()));

    cache
      .get_or_compute(CacheKey::new("/app/a.js", "c1", "k1"), || async { Ok(entry("result")) })
      .await
      .unwrap();
    assert!(cache.inflight.is_empty(), "successful compute must release its slot");

    // Every edit of a file mints a new content fingerprint, so retained
    // slots would grow without bound across rebuilds.
    for revision in 0..16 {
      let key = CacheKey::new("/app/a.js", format!("c{revision}"), "k1");
      cache.get_or_compute(key, || async { Ok(entry("result")) }).await.unwrap();
    }
    assert!(cache.inflight.is_empty());

    let failing = CacheKey::new("/app/b.js", "c1", "k1");
    let result = cache
      .get_or_compute(failing, || async { Err(anyhow::anyhow!("boom").into()) })
      .await;
    assert!(result.is_err());
    assert!(cache.inflight.is_empty(), "failed compute must release its slot");
  }

  #[tokio::test]
  async fn failed_compute_persists_nothing() {
    let store = Arc::new(MemoryCacheStore::default());
    let cache = BuildCache::new(Arc::clone(&store) as Arc<dyn CacheStore>);
    let key = CacheKey::new("/app/a.js", "c1", "k1");

    let result = cache
      .get_or_compute(key, || async { Err(anyhow::anyhow!("cancelled").into()) })
      .await;
    assert!(result.is_err());
    assert!(store.is_empty());
  }
}
