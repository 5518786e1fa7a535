use fastpack_utils::xxhash::xxhash_hex;

/// Cache key: a hit is valid only if all three components match exactly.
/// Invalidation is purely key-based; there is no TTL and no manual eviction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
  pub module_id: String,
  pub content_fingerprint: String,
  pub config_fingerprint: String,
}

impl CacheKey {
  pub fn new(
    module_id: impl Into<String>,
    content_fingerprint: impl Into<String>,
    config_fingerprint: impl Into<String>,
  ) -> Self {
    Self {
      module_id: module_id.into(),
      content_fingerprint: content_fingerprint.into(),
      config_fingerprint: config_fingerprint.into(),
    }
  }

  /// Stable name for the persisted entry file.
  pub fn storage_key(&self) -> String {
    let composite =
      format!("{}\0{}\0{}", self.module_id, self.content_fingerprint, self.config_fingerprint);
    xxhash_hex(composite.as_bytes())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn storage_key_is_sensitive_to_every_component() {
    let base = CacheKey::new("/app/src/a.js", "c1", "k1");
    assert_eq!(base.storage_key(), CacheKey::new("/app/src/a.js", "c1", "k1").storage_key());
    assert_ne!(base.storage_key(), CacheKey::new("/app/src/b.js", "c1", "k1").storage_key());
    assert_ne!(base.storage_key(), CacheKey::new("/app/src/a.js", "c2", "k1").storage_key());
    assert_ne!(base.storage_key(), CacheKey::new("/app/src/a.js", "c1", "k2").storage_key());
  }
}
