use xxhash_rust::xxh3::{xxh3_128, xxh3_64};

/// Content fingerprint used for cache keys. Stable across runs for the same
/// input bytes.
pub fn xxhash_hex(input: &[u8]) -> String {
  format!("{:016x}", xxh3_64(input))
}

/// Short hash for filename templates. `len` is clamped to the 32 hex chars a
/// 128-bit hash provides.
pub fn xxhash_short(input: &[u8], len: usize) -> String {
  let mut hex = format!("{:032x}", xxh3_128(input));
  hex.truncate(len.min(32));
  hex
}

#[test]
fn test_xxhash_hex() {
  assert_eq!(xxhash_hex(b"hello"), xxhash_hex(b"hello"));
  assert_ne!(xxhash_hex(b"hello"), xxhash_hex(b"hello!"));
  assert_eq!(xxhash_hex(b"hello").len(), 16);
}

#[test]
fn test_xxhash_short() {
  assert_eq!(xxhash_short(b"hello", 8).len(), 8);
  assert!(xxhash_short(b"hello", 32).starts_with(&xxhash_short(b"hello", 8)));
}
