mod build_cache;
mod entry;
mod fs_store;
mod key;
mod memory;
mod store;

pub use crate::{
  build_cache::BuildCache,
  entry::CacheEntry,
  fs_store::FsCacheStore,
  key::CacheKey,
  memory::MemoryCacheStore,
  store::{CacheStore, NullCacheStore},
};
