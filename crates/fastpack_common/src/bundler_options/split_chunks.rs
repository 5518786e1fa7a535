use serde::Deserialize;

use crate::RuleCondition;

/// Which seed chunks a cache group may draw shared modules from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkMode {
  All,
  #[default]
  Async,
  Initial,
}

/// A named extraction policy: which modules may move into a shared chunk and
/// under what size/priority constraints. Higher priority claims first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
  pub name: String,
  /// Absent test means "any shared module".
  #[serde(default)]
  pub test: Option<RuleCondition>,
  #[serde(default)]
  pub priority: i32,
  /// Overrides the top-level `min_chunks` for this group.
  #[serde(default)]
  pub min_chunks: Option<u32>,
  #[serde(default)]
  pub min_size: Option<u64>,
  /// Greedy cap: the group stops claiming modules once adding another would
  /// exceed this size.
  #[serde(default)]
  pub max_size: Option<u64>,
  /// Overrides the top-level `chunks` mode for this group.
  #[serde(default)]
  pub chunks: Option<ChunkMode>,
  #[serde(default = "default_true")]
  pub reuse_existing_chunk: bool,
}

fn default_true() -> bool {
  true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitChunksOptions {
  pub chunks: ChunkMode,
  /// Minimum aggregate size before a candidate shared chunk is materialized.
  pub min_size: u64,
  /// A seed chunk must keep at least this many bytes after extraction.
  pub min_remaining_size: u64,
  /// Minimum number of chunks that must share a module before extraction.
  pub min_chunks: u32,
  pub max_async_requests: u32,
  pub max_initial_requests: u32,
  /// Groups at or above this size skip `min_size` and the request ceilings.
  pub enforce_size_threshold: u64,
  pub cache_groups: Vec<CacheGroup>,
}

impl Default for SplitChunksOptions {
  fn default() -> Self {
    Self {
      chunks: ChunkMode::Async,
      min_size: 20_000,
      min_remaining_size: 0,
      min_chunks: 1,
      max_async_requests: 5,
      max_initial_requests: 3,
      enforce_size_threshold: 50_000,
      cache_groups: default_cache_groups(),
    }
  }
}

/// The stock `defaultVendors`/`default` groups every configuration starts
/// from; user groups are appended after these.
pub fn default_cache_groups() -> Vec<CacheGroup> {
  vec![
    CacheGroup {
      name: "vendors".to_string(),
      test: Some(RuleCondition::regex(r"[\\/]node_modules[\\/]").expect("static pattern")),
      priority: -10,
      min_chunks: None,
      min_size: None,
      max_size: None,
      chunks: None,
      reuse_existing_chunk: true,
    },
    CacheGroup {
      name: "default".to_string(),
      test: None,
      priority: -20,
      min_chunks: Some(2),
      min_size: None,
      max_size: None,
      chunks: None,
      reuse_existing_chunk: true,
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_stock_policy() {
    let options = SplitChunksOptions::default();
    assert_eq!(options.chunks, ChunkMode::Async);
    assert_eq!(options.min_size, 20_000);
    assert_eq!(options.max_initial_requests, 3);
    assert_eq!(options.cache_groups.len(), 2);
    assert_eq!(options.cache_groups[0].name, "vendors");
    assert_eq!(options.cache_groups[0].priority, -10);
  }
}
