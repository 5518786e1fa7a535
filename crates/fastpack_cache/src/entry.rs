use serde::{Deserialize, Serialize};

use fastpack_common::SideArtifact;

/// Persisted result of one module's transform chain, including the import
/// scan, so a hit skips both transforming and scanning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
  pub transformed: String,
  pub side_artifacts: Vec<SideArtifact>,
  pub static_specifiers: Vec<String>,
  pub dynamic_specifiers: Vec<String>,
}
