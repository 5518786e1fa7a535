pub mod module_table;

use arcstr::ArcStr;

use crate::{AssetClass, ModuleId, ModuleIdx, Source};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
  /// A script module participating in the JS output of its chunk.
  Normal,
  /// An extracted stylesheet fragment (virtual module).
  Stylesheet,
  /// A binary asset subject to the inline-or-emit policy.
  Asset(AssetClass),
}

#[derive(Debug)]
pub struct Module {
  pub idx: ModuleIdx,
  pub id: ModuleId,
  pub kind: ModuleKind,
  pub source: Source,
  /// Output of the transform chain. Empty for raw assets.
  pub transformed: ArcStr,
  /// Content fingerprint of the raw source, part of the cache key.
  pub fingerprint: String,
  pub static_deps: Vec<ModuleIdx>,
  pub dynamic_deps: Vec<ModuleIdx>,
  pub exec_order: u32,
  /// Cleared for modules unreachable from any entry after graph pruning.
  pub is_alive: bool,
}

impl Module {
  /// Size estimate used by the chunk splitter and the asset policy.
  pub fn byte_size(&self) -> u64 {
    match self.kind {
      ModuleKind::Asset(_) => self.source.byte_len(),
      _ => self.transformed.len() as u64,
    }
  }
}
