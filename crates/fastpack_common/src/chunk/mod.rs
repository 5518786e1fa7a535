pub mod chunk_table;

use arcstr::ArcStr;

use crate::ModuleIdx;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkKind {
  /// Seeded from a user-defined entry point; always loaded first.
  Entry { module: ModuleIdx },
  /// Seeded from a dynamically-imported module group.
  Async { module: ModuleIdx },
  /// Materialized by a cache group during splitting.
  Shared { group: String },
}

/// A named group of modules destined for one output file. The final chunk
/// assignment is a total, disjoint cover of all reachable modules.
#[derive(Debug)]
pub struct Chunk {
  pub name: ArcStr,
  pub kind: ChunkKind,
  pub modules: Vec<ModuleIdx>,
  /// Cache-group priority for shared chunks; 0 for seeds.
  pub priority: i32,
  /// Loaded on first page load: entry chunks and shared chunks an entry
  /// depends on. Drives request accounting and html injection.
  pub is_initial: bool,
  pub exec_order: u32,
  /// Final rendered filename, set by the generate stage.
  pub filename: Option<String>,
  pub css_filename: Option<String>,
}

impl Chunk {
  pub fn new(name: ArcStr, kind: ChunkKind) -> Self {
    let is_initial = matches!(kind, ChunkKind::Entry { .. });
    Self {
      name,
      kind,
      modules: Vec::new(),
      priority: 0,
      is_initial,
      exec_order: u32::MAX,
      filename: None,
      css_filename: None,
    }
  }
}
