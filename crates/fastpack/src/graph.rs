use fastpack_common::{Chunk, ChunkIdx, ChunkTable, ModuleIdx, ModuleTable};
use oxc_index::{index_vec, IndexVec};

/// Final chunk assignment: a total, disjoint cover of all alive modules.
#[derive(Debug)]
pub struct ChunkGraph {
  pub chunk_table: ChunkTable,
  pub sorted_chunk_idx_vec: Vec<ChunkIdx>,
  pub module_to_chunk: IndexVec<ModuleIdx, Option<ChunkIdx>>,
}

impl ChunkGraph {
  pub fn new(modules: &ModuleTable) -> Self {
    Self {
      chunk_table: ChunkTable::default(),
      module_to_chunk: index_vec![None; modules.len()],
      sorted_chunk_idx_vec: Vec::new(),
    }
  }

  pub fn add_chunk(&mut self, chunk: Chunk) -> ChunkIdx {
    self.chunk_table.push(chunk)
  }

  pub fn add_module_to_chunk(&mut self, module_idx: ModuleIdx, chunk_idx: ChunkIdx) {
    self.chunk_table[chunk_idx].modules.push(module_idx);
    self.module_to_chunk[module_idx] = Some(chunk_idx);
  }
}
