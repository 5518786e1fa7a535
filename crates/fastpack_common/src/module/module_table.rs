use std::ops::{Deref, DerefMut};

use oxc_index::IndexVec;

use crate::{Module, ModuleIdx};

#[derive(Debug, Default)]
pub struct ModuleTable {
  pub modules: IndexVec<ModuleIdx, Module>,
}

impl Deref for ModuleTable {
  type Target = IndexVec<ModuleIdx, Module>;

  fn deref(&self) -> &Self::Target {
    &self.modules
  }
}

impl DerefMut for ModuleTable {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.modules
  }
}

impl ModuleTable {
  pub fn new(modules: IndexVec<ModuleIdx, Module>) -> Self {
    Self { modules }
  }
}
