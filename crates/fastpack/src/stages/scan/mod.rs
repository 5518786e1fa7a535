use std::sync::Arc;

use arcstr::ArcStr;
use oxc_index::{index_vec, IndexVec};

use fastpack_cache::BuildCache;
use fastpack_common::{
  CancelToken, EntryPoint, EntryPointKind, ModuleId, ModuleIdx, ModuleRule, ModuleTable,
};
use fastpack_error::{configuration_error, BuildResult};

use crate::{
  module_loader::{ModuleLoader, ModuleLoaderOutput},
  transforms::TransformRegistry,
  types::{SharedCollaborators, SharedFileSystem, SharedOptions},
  utils::resolve_id::resolve_id,
};

pub type ScanStageOutput = ModuleLoaderOutput;

/// Resolves the configured entries and loads the full module graph behind
/// them, then fixes execution order and liveness so later stages see a
/// deterministic view.
pub struct ScanStage {
  fs: SharedFileSystem,
  options: SharedOptions,
  registry: Arc<TransformRegistry>,
  collaborators: SharedCollaborators,
  cache: Arc<BuildCache>,
  cancel: CancelToken,
}

impl ScanStage {
  pub fn new(
    fs: SharedFileSystem,
    options: SharedOptions,
    registry: Arc<TransformRegistry>,
    collaborators: SharedCollaborators,
    cache: Arc<BuildCache>,
    cancel: CancelToken,
  ) -> Self {
    Self { fs, options, registry, collaborators, cache, cancel }
  }

  pub async fn scan(self, rules: Vec<ModuleRule>) -> BuildResult<ScanStageOutput> {
    if self.options.input.is_empty() {
      return Err(configuration_error("at least one entry is required in `input`").into());
    }

    let mut entries: Vec<(Option<ArcStr>, ModuleId)> = Vec::with_capacity(self.options.input.len());
    let single_entry = self.options.input.len() == 1;
    for item in &self.options.input {
      let id = resolve_id(&*self.fs, &self.options, &item.import, None)?;
      let name = match (&item.name, single_entry) {
        (Some(name), _) => Some(ArcStr::from(name.as_str())),
        (None, true) => Some(arcstr::literal!("main")),
        (None, false) => Some(ArcStr::from(id.file_stem())),
      };
      entries.push((name, id));
    }

    let loader = ModuleLoader::new(
      self.fs,
      self.options,
      self.registry,
      self.collaborators,
      self.cache,
      self.cancel,
      rules,
    );
    let mut output = loader.fetch_all_modules(entries).await?;

    sort_dynamic_entries(&mut output.entry_points, &output.module_table);
    assign_exec_order(&mut output.module_table, &output.entry_points);
    Ok(output)
  }
}

/// Discovery order of dynamic imports depends on task completion; sorting by
/// module id keeps seed order, and with it chunk naming, reproducible.
fn sort_dynamic_entries(entry_points: &mut [EntryPoint], modules: &ModuleTable) {
  let user_count =
    entry_points.iter().take_while(|entry| entry.kind == EntryPointKind::UserDefined).count();
  entry_points[user_count..].sort_by(|a, b| modules[a.idx].id.cmp(&modules[b.idx].id));
}

/// Depth-first postorder from the entries: dependencies execute before their
/// importers. Modules never reached stay dead and are excluded from chunks.
fn assign_exec_order(modules: &mut ModuleTable, entry_points: &[EntryPoint]) {
  let mut pushed: IndexVec<ModuleIdx, bool> = index_vec![false; modules.len()];
  for module in &mut modules.modules {
    module.is_alive = false;
  }

  let mut order = 0u32;
  let mut stack: Vec<(ModuleIdx, usize)> = Vec::new();
  for entry in entry_points {
    if pushed[entry.idx] {
      continue;
    }
    pushed[entry.idx] = true;
    stack.push((entry.idx, 0));
    while let Some((idx, cursor)) = stack.last().copied() {
      match next_dep(&modules[idx], cursor) {
        Some(dep) => {
          if let Some(last) = stack.last_mut() {
            last.1 += 1;
          }
          if !pushed[dep] {
            pushed[dep] = true;
            stack.push((dep, 0));
          }
        }
        None => {
          stack.pop();
          modules[idx].exec_order = order;
          modules[idx].is_alive = true;
          order += 1;
        }
      }
    }
  }
}

fn next_dep(module: &fastpack_common::Module, cursor: usize) -> Option<ModuleIdx> {
  if cursor < module.static_deps.len() {
    module.static_deps.get(cursor).copied()
  } else {
    module.dynamic_deps.get(cursor - module.static_deps.len()).copied()
  }
}
