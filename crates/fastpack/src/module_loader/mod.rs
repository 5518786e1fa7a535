pub mod module_task;
pub mod task_context;

use std::sync::Arc;

use arcstr::ArcStr;
use oxc_index::IndexVec;
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::sync::{
  mpsc::{channel, Receiver},
  Semaphore,
};

use fastpack_cache::BuildCache;
use fastpack_common::{
  CancelToken, EntryPoint, EntryPointKind, Module, ModuleId, ModuleIdx, ModuleKind, ModuleRule,
  ModuleTable, SideArtifact,
};
use fastpack_error::{is_build_cancelled, BuildError, BuildResult};

use crate::{
  module_loader::{
    module_task::{ModuleTask, ProvidedSource},
    task_context::TaskContext,
  },
  transforms::TransformRegistry,
  types::{SharedCollaborators, SharedFileSystem, SharedOptions},
  utils::{resolve_id::resolve_id, rule_matcher::RuleMatcher},
};

pub struct ModuleTaskResult {
  pub idx: ModuleIdx,
  pub module: Module,
  pub static_specifiers: Vec<String>,
  pub dynamic_specifiers: Vec<String>,
  pub side_artifacts: Vec<SideArtifact>,
}

pub enum ModuleLoaderMsg {
  TaskResult(Box<ModuleTaskResult>),
  Error(BuildError),
}

pub struct ModuleLoaderOutput {
  pub module_table: ModuleTable,
  pub entry_points: Vec<EntryPoint>,
  pub warnings: Vec<anyhow::Error>,
}

/// Fans module work out over spawned tasks and folds results back into a
/// stable module table. Discovery order is nondeterministic; everything
/// downstream orders by id or execution order, never by index.
pub struct ModuleLoader {
  ctx: Arc<TaskContext>,
  rx: Receiver<ModuleLoaderMsg>,
  visited: FxHashMap<ModuleId, ModuleIdx>,
  intermediate: IndexVec<ModuleIdx, Option<Module>>,
  remaining: u32,
}

impl ModuleLoader {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    fs: SharedFileSystem,
    options: SharedOptions,
    registry: Arc<TransformRegistry>,
    collaborators: SharedCollaborators,
    cache: Arc<BuildCache>,
    cancel: CancelToken,
    rules: Vec<ModuleRule>,
  ) -> Self {
    let (tx, rx) = channel(1024);
    let ctx = Arc::new(TaskContext {
      fs,
      permits: Semaphore::new(options.worker_count.max(1)),
      options,
      registry,
      collaborators,
      cache,
      cancel,
      matcher: RuleMatcher::new(rules),
      tx,
    });
    Self { ctx, rx, visited: FxHashMap::default(), intermediate: IndexVec::new(), remaining: 0 }
  }

  fn try_spawn(&mut self, id: ModuleId, provided: Option<ProvidedSource>) -> ModuleIdx {
    if let Some(idx) = self.visited.get(&id) {
      return *idx;
    }
    let idx = self.intermediate.push(None);
    self.visited.insert(id.clone(), idx);
    self.remaining += 1;
    let task = ModuleTask::new(Arc::clone(&self.ctx), idx, id, provided);
    tokio::spawn(task.run());
    idx
  }

  pub async fn fetch_all_modules(
    mut self,
    entries: Vec<(Option<ArcStr>, ModuleId)>,
  ) -> BuildResult<ModuleLoaderOutput> {
    let mut errors: Vec<anyhow::Error> = Vec::new();
    let mut entry_points = Vec::with_capacity(entries.len());
    let mut dynamic_entry_modules: FxHashSet<ModuleIdx> = FxHashSet::default();

    for (name, id) in entries {
      let idx = self.try_spawn(id, None);
      if !entry_points.iter().any(|entry: &EntryPoint| entry.idx == idx) {
        entry_points.push(EntryPoint { idx, name, kind: EntryPointKind::UserDefined });
      }
      dynamic_entry_modules.insert(idx);
    }

    while self.remaining > 0 {
      let Some(msg) = self.rx.recv().await else { break };
      self.remaining -= 1;
      match msg {
        ModuleLoaderMsg::TaskResult(result) => {
          self.handle_result(*result, &mut entry_points, &mut dynamic_entry_modules, &mut errors);
        }
        ModuleLoaderMsg::Error(build_error) => {
          errors.extend(build_error.0);
          self.ctx.cancel.cancel();
        }
      }
    }

    if !errors.is_empty() {
      // The first real failure cancels the still-queued tasks; each of
      // those then reports a cancellation. Only the root cause is worth
      // surfacing.
      if errors.iter().any(|error| !is_build_cancelled(error)) {
        errors.retain(|error| !is_build_cancelled(error));
      }
      return Err(errors.into());
    }

    let mut module_table = ModuleTable::default();
    for slot in self.intermediate {
      match slot {
        Some(module) => {
          module_table.push(module);
        }
        None => return Err(anyhow::anyhow!("module discovery finished with an unfilled slot").into()),
      }
    }
    Ok(ModuleLoaderOutput { module_table, entry_points, warnings: Vec::new() })
  }

  fn handle_result(
    &mut self,
    mut result: ModuleTaskResult,
    entry_points: &mut Vec<EntryPoint>,
    dynamic_entry_modules: &mut FxHashSet<ModuleIdx>,
    errors: &mut Vec<anyhow::Error>,
  ) {
    // Side artifacts become virtual modules wired in as static deps of the
    // emitter, so they travel with the emitter's chunk.
    for artifact in std::mem::take(&mut result.side_artifacts) {
      let virtual_id = ModuleId::new(format!("{}|{}", result.module.id, artifact.name));
      let kind = match artifact.kind {
        fastpack_common::ArtifactKind::Stylesheet => ModuleKind::Stylesheet,
      };
      let idx =
        self.try_spawn(virtual_id, Some(ProvidedSource { source: artifact.source, kind }));
      result.module.static_deps.push(idx);
    }

    for specifier in std::mem::take(&mut result.static_specifiers) {
      match resolve_id(&*self.ctx.fs, &self.ctx.options, &specifier, Some(&result.module.id)) {
        Ok(id) => {
          let idx = self.try_spawn(id, None);
          result.module.static_deps.push(idx);
        }
        Err(err) => {
          errors.push(err);
          self.ctx.cancel.cancel();
        }
      }
    }

    for specifier in std::mem::take(&mut result.dynamic_specifiers) {
      match resolve_id(&*self.ctx.fs, &self.ctx.options, &specifier, Some(&result.module.id)) {
        Ok(id) => {
          let idx = self.try_spawn(id, None);
          result.module.dynamic_deps.push(idx);
          if dynamic_entry_modules.insert(idx) {
            entry_points.push(EntryPoint { idx, name: None, kind: EntryPointKind::DynamicImport });
          }
        }
        Err(err) => {
          errors.push(err);
          self.ctx.cancel.cancel();
        }
      }
    }

    self.intermediate[result.idx] = Some(result.module);
  }
}
