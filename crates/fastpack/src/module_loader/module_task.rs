use std::{path::Path, sync::Arc};

use arcstr::ArcStr;

use fastpack_cache::{CacheEntry, CacheKey};
use fastpack_common::{AssetClass, Module, ModuleId, ModuleIdx, ModuleKind, Source};
use fastpack_error::{build_cancelled, BuildError, BuildResult};
use fastpack_utils::xxhash::xxhash_hex;

use crate::{
  module_loader::{task_context::TaskContext, ModuleLoaderMsg, ModuleTaskResult},
  utils::scan_imports::scan_imports,
};

/// Source handed to a task directly instead of read from disk; used for
/// virtual modules registered from side artifacts.
pub struct ProvidedSource {
  pub source: String,
  pub kind: ModuleKind,
}

pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  id: ModuleId,
  provided: Option<ProvidedSource>,
}

impl ModuleTask {
  pub fn new(
    ctx: Arc<TaskContext>,
    idx: ModuleIdx,
    id: ModuleId,
    provided: Option<ProvidedSource>,
  ) -> Self {
    Self { ctx, idx, id, provided }
  }

  pub async fn run(self) {
    let tx = self.ctx.tx.clone();
    let msg = match self.run_inner().await {
      Ok(result) => ModuleLoaderMsg::TaskResult(Box::new(result)),
      Err(errors) => ModuleLoaderMsg::Error(errors),
    };
    if tx.send(msg).await.is_err() {
      tracing::debug!("module loader receiver dropped before task completion");
    }
  }

  async fn run_inner(self) -> BuildResult<ModuleTaskResult> {
    if self.ctx.cancel.is_cancelled() {
      return Err(build_cancelled().into());
    }
    let ctx = Arc::clone(&self.ctx);
    let _permit = ctx
      .permits
      .acquire()
      .await
      .map_err(|_| BuildError::from(anyhow::anyhow!("worker pool closed")))?;

    let matched = self.ctx.matcher.match_id(&self.id);
    let transforms = matched.transforms;
    if self.provided.is_some() {
      return self.load_provided(&transforms).await;
    }
    if let Some(class) = matched.asset {
      return self.load_asset(class);
    }
    self.load_source(&transforms).await
  }

  /// Virtual modules skip the cache; they are part of their emitter's cache
  /// entry already.
  async fn load_provided(mut self, transforms: &[String]) -> BuildResult<ModuleTaskResult> {
    let Some(provided) = self.provided.take() else {
      return Err(anyhow::anyhow!("virtual module `{}` has no provided source", self.id).into());
    };
    let fingerprint = xxhash_hex(provided.source.as_bytes());
    let raw: ArcStr = provided.source.as_str().into();
    let output = self
      .ctx
      .registry
      .run_chain(&self.id, provided.kind, provided.source, transforms, &self.ctx.collaborators)
      .map_err(BuildError::from)?;
    if !output.side_artifacts.is_empty() {
      return Err(
        anyhow::anyhow!("virtual module `{}` produced nested side artifacts", self.id).into(),
      );
    }
    let transformed: ArcStr = output.source.into();
    Ok(ModuleTaskResult {
      idx: self.idx,
      module: Module {
        idx: self.idx,
        id: self.id,
        kind: provided.kind,
        source: Source::Text(raw),
        transformed,
        fingerprint,
        static_deps: Vec::new(),
        dynamic_deps: Vec::new(),
        exec_order: u32::MAX,
        is_alive: true,
      },
      static_specifiers: Vec::new(),
      dynamic_specifiers: Vec::new(),
      side_artifacts: Vec::new(),
    })
  }

  /// Assets keep their raw bytes; the inline-or-emit decision happens at
  /// generate time against the byte size.
  fn load_asset(self, class: AssetClass) -> BuildResult<ModuleTaskResult> {
    let bytes = self
      .ctx
      .fs
      .read(Path::new(self.id.as_ref()))
      .map_err(|err| BuildError::from(anyhow::anyhow!("failed to read `{}`: {err}", self.id)))?;
    let fingerprint = xxhash_hex(&bytes);
    Ok(ModuleTaskResult {
      idx: self.idx,
      module: Module {
        idx: self.idx,
        id: self.id,
        kind: ModuleKind::Asset(class),
        source: Source::Buffer(bytes),
        transformed: ArcStr::default(),
        fingerprint,
        static_deps: Vec::new(),
        dynamic_deps: Vec::new(),
        exec_order: u32::MAX,
        is_alive: true,
      },
      static_specifiers: Vec::new(),
      dynamic_specifiers: Vec::new(),
      side_artifacts: Vec::new(),
    })
  }

  async fn load_source(self, transforms: &[String]) -> BuildResult<ModuleTaskResult> {
    let source = self
      .ctx
      .fs
      .read_to_string(Path::new(self.id.as_ref()))
      .map_err(|err| BuildError::from(anyhow::anyhow!("failed to read `{}`: {err}", self.id)))?;
    let fingerprint = xxhash_hex(source.as_bytes());
    let raw: ArcStr = source.as_str().into();
    let key = CacheKey::new(
      self.id.as_ref(),
      fingerprint.clone(),
      self.ctx.options.config_fingerprint.clone(),
    );

    let ctx = Arc::clone(&self.ctx);
    let id = self.id.clone();
    let entry = ctx
      .cache
      .get_or_compute(key, || async {
        if ctx.cancel.is_cancelled() {
          return Err(build_cancelled().into());
        }
        let output = ctx
          .registry
          .run_chain(&id, ModuleKind::Normal, source, transforms, &ctx.collaborators)
          .map_err(BuildError::from)?;
        let scanned = scan_imports(&output.source);
        Ok(CacheEntry {
          transformed: output.source,
          side_artifacts: output.side_artifacts,
          static_specifiers: scanned.static_specifiers,
          dynamic_specifiers: scanned.dynamic_specifiers,
        })
      })
      .await?;

    let transformed: ArcStr = entry.transformed.into();
    Ok(ModuleTaskResult {
      idx: self.idx,
      module: Module {
        idx: self.idx,
        id: self.id,
        kind: ModuleKind::Normal,
        source: Source::Text(raw),
        transformed,
        fingerprint,
        static_deps: Vec::new(),
        dynamic_deps: Vec::new(),
        exec_order: u32::MAX,
        is_alive: true,
      },
      static_specifiers: entry.static_specifiers,
      dynamic_specifiers: entry.dynamic_specifiers,
      side_artifacts: entry.side_artifacts,
    })
  }
}
