pub mod css;
pub mod css_extract;
pub mod less;
pub mod script;

use std::sync::Arc;

use fastpack_common::{ModuleId, ModuleKind, SideArtifact};
use fastpack_error::transform_error;
use rustc_hash::FxHashMap;

use crate::types::SharedCollaborators;

pub struct TransformInput<'a> {
  pub id: &'a ModuleId,
  pub kind: ModuleKind,
  pub source: String,
}

#[derive(Debug, Default)]
pub struct TransformOutput {
  pub source: String,
  pub side_artifacts: Vec<SideArtifact>,
}

impl TransformOutput {
  pub fn passthrough(source: String) -> Self {
    Self { source, side_artifacts: Vec::new() }
  }
}

/// A single named, pure source-to-source step. Steps never touch the
/// filesystem; anything they produce besides the main source travels as a
/// [`SideArtifact`].
pub trait Transform: Send + Sync {
  fn name(&self) -> &'static str;

  fn transform(
    &self,
    input: TransformInput,
    collaborators: &SharedCollaborators,
  ) -> anyhow::Result<TransformOutput>;
}

pub struct TransformRegistry {
  transforms: FxHashMap<&'static str, Arc<dyn Transform>>,
}

impl TransformRegistry {
  pub fn with_builtins() -> Self {
    let mut registry = Self { transforms: FxHashMap::default() };
    registry.register(Arc::new(script::ScriptTransform));
    registry.register(Arc::new(less::LessTransform));
    registry.register(Arc::new(css::CssTransform));
    registry.register(Arc::new(css_extract::CssExtractTransform));
    registry
  }

  pub fn register(&mut self, transform: Arc<dyn Transform>) {
    self.transforms.insert(transform.name(), transform);
  }

  pub fn get(&self, name: &str) -> Option<&Arc<dyn Transform>> {
    self.transforms.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.transforms.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.transforms.keys().copied()
  }

  /// Runs the named steps in declaration order, feeding each step's output
  /// into the next and accumulating side artifacts. Caller guarantees every
  /// name resolves; normalization rejects configs where one doesn't.
  pub fn run_chain(
    &self,
    id: &ModuleId,
    kind: ModuleKind,
    source: String,
    chain: &[String],
    collaborators: &SharedCollaborators,
  ) -> anyhow::Result<TransformOutput> {
    let mut current = source;
    let mut side_artifacts = Vec::new();
    for name in chain {
      let transform = self
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("transform `{name}` vanished from the registry"))?;
      let input = TransformInput { id, kind, source: current };
      let output = transform
        .transform(input, collaborators)
        .map_err(|source| transform_error(id.as_ref(), name, source))?;
      current = output.source;
      side_artifacts.extend(output.side_artifacts);
    }
    Ok(TransformOutput { source: current, side_artifacts })
  }
}
