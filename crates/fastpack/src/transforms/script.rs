use crate::{
  transforms::{Transform, TransformInput, TransformOutput},
  types::SharedCollaborators,
};

/// Lowers JSX/modern syntax through the configured transpiler.
pub struct ScriptTransform;

impl Transform for ScriptTransform {
  fn name(&self) -> &'static str {
    "script"
  }

  fn transform(
    &self,
    input: TransformInput,
    collaborators: &SharedCollaborators,
  ) -> anyhow::Result<TransformOutput> {
    let source = collaborators.transpiler.transpile(&input.source, input.id)?;
    Ok(TransformOutput::passthrough(source))
  }
}
