use crate::{
  transforms::{Transform, TransformInput, TransformOutput},
  types::SharedCollaborators,
};

/// Compiles Less sources down to plain CSS via the configured compiler.
pub struct LessTransform;

impl Transform for LessTransform {
  fn name(&self) -> &'static str {
    "less"
  }

  fn transform(
    &self,
    input: TransformInput,
    collaborators: &SharedCollaborators,
  ) -> anyhow::Result<TransformOutput> {
    let source = collaborators.style_compiler.compile(&input.source, input.id)?;
    Ok(TransformOutput::passthrough(source))
  }
}
