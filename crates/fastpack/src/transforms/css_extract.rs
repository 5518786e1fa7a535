use fastpack_common::{ArtifactKind, ModuleKind, SideArtifact};

use crate::{
  transforms::{Transform, TransformInput, TransformOutput},
  types::SharedCollaborators,
};

pub const EXTRACTED_SUFFIX: &str = "extracted.css";

/// Moves a stylesheet's text into a side artifact and leaves a js stub in
/// its place. Artifacts come back through the matcher as stylesheet modules,
/// for which this step is the identity, so the feedback loop terminates.
pub struct CssExtractTransform;

impl Transform for CssExtractTransform {
  fn name(&self) -> &'static str {
    "css-extract"
  }

  fn transform(
    &self,
    input: TransformInput,
    _collaborators: &SharedCollaborators,
  ) -> anyhow::Result<TransformOutput> {
    if matches!(input.kind, ModuleKind::Stylesheet) {
      return Ok(TransformOutput::passthrough(input.source));
    }
    let artifact = SideArtifact {
      name: EXTRACTED_SUFFIX.to_string(),
      kind: ArtifactKind::Stylesheet,
      source: input.source,
    };
    Ok(TransformOutput {
      source: "export default {};\n".to_string(),
      side_artifacts: vec![artifact],
    })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use fastpack_common::{ArtifactKind, ModuleId, ModuleKind};

  use super::CssExtractTransform;
  use crate::{
    transforms::{Transform, TransformInput},
    types::{Collaborators, SharedCollaborators},
  };

  #[test]
  fn extracts_stylesheet_into_artifact() {
    let collaborators: SharedCollaborators = Arc::new(Collaborators::default());
    let id = ModuleId::new("src/app.css");
    let input = TransformInput {
      id: &id,
      kind: ModuleKind::Normal,
      source: ".a { color: red; }".to_string(),
    };
    let output = CssExtractTransform.transform(input, &collaborators).unwrap();
    assert_eq!(output.source, "export default {};\n");
    assert_eq!(output.side_artifacts.len(), 1);
    let artifact = &output.side_artifacts[0];
    assert_eq!(artifact.kind, ArtifactKind::Stylesheet);
    assert_eq!(artifact.source, ".a { color: red; }");
  }

  #[test]
  fn is_identity_for_fed_back_stylesheets() {
    let collaborators: SharedCollaborators = Arc::new(Collaborators::default());
    let id = ModuleId::new("src/app.css|extracted.css");
    let input = TransformInput {
      id: &id,
      kind: ModuleKind::Stylesheet,
      source: ".a { color: red; }".to_string(),
    };
    let output = CssExtractTransform.transform(input, &collaborators).unwrap();
    assert_eq!(output.source, ".a { color: red; }");
    assert!(output.side_artifacts.is_empty());
  }
}
