use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
  /// An extracted stylesheet fragment, collected per chunk into a css file.
  Stylesheet,
}

/// A side output emitted by a transform. Registered as a virtual module and
/// routed back through the rule matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideArtifact {
  /// Suffix appended to the emitter's id, e.g. `extracted.css`.
  pub name: String,
  pub kind: ArtifactKind,
  pub source: String,
}
