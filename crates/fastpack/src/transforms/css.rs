use std::sync::LazyLock;

use regex::Regex;

use crate::{
  transforms::{Transform, TransformInput, TransformOutput},
  types::SharedCollaborators,
};

static COMMENT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("static pattern"));

/// Normalizes css text: strips comments and rejects sources with unbalanced
/// braces so malformed stylesheets fail here instead of at render time.
pub struct CssTransform;

impl Transform for CssTransform {
  fn name(&self) -> &'static str {
    "css"
  }

  fn transform(
    &self,
    input: TransformInput,
    _collaborators: &SharedCollaborators,
  ) -> anyhow::Result<TransformOutput> {
    let stripped = COMMENT_RE.replace_all(&input.source, "");
    let mut depth = 0i32;
    for ch in stripped.chars() {
      match ch {
        '{' => depth += 1,
        '}' => {
          depth -= 1;
          if depth < 0 {
            anyhow::bail!("unbalanced `}}` in stylesheet");
          }
        }
        _ => {}
      }
    }
    if depth != 0 {
      anyhow::bail!("unbalanced `{{` in stylesheet");
    }
    Ok(TransformOutput::passthrough(stripped.trim().to_string()))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use fastpack_common::{ModuleId, ModuleKind};

  use super::CssTransform;
  use crate::{
    transforms::{Transform, TransformInput},
    types::{Collaborators, SharedCollaborators},
  };

  fn run(source: &str) -> anyhow::Result<String> {
    let collaborators: SharedCollaborators = Arc::new(Collaborators::default());
    let id = ModuleId::new("src/app.css");
    let input = TransformInput { id: &id, kind: ModuleKind::Normal, source: source.to_string() };
    CssTransform.transform(input, &collaborators).map(|output| output.source)
  }

  #[test]
  fn strips_comments() {
    let output = run("/* banner */ .a { color: red; } /* tail */").unwrap();
    assert_eq!(output, ".a { color: red; }");
  }

  #[test]
  fn rejects_unbalanced_braces() {
    assert!(run(".a { color: red;").is_err());
    assert!(run(".a } color: red;").is_err());
  }
}
