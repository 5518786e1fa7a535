use std::path::Path;

use arcstr::ArcStr;

/// `ModuleId` is the unique string identifier for each module.
/// - It will be used to identify the module in the whole bundle.
/// - Virtual modules carry the emitter's id plus a `|suffix` marker.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  /// Cwd-relative, forward-slashed spelling used in rendered output and
  /// diagnostics so builds are reproducible across machines.
  pub fn stabilize(&self, cwd: &Path) -> String {
    let path = Path::new(self.as_ref());
    let stable = match path.strip_prefix(cwd) {
      Ok(relative) => relative.to_string_lossy().into_owned(),
      Err(_) => self.to_string(),
    };
    stable.replace('\\', "/")
  }

  pub fn file_stem(&self) -> &str {
    let name = self.rsplit(['/', '\\']).next().unwrap_or(self);
    name.split(['.', '|']).next().unwrap_or(name)
  }

  pub fn extension(&self) -> Option<&str> {
    let name = self.rsplit(['/', '\\']).next().unwrap_or(self);
    name.rsplit_once('.').map(|(_, ext)| ext)
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl std::fmt::Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stabilize_strips_cwd() {
    let id = ModuleId::new("/app/src/index.jsx");
    assert_eq!(id.stabilize(Path::new("/app")), "src/index.jsx");
    assert_eq!(id.stabilize(Path::new("/elsewhere")), "/app/src/index.jsx");
  }

  #[test]
  fn file_stem_and_extension() {
    let id = ModuleId::new("/app/src/button.module.css");
    assert_eq!(id.file_stem(), "button");
    assert_eq!(id.extension(), Some("css"));
  }
}
