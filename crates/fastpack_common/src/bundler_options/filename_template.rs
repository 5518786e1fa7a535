use std::sync::LazyLock;

use regex::Regex;

static HASH_PLACEHOLDER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[(?:hash|chunkhash|contenthash)(?::(\d+))?\]").expect("static pattern"));

/// Output naming template. Supported placeholders: `[name]`, `[ext]`
/// (includes the leading dot), and `[hash]`/`[chunkhash]`/`[contenthash]`
/// with an optional `:length` suffix.
#[derive(Debug, Clone)]
pub struct FilenameTemplate {
  template: String,
}

impl FilenameTemplate {
  pub fn new(template: impl Into<String>) -> Self {
    Self { template: template.into() }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn has_hash_pattern(&self) -> bool {
    HASH_PLACEHOLDER_RE.is_match(&self.template)
  }

  /// `ext` carries the leading dot (`".js"`); `hash` is the full content
  /// hash, truncated per-placeholder when a length is given.
  pub fn render(&self, name: &str, ext: &str, hash: Option<&str>) -> String {
    let rendered = self.template.replace("[name]", name).replace("[ext]", ext);
    HASH_PLACEHOLDER_RE
      .replace_all(&rendered, |caps: &regex::Captures| {
        let hash = hash.unwrap_or_default();
        match caps.get(1).and_then(|len| len.as_str().parse::<usize>().ok()) {
          Some(len) => hash.get(..len.min(hash.len())).unwrap_or(hash).to_string(),
          None => hash.to_string(),
        }
      })
      .into_owned()
  }
}

impl From<&str> for FilenameTemplate {
  fn from(template: &str) -> Self {
    Self::new(template)
  }
}
