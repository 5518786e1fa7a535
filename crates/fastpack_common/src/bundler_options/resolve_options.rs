use serde::Deserialize;

use fastpack_utils::indexmap::FxIndexMap;

/// Specifier rewriting applied before path joining. Full node-style module
/// resolution is out of scope; aliases and extension completion cover the
/// configured entry shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveOptions {
  /// Longest-prefix-wins alias map, e.g. `"~" -> "<cwd>/src"`.
  pub alias: FxIndexMap<String, String>,
  /// Tried left to right when a specifier has no extension.
  pub extensions: Vec<String>,
}

impl Default for ResolveOptions {
  fn default() -> Self {
    Self {
      alias: FxIndexMap::default(),
      extensions: [".js", ".jsx", ".json", ".less", ".html", ".css"]
        .into_iter()
        .map(str::to_string)
        .collect(),
    }
  }
}
