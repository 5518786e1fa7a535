use serde::Deserialize;

use crate::SplitChunksOptions;

/// Options forwarded to the minifier collaborator for production output.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinifyOptions {
  /// Drop all `console.*` call statements.
  pub drop_console: bool,
  /// Drop `debugger;` statements.
  pub drop_debugger: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizationOptions {
  /// `None` disables minification entirely.
  pub minify: Option<MinifyOptions>,
  pub split_chunks: Option<SplitChunksOptions>,
}
