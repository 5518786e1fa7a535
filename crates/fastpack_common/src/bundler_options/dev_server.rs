use std::path::PathBuf;

use serde::Deserialize;

/// Configuration surface for the development server. Serving itself is an
/// external collaborator; fastpack only validates and forwards these values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevServerOptions {
  pub host: String,
  pub port: u16,
  /// Module hot replacement on file change.
  pub hot: bool,
  /// Directory served to the outside; defaults to the output dir.
  pub static_dir: Option<PathBuf>,
}

impl Default for DevServerOptions {
  fn default() -> Self {
    Self { host: "localhost".to_string(), port: 8080, hot: true, static_dir: None }
  }
}
