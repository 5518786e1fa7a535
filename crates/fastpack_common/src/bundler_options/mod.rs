pub mod asset_policy;
pub mod dev_server;
pub mod filename_template;
pub mod input_item;
pub mod module_rule;
pub mod normalized_bundler_options;
pub mod optimization;
pub mod resolve_options;
pub mod split_chunks;

use std::path::PathBuf;

use serde::Deserialize;

use crate::{
  AssetOptions, DevServerOptions, InputItem, ModuleRule, OptimizationOptions, ResolveOptions,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheOptions {
  pub enabled: Option<bool>,
  /// Defaults to `<cwd>/.fastpack/cache`.
  pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlOptions {
  /// HTML template the emitted chunk references are injected into. A default
  /// scaffold is used when the file does not exist.
  pub template: Option<PathBuf>,
  pub title: Option<String>,
}

/// Raw user configuration; everything is optional and resolved to concrete
/// values by option normalization. Deserializable from a JSON config file.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundlerOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,

  // --- Output
  pub dir: Option<String>,
  pub public_path: Option<String>,
  pub entry_filenames: Option<String>,
  pub css_filenames: Option<String>,

  // --- Pipeline
  pub resolve: Option<ResolveOptions>,
  pub rules: Option<Vec<ModuleRule>>,
  pub asset: Option<AssetOptions>,
  pub optimization: Option<OptimizationOptions>,
  pub worker_count: Option<usize>,

  // --- Plugins
  pub html: Option<HtmlOptions>,
  pub clean: Option<bool>,
  pub purge_css: Option<bool>,

  // --- Environment
  pub dev_server: Option<DevServerOptions>,
  pub cache: Option<CacheOptions>,
}
