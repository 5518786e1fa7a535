use std::path::PathBuf;

use crate::{
  AssetOptions, DevServerOptions, FilenameTemplate, HtmlOptions, InputItem, MinifyOptions,
  ModuleRule, ResolveOptions, SplitChunksOptions,
};

#[allow(clippy::struct_excessive_bools)] // Using raw booleans is more clear in this case
#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,

  // --- Output
  pub dir: String,
  pub public_path: String,
  pub entry_filenames: FilenameTemplate,
  pub css_filenames: FilenameTemplate,

  // --- Pipeline
  pub resolve: ResolveOptions,
  pub rules: Vec<ModuleRule>,
  pub asset: AssetOptions,
  pub minify: Option<MinifyOptions>,
  pub split_chunks: SplitChunksOptions,
  pub worker_count: usize,

  // --- Plugins
  pub html: Option<HtmlOptions>,
  pub clean: bool,
  pub purge_css: bool,

  // --- Environment
  pub dev_server: DevServerOptions,
  pub cache_enabled: bool,
  pub cache_dir: PathBuf,

  /// Fingerprint over rules, transforms and output-shaping options; part of
  /// every cache key so config changes invalidate persisted entries.
  pub config_fingerprint: String,
}

impl NormalizedBundlerOptions {
  pub fn out_dir(&self) -> PathBuf {
    self.cwd.join(&self.dir)
  }
}
