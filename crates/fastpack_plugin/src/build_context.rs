use rustc_hash::FxHashSet;

use fastpack_common::{
  ChunkFileInfo, ModuleRule, NormalizedBundlerOptions, OutputAsset,
};
use fastpack_fs::FileSystem;

/// Mutable build-state handle passed to plugin hooks. Scoped to one build
/// invocation and owned by the orchestrator, never a process-wide singleton.
pub struct BuildContext<'a> {
  pub options: &'a NormalizedBundlerOptions,
  pub fs: &'a dyn FileSystem,
  /// Rendered but not yet written output files; `AfterEmit` hooks may
  /// rewrite or append before anything touches disk.
  pub assets: Vec<OutputAsset>,
  pub chunk_files: Vec<ChunkFileInfo>,
  /// Identifier-ish tokens seen in script sources, for unused-css pruning.
  pub used_tokens: FxHashSet<String>,
  rules: Vec<ModuleRule>,
  rules_sealed: bool,
}

impl<'a> BuildContext<'a> {
  pub fn new(options: &'a NormalizedBundlerOptions, fs: &'a dyn FileSystem) -> Self {
    Self {
      options,
      fs,
      assets: Vec::new(),
      chunk_files: Vec::new(),
      used_tokens: FxHashSet::default(),
      rules: options.rules.clone(),
      rules_sealed: false,
    }
  }

  /// Plugins may register additional rules while `configure` is open.
  pub fn add_rule(&mut self, rule: ModuleRule) -> anyhow::Result<()> {
    if self.rules_sealed {
      anyhow::bail!("rules can only be registered during the configure stage");
    }
    self.rules.push(rule);
    Ok(())
  }

  pub fn seal_rules(&mut self) {
    self.rules_sealed = true;
  }

  pub fn rules(&self) -> &[ModuleRule] {
    &self.rules
  }
}
