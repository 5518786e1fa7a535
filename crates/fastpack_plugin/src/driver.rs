use std::sync::Arc;

use fastpack_error::{plugin_error, BuildError, BuildResult};

use crate::{BuildContext, Plugin, PluginStage};

/// Invokes registered plugins at each stage boundary, in registration
/// order. Explicit stage traversal, no implicit event emission.
#[derive(Default)]
pub struct PluginDriver {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginDriver {
  pub fn new(plugins: Vec<Arc<dyn Plugin>>) -> Self {
    Self { plugins }
  }

  pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
    self.plugins.push(plugin);
  }

  pub fn run_stage(&self, stage: PluginStage, ctx: &mut BuildContext) -> BuildResult<()> {
    for plugin in &self.plugins {
      let result = match stage {
        PluginStage::Configure => plugin.configure(ctx),
        PluginStage::BuildStart => plugin.build_start(ctx),
        PluginStage::AfterChunking => plugin.after_chunking(ctx),
        PluginStage::AfterEmit => plugin.after_emit(ctx),
        PluginStage::BuildEnd => plugin.build_end(ctx),
      };
      result.map_err(|err| BuildError::from(plugin_error(plugin.name(), stage, err)))?;
    }
    // No rule registration once configuration closes.
    if stage == PluginStage::Configure {
      ctx.seal_rules();
    }
    Ok(())
  }
}
