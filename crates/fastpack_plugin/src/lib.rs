mod build_context;
mod driver;

use std::fmt;

pub use crate::{build_context::BuildContext, driver::PluginDriver};

/// Pipeline stages plugins can hook into, in declared sequence. Within one
/// stage, plugins run in registration order; across stages only the stage
/// sequence is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStage {
  /// Rules/transforms may still be registered; closes before scanning.
  Configure,
  BuildStart,
  AfterChunking,
  /// Rendered assets exist in the build context but are not yet written.
  AfterEmit,
  BuildEnd,
}

impl fmt::Display for PluginStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Configure => "configure",
      Self::BuildStart => "buildStart",
      Self::AfterChunking => "afterChunking",
      Self::AfterEmit => "afterEmit",
      Self::BuildEnd => "buildEnd",
    };
    write!(f, "{name}")
  }
}

/// A build plugin. Every hook receives the mutable per-build context; a hook
/// error aborts the build tagged with the plugin identity and stage.
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str;

  fn configure(&self, _ctx: &mut BuildContext) -> anyhow::Result<()> {
    Ok(())
  }

  fn build_start(&self, _ctx: &mut BuildContext) -> anyhow::Result<()> {
    Ok(())
  }

  fn after_chunking(&self, _ctx: &mut BuildContext) -> anyhow::Result<()> {
    Ok(())
  }

  fn after_emit(&self, _ctx: &mut BuildContext) -> anyhow::Result<()> {
    Ok(())
  }

  fn build_end(&self, _ctx: &mut BuildContext) -> anyhow::Result<()> {
    Ok(())
  }
}
