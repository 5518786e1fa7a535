mod bundler;
mod graph;
mod module_loader;
mod plugins;
mod stages;
mod transforms;
mod types;
mod utils;

pub use crate::{
  bundler::{Bundler, BundlerBuilder},
  plugins::{clean::CleanPlugin, html::HtmlPlugin, purge_css::PurgeCssPlugin},
  transforms::{Transform, TransformInput, TransformOutput, TransformRegistry},
  types::{bundle_output::BundleOutput, Collaborators},
};
pub use fastpack_common::*;
pub use fastpack_plugin::{BuildContext, Plugin, PluginStage};
