pub mod bundle_output;

use std::sync::Arc;

use fastpack_common::{
  BasicMinifier, IdentityTranspiler, Minifier, NormalizedBundlerOptions,
  PassthroughStyleCompiler, StyleCompiler, Transpiler,
};

pub type SharedOptions = Arc<NormalizedBundlerOptions>;
pub type SharedFileSystem = Arc<dyn fastpack_fs::FileSystem>;

/// External tools the pipeline delegates to, consumed only through their
/// trait contracts. Defaults keep a build self-contained.
pub struct Collaborators {
  pub transpiler: Arc<dyn Transpiler>,
  pub style_compiler: Arc<dyn StyleCompiler>,
  pub minifier: Arc<dyn Minifier>,
}

impl Default for Collaborators {
  fn default() -> Self {
    Self {
      transpiler: Arc::new(IdentityTranspiler),
      style_compiler: Arc::new(PassthroughStyleCompiler),
      minifier: Arc::new(BasicMinifier),
    }
  }
}

pub type SharedCollaborators = Arc<Collaborators>;
