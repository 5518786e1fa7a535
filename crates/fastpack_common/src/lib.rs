mod bundler_options;
mod chunk;
mod collaborators;
mod module;
mod types;

pub use bundler_options::{
  asset_policy::{AssetClassOptions, AssetOptions, Emission},
  dev_server::DevServerOptions,
  filename_template::FilenameTemplate,
  input_item::InputItem,
  module_rule::{AssetClass, ModuleRule, RuleCondition},
  normalized_bundler_options::NormalizedBundlerOptions,
  optimization::{MinifyOptions, OptimizationOptions},
  resolve_options::ResolveOptions,
  split_chunks::{default_cache_groups, CacheGroup, ChunkMode, SplitChunksOptions},
  BundlerOptions, CacheOptions, HtmlOptions,
};

pub use crate::{
  chunk::{chunk_table::ChunkTable, Chunk, ChunkKind},
  collaborators::{
    BasicMinifier, IdentityTranspiler, Minifier, PassthroughStyleCompiler, StyleCompiler,
    Transpiler,
  },
  module::{module_table::ModuleTable, Module, ModuleKind},
  types::{
    cancel_token::CancelToken,
    chunk_file_info::ChunkFileInfo,
    entry_point::{EntryPoint, EntryPointKind},
    module_id::ModuleId,
    output_asset::OutputAsset,
    raw_idx::{ChunkIdx, ModuleIdx},
    side_artifact::{ArtifactKind, SideArtifact},
    source::Source,
  },
};
