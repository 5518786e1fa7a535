use std::sync::Arc;

use fastpack_cache::{BuildCache, CacheStore, FsCacheStore};
use fastpack_common::{BundlerOptions, CancelToken};
use fastpack_error::{build_cancelled, BuildResult};
use fastpack_fs::OsFileSystem;
use fastpack_plugin::{BuildContext, Plugin, PluginDriver, PluginStage};

use crate::{
  plugins::{clean::CleanPlugin, html::HtmlPlugin, purge_css::PurgeCssPlugin},
  stages::{generate::GenerateStage, scan::ScanStage, split::SplitStage},
  transforms::TransformRegistry,
  types::{bundle_output::BundleOutput, Collaborators, SharedCollaborators, SharedFileSystem, SharedOptions},
  utils::normalize_options::{normalize_options, validate_rules},
};

/// Configures a [`Bundler`] with non-default collaborators, file system or
/// cache backend. [`Bundler::new`] covers the stock setup.
#[derive(Default)]
pub struct BundlerBuilder {
  options: BundlerOptions,
  fs: Option<SharedFileSystem>,
  registry: Option<TransformRegistry>,
  collaborators: Option<Collaborators>,
  cache_store: Option<Arc<dyn CacheStore>>,
  plugins: Vec<Arc<dyn Plugin>>,
}

impl BundlerBuilder {
  pub fn with_options(mut self, options: BundlerOptions) -> Self {
    self.options = options;
    self
  }

  pub fn with_fs(mut self, fs: SharedFileSystem) -> Self {
    self.fs = Some(fs);
    self
  }

  pub fn with_registry(mut self, registry: TransformRegistry) -> Self {
    self.registry = Some(registry);
    self
  }

  pub fn with_collaborators(mut self, collaborators: Collaborators) -> Self {
    self.collaborators = Some(collaborators);
    self
  }

  pub fn with_cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
    self.cache_store = Some(store);
    self
  }

  pub fn with_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
    self.plugins.push(plugin);
    self
  }

  pub fn build(self) -> BuildResult<Bundler> {
    let registry = self.registry.unwrap_or_else(TransformRegistry::with_builtins);
    let options: SharedOptions = Arc::new(normalize_options(self.options, &registry)?);
    let fs = self.fs.unwrap_or_else(|| Arc::new(OsFileSystem));

    let cache = if options.cache_enabled {
      let store = self
        .cache_store
        .unwrap_or_else(|| Arc::new(FsCacheStore::new(options.cache_dir.clone())));
      Arc::new(BuildCache::new(store))
    } else {
      Arc::new(BuildCache::disabled())
    };

    let mut driver = PluginDriver::default();
    if options.clean {
      driver.register(Arc::new(CleanPlugin));
    }
    if options.html.is_some() {
      driver.register(Arc::new(HtmlPlugin));
    }
    if options.purge_css {
      driver.register(Arc::new(PurgeCssPlugin));
    }
    for plugin in self.plugins {
      driver.register(plugin);
    }

    Ok(Bundler {
      fs,
      options,
      registry: Arc::new(registry),
      collaborators: Arc::new(self.collaborators.unwrap_or_default()),
      cache,
      driver,
      cancel: CancelToken::new(),
    })
  }
}

/// Drives one configuration through the whole pipeline: plugin stages, graph
/// scan, chunk splitting, rendering, and (for [`Bundler::write`]) emission to
/// the output directory.
pub struct Bundler {
  fs: SharedFileSystem,
  options: SharedOptions,
  registry: Arc<TransformRegistry>,
  collaborators: SharedCollaborators,
  cache: Arc<BuildCache>,
  driver: PluginDriver,
  cancel: CancelToken,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> BuildResult<Self> {
    BundlerBuilder::default().with_options(options).build()
  }

  pub fn options(&self) -> &SharedOptions {
    &self.options
  }

  /// Cancelling the returned token aborts the current and any future build
  /// of this bundler before it commits cache entries or output files.
  pub fn cancel_token(&self) -> CancelToken {
    self.cancel.clone()
  }

  pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) {
    self.driver.register(plugin);
  }

  /// Runs the pipeline and returns the rendered assets without touching the
  /// output directory.
  pub async fn build(&mut self) -> BuildResult<BundleOutput> {
    self.build_inner(false).await
  }

  /// Runs the pipeline and writes every rendered asset under `out_dir`.
  pub async fn write(&mut self) -> BuildResult<BundleOutput> {
    self.build_inner(true).await
  }

  async fn build_inner(&mut self, is_write: bool) -> BuildResult<BundleOutput> {
    if self.cancel.is_cancelled() {
      return Err(build_cancelled().into());
    }
    let start = std::time::Instant::now();
    let mut ctx = BuildContext::new(&self.options, &*self.fs);

    self.driver.run_stage(PluginStage::Configure, &mut ctx)?;
    // Plugins may have registered rules; every named transform must resolve
    // before the first module is read.
    let rule_errors = validate_rules(ctx.rules(), &self.registry);
    if !rule_errors.is_empty() {
      return Err(rule_errors.into());
    }
    self.driver.run_stage(PluginStage::BuildStart, &mut ctx)?;

    let scan_output = ScanStage::new(
      Arc::clone(&self.fs),
      Arc::clone(&self.options),
      Arc::clone(&self.registry),
      Arc::clone(&self.collaborators),
      Arc::clone(&self.cache),
      self.cancel.clone(),
    )
    .scan(ctx.rules().to_vec())
    .await?;
    tracing::debug!(modules = scan_output.module_table.len(), "scan finished");

    let mut graph = SplitStage::new(
      &scan_output.module_table,
      &scan_output.entry_points,
      &self.options.split_chunks,
    )
    .split();
    self.driver.run_stage(PluginStage::AfterChunking, &mut ctx)?;

    let generated =
      GenerateStage::new(&self.options, &scan_output.module_table, &mut graph, &self.collaborators)
        .generate()?;
    ctx.assets = generated.assets;
    ctx.chunk_files = generated.chunk_files;
    ctx.used_tokens = generated.used_tokens;
    self.driver.run_stage(PluginStage::AfterEmit, &mut ctx)?;

    if is_write {
      let out_dir = self.options.out_dir();
      for asset in &ctx.assets {
        self
          .fs
          .write(&out_dir.join(&asset.filename), &asset.content)
          .map_err(|err| fastpack_error::BuildError::from(anyhow::Error::from(err)))?;
      }
    }
    self.driver.run_stage(PluginStage::BuildEnd, &mut ctx)?;

    tracing::info!(assets = ctx.assets.len(), elapsed = ?start.elapsed(), "build finished");
    Ok(BundleOutput { assets: ctx.assets, warnings: scan_output.warnings })
  }
}
