use std::path::{Path, PathBuf};

use fastpack_common::{
  AssetClass, BundlerOptions, FilenameTemplate, ModuleRule, NormalizedBundlerOptions,
  ResolveOptions, RuleCondition,
};
use fastpack_error::{unresolved_transform, BuildResult};
use fastpack_utils::xxhash::xxhash_hex;
use itertools::Itertools;

use crate::transforms::TransformRegistry;

/// Resolves every optional field of the raw configuration to a concrete
/// value and rejects rules that reference unregistered transforms. All
/// downstream stages consume only the normalized form.
pub fn normalize_options(
  raw: BundlerOptions,
  registry: &TransformRegistry,
) -> BuildResult<NormalizedBundlerOptions> {
  let cwd = raw
    .cwd
    .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

  let rules = raw.rules.unwrap_or_else(|| default_rules(&cwd));
  let errors = validate_rules(&rules, registry);
  if !errors.is_empty() {
    return Err(errors.into());
  }

  let optimization = raw.optimization.unwrap_or_default();
  let cache = raw.cache.unwrap_or_default();
  let cache_dir = cache.dir.unwrap_or_else(|| cwd.join(".fastpack").join("cache"));

  let entry_filenames =
    FilenameTemplate::new(raw.entry_filenames.unwrap_or_else(|| "[name].[chunkhash].js".into()));
  let css_filenames =
    FilenameTemplate::new(raw.css_filenames.unwrap_or_else(|| "[name].[chunkhash].css".into()));

  let mut options = NormalizedBundlerOptions {
    input: raw.input.unwrap_or_default(),
    cwd,
    dir: raw.dir.unwrap_or_else(|| "dist".into()),
    public_path: raw.public_path.unwrap_or_else(|| "/".into()),
    entry_filenames,
    css_filenames,
    resolve: raw.resolve.unwrap_or_else(default_resolve),
    rules,
    asset: raw.asset.unwrap_or_default(),
    minify: optimization.minify,
    split_chunks: optimization.split_chunks.unwrap_or_default(),
    worker_count: raw.worker_count.unwrap_or_else(default_worker_count),
    html: raw.html,
    clean: raw.clean.unwrap_or(false),
    purge_css: raw.purge_css.unwrap_or(false),
    dev_server: raw.dev_server.unwrap_or_default(),
    cache_enabled: cache.enabled.unwrap_or(false),
    cache_dir,
    config_fingerprint: String::new(),
  };
  options.config_fingerprint = config_fingerprint(&options, registry);
  Ok(options)
}

/// Every transform a rule names must exist before the first module is read.
pub fn validate_rules(rules: &[ModuleRule], registry: &TransformRegistry) -> Vec<anyhow::Error> {
  rules
    .iter()
    .flat_map(|rule| {
      rule
        .transforms
        .iter()
        .filter(|name| !registry.contains(name))
        .map(|name| unresolved_transform(rule.label(), name))
    })
    .collect()
}

fn default_worker_count() -> usize {
  std::thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
}

fn default_resolve() -> ResolveOptions {
  let mut resolve = ResolveOptions::default();
  resolve.alias.insert("~".into(), "src".into());
  resolve.alias.insert("@".into(), "src".into());
  resolve.alias.insert("components".into(), "src/components".into());
  resolve
}

fn node_modules_condition() -> RuleCondition {
  RuleCondition::regex(r"[\\/]node_modules[\\/]").expect("static pattern")
}

/// The stock rule set: stylesheets are extracted, scripts under `src` are
/// transpiled, images and fonts become classified assets.
fn default_rules(cwd: &Path) -> Vec<ModuleRule> {
  let src = cwd.join("src");
  vec![
    ModuleRule {
      name: Some("css".into()),
      test: RuleCondition::regex(r"\.css$").expect("static pattern"),
      include: vec![],
      exclude: vec![],
      transforms: vec!["css".into(), "css-extract".into()],
      asset: None,
      side_effects: true,
    },
    ModuleRule {
      name: Some("less".into()),
      test: RuleCondition::regex(r"\.less$").expect("static pattern"),
      include: vec![],
      exclude: vec![],
      transforms: vec!["less".into(), "css".into(), "css-extract".into()],
      asset: None,
      side_effects: true,
    },
    ModuleRule {
      name: Some("script".into()),
      test: RuleCondition::regex(r"\.(js|jsx)$").expect("static pattern"),
      include: vec![RuleCondition::path(src)],
      exclude: vec![node_modules_condition()],
      transforms: vec!["script".into()],
      asset: None,
      side_effects: false,
    },
    ModuleRule {
      name: Some("images".into()),
      test: RuleCondition::regex(r"\.(png|jpe?g|gif|svg|webp)$").expect("static pattern"),
      include: vec![],
      exclude: vec![],
      transforms: vec![],
      asset: Some(AssetClass::Image),
      side_effects: false,
    },
    ModuleRule {
      name: Some("fonts".into()),
      test: RuleCondition::regex(r"\.(woff2?|ttf|otf|eot)$").expect("static pattern"),
      include: vec![],
      exclude: vec![],
      transforms: vec![],
      asset: Some(AssetClass::Font),
      side_effects: false,
    },
  ]
}

/// Folded into every cache key: any change to the rule set, the registered
/// transforms or output-shaping options must invalidate persisted entries.
pub fn config_fingerprint(
  options: &NormalizedBundlerOptions,
  registry: &TransformRegistry,
) -> String {
  let mut composite = String::from("fastpack-v1");
  for rule in &options.rules {
    composite.push('\0');
    composite.push_str(rule.label());
    composite.push('\x01');
    composite.push_str(&rule.test.pattern_source());
    for condition in rule.include.iter().chain(&rule.exclude) {
      composite.push('\x01');
      composite.push_str(&condition.pattern_source());
    }
    for transform in &rule.transforms {
      composite.push('\x01');
      composite.push_str(transform);
    }
    composite.push('\x01');
    composite.push_str(&format!("{:?}", rule.asset));
  }
  composite.push('\0');
  composite.push_str(&registry.names().sorted().join(","));
  composite.push('\0');
  composite.push_str(&format!(
    "{:?}|{}|{}|{}",
    options.minify,
    options.public_path,
    options.entry_filenames.template(),
    options.css_filenames.template(),
  ));
  for class in [AssetClass::Image, AssetClass::Font, AssetClass::Other] {
    let class_options = options.asset.class(class);
    composite.push('\0');
    composite.push_str(&format!("{}|{}", class_options.inline_limit, class_options.filename));
  }
  xxhash_hex(composite.as_bytes())
}

#[cfg(test)]
mod tests {
  use fastpack_common::BundlerOptions;

  use super::normalize_options;
  use crate::transforms::TransformRegistry;

  fn raw(cwd: &str) -> BundlerOptions {
    BundlerOptions {
      cwd: Some(cwd.into()),
      input: Some(vec!["./src/index.jsx".into()]),
      ..Default::default()
    }
  }

  #[test]
  fn defaults_cover_the_stock_pipeline() {
    let options = normalize_options(raw("/app"), &TransformRegistry::with_builtins()).unwrap();
    assert_eq!(options.dir, "dist");
    assert_eq!(options.public_path, "/");
    assert_eq!(options.rules.len(), 5);
    assert_eq!(options.split_chunks.cache_groups.len(), 2);
    assert!(!options.cache_enabled);
    assert!(!options.config_fingerprint.is_empty());
  }

  #[test]
  fn unknown_transform_is_a_configuration_error() {
    let mut raw = raw("/app");
    raw.rules = Some(vec![fastpack_common::ModuleRule {
      name: Some("broken".into()),
      test: fastpack_common::RuleCondition::regex(r"\.ts$").unwrap(),
      include: vec![],
      exclude: vec![],
      transforms: vec!["typescript".into()],
      asset: None,
      side_effects: false,
    }]);
    let err = normalize_options(raw, &TransformRegistry::with_builtins()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("ConfigurationError"), "{message}");
    assert!(message.contains("`broken`"), "{message}");
    assert!(message.contains("`typescript`"), "{message}");
  }

  #[test]
  fn fingerprint_tracks_rule_changes() {
    let registry = TransformRegistry::with_builtins();
    let base = normalize_options(raw("/app"), &registry).unwrap();
    let mut changed = normalize_options(raw("/app"), &registry).unwrap();
    assert_eq!(base.config_fingerprint, changed.config_fingerprint);

    changed.rules[0].transforms.pop();
    let refolded = super::config_fingerprint(&changed, &registry);
    assert_ne!(base.config_fingerprint, refolded);
  }
}
