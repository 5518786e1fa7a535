//! Constructors for the diagnostics fastpack emits. Every fatal error names
//! the module, transform, plugin or stage it originated from so the top-level
//! invocation can print an actionable message.

/// A malformed rule, an unknown transform name, or any other problem that is
/// detectable before build work starts.
pub fn configuration_error(message: impl std::fmt::Display) -> anyhow::Error {
  anyhow::anyhow!("ConfigurationError: {message}")
}

/// A rule references a transform that is not registered. Fatal before the
/// first module is processed.
pub fn unresolved_transform(rule: &str, transform: &str) -> anyhow::Error {
  anyhow::anyhow!(
    "ConfigurationError: rule `{rule}` references unregistered transform `{transform}`"
  )
}

/// A transform rejected its input. Tagged with the module and the offending
/// transform; aborts the build with no partial output.
pub fn transform_error(module: &str, transform: &str, source: anyhow::Error) -> anyhow::Error {
  source.context(format!("TransformError: transform `{transform}` failed for module `{module}`"))
}

/// A plugin hook failed. Tagged with the plugin identity and the stage.
pub fn plugin_error(plugin: &str, stage: impl std::fmt::Display, source: anyhow::Error) -> anyhow::Error {
  source.context(format!("PluginError: plugin `{plugin}` failed at stage `{stage}`"))
}

/// An import specifier could not be mapped to a module on disk.
pub fn unresolved_import(specifier: &str, importer: Option<&str>) -> anyhow::Error {
  match importer {
    Some(importer) => {
      anyhow::anyhow!("ResolveError: could not resolve `{specifier}` imported by `{importer}`")
    }
    None => anyhow::anyhow!("ResolveError: could not resolve entry `{specifier}`"),
  }
}

/// A persisted cache entry could not be decoded. Callers treat this as a
/// cache miss and recompute; it never fails a build.
pub fn cache_corruption(key: &str, detail: impl std::fmt::Display) -> anyhow::Error {
  anyhow::anyhow!("CacheCorruption: entry `{key}` is unreadable: {detail}")
}

/// The build was superseded (watch mode) or cancelled by the caller.
pub fn build_cancelled() -> anyhow::Error {
  anyhow::anyhow!("BuildCancelled: build was cancelled before completion")
}

/// True for errors produced by [`build_cancelled`]. A failure cancels the
/// remaining in-flight work, so aggregates drop these when a real root
/// cause is present.
pub fn is_build_cancelled(error: &anyhow::Error) -> bool {
  error.to_string().starts_with("BuildCancelled")
}

#[cfg(test)]
mod tests {
  use super::{build_cancelled, is_build_cancelled, unresolved_import};

  #[test]
  fn recognizes_cancellation_errors() {
    assert!(is_build_cancelled(&build_cancelled()));
    assert!(!is_build_cancelled(&unresolved_import("./missing", None)));
  }
}
