use std::path::{Path, PathBuf};

use fastpack_common::{ModuleId, NormalizedBundlerOptions};
use fastpack_error::unresolved_import;
use fastpack_fs::FileSystem;
use sugar_path::SugarPath;

/// Maps an import specifier to a module on disk: alias rewriting, path
/// joining and extension completion. Full node-style resolution is out of
/// scope; this covers relative imports, configured aliases and flat
/// `node_modules` lookups.
pub fn resolve_id(
  fs: &dyn FileSystem,
  options: &NormalizedBundlerOptions,
  specifier: &str,
  importer: Option<&ModuleId>,
) -> anyhow::Result<ModuleId> {
  let specifier = apply_alias(options, specifier);
  let specifier = specifier.as_ref();

  let base = if Path::new(specifier).is_absolute() {
    PathBuf::from(specifier)
  } else if specifier.starts_with("./") || specifier.starts_with("../") {
    match importer {
      Some(importer) => Path::new(importer.as_ref())
        .parent()
        .unwrap_or_else(|| Path::new("/"))
        .join(specifier),
      None => options.cwd.join(specifier),
    }
  } else {
    options.cwd.join("node_modules").join(specifier)
  };
  let base = base.normalize();

  complete_extension(fs, options, &base)
    .map(|path| ModuleId::new(path.to_string_lossy().into_owned()))
    .ok_or_else(|| unresolved_import(specifier, importer.map(AsRef::as_ref)))
}

/// Longest matching alias key wins; the alias value is joined onto the cwd
/// unless it is already absolute.
fn apply_alias<'a>(options: &NormalizedBundlerOptions, specifier: &'a str) -> std::borrow::Cow<'a, str> {
  let hit = options
    .resolve
    .alias
    .iter()
    .filter(|(key, _)| {
      specifier == key.as_str() || specifier.starts_with(&format!("{key}/"))
    })
    .max_by_key(|(key, _)| key.len());
  let Some((key, value)) = hit else {
    return std::borrow::Cow::Borrowed(specifier);
  };
  let target = if Path::new(value).is_absolute() {
    PathBuf::from(value)
  } else {
    options.cwd.join(value)
  };
  let rest = &specifier[key.len()..];
  std::borrow::Cow::Owned(format!("{}{rest}", target.to_string_lossy()))
}

fn complete_extension(
  fs: &dyn FileSystem,
  options: &NormalizedBundlerOptions,
  base: &Path,
) -> Option<PathBuf> {
  if fs.exists(base) {
    return Some(base.to_path_buf());
  }
  let as_str = base.to_string_lossy();
  for extension in &options.resolve.extensions {
    let candidate = PathBuf::from(format!("{as_str}{extension}"));
    if fs.exists(&candidate) {
      return Some(candidate);
    }
  }
  for extension in &options.resolve.extensions {
    let candidate = base.join(format!("index{extension}"));
    if fs.exists(&candidate) {
      return Some(candidate);
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use fastpack_common::{BundlerOptions, ModuleId};
  use fastpack_fs::MemoryFileSystem;

  use super::resolve_id;
  use crate::{transforms::TransformRegistry, utils::normalize_options::normalize_options};

  fn fixture() -> (MemoryFileSystem, fastpack_common::NormalizedBundlerOptions) {
    let fs = MemoryFileSystem::new([
      ("/app/src/index.jsx", ""),
      ("/app/src/app.jsx", ""),
      ("/app/src/components/button/index.jsx", ""),
      ("/app/src/style.css", ""),
      ("/app/node_modules/react/index.js", ""),
    ]);
    let raw = BundlerOptions {
      cwd: Some("/app".into()),
      input: Some(vec!["./src/index.jsx".into()]),
      ..Default::default()
    };
    let options = normalize_options(raw, &TransformRegistry::with_builtins()).unwrap();
    (fs, options)
  }

  #[test]
  fn resolves_relative_with_extension_completion() {
    let (fs, options) = fixture();
    let importer = ModuleId::new("/app/src/index.jsx");
    let resolved = resolve_id(&fs, &options, "./app", Some(&importer)).unwrap();
    assert_eq!(resolved.as_ref(), "/app/src/app.jsx");
  }

  #[test]
  fn resolves_directory_imports_via_index() {
    let (fs, options) = fixture();
    let importer = ModuleId::new("/app/src/app.jsx");
    let resolved = resolve_id(&fs, &options, "./components/button", Some(&importer)).unwrap();
    assert_eq!(resolved.as_ref(), "/app/src/components/button/index.jsx");
  }

  #[test]
  fn resolves_bare_specifiers_from_node_modules() {
    let (fs, options) = fixture();
    let importer = ModuleId::new("/app/src/index.jsx");
    let resolved = resolve_id(&fs, &options, "react", Some(&importer)).unwrap();
    assert_eq!(resolved.as_ref(), "/app/node_modules/react/index.js");
  }

  #[test]
  fn resolves_aliases_relative_to_cwd() {
    let (fs, options) = fixture();
    let importer = ModuleId::new("/app/src/components/button/index.jsx");
    let resolved = resolve_id(&fs, &options, "@/style.css", Some(&importer)).unwrap();
    assert_eq!(resolved.as_ref(), "/app/src/style.css");
  }

  #[test]
  fn unresolvable_specifier_names_the_importer() {
    let (fs, options) = fixture();
    let importer = ModuleId::new("/app/src/index.jsx");
    let err = resolve_id(&fs, &options, "./missing", Some(&importer)).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("ResolveError"), "{message}");
    assert!(message.contains("./missing"), "{message}");
    assert!(message.contains("/app/src/index.jsx"), "{message}");
  }

  #[test]
  fn shared_fs_handle_is_send_sync() {
    fn assert_shared<T: Send + Sync>(_value: &T) {}
    let (fs, _options) = fixture();
    let fs: Arc<dyn fastpack_fs::FileSystem> = Arc::new(fs);
    assert_shared(&fs);
  }
}
