use fastpack_plugin::{BuildContext, Plugin};

/// Empties the output directory before a build writes into it, so stale
/// hashed files from earlier builds never survive.
pub struct CleanPlugin;

impl Plugin for CleanPlugin {
  fn name(&self) -> &'static str {
    "clean"
  }

  fn build_start(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
    let out_dir = ctx.options.out_dir();
    tracing::debug!(dir = %out_dir.display(), "cleaning output directory");
    ctx.fs.remove_dir_all(&out_dir)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use fastpack_common::BundlerOptions;
  use fastpack_fs::{FileSystem, MemoryFileSystem};
  use fastpack_plugin::{BuildContext, Plugin};

  use super::CleanPlugin;
  use crate::{transforms::TransformRegistry, utils::normalize_options::normalize_options};

  #[test]
  fn removes_previous_output() {
    let raw = BundlerOptions {
      cwd: Some("/app".into()),
      input: Some(vec!["./src/index.jsx".into()]),
      ..Default::default()
    };
    let options = normalize_options(raw, &TransformRegistry::with_builtins()).unwrap();
    let fs = MemoryFileSystem::new([
      ("/app/dist/main.old.js", "stale"),
      ("/app/src/index.jsx", "fresh"),
    ]);

    let mut ctx = BuildContext::new(&options, &fs);
    CleanPlugin.build_start(&mut ctx).unwrap();

    assert!(!fs.exists(std::path::Path::new("/app/dist/main.old.js")));
    assert!(fs.exists(std::path::Path::new("/app/src/index.jsx")));
  }
}
