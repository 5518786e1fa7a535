use std::{
  io,
  path::{Path, PathBuf},
};

use dashmap::DashMap;

use crate::FileSystem;

/// In-memory file system for tests. Paths are stored as given, so tests
/// should stick to one consistent (absolute) spelling per file.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
  files: DashMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
  pub fn new(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
    let fs = Self::default();
    for (path, content) in files {
      fs.files.insert(path.into(), content.into());
    }
    fs
  }
}

impl FileSystem for MemoryFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    self
      .files
      .get(path)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display())))
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    self.files.insert(path.to_path_buf(), content.to_vec());
    Ok(())
  }

  fn exists(&self, path: &Path) -> bool {
    self.files.contains_key(path)
  }

  fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
    self.files.retain(|file, _| !file.starts_with(path));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn read_write_roundtrip() {
    let fs = MemoryFileSystem::default();
    fs.write(Path::new("/dist/main.js"), b"code").unwrap();
    assert_eq!(fs.read(Path::new("/dist/main.js")).unwrap(), b"code");
    assert!(fs.exists(Path::new("/dist/main.js")));
  }

  #[test]
  fn remove_dir_all_is_prefix_based() {
    let fs = MemoryFileSystem::new([("/dist/a.js", "a"), ("/src/b.js", "b")]);
    fs.remove_dir_all(Path::new("/dist")).unwrap();
    assert!(!fs.exists(Path::new("/dist/a.js")));
    assert!(fs.exists(Path::new("/src/b.js")));
  }
}
