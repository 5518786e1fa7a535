use std::{io, path::Path};

/// File-system access used by the whole pipeline. Implemented by
/// [`crate::OsFileSystem`] for real builds and [`crate::MemoryFileSystem`]
/// for tests, so no stage touches ambient disk state directly.
pub trait FileSystem: Send + Sync {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  /// Writes `content`, creating parent directories as needed.
  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn exists(&self, path: &Path) -> bool;

  /// Removes a directory tree. Missing directories are not an error.
  fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let bytes = self.read(path)?;
    String::from_utf8(bytes)
      .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
  }
}
