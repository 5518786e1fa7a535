use arcstr::ArcStr;

/// Raw module content as read from disk. Script and stylesheet modules are
/// text; asset modules keep their bytes untouched.
#[derive(Debug, Clone)]
pub enum Source {
  Text(ArcStr),
  Buffer(Vec<u8>),
}

impl Source {
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Self::Text(text) => text.as_bytes(),
      Self::Buffer(bytes) => bytes,
    }
  }

  pub fn byte_len(&self) -> u64 {
    self.as_bytes().len() as u64
  }
}
