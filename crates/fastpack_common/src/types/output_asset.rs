#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: String,
  pub content: Vec<u8>,
}

impl OutputAsset {
  pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
    Self { filename: filename.into(), content: content.into() }
  }

  pub fn content_as_str(&self) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(&self.content)
  }
}
