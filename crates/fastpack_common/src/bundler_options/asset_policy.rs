use serde::Deserialize;

use crate::AssetClass;

/// Inline-or-emit decision for one processed asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
  /// Embed as a self-contained data URL inside the importing chunk.
  Inline,
  /// Write a separate output file named by the class's template.
  Emit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetClassOptions {
  /// Assets at or below this byte size are inlined.
  pub inline_limit: u64,
  pub filename: String,
}

impl AssetClassOptions {
  pub fn new(inline_limit: u64, filename: impl Into<String>) -> Self {
    Self { inline_limit, filename: filename.into() }
  }

  /// Pure and deterministic: the decision depends only on the asset size and
  /// this configuration.
  pub fn decide(&self, byte_size: u64) -> Emission {
    if byte_size <= self.inline_limit {
      Emission::Inline
    } else {
      Emission::Emit
    }
  }
}

impl Default for AssetClassOptions {
  fn default() -> Self {
    Self::new(8 * 1024, "assets/[name].[hash:8][ext]")
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetOptions {
  pub images: AssetClassOptions,
  pub fonts: AssetClassOptions,
  pub other: AssetClassOptions,
}

impl AssetOptions {
  pub fn class(&self, class: AssetClass) -> &AssetClassOptions {
    match class {
      AssetClass::Image => &self.images,
      AssetClass::Font => &self.fonts,
      AssetClass::Other => &self.other,
    }
  }
}

impl Default for AssetOptions {
  fn default() -> Self {
    Self {
      // Images over 50 KiB are emitted as files instead of data URLs.
      images: AssetClassOptions::new(50 * 1024, "[name][ext]"),
      fonts: AssetClassOptions::new(10 * 1024, "[name].[chunkhash:8][ext]"),
      other: AssetClassOptions::default(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_is_inclusive() {
    let images = AssetOptions::default().images;
    assert_eq!(images.decide(40_000), Emission::Inline);
    assert_eq!(images.decide(50 * 1024), Emission::Inline);
    assert_eq!(images.decide(60_000), Emission::Emit);
  }
}
