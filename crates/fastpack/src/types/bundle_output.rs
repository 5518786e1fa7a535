use fastpack_common::OutputAsset;

/// Final result of one build invocation: the emitted file set plus
/// non-fatal diagnostics.
#[derive(Debug, Default)]
pub struct BundleOutput {
  pub assets: Vec<OutputAsset>,
  pub warnings: Vec<anyhow::Error>,
}
