use arcstr::ArcStr;

/// Summary of one rendered chunk file, handed to plugins after emit so they
/// can reference final filenames (HTML injection, css post-processing).
#[derive(Debug, Clone)]
pub struct ChunkFileInfo {
  pub chunk_name: ArcStr,
  pub filename: String,
  /// Entry chunks plus the shared chunks an entry needs at startup.
  pub is_initial: bool,
  pub is_css: bool,
}
