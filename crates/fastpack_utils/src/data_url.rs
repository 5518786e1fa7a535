use std::path::Path;

use crate::base64::to_standard_base64;

/// Guess a mime type for an emitted asset, preferring content sniffing over
/// the file extension.
pub fn guess_mime(path: &Path, content: &[u8]) -> String {
  if let Some(kind) = infer::get(content) {
    return kind.mime_type().to_string();
  }

  match path.extension().and_then(|ext| ext.to_str()) {
    Some("png") => mime::IMAGE_PNG.to_string(),
    Some("jpg" | "jpeg") => mime::IMAGE_JPEG.to_string(),
    Some("gif") => mime::IMAGE_GIF.to_string(),
    Some("svg") => mime::IMAGE_SVG.to_string(),
    Some("css") => mime::TEXT_CSS.to_string(),
    Some("woff") => "font/woff".to_string(),
    Some("woff2") => "font/woff2".to_string(),
    Some("ttf") => "font/ttf".to_string(),
    Some("otf") => "font/otf".to_string(),
    Some("eot") => "application/vnd.ms-fontobject".to_string(),
    _ => mime::APPLICATION_OCTET_STREAM.to_string(),
  }
}

/// Self-contained data reference for an inlined asset.
pub fn to_data_url(path: &Path, content: &[u8]) -> String {
  format!("data:{};base64,{}", guess_mime(path, content), to_standard_base64(content))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mime_falls_back_to_extension() {
    assert_eq!(guess_mime(Path::new("a.woff2"), b"not-a-real-font"), "font/woff2");
    assert_eq!(guess_mime(Path::new("a.bin"), b"????"), "application/octet-stream");
  }

  #[test]
  fn data_url_shape() {
    let url = to_data_url(Path::new("a.css"), b"body{}");
    assert!(url.starts_with("data:text/css;base64,"));
  }
}
