/// Makes a chunk or asset name safe to embed in a single output filename.
/// Alphanumerics, `-`, `_`, `.` and `~` pass through; path separators and
/// everything else become `_`, so a user-chosen entry name can never escape
/// the output directory or produce an unwritable path.
pub fn sanitize_file_name(name: &str) -> String {
  name
    .chars()
    .map(|char| {
      if char.is_ascii_alphanumeric() || matches!(char, '-' | '_' | '.' | '~') {
        char
      } else {
        '_'
      }
    })
    .collect()
}

#[test]
fn test_sanitize_file_name() {
  assert_eq!(sanitize_file_name("pages/admin app"), "pages_admin_app");
  assert_eq!(sanitize_file_name("settings~1"), "settings~1");
  assert_eq!(sanitize_file_name("..\\evil\0"), ".._evil_");
  assert_eq!(sanitize_file_name("main.worker"), "main.worker");
}
