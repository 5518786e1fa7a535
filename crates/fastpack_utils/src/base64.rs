use base64_simd::STANDARD;

pub fn to_standard_base64(input: impl AsRef<[u8]>) -> String {
  STANDARD.encode_to_string(input)
}

#[test]
fn test_to_standard_base64() {
  assert_eq!(to_standard_base64(b"hello"), "aGVsbG8=");
}
