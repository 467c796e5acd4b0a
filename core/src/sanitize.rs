//! The policy applied to every string entering a document.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// If these bytes are valid UTF-8.
#[inline(always)]
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
  core::str::from_utf8(bytes).is_ok()
}

/// Encode these bytes with the standard, padded base64 alphabet.
#[inline(always)]
pub fn base64_encode(bytes: &[u8]) -> String {
  BASE64.encode(bytes)
}

/// Sanitize bytes into a string which may be stored within a document.
///
/// Valid UTF-8 is kept as-is. Anything else is replaced by its base64 encoding, which is always
/// valid UTF-8. This is lossy in the sense the caller must know, out of band, that a field may
/// have been encoded. Both `Json::set_value_string` and the pointer helpers use this function so
/// documents built either way are indistinguishable.
pub fn sanitize(bytes: Vec<u8>) -> String {
  match String::from_utf8(bytes) {
    Ok(string) => string,
    Err(e) => {
      let bytes = e.into_bytes();
      log::debug!("re-encoding {} bytes of invalid UTF-8 as base64", bytes.len());
      base64_encode(&bytes)
    }
  }
}

#[test]
fn valid_utf8_is_kept() {
  assert_eq!(sanitize(b"Simone".to_vec()), "Simone");
  assert_eq!(sanitize("\u{1F600} ok".as_bytes().to_vec()), "\u{1F600} ok");
  assert_eq!(sanitize(vec![]), "");
}

#[test]
fn invalid_utf8_is_encoded() {
  let bytes = vec![0x57, 0xe5, 0x79, 0xfb, 0xa6, 0xbb];
  assert!(!is_valid_utf8(&bytes));
  assert_eq!(sanitize(bytes.clone()), base64_encode(&bytes));
  assert_eq!(sanitize(bytes), "V+V5+6a7");
  // A truncated multi-byte sequence
  assert_eq!(sanitize(vec![0xe2, 0x82]), "4oI=");
}
