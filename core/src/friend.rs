use crate::{Json, Tree};

/// Raw access to the tree within a `Json`.
///
/// This bypasses every invariant `Json` maintains, including the guarantee its strings are valid
/// UTF-8. It only exists for tests, and is only compiled with `cfg(test)` or the `friend` feature.
pub struct Friend;

impl Friend {
  /// Unwrap a `Json` to get the tree within it.
  #[inline(always)]
  pub fn unwrap(json: &mut Json) -> &mut Tree {
    &mut json.0
  }
}

#[test]
fn dump_rejects_invalid_utf8() {
  #[rustfmt::skip]
  const BINARY_INPUT: &[u8] = &[
    0x57, 0xe5, 0x79, 0xfb, 0xa6, 0xbb, 0x0d, 0xbc, 0xce, 0xbd, 0xa7, 0xa0,
    0xba, 0xa4, 0x78, 0x78, 0x12, 0x59, 0xee, 0x68, 0x39, 0xa4, 0x07, 0x98,
    0xc5, 0x3e, 0xbc, 0x55, 0xcb, 0xfe, 0x34, 0x3c, 0x7e, 0x1b, 0x5a, 0xb3,
    0x22, 0x9d, 0xc1, 0x2d, 0x6e, 0xca, 0x5b, 0xf1, 0x10, 0x25, 0x47, 0x1e,
  ];

  let mut json = Json::new();
  assert!(json.dump().is_ok());

  *Friend::unwrap(&mut json) = Tree::String(BINARY_INPUT.to_vec());
  let result = json.dump();
  let Err(e) = result else { panic!("serialized invalid UTF-8") };
  assert!(matches!(e, crate::JsonError::Serialize(_)));
  assert!(!e.to_string().is_empty());
}
