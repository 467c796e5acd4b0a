use crate::{sanitize, JsonError, Tree, Type, FromTree, IntoTree, wrong_kind};

impl FromTree for String {
  fn from_tree(mut tree: Tree) -> Result<Self, JsonError> {
    match &mut tree {
      Tree::String(bytes) => {
        String::from_utf8(core::mem::take(bytes)).map_err(|_| JsonError::InvalidUtf8)
      }
      other => Err(wrong_kind(Type::String, other)),
    }
  }
}

impl IntoTree for String {
  fn into_tree(self) -> Tree {
    Tree::from(self)
  }
}
impl IntoTree for &str {
  fn into_tree(self) -> Tree {
    Tree::from(self)
  }
}

impl IntoTree for Vec<u8> {
  /// If these bytes aren't valid UTF-8, their base64 encoding is stored.
  fn into_tree(self) -> Tree {
    Tree::from(sanitize(self))
  }
}
impl IntoTree for &[u8] {
  /// If these bytes aren't valid UTF-8, their base64 encoding is stored.
  fn into_tree(self) -> Tree {
    Tree::from(sanitize(self.to_vec()))
  }
}

#[test]
fn strings() {
  assert_eq!(String::from_tree(Tree::from("abc")).unwrap(), "abc");
  assert!(matches!(String::from_tree(Tree::String(vec![0xc3])), Err(JsonError::InvalidUtf8)));
  assert!(matches!(
    String::from_tree(Tree::Int64(1)),
    Err(JsonError::WrongKind { expected: Type::String, found: Type::Int64 })
  ));

  assert_eq!("abc".into_tree(), Tree::from("abc"));
  assert_eq!(b"abc".to_vec().into_tree(), Tree::from("abc"));
  assert_eq!((&[0xe2u8, 0x82][..]).into_tree(), Tree::from("4oI="));
}
