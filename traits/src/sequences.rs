use crate::{JsonError, Tree, Type, FromTree, IntoTree, wrong_kind};

impl<T: FromTree> FromTree for Vec<T> {
  /// Each item is converted in order, stopping at the first which fails.
  fn from_tree(mut tree: Tree) -> Result<Self, JsonError> {
    match &mut tree {
      Tree::Array(items) => core::mem::take(items).into_iter().map(T::from_tree).collect(),
      other => Err(wrong_kind(Type::Array, other)),
    }
  }
}

impl IntoTree for Vec<Tree> {
  fn into_tree(self) -> Tree {
    Tree::Array(self).into_tree()
  }
}
impl IntoTree for Vec<String> {
  fn into_tree(self) -> Tree {
    Tree::Array(self.into_iter().map(Tree::from).collect())
  }
}
impl IntoTree for Vec<Vec<u8>> {
  fn into_tree(self) -> Tree {
    Tree::Array(self.into_iter().map(IntoTree::into_tree).collect())
  }
}

#[test]
fn vec() {
  let tree = Tree::Array(vec![Tree::from("a"), Tree::from("b")]);
  assert_eq!(Vec::<String>::from_tree(tree.clone()).unwrap(), vec!["a", "b"]);
  assert_eq!(Vec::<Tree>::from_tree(tree).unwrap(), vec![Tree::from("a"), Tree::from("b")]);

  let mixed = Tree::Array(vec![Tree::from("a"), Tree::Int64(1), Tree::Bool(true)]);
  assert!(matches!(
    Vec::<String>::from_tree(mixed),
    Err(JsonError::WrongKind { expected: Type::String, found: Type::Int64 })
  ));
  assert!(matches!(
    Vec::<i64>::from_tree(Tree::Null),
    Err(JsonError::WrongKind { expected: Type::Array, found: Type::Null })
  ));

  assert_eq!(
    vec![b"ok".to_vec(), vec![0xff, 0xfe]].into_tree(),
    Tree::Array(vec![Tree::from("ok"), Tree::from("//4=")])
  );
  assert_eq!(vec!["x".to_string()].into_tree(), Tree::Array(vec![Tree::from("x")]));
}
