use crate::{JsonError, Tree, FromTree, IntoTree};

impl<T: FromTree> FromTree for Option<T> {
  /// This will accept `null` as a representation of `None`.
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    if tree.is_null() {
      return Ok(None);
    }
    T::from_tree(tree).map(Some)
  }
}

impl<T: IntoTree> IntoTree for Option<T> {
  /// This will represent `None` as `null`.
  fn into_tree(self) -> Tree {
    self.map(IntoTree::into_tree).unwrap_or_default()
  }
}

#[test]
fn option() {
  assert_eq!(Option::<i64>::from_tree(Tree::Null).unwrap(), None);
  assert_eq!(Option::<i64>::from_tree(Tree::Int64(3)).unwrap(), Some(3));
  assert!(Option::<i64>::from_tree(Tree::Bool(false)).is_err());

  assert_eq!(None::<bool>.into_tree(), Tree::Null);
  assert_eq!(Some(false).into_tree(), Tree::Bool(false));
}
