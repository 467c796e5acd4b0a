use crate::{Json, JsonError, Tree, Type, FromTree, IntoTree, wrong_kind};

impl FromTree for bool {
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    match tree {
      Tree::Bool(bool) => Ok(bool),
      other => Err(wrong_kind(Type::Bool, &other)),
    }
  }
}
impl IntoTree for bool {
  fn into_tree(self) -> Tree {
    Tree::Bool(self)
  }
}

impl FromTree for i64 {
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    match tree {
      Tree::Int64(int) => Ok(int),
      other => Err(wrong_kind(Type::Int64, &other)),
    }
  }
}
impl IntoTree for i64 {
  fn into_tree(self) -> Tree {
    Tree::Int64(self)
  }
}

impl FromTree for f64 {
  /// Integers are not accepted.
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    match tree {
      Tree::Float64(float) => Ok(float),
      other => Err(wrong_kind(Type::Float64, &other)),
    }
  }
}
impl IntoTree for f64 {
  fn into_tree(self) -> Tree {
    Tree::Float64(self)
  }
}

impl FromTree for Tree {
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    Ok(tree)
  }
}
impl IntoTree for Tree {
  /// Every string within the tree is sanitized.
  fn into_tree(self) -> Tree {
    Json::from_tree(self).into_tree()
  }
}

#[test]
fn primitives() {
  assert!(bool::from_tree(Tree::Bool(true)).unwrap());
  assert_eq!(i64::from_tree(Tree::Int64(-5)).unwrap(), -5);
  assert_eq!(f64::from_tree(Tree::Float64(0.5)).unwrap().to_bits(), 0.5f64.to_bits());

  assert!(matches!(
    f64::from_tree(Tree::Int64(1)),
    Err(JsonError::WrongKind { expected: Type::Float64, found: Type::Int64 })
  ));
  assert!(matches!(
    i64::from_tree(Tree::Float64(1.0)),
    Err(JsonError::WrongKind { expected: Type::Int64, found: Type::Float64 })
  ));
  assert!(matches!(
    bool::from_tree(Tree::Null),
    Err(JsonError::WrongKind { expected: Type::Bool, found: Type::Null })
  ));

  assert_eq!(true.into_tree(), Tree::Bool(true));
  assert_eq!(7i64.into_tree(), Tree::Int64(7));
  assert_eq!(
    Tree::Array(vec![Tree::String(vec![0xff])]).into_tree(),
    Tree::Array(vec![Tree::from("/w==")])
  );
}
