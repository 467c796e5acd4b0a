use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::{JsonError, Map, Tree, Type, FromTree, IntoTree, wrong_kind};

/// Convert each value within an object, stopping at the first which fails.
fn from_object<T: FromTree, M: FromIterator<(String, T)>>(mut tree: Tree) -> Result<M, JsonError> {
  match &mut tree {
    Tree::Object(map) => core::mem::take(map)
      .into_iter()
      .map(|(key, value)| Ok((key, T::from_tree(value)?)))
      .collect(),
    other => Err(wrong_kind(Type::Object, other)),
  }
}

impl<T: FromTree> FromTree for IndexMap<String, T> {
  /// The order of the keys is preserved.
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    from_object(tree)
  }
}
impl<T: FromTree> FromTree for BTreeMap<String, T> {
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    from_object(tree)
  }
}
impl<T: FromTree> FromTree for HashMap<String, T> {
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    from_object(tree)
  }
}

impl IntoTree for Map {
  fn into_tree(self) -> Tree {
    Tree::Object(self).into_tree()
  }
}

fn into_object<T: IntoTree>(map: impl IntoIterator<Item = (String, T)>) -> Tree {
  Tree::Object(map.into_iter().map(|(key, value)| (key, value.into_tree())).collect())
}
impl IntoTree for BTreeMap<String, String> {
  fn into_tree(self) -> Tree {
    into_object(self)
  }
}
impl IntoTree for BTreeMap<String, Vec<u8>> {
  fn into_tree(self) -> Tree {
    into_object(self)
  }
}
impl IntoTree for HashMap<String, String> {
  fn into_tree(self) -> Tree {
    into_object(self)
  }
}

#[test]
fn maps() {
  let tree = crate::parse(r#"{"b": "x", "a": "y"}"#).unwrap();

  let map = IndexMap::<String, String>::from_tree(tree.clone()).unwrap();
  assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
  let map = BTreeMap::<String, String>::from_tree(tree.clone()).unwrap();
  assert_eq!(map["a"], "y");
  assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
  assert_eq!(HashMap::<String, String>::from_tree(tree.clone()).unwrap().len(), 2);
  assert_eq!(Map::from_tree(tree.clone()).unwrap().len(), 2);

  assert!(matches!(
    BTreeMap::<String, i64>::from_tree(tree),
    Err(JsonError::WrongKind { expected: Type::Int64, found: Type::String })
  ));
  assert!(matches!(
    BTreeMap::<String, String>::from_tree(Tree::Array(vec![])),
    Err(JsonError::WrongKind { expected: Type::Object, found: Type::Array })
  ));

  let tree = BTreeMap::from([("bin".to_string(), vec![0xff]), ("txt".to_string(), b"t".to_vec())])
    .into_tree();
  assert_eq!(tree, crate::parse(r#"{"bin": "/w==", "txt": "t"}"#).unwrap());
  let tree = HashMap::from([("k".to_string(), "v".to_string())]).into_tree();
  assert_eq!(tree, crate::parse(r#"{"k": "v"}"#).unwrap());
}
