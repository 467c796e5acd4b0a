use core::fmt;

use crate::Type;

/// The stack which must remain before recursing into a nested value.
const RED_ZONE: usize = 64 * 1024;
/// The size of each stack segment allocated once the red zone is reached.
const STACK_SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it's nearly exhausted.
///
/// Documents may be nested arbitrarily deep, so every operation recursing over a `Tree` does so
/// within this.
#[inline(always)]
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
  stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// The map used for objects.
///
/// Keys are unique. Insertion order is preserved when serializing, yet ignored by equality.
pub type Map = indexmap::IndexMap<String, Tree>;

/// A JSON document, as held in memory.
///
/// This is the raw representation operated on by the engine and the pointer helpers. Strings are
/// held as bytes, as RFC 8259 allows strings to specify invalid UTF-8. Documents built through
/// `Json` or the sanitizing helpers will only ever contain valid UTF-8, and serialization will
/// fail for any tree which doesn't.
#[derive(Default)]
pub enum Tree {
  /// The `null` unit value.
  #[default]
  Null,
  /// A boolean.
  Bool(bool),
  /// An integral number.
  Int64(i64),
  /// A floating-point number.
  Float64(f64),
  /// A string, as bytes.
  String(Vec<u8>),
  /// An array.
  Array(Vec<Tree>),
  /// An object.
  Object(Map),
}

impl Tree {
  /// The type of this value.
  #[inline(always)]
  pub fn kind(&self) -> Type {
    match self {
      Tree::Null => Type::Null,
      Tree::Bool(_) => Type::Bool,
      Tree::Int64(_) => Type::Int64,
      Tree::Float64(_) => Type::Float64,
      Tree::String(_) => Type::String,
      Tree::Array(_) => Type::Array,
      Tree::Object(_) => Type::Object,
    }
  }

  /// If this is `null`.
  #[inline(always)]
  pub fn is_null(&self) -> bool {
    matches!(self, Tree::Null)
  }

  /// If this is an array or an object.
  #[inline(always)]
  fn is_container(&self) -> bool {
    matches!(self, Tree::Array(_) | Tree::Object(_))
  }

  /// Apply `f` to every string within this tree, including itself, in document order.
  ///
  /// Object keys are not visited as they're always `String`s.
  pub(crate) fn for_each_string(&mut self, f: &mut impl FnMut(&mut Vec<u8>)) {
    let mut pending = vec![self];
    while let Some(tree) = pending.pop() {
      match tree {
        Tree::String(bytes) => f(bytes),
        Tree::Array(items) => pending.extend(items.iter_mut().rev()),
        Tree::Object(map) => pending.extend(map.values_mut().rev()),
        Tree::Null | Tree::Bool(_) | Tree::Int64(_) | Tree::Float64(_) => {}
      }
    }
  }

  /// Move every nested container out of this tree, onto `into`.
  fn detach_containers(&mut self, into: &mut Vec<Tree>) {
    match self {
      Tree::Array(items) => into.extend(items.drain(..).filter(Tree::is_container)),
      Tree::Object(map) => {
        into.extend(map.drain(..).map(|(_, value)| value).filter(Tree::is_container));
      }
      Tree::Null | Tree::Bool(_) | Tree::Int64(_) | Tree::Float64(_) | Tree::String(_) => {}
    }
  }
}

impl Drop for Tree {
  /// Nested containers are dropped iteratively, so dropping never recurses.
  fn drop(&mut self) {
    let mut detached = vec![];
    self.detach_containers(&mut detached);
    while let Some(mut tree) = detached.pop() {
      tree.detach_containers(&mut detached);
    }
  }
}

impl Clone for Tree {
  fn clone(&self) -> Self {
    with_stack(|| match self {
      Tree::Null => Tree::Null,
      Tree::Bool(bool) => Tree::Bool(*bool),
      Tree::Int64(int) => Tree::Int64(*int),
      Tree::Float64(float) => Tree::Float64(*float),
      Tree::String(bytes) => Tree::String(bytes.clone()),
      Tree::Array(items) => Tree::Array(items.clone()),
      Tree::Object(map) => Tree::Object(map.clone()),
    })
  }
}

impl PartialEq for Tree {
  #[allow(clippy::float_cmp)]
  fn eq(&self, other: &Self) -> bool {
    with_stack(|| match (self, other) {
      (Tree::Null, Tree::Null) => true,
      (Tree::Bool(a), Tree::Bool(b)) => a == b,
      (Tree::Int64(a), Tree::Int64(b)) => a == b,
      (Tree::Float64(a), Tree::Float64(b)) => a == b,
      (Tree::String(a), Tree::String(b)) => a == b,
      (Tree::Array(a), Tree::Array(b)) => a == b,
      (Tree::Object(a), Tree::Object(b)) => a == b,
      _ => false,
    })
  }
}

impl fmt::Debug for Tree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    with_stack(|| match self {
      Tree::Null => f.write_str("Null"),
      Tree::Bool(bool) => f.debug_tuple("Bool").field(bool).finish(),
      Tree::Int64(int) => f.debug_tuple("Int64").field(int).finish(),
      Tree::Float64(float) => f.debug_tuple("Float64").field(float).finish(),
      Tree::String(bytes) => match core::str::from_utf8(bytes) {
        Ok(string) => f.debug_tuple("String").field(&string).finish(),
        Err(_) => f.debug_tuple("String").field(bytes).finish(),
      },
      Tree::Array(items) => f.debug_tuple("Array").field(items).finish(),
      Tree::Object(map) => f.debug_tuple("Object").field(map).finish(),
    })
  }
}

impl From<bool> for Tree {
  fn from(value: bool) -> Self {
    Tree::Bool(value)
  }
}
impl From<i64> for Tree {
  fn from(value: i64) -> Self {
    Tree::Int64(value)
  }
}
impl From<f64> for Tree {
  fn from(value: f64) -> Self {
    Tree::Float64(value)
  }
}
impl From<String> for Tree {
  /// `String`s are always valid UTF-8, so no sanitization is necessary.
  fn from(value: String) -> Self {
    Tree::String(value.into_bytes())
  }
}
impl From<&str> for Tree {
  fn from(value: &str) -> Self {
    Tree::String(value.as_bytes().to_vec())
  }
}
impl From<Vec<Tree>> for Tree {
  fn from(value: Vec<Tree>) -> Self {
    Tree::Array(value)
  }
}
impl From<Map> for Tree {
  fn from(value: Map) -> Self {
    Tree::Object(value)
  }
}

#[test]
fn kinds() {
  assert_eq!(Tree::Null.kind(), Type::Null);
  assert_eq!(Tree::from(true).kind(), Type::Bool);
  assert_eq!(Tree::from(1i64).kind(), Type::Int64);
  assert_eq!(Tree::from(1.5).kind(), Type::Float64);
  assert_eq!(Tree::from("a").kind(), Type::String);
  assert_eq!(Tree::from(vec![]).kind(), Type::Array);
  assert_eq!(Tree::from(Map::new()).kind(), Type::Object);
  assert!(Tree::default().is_null());
}

#[test]
fn object_equality_ignores_order() {
  let a = Map::from([("a".to_string(), Tree::from(1i64)), ("b".to_string(), Tree::from(2i64))]);
  let b = Map::from([("b".to_string(), Tree::from(2i64)), ("a".to_string(), Tree::from(1i64))]);
  assert_eq!(Tree::from(a), Tree::from(b));
}

#[test]
fn visits_every_string() {
  let mut tree = Tree::from(vec![
    Tree::from("a"),
    Tree::from(Map::from([("b".to_string(), Tree::from(vec![Tree::from("c")]))])),
    Tree::from(1i64),
  ]);
  let mut seen = vec![];
  tree.for_each_string(&mut |bytes: &mut Vec<u8>| seen.push(bytes.clone()));
  assert_eq!(seen, vec![b"a".to_vec(), b"c".to_vec()]);
}

#[cfg(test)]
fn nested_arrays(depth: usize) -> Tree {
  let mut tree = Tree::from("leaf");
  for _ in 0 .. depth {
    tree = Tree::Array(vec![Tree::Null, tree]);
  }
  tree
}

#[test]
fn deep_trees_drop_clone_and_compare() {
  const DEPTH: usize = 100_000;
  let tree = nested_arrays(DEPTH);
  let copy = tree.clone();
  assert_eq!(tree, copy);
  assert_ne!(tree, nested_arrays(DEPTH - 1));
  drop(tree);

  let mut copy = copy;
  let mut strings = 0;
  copy.for_each_string(&mut |_: &mut Vec<u8>| strings += 1);
  assert_eq!(strings, 1);
}

#[test]
fn debug_distinguishes_invalid_utf8() {
  assert_eq!(format!("{:?}", Tree::from("a")), r#"String("a")"#);
  assert_eq!(format!("{:?}", Tree::String(vec![0xff])), "String([255])");
  assert_eq!(format!("{:?}", Tree::Array(vec![Tree::Null])), "Array([Null])");
}
