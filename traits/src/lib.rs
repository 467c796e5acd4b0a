#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub use solo_json::*;

mod primitives;
mod string;
mod sequences;
mod maps;
mod option;

/// An item which can be reinterpreted from a detached `Tree`.
///
/// Implementations are strict. An integer is not a float, and a string which isn't valid UTF-8 is
/// not a `String`. Collections are converted element-wise, aborting on the first element which
/// fails.
pub trait FromTree: Sized {
  /// Reinterpret this node as this type.
  fn from_tree(tree: Tree) -> Result<Self, JsonError>;
}

/// An item which can be converted into a `Tree`.
///
/// Byte strings are sanitized, as `Json::set_value_string` does, so the resulting tree only ever
/// contains valid UTF-8.
pub trait IntoTree {
  /// Convert this item into a node.
  fn into_tree(self) -> Tree;
}

/// The error for a node of an unexpected type.
#[inline(always)]
pub(crate) fn wrong_kind(expected: Type, found: &Tree) -> JsonError {
  JsonError::WrongKind { expected, found: found.kind() }
}

impl FromTree for Json {
  /// The node's strings are sanitized.
  fn from_tree(tree: Tree) -> Result<Self, JsonError> {
    Ok(Json::from_tree(tree))
  }
}
impl IntoTree for Json {
  fn into_tree(self) -> Tree {
    Json::into_tree(self)
  }
}

/// Swap the value at `path` within `tree` with `target`.
///
/// `path` is an RFC 6901 JSON pointer. The node found is detached from the tree, leaving `null`
/// in its place, reinterpreted as a `T`, and then swapped with `target`.
///
/// The node is detached before it's reinterpreted. If it isn't a `T`, the error is returned yet
/// the node is not restored: its slot within the tree is left `null` and `target` is untouched.
/// If `path` is malformed or nothing is present at it, the tree is untouched.
pub fn swap_at<T: FromTree>(tree: &mut Tree, path: &str, target: &mut T) -> Result<(), JsonError> {
  let pointer = Pointer::parse(path)?;
  let node = core::mem::take(pointer.locate_mut(tree)?);
  let found = node.kind();
  let mut value = T::from_tree(node).inspect_err(|e| {
    log::trace!("discarded the {found} at {path:?} as it couldn't be read: {e}");
  })?;
  core::mem::swap(&mut value, target);
  Ok(())
}

/// Move `value` into `tree` at `path`, creating any containers necessary.
///
/// `path` is an RFC 6901 JSON pointer. `null` values along the path become arrays if the next
/// token is `-` or an index, and objects otherwise. `-` appends to an array, and an index past
/// the end of an array pads it with `null`s. If a value of another type is in the way, this
/// returns `JsonError::CannotCreate` and `value` is dropped.
pub fn move_in<T: IntoTree>(tree: &mut Tree, path: &str, value: T) -> Result<(), JsonError> {
  let pointer = Pointer::parse(path)?;
  pointer.assign(tree, value.into_tree())
}
