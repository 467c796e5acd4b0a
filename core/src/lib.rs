#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod sanitize;
mod tree;
mod engine;
mod pointer;
mod json;
mod outcome;
#[cfg(any(test, feature = "friend"))]
mod friend;

pub use sanitize::{is_valid_utf8, base64_encode, sanitize};
pub use tree::{Map, Tree};
pub use engine::{parse, serialize};
pub use pointer::Pointer;
pub use json::Json;
pub use outcome::Outcome;
#[cfg(any(test, feature = "friend"))]
pub use friend::Friend;

/// An error incurred when working with a JSON document.
///
/// Every fallible operation within this crate reports its failure with this type. None of them
/// panic.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
  /// An unexpected state was reached.
  #[error("internal error")]
  InternalError,
  /// The path expression was malformed.
  #[error("malformed path {path:?}: {reason}")]
  BadPath {
    /// The path expression as provided.
    path: String,
    /// Why the path expression was rejected.
    reason: &'static str,
  },
  /// Nothing was present at the key or path.
  #[error("nothing found at {0:?}")]
  NotFound(String),
  /// The operation could not be performed given the value's type.
  #[error("wrong kind: expected {expected}, found {found}")]
  WrongKind {
    /// The type the operation required.
    expected: Type,
    /// The type actually present.
    found: Type,
  },
  /// A path could not be created as a container of an incompatible type was in the way.
  #[error("cannot create {token:?} within {found}")]
  CannotCreate {
    /// The reference token which could not be created.
    token: String,
    /// The type of the value which was in the way.
    found: Type,
  },
  /// A string held bytes which aren't valid UTF-8.
  #[error("string is not valid UTF-8")]
  InvalidUtf8,
  /// The text could not be parsed as JSON.
  #[error("parse error: {0}")]
  Parse(serde_json::Error),
  /// The document could not be serialized as JSON.
  #[error("serialize error: {0}")]
  Serialize(serde_json::Error),
}

/// The type of a value.
///
/// https://datatracker.ietf.org/doc/html/rfc8259#section-3 defines all possible values. Numbers
/// are split into integers and floats, as the host distinguishes the two.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Type {
  /// The `null` unit value.
  Null,
  /// A boolean.
  Bool,
  /// An integral number, representable as an `i64`.
  Int64,
  /// A floating-point number.
  Float64,
  /// A string.
  String,
  /// An array.
  Array,
  /// An object.
  Object,
}

impl core::fmt::Display for Type {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Type::Null => "null",
      Type::Bool => "boolean",
      Type::Int64 => "int64",
      Type::Float64 => "float64",
      Type::String => "string",
      Type::Array => "array",
      Type::Object => "object",
    })
  }
}

#[test]
fn error_messages_are_never_empty() {
  let errors = [
    JsonError::InternalError,
    JsonError::BadPath { path: "[".to_string(), reason: "must begin with '/'" },
    JsonError::NotFound("key".to_string()),
    JsonError::WrongKind { expected: Type::Object, found: Type::Int64 },
    JsonError::CannotCreate { token: "a".to_string(), found: Type::Bool },
    JsonError::InvalidUtf8,
  ];
  for error in errors {
    assert!(!error.to_string().is_empty());
  }
  assert_eq!(
    JsonError::WrongKind { expected: Type::Array, found: Type::Float64 }.to_string(),
    "wrong kind: expected array, found float64"
  );
}
