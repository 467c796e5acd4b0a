use core::str::FromStr;

use crate::{JsonError, Map, Tree, Type};

/// A compiled RFC 6901 JSON pointer.
///
/// The empty string refers to the root. Otherwise, the pointer is a series of reference tokens,
/// each prefixed by `/`, where `~1` encodes `/` and `~0` encodes `~`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Pointer {
  tokens: Vec<String>,
}

/// Parse an array index, as allowed by RFC 6901.
///
/// This rejects leading zeroes, signs, and `-` (which is handled by callers where meaningful).
#[inline(always)]
fn array_index(token: &str) -> Option<usize> {
  let canonical = match token.as_bytes() {
    [b'0'] => true,
    [b'1' ..= b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
    _ => false,
  };
  if !canonical {
    None?;
  }
  token.parse().ok()
}

/// If assigning through a `null` with this token creates an array (instead of an object).
#[inline(always)]
fn creates_array(token: &str) -> bool {
  (token == "-") || array_index(token).is_some()
}

/// The slot `token` assigns to within an array of length `len`.
///
/// `-` is the slot after the last item. `None` if the token isn't an index, or the slot is more
/// than `Pointer::MAX_PADDING` past the end of the array.
#[inline(always)]
fn array_slot(len: usize, token: &str) -> Option<usize> {
  let i = if token == "-" { len } else { array_index(token)? };
  if i.saturating_sub(len) > Pointer::MAX_PADDING {
    None?;
  }
  Some(i)
}

impl Pointer {
  /// The most `null`s an array will be padded with when assigning past its end.
  pub const MAX_PADDING: usize = 1024;

  /// Compile a path expression.
  pub fn parse(path: &str) -> Result<Self, JsonError> {
    let bad_path = |reason| JsonError::BadPath { path: path.to_string(), reason };

    if path.is_empty() {
      return Ok(Pointer { tokens: vec![] });
    }
    let Some(path) = path.strip_prefix('/') else {
      return Err(bad_path("must be empty or begin with '/'"));
    };

    let mut tokens = vec![];
    for raw in path.split('/') {
      let mut token = String::with_capacity(raw.len());
      let mut chars = raw.chars();
      while let Some(char) = chars.next() {
        if char != '~' {
          token.push(char);
          continue;
        }
        match chars.next() {
          Some('0') => token.push('~'),
          Some('1') => token.push('/'),
          _ => Err(bad_path("'~' must be followed by '0' or '1'"))?,
        }
      }
      tokens.push(token);
    }
    Ok(Pointer { tokens })
  }

  /// The unescaped reference tokens.
  pub fn tokens(&self) -> impl Iterator<Item = &str> {
    self.tokens.iter().map(String::as_str)
  }

  /// The path expression this pointer corresponds to, with tokens re-escaped.
  pub fn to_path(&self) -> String {
    self.tokens().fold(String::new(), |mut path, token| {
      path.push('/');
      path.push_str(&token.replace('~', "~0").replace('/', "~1"));
      path
    })
  }

  /// Find the value this pointer refers to.
  ///
  /// Arrays are only indexed by canonical indexes in range. `-` never refers to a value.
  pub fn locate_mut<'tree>(&self, tree: &'tree mut Tree) -> Result<&'tree mut Tree, JsonError> {
    let mut node = tree;
    for (depth, token) in self.tokens.iter().enumerate() {
      let found = match node {
        Tree::Object(map) => map.get_mut(token.as_str()),
        Tree::Array(items) => array_index(token).and_then(|i| items.get_mut(i)),
        _ => None,
      };
      let Some(found) = found else {
        let missing = Pointer { tokens: self.tokens[..= depth].to_vec() };
        return Err(JsonError::NotFound(missing.to_path()));
      };
      node = found;
    }
    Ok(node)
  }

  /// Check `assign` would succeed, without modifying the tree.
  fn check_assignable(&self, tree: &Tree) -> Result<(), JsonError> {
    // `None` is a value which would be created, and which starts as `null`
    let mut node = Some(tree);
    for token in &self.tokens {
      let cannot_create = |found| JsonError::CannotCreate { token: token.clone(), found };
      node = match node {
        None | Some(Tree::Null) => {
          if creates_array(token) && array_slot(0, token).is_none() {
            Err(cannot_create(Type::Array))?;
          }
          None
        }
        Some(Tree::Object(map)) => map.get(token.as_str()),
        Some(Tree::Array(items)) => {
          items.get(array_slot(items.len(), token).ok_or_else(|| cannot_create(Type::Array))?)
        }
        Some(other) => Err(cannot_create(other.kind()))?,
      };
    }
    Ok(())
  }

  /// Assign `value` at the location this pointer refers to, creating containers as needed.
  ///
  /// `null` values along the path become arrays if the token is `-` or numeric, and objects
  /// otherwise. Objects have the key inserted if it's absent. Arrays have `-` append a value, and
  /// an index past the end pad the array with up to `Pointer::MAX_PADDING` `null`s.
  ///
  /// Any other type along the path, a token which can't index an array, or an index too far past
  /// the end of an array yields `JsonError::CannotCreate`. The path is checked in full before
  /// anything is created, so the tree is untouched on error. `value` is dropped in that case.
  pub fn assign(&self, tree: &mut Tree, value: Tree) -> Result<(), JsonError> {
    self.check_assignable(tree)?;

    let mut node = tree;
    for token in &self.tokens {
      if node.is_null() {
        *node = if creates_array(token) { Tree::Array(vec![]) } else { Tree::Object(Map::new()) };
      }
      node = match node {
        Tree::Object(map) => map.entry(token.clone()).or_default(),
        Tree::Array(items) => {
          let i = array_slot(items.len(), token).ok_or(JsonError::InternalError)?;
          if i >= items.len() {
            items.resize_with(i + 1, Tree::default);
          }
          items.get_mut(i).ok_or(JsonError::InternalError)?
        }
        _ => Err(JsonError::InternalError)?,
      };
    }
    log::trace!("assigning a {} at {:?}", value.kind(), self.to_path());
    *node = value;
    Ok(())
  }
}

impl FromStr for Pointer {
  type Err = JsonError;
  fn from_str(path: &str) -> Result<Self, JsonError> {
    Pointer::parse(path)
  }
}
