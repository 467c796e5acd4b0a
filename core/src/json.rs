use crate::{sanitize, JsonError, Map, Tree, Type};

/// A JSON value.
///
/// A `Json` exclusively owns its document. It may be moved, yet it may not be copied, as
/// documents may be arbitrarily large. The following does not compile:
///
/// ```compile_fail
/// let json = solo_json::Json::new();
/// let copy = json.clone();
/// ```
///
/// The `get_value_*` methods move their result out of the `Json`, leaving `null` behind. None of
/// the methods panic. Every string stored within a `Json` is valid UTF-8, with the `set_value_*`
/// methods encoding invalid UTF-8 as base64 (see [`sanitize`](crate::sanitize())).
#[derive(PartialEq, Default, Debug)]
pub struct Json(pub(crate) Tree);

impl Json {
  /// Create a new `null` JSON value.
  #[inline(always)]
  pub fn new() -> Self {
    Json(Tree::Null)
  }

  /// Parse JSON-serialized text.
  ///
  /// On failure, the error carries the parser's diagnostic.
  pub fn parse(text: &str) -> Result<Json, JsonError> {
    crate::parse(text).map(Json)
  }

  /// Serialize this value as compact JSON text.
  ///
  /// This only fails if the document holds a string which isn't valid UTF-8, which isn't possible
  /// for a document built through this API.
  pub fn dump(&self) -> Result<String, JsonError> {
    crate::serialize(&self.0)
  }

  /// Create a `Json` from a tree, sanitizing every string within it.
  pub fn from_tree(mut tree: Tree) -> Json {
    tree.for_each_string(&mut |bytes: &mut Vec<u8>| {
      *bytes = sanitize(core::mem::take(bytes)).into_bytes();
    });
    Json(tree)
  }

  /// Unwrap this `Json` into its tree.
  #[inline(always)]
  pub fn into_tree(self) -> Tree {
    self.0
  }

  /// Move the value out of this `Json`, leaving a `null` `Json` in its place.
  ///
  /// This is the equivalent of a move which leaves its source usable.
  #[inline(always)]
  pub fn take(&mut self) -> Json {
    core::mem::take(self)
  }

  /// The type of this value.
  #[inline(always)]
  pub fn kind(&self) -> Type {
    self.0.kind()
  }

  /// If this is an array.
  #[inline(always)]
  pub fn is_array(&self) -> bool {
    self.kind() == Type::Array
  }

  /// If this is a boolean.
  #[inline(always)]
  pub fn is_boolean(&self) -> bool {
    self.kind() == Type::Bool
  }

  /// If this is a floating-point number.
  ///
  /// Integral numbers are not considered floats.
  #[inline(always)]
  pub fn is_float64(&self) -> bool {
    self.kind() == Type::Float64
  }

  /// If this is an integral number.
  #[inline(always)]
  pub fn is_int64(&self) -> bool {
    self.kind() == Type::Int64
  }

  /// If this is `null`.
  #[inline(always)]
  pub fn is_null(&self) -> bool {
    self.kind() == Type::Null
  }

  /// If this is an object.
  #[inline(always)]
  pub fn is_object(&self) -> bool {
    self.kind() == Type::Object
  }

  /// If this is a string.
  #[inline(always)]
  pub fn is_string(&self) -> bool {
    self.kind() == Type::String
  }

  /// Take the tree out of this `Json` if it's of the expected type.
  #[inline(always)]
  fn take_kind(&mut self, expected: Type) -> Result<Tree, JsonError> {
    let found = self.kind();
    if found != expected {
      Err(JsonError::WrongKind { expected, found })?;
    }
    Ok(core::mem::take(&mut self.0))
  }

  /// Remove the value at `key` within this object, returning it.
  ///
  /// After this successfully returns, `key` will no longer be present. The order of the remaining
  /// keys is preserved.
  pub fn get_value_at(&mut self, key: &str) -> Result<Json, JsonError> {
    let Tree::Object(map) = &mut self.0 else {
      return Err(JsonError::WrongKind { expected: Type::Object, found: self.kind() });
    };
    map.shift_remove(key).map(Json).ok_or_else(|| JsonError::NotFound(key.to_string()))
  }

  /// Take this array, leaving `null` in its place.
  ///
  /// Each item is yielded as its own `Json`.
  pub fn get_value_array(&mut self) -> Result<Vec<Json>, JsonError> {
    match &mut self.take_kind(Type::Array)? {
      Tree::Array(items) => Ok(core::mem::take(items).into_iter().map(Json).collect()),
      _ => Err(JsonError::InternalError),
    }
  }

  /// Take this boolean, leaving `null` in its place.
  pub fn get_value_boolean(&mut self) -> Result<bool, JsonError> {
    match self.take_kind(Type::Bool)? {
      Tree::Bool(bool) => Ok(bool),
      _ => Err(JsonError::InternalError),
    }
  }

  /// Take this float, leaving `null` in its place.
  pub fn get_value_float64(&mut self) -> Result<f64, JsonError> {
    match self.take_kind(Type::Float64)? {
      Tree::Float64(float) => Ok(float),
      _ => Err(JsonError::InternalError),
    }
  }

  /// Take this integer, leaving `null` in its place.
  pub fn get_value_int64(&mut self) -> Result<i64, JsonError> {
    match self.take_kind(Type::Int64)? {
      Tree::Int64(int) => Ok(int),
      _ => Err(JsonError::InternalError),
    }
  }

  /// Take this string, leaving `null` in its place.
  ///
  /// If the string isn't valid UTF-8, this errors and the value is left untouched.
  pub fn get_value_string(&mut self) -> Result<String, JsonError> {
    let Tree::String(bytes) = &mut self.0 else {
      return Err(JsonError::WrongKind { expected: Type::String, found: self.kind() });
    };
    let string = match String::from_utf8(core::mem::take(bytes)) {
      Ok(string) => string,
      Err(e) => {
        *bytes = e.into_bytes();
        return Err(JsonError::InvalidUtf8);
      }
    };
    self.0 = Tree::Null;
    Ok(string)
  }

  /// Set `value` at `key` within this object, replacing any existing value.
  ///
  /// If this is `null`, it first becomes an empty object. If this is neither `null` nor an
  /// object, this errors and `value` is dropped.
  pub fn set_value_at(&mut self, key: &str, value: Json) -> Result<(), JsonError> {
    if self.is_null() {
      self.0 = Tree::Object(Map::new());
    }
    let Tree::Object(map) = &mut self.0 else {
      return Err(JsonError::WrongKind { expected: Type::Object, found: self.kind() });
    };
    map.insert(key.to_string(), value.0);
    Ok(())
  }

  /// Set this to an array of these values, discarding the existing value.
  pub fn set_value_array(&mut self, value: Vec<Json>) {
    self.0 = Tree::Array(value.into_iter().map(Json::into_tree).collect());
  }

  /// Set this to a boolean, discarding the existing value.
  #[inline(always)]
  pub fn set_value_boolean(&mut self, value: bool) {
    self.0 = Tree::Bool(value);
  }

  /// Set this to a float, discarding the existing value.
  #[inline(always)]
  pub fn set_value_float64(&mut self, value: f64) {
    self.0 = Tree::Float64(value);
  }

  /// Set this to an integer, discarding the existing value.
  #[inline(always)]
  pub fn set_value_int64(&mut self, value: i64) {
    self.0 = Tree::Int64(value);
  }

  /// Set this to `null`, discarding the existing value.
  #[inline(always)]
  pub fn set_value_null(&mut self) {
    self.0 = Tree::Null;
  }

  /// Set this to a string, discarding the existing value.
  ///
  /// If `value` isn't valid UTF-8, its base64 encoding is stored instead.
  pub fn set_value_string(&mut self, value: impl Into<Vec<u8>>) {
    self.0 = Tree::String(sanitize(value.into()).into_bytes());
  }
}

impl From<Json> for Tree {
  fn from(json: Json) -> Tree {
    json.0
  }
}
