use crate::JsonError;

/// The result of an operation, flattened for callers which cannot match on a `Result`.
///
/// This is intended for FFI boundaries. `value` is always well-defined, being the default value
/// for `T` when the operation failed.
#[derive(Clone, PartialEq, Debug)]
pub struct Outcome<T> {
  /// If the operation succeeded.
  pub good: bool,
  /// Why the operation failed, or empty if it succeeded.
  pub failure: String,
  /// The result of the operation, or `T::default()` if it failed.
  pub value: T,
}

impl<T: Default> From<Result<T, JsonError>> for Outcome<T> {
  fn from(result: Result<T, JsonError>) -> Self {
    match result {
      Ok(value) => Outcome { good: true, failure: String::new(), value },
      Err(e) => Outcome { good: false, failure: e.to_string(), value: T::default() },
    }
  }
}

#[test]
fn flattens_results() {
  use crate::Json;

  let outcome = Outcome::from(Json::parse(r#"{"success": true}"#));
  assert!(outcome.good);
  assert!(outcome.failure.is_empty());
  assert!(outcome.value.is_object());

  let outcome = Outcome::from(Json::parse("{"));
  assert!(!outcome.good);
  assert!(!outcome.failure.is_empty());
  assert!(outcome.value.is_null());

  let outcome = Outcome::from(Json::new().get_value_string());
  assert!(!outcome.good);
  assert_eq!(outcome.value, "");

  let outcome = Outcome::from(Json::new().get_value_float64());
  assert_eq!(outcome.value.to_bits(), 0f64.to_bits());

  let outcome: Outcome<()> = Json::parse("0").unwrap().set_value_at("a", Json::new()).into();
  assert!(!outcome.good);
  assert!(!outcome.failure.is_empty());
}
