#![allow(clippy::approx_constant)]

use solo_json::{Json, JsonError, Outcome, Type};

fn build_document() -> Json {
  let mut int = Json::new();
  int.set_value_int64(42);
  let mut float = Json::new();
  float.set_value_float64(3.1415);
  let mut string = Json::new();
  string.set_value_string("Simone");

  let mut array = Json::new();
  array.set_value_array(vec![int, float, string]);

  let mut number = Json::new();
  number.set_value_int64(42);

  let mut document = Json::new();
  document.set_value_at("array", array).unwrap();
  document.set_value_at("number", number).unwrap();
  document
}

#[test]
fn parse_object() {
  let json = Json::parse(r#"{"success": true}"#).unwrap();
  assert!(json.is_object());
}

#[test]
fn parse_failure_has_a_diagnostic() {
  let Err(e) = Json::parse("{") else { panic!("parsed an incomplete object") };
  assert!(matches!(e, JsonError::Parse(_)));
  assert!(!e.to_string().is_empty());
}

#[test]
fn build_dump_and_reparse() {
  let document = build_document();
  let text = document.dump().unwrap();
  assert_eq!(text, r#"{"array":[42,3.1415,"Simone"],"number":42}"#);
  assert_eq!(Json::parse(&text).unwrap(), document);
}

#[test]
fn get_value_at_requires_an_object() {
  let mut json = Json::parse("0").unwrap();
  assert!(matches!(
    json.get_value_at("a"),
    Err(JsonError::WrongKind { expected: Type::Object, found: Type::Int64 })
  ));
  // The receiver is untouched
  assert_eq!(json.get_value_int64().unwrap(), 0);
}

#[test]
fn extraction_is_destructive() {
  let mut document = build_document();

  let mut array = document.get_value_at("array").unwrap();
  assert!(matches!(document.get_value_at("array"), Err(JsonError::NotFound(_))));
  assert_eq!(document.dump().unwrap(), r#"{"number":42}"#);

  let mut items = array.get_value_array().unwrap();
  assert!(array.is_null());
  assert_eq!(items.len(), 3);

  assert_eq!(items[0].get_value_int64().unwrap(), 42);
  assert!(items[0].is_null());
  assert!((items[1].get_value_float64().unwrap() - 3.1415).abs() < f64::EPSILON);
  assert_eq!(items[2].get_value_string().unwrap(), "Simone");
  // A second extraction sees the `null` left behind
  assert!(matches!(
    items[2].get_value_string(),
    Err(JsonError::WrongKind { expected: Type::String, found: Type::Null })
  ));
}

#[test]
fn getters_are_strict() {
  let mut json = Json::parse("1").unwrap();
  assert!(matches!(json.get_value_float64(), Err(JsonError::WrongKind { .. })));
  assert!(matches!(json.get_value_boolean(), Err(JsonError::WrongKind { .. })));
  assert!(json.is_int64());

  let mut json = Json::parse("1.0").unwrap();
  assert!(matches!(json.get_value_int64(), Err(JsonError::WrongKind { .. })));
  assert!(json.is_float64());
}

#[test]
fn set_value_at_requires_an_object_or_null() {
  let mut json = Json::parse("[]").unwrap();
  let outcome: Outcome<()> = json.set_value_at("a", Json::new()).into();
  assert!(!outcome.good);
  assert!(json.is_array());
}

#[test]
fn set_value_at_replaces_in_place() {
  let mut json = Json::parse(r#"{"a": 1, "b": 2}"#).unwrap();
  json.set_value_at("a", Json::parse("3").unwrap()).unwrap();
  assert_eq!(json.dump().unwrap(), r#"{"a":3,"b":2}"#);
}

#[test]
fn invalid_utf8_is_stored_as_base64() {
  let mut json = Json::new();
  json.set_value_string(vec![0x57, 0xe5, 0x79, 0xfb, 0xa6, 0xbb]);
  assert_eq!(json.dump().unwrap(), r#""V+V5+6a7""#);
  assert_eq!(json.get_value_string().unwrap(), "V+V5+6a7");

  json.set_value_string(&b"valid"[..]);
  assert_eq!(json.get_value_string().unwrap(), "valid");
}

#[test]
fn moves_preserve_the_document() {
  let document = build_document();
  let expected = document.dump().unwrap();
  let moved = document;
  assert_eq!(moved.dump().unwrap(), expected);

  let mut boxed = vec![moved];
  let taken = boxed[0].take();
  assert!(boxed[0].is_null());
  assert_eq!(taken.dump().unwrap(), expected);
}

#[test]
fn deeply_nested_documents_reparse() {
  const DEPTH: usize = 200;

  let mut document = Json::new();
  document.set_value_int64(1);
  for i in 0 .. DEPTH {
    let mut next = Json::new();
    if (i % 2) == 0 {
      next.set_value_array(vec![document]);
    } else {
      next.set_value_at("inner", document).unwrap();
    }
    document = next;
  }

  let text = document.dump().unwrap();
  let mut reparsed = Json::parse(&text).unwrap();
  assert_eq!(reparsed, document);
  assert_eq!(reparsed.dump().unwrap(), text);

  // Unwrap every level, in reverse
  for i in (0 .. DEPTH).rev() {
    reparsed = if (i % 2) == 0 {
      reparsed.get_value_array().unwrap().pop().unwrap()
    } else {
      reparsed.get_value_at("inner").unwrap()
    };
  }
  assert_eq!(reparsed.get_value_int64().unwrap(), 1);
}

#[test]
fn very_deep_documents_are_handled() {
  const DEPTH: usize = 50_000;
  let text = "[".repeat(DEPTH) + "\"x\"" + &"]".repeat(DEPTH);
  let json = Json::parse(&text).unwrap();
  assert_eq!(json.dump().unwrap(), text);
  let json = Json::from_tree(json.into_tree());
  assert!(json.is_array());
  drop(json);
}
