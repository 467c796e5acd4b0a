//! The bridge between `Tree` and `serde_json`, which performs all lexing and formatting.

use core::fmt;

use serde::{
  de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor},
  ser::{self, Serialize, Serializer},
};

use crate::{tree::with_stack, JsonError, Map, Tree};

impl Serialize for Tree {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    with_stack(move || match self {
      Tree::Null => serializer.serialize_unit(),
      Tree::Bool(bool) => serializer.serialize_bool(*bool),
      Tree::Int64(int) => serializer.serialize_i64(*int),
      Tree::Float64(float) => serializer.serialize_f64(*float),
      // Refuse to emit a string which isn't valid UTF-8, as the output wouldn't be valid JSON
      Tree::String(bytes) => {
        serializer.serialize_str(
          core::str::from_utf8(bytes).map_err(<S::Error as ser::Error>::custom)?,
        )
      }
      Tree::Array(items) => serializer.collect_seq(items),
      Tree::Object(map) => serializer.collect_map(map),
    })
  }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
  type Value = Tree;

  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("any JSON value")
  }

  #[inline(always)]
  fn visit_unit<E: de::Error>(self) -> Result<Tree, E> {
    Ok(Tree::Null)
  }

  #[inline(always)]
  fn visit_bool<E: de::Error>(self, value: bool) -> Result<Tree, E> {
    Ok(Tree::Bool(value))
  }

  #[inline(always)]
  fn visit_i64<E: de::Error>(self, value: i64) -> Result<Tree, E> {
    Ok(Tree::Int64(value))
  }

  /// Integers beyond `i64::MAX` are only representable as floats.
  #[allow(clippy::cast_precision_loss)]
  #[inline(always)]
  fn visit_u64<E: de::Error>(self, value: u64) -> Result<Tree, E> {
    Ok(i64::try_from(value).map_or(Tree::Float64(value as f64), Tree::Int64))
  }

  #[inline(always)]
  fn visit_f64<E: de::Error>(self, value: f64) -> Result<Tree, E> {
    Ok(Tree::Float64(value))
  }

  #[inline(always)]
  fn visit_str<E: de::Error>(self, value: &str) -> Result<Tree, E> {
    Ok(Tree::String(value.as_bytes().to_vec()))
  }

  #[inline(always)]
  fn visit_string<E: de::Error>(self, value: String) -> Result<Tree, E> {
    Ok(Tree::String(value.into_bytes()))
  }

  fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Tree, A::Error> {
    let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
    while let Some(item) = seq.next_element()? {
      items.push(item);
    }
    Ok(Tree::Array(items))
  }

  /// If a key is present multiple times, the last instance wins.
  fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Tree, A::Error> {
    let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
    while let Some((key, value)) = access.next_entry::<String, Tree>()? {
      map.insert(key, value);
    }
    Ok(Tree::Object(map))
  }
}

impl<'de> Deserialize<'de> for Tree {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    with_stack(move || deserializer.deserialize_any(TreeVisitor))
  }
}

/// Parse JSON-serialized text into a tree.
///
/// The entire text must be a single value, optionally surrounded by whitespace. Nesting is only
/// bounded by the length of the text, so any tree which serializes may be parsed back.
pub fn parse(text: &str) -> Result<Tree, JsonError> {
  let mut deserializer = serde_json::Deserializer::from_str(text);
  deserializer.disable_recursion_limit();
  let tree = Tree::deserialize(&mut deserializer).and_then(|tree| {
    deserializer.end()?;
    Ok(tree)
  });
  tree.map_err(|e| {
    log::debug!("failed to parse JSON: {e}");
    JsonError::Parse(e)
  })
}

/// Serialize a tree as compact JSON text.
///
/// This fails if any string within the tree isn't valid UTF-8.
pub fn serialize(tree: &Tree) -> Result<String, JsonError> {
  serde_json::to_string(tree).map_err(|e| {
    log::debug!("failed to serialize JSON: {e}");
    JsonError::Serialize(e)
  })
}

#[test]
fn parse_values() {
  assert_eq!(parse("null").unwrap(), Tree::Null);
  assert_eq!(parse(" true ").unwrap(), Tree::Bool(true));
  assert_eq!(parse("-42").unwrap(), Tree::Int64(-42));
  assert_eq!(parse("9223372036854775807").unwrap(), Tree::Int64(i64::MAX));
  assert!(matches!(parse("18446744073709551615").unwrap(), Tree::Float64(_)));
  assert!(matches!(parse("3.0").unwrap(), Tree::Float64(_)));
  assert_eq!(parse(r#""a\nb""#).unwrap(), Tree::from("a\nb"));
  assert_eq!(
    parse(r#"{"a": [1, {"b": null}]}"#).unwrap(),
    Tree::from(Map::from([(
      "a".to_string(),
      Tree::from(vec![Tree::from(1i64), Tree::from(Map::from([("b".to_string(), Tree::Null)]))])
    )]))
  );
}

#[test]
fn parse_rejects_malformed_text() {
  for text in ["{", "", "[1,]", "{\"a\" 1}", "// comment\n1", "1 2", "[1] x", "NaN", "'a'"] {
    let error = parse(text).unwrap_err();
    assert!(matches!(error, JsonError::Parse(_)));
    assert!(!error.to_string().is_empty());
  }
}

#[test]
fn parse_keeps_the_last_duplicate() {
  let tree = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
  let Tree::Object(map) = &tree else { panic!() };
  assert_eq!(map.len(), 2);
  assert_eq!(map["a"], Tree::Int64(3));
}

#[test]
fn serialize_preserves_insertion_order() {
  let map = Map::from([("z".to_string(), Tree::from(1i64)), ("a".to_string(), Tree::from(0.5))]);
  assert_eq!(serialize(&Tree::from(map)).unwrap(), r#"{"z":1,"a":0.5}"#);
  assert_eq!(serialize(&Tree::from(3.0)).unwrap(), "3.0");
  assert_eq!(serialize(&Tree::Null).unwrap(), "null");
}

#[test]
fn deep_nesting_round_trips() {
  const DEPTH: usize = 20_000;
  let text = "[".repeat(DEPTH) + &"]".repeat(DEPTH);
  let tree = parse(&text).unwrap();
  assert_eq!(serialize(&tree).unwrap(), text);

  let text = r#"{"a":"#.repeat(DEPTH) + "null" + &"}".repeat(DEPTH);
  assert_eq!(serialize(&parse(&text).unwrap()).unwrap(), text);

  assert!(parse(&"[".repeat(DEPTH)).is_err());
}

#[test]
fn serialize_rejects_invalid_utf8() {
  let tree = Tree::from(vec![Tree::String(vec![0xff, 0xfe])]);
  assert!(matches!(serialize(&tree), Err(JsonError::Serialize(_))));
}
