use serde_json::Value;
use solo_json::{parse, Json, Map, Tree, Type};
use solo_json_traits::swap_at;

/*
  The following are _extremely slow_ tests for equivalence between these two values. We iterate
  over every value within the `serde_json::Value`, and for each one, parse the serialization anew
  and detach that specific value at its path for comparison purposes.
*/

/// Extend an RFC 6901 pointer with another reference token.
fn push_token(path: &str, token: &str) -> String {
  format!("{path}/{}", token.replace('~', "~0").replace('/', "~1"))
}

/// Detach the value at `path` from a fresh parse of `encoding`, checking its slot is left `null`.
fn detach<T: solo_json_traits::FromTree>(encoding: &str, path: &str, mut target: T) -> T {
  let mut tree = parse(encoding).unwrap();
  swap_at(&mut tree, path, &mut target).unwrap();
  let mut left = Tree::Bool(true);
  swap_at(&mut tree, path, &mut left).unwrap();
  assert!(left.is_null());
  target
}

pub fn check_float(number: f64, expected: f64) {
  // 0.1% of the smaller number
  let allowed_deviation = number.min(expected).abs() / 1000.0;
  assert!((number - expected).abs() <= allowed_deviation);
}

fn check_number(encoding: &str, value: &Value, path: &str) {
  let expected = value.as_number().unwrap();
  if let Some(expected) = expected.as_i64() {
    assert_eq!(detach(encoding, path, 0i64), expected);
  } else {
    check_float(detach(encoding, path, 0f64), expected.as_f64().unwrap());
  }
}

fn check_value_internal(encoding: &str, value: &Value, path: &str) {
  match value {
    Value::Null => assert_eq!(detach(encoding, path, Tree::Bool(true)), Tree::Null),
    Value::Bool(bool) => assert_eq!(detach(encoding, path, !bool), *bool),
    Value::Number(_) => check_number(encoding, value, path),
    Value::String(string) => assert_eq!(&detach(encoding, path, String::new()), string),
    Value::Array(array) => {
      assert_eq!(detach(encoding, path, Vec::<Tree>::new()).len(), array.len());
      for (i, value) in array.iter().enumerate() {
        check_value_internal(encoding, value, &push_token(path, &i.to_string()));
      }
    }
    Value::Object(object) => {
      assert_eq!(detach(encoding, path, Map::new()).len(), object.len());
      for (key, value) in object {
        check_value_internal(encoding, value, &push_token(path, key));
      }
    }
  }
}

/// Check every value within `value` is present, as expected, within `encoding`.
pub fn check_value(encoding: &str, value: &Value) {
  check_value_internal(encoding, value, "")
}

/// Build a `Json` equivalent to `value` using only its setters.
///
/// Integers which don't fit within an `i64` are set as floats.
pub fn build_json(value: &Value) -> Json {
  let mut json = Json::new();
  match value {
    Value::Null => json.set_value_null(),
    Value::Bool(bool) => json.set_value_boolean(*bool),
    Value::Number(number) => match number.as_i64() {
      Some(int) => json.set_value_int64(int),
      None => json.set_value_float64(number.as_f64().unwrap()),
    },
    Value::String(string) => json.set_value_string(string.as_str()),
    Value::Array(array) => json.set_value_array(array.iter().map(build_json).collect()),
    Value::Object(object) => {
      // An empty object can't be built with `set_value_at`
      json = Json::parse("{}").unwrap();
      for (key, value) in object {
        json.set_value_at(key, build_json(value)).unwrap();
      }
    }
  }
  json
}

/// Extract every value within `json` using only its getters, checking each against `expected`.
///
/// This leaves `json` emptied.
pub fn extract_json(json: &mut Json, expected: &Value) {
  match expected {
    Value::Null => assert!(json.is_null()),
    Value::Bool(bool) => assert_eq!(json.get_value_boolean().unwrap(), *bool),
    Value::Number(number) => match number.as_i64() {
      Some(int) => assert_eq!(json.get_value_int64().unwrap(), int),
      None => check_float(json.get_value_float64().unwrap(), number.as_f64().unwrap()),
    },
    Value::String(string) => assert_eq!(&json.get_value_string().unwrap(), string),
    Value::Array(array) => {
      let mut items = json.get_value_array().unwrap();
      assert_eq!(items.len(), array.len());
      for (item, expected) in items.iter_mut().zip(array) {
        extract_json(item, expected);
        assert!(item.is_null());
      }
    }
    Value::Object(object) => {
      for (key, expected) in object {
        let mut value = json.get_value_at(key).unwrap();
        extract_json(&mut value, expected);
      }
      assert_eq!(json.kind(), Type::Object);
      assert_eq!(json.dump().unwrap(), "{}");
      json.set_value_null();
    }
  }
  assert!(json.is_null());
}

fn check_values_equivalent(a: &Value, b: &Value) {
  match a {
    Value::Null | Value::Bool(_) | Value::String(_) => assert_eq!(a, b),
    Value::Number(number) => {
      check_float(number.as_f64().unwrap(), b.as_number().unwrap().as_f64().unwrap());
    }
    Value::Array(array) => {
      let b = b.as_array().unwrap();
      assert_eq!(array.len(), b.len());
      for (a, b) in array.iter().zip(b) {
        check_values_equivalent(a, b);
      }
    }
    Value::Object(object) => {
      let b = b.as_object().unwrap();
      assert_eq!(object.len(), b.len());
      for (key, value) in object {
        check_values_equivalent(value, &b[key]);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use rand_core::{RngCore, OsRng};
  use super::*;

  #[allow(clippy::cast_possible_truncation)]
  fn random_string() -> String {
    let mut res = String::new();
    for _ in 0 .. (OsRng.next_u64() % 128) {
      if (OsRng.next_u64() % 2) == 1 {
        // ASCII
        res.push(char::from_u32((OsRng.next_u64() % 128) as u32).unwrap());
      } else {
        // Unicode
        res.push(loop {
          if let Some(char) = char::from_u32(OsRng.next_u64() as u32) {
            // Skip ASCII as those are intended to be included by the other branch
            if char.is_ascii() {
              continue;
            }
            break char;
          }
        });
      }
    }
    res
  }

  #[allow(clippy::cast_possible_wrap)]
  fn random_value(depth: usize) -> Value {
    let modulus = if depth == 8 { 4 } else { 6 };
    match OsRng.next_u64() % modulus {
      0 => Value::Null,
      1 => Value::Bool((OsRng.next_u64() % 2) == 1),
      2 => Value::Number(match OsRng.next_u64() % 4 {
        0 => serde_json::Number::from(OsRng.next_u64() as i64),
        1 => serde_json::Number::from(OsRng.next_u64() % 1000),
        // Integers beyond `i64::MAX`, which are held as floats
        2 => serde_json::Number::from(OsRng.next_u64() | (1 << 63)),
        3 => loop {
          if let Some(float) = serde_json::Number::from_f64(f64::from_bits(OsRng.next_u64())) {
            break float;
          }
        },
        _ => unreachable!(),
      }),
      3 => Value::String(random_string()),
      4 => Value::Array({
        let mut res = vec![];
        for _ in 0 .. (OsRng.next_u64() % 8) {
          res.push(random_value(depth + 1));
        }
        res
      }),
      5 => Value::Object({
        let mut res = serde_json::Map::new();
        for _ in 0 .. (OsRng.next_u64() % 8) {
          res.insert(random_string(), random_value(depth + 1));
        }
        res
      }),
      _ => unreachable!(),
    }
  }

  #[test]
  fn fuzz() {
    // Each leaf is checked against its own parse of the document, so this is kept small
    for _ in 0 .. 16 {
      let value = loop {
        let value = random_value(0);
        if matches!(value, Value::Object(_) | Value::Array(_)) {
          break value;
        }
      };

      // Parse `serde_json`'s serialization
      let encoding = value.to_string();
      check_value(&encoding, &value);

      // Build the same value with the setters, and check `serde_json` agrees with the serialization
      let mut json = build_json(&value);
      let dumped = json.dump().unwrap();
      check_values_equivalent(&value, &serde_json::from_str(&dumped).unwrap());
      check_value(&dumped, &value);

      extract_json(&mut json, &value);
    }
  }

  #[test]
  fn keys_requiring_escapes() {
    let value: Value = serde_json::from_str(r#"{"a/b": {"~": [0, {"": "x"}]}}"#).unwrap();
    check_value(&value.to_string(), &value);
    let mut json = build_json(&value);
    check_value(&json.dump().unwrap(), &value);
    extract_json(&mut json, &value);
  }
}
