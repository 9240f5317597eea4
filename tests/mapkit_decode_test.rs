use cvkit::mapkit::{decode, weak_decode, DecodeHook, Decoder, DecoderConfig, Kind};
use cvkit::KitError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize, PartialEq)]
struct Person {
    name: String,
    age: u32,
    score: f64,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Flags {
    name: String,
    age: u32,
    active: bool,
    score: f64,
    #[serde(default)]
    extra: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Line {
    sku: String,
    qty: u32,
}

#[derive(Debug, Deserialize)]
struct Inner {
    id: i64,
    lines: Vec<Line>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    order: Inner,
}

#[test]
fn test_strict_decode_matches_keys_case_insensitively() {
    let input = json!({"Name": "li", "AGE": 30, "score": 9, "tags": ["a", "b"]});
    let person: Person = decode(&input).unwrap();
    assert_eq!(
        person,
        Person {
            name: "li".to_string(),
            age: 30,
            score: 9.0,
            tags: vec!["a".to_string(), "b".to_string()],
        }
    );
}

#[test]
fn test_strict_decode_converts_numeric_strings() {
    let input = json!({"name": "wang", "age": "42", "score": "7.5"});
    let person: Person = decode(&input).unwrap();
    assert_eq!(person.age, 42);
    assert_eq!(person.score, 7.5);
    assert!(person.tags.is_empty());
}

#[test]
fn test_strict_decode_rejects_bool_as_string() {
    let input = json!({"name": true, "age": 1, "score": 1.0});
    let err = decode::<Person>(&input).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(
        err.to_string(),
        "1 error(s) decoding:\n\n* 'name' expected type 'string', got unconvertible type 'bool'"
    );
}

#[test]
fn test_weak_decode_conversions() {
    let input = json!({
        "name": 123,
        "age": "0x1F",
        "active": "T",
        "score": true,
        "extra": []
    });
    let flags: Flags = weak_decode(&input).unwrap();
    assert_eq!(flags.name, "123");
    assert_eq!(flags.age, 31);
    assert!(flags.active);
    assert_eq!(flags.score, 1.0);
    assert!(flags.extra.is_empty());

    let flags: Flags = weak_decode(&json!({"name": false, "age": "017", "active": 0, "score": "2"})).unwrap();
    assert_eq!(flags.name, "0");
    assert_eq!(flags.age, 15);
    assert!(!flags.active);
    assert_eq!(flags.score, 2.0);
}

#[test]
fn test_missing_fields_name_their_parent() {
    let err = decode::<Person>(&json!({"name": "a", "score": 1})).unwrap_err();
    assert_eq!(err.errors, vec!["missing field `age`"]);

    let err = decode::<Envelope>(&json!({"order": {"lines": []}})).unwrap_err();
    assert_eq!(err.errors, vec!["'order': missing field `id`"]);

    let kit_error: KitError = err.into();
    assert!(kit_error.to_string().contains("'order': missing field `id`"));
}

#[test]
fn test_errors_carry_element_paths() {
    let input = json!({"order": {"id": 1, "lines": [{"sku": "a", "qty": 1}, {"sku": "b", "qty": "many"}]}});
    let err = weak_decode::<Envelope>(&input).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert!(err.errors[0].contains("order.lines[1].qty"), "{}", err.errors[0]);
}

#[test]
fn test_error_unused_lists_sorted_keys() {
    let decoder = Decoder::new(DecoderConfig {
        error_unused: true,
        ..DecoderConfig::default()
    });
    let input = json!({"name": "x", "age": 1, "score": 0, "zzz": 1, "aaa": 2});
    let err = decoder.decode::<Person>(&input).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert!(err.errors[0].ends_with("has invalid keys: aaa, zzz"));

    let ok: Person = decoder
        .decode(&json!({"name": "x", "age": 1, "score": 0}))
        .unwrap();
    assert_eq!(ok.name, "x");
}

#[test]
fn test_metadata_records_keys_and_unused() {
    let decoder = Decoder::new(DecoderConfig {
        metadata: true,
        ..DecoderConfig::default()
    });
    let input = json!({
        "order": {"id": 9, "lines": [{"sku": "a", "qty": 2, "color": "red"}]},
        "note": "gift"
    });
    let (envelope, metadata) = decoder.decode_with_metadata::<Envelope>(&input).unwrap();
    assert_eq!(envelope.order.id, 9);
    assert_eq!(envelope.order.lines[0].sku, "a");
    assert_eq!(envelope.order.lines[0].qty, 2);

    for key in ["order", "order.id", "order.lines", "order.lines[0]", "order.lines[0].sku"] {
        assert!(metadata.keys.iter().any(|k| k == key), "missing {}", key);
    }
    assert!(metadata.unused.contains(&"note".to_string()));
    assert!(metadata.unused.contains(&"order.lines[0].color".to_string()));
}

#[test]
fn test_decode_hook_replaces_values() {
    let hook: DecodeHook = Arc::new(|from: Kind, to: Kind, value: &Value| {
        match (from, to, value) {
            (Kind::String, Kind::Slice, Value::String(s)) => Ok(Some(Value::Array(
                s.split(',').map(|part| Value::String(part.to_string())).collect(),
            ))),
            (Kind::String, Kind::Uint, Value::String(s)) if s == "forbidden" => {
                Err("value is not allowed".to_string())
            }
            _ => Ok(None),
        }
    });
    let decoder = Decoder::new(DecoderConfig {
        decode_hook: Some(hook),
        ..DecoderConfig::default()
    });

    let person: Person = decoder
        .decode(&json!({"name": "z", "age": 3, "score": 1, "tags": "x,y"}))
        .unwrap();
    assert_eq!(person.tags, vec!["x", "y"]);

    let err = decoder
        .decode::<Person>(&json!({"name": "z", "age": "forbidden", "score": 1}))
        .unwrap_err();
    assert!(err.errors[0].contains("decode hook failed: value is not allowed"));
}

#[derive(Debug, Deserialize)]
struct Contact {
    name: String,
    vip: bool,
    level: u8,
    email: Option<String>,
}

#[test]
fn test_every_bad_field_is_reported() {
    let err = decode::<Contact>(&json!({"name": true, "vip": "x", "level": 300})).unwrap_err();
    let mut errors = err.errors.clone();
    errors.sort();
    assert_eq!(
        errors,
        vec![
            "'name' expected type 'string', got unconvertible type 'bool'",
            "'vip' expected type 'bool', got unconvertible type 'string'",
            "cannot parse 'level', 300 overflows uint",
        ]
    );
    assert!(err.to_string().starts_with("3 error(s) decoding:"));

    let input = json!({"order": {"id": 1, "lines": [
        {"sku": "a", "qty": "many"},
        {"sku": 7, "qty": "few"}
    ]}});
    let err = weak_decode::<Envelope>(&input).unwrap_err();
    assert_eq!(err.errors.len(), 2);
    assert!(err.errors[0].contains("order.lines[0].qty"));
    assert!(err.errors[1].contains("order.lines[1].qty"));
}

#[test]
fn test_null_fields_decode_as_zero_values() {
    let input = json!({"name": null, "vip": null, "level": null, "email": null});
    let contact: Contact = decode(&input).unwrap();
    assert_eq!(contact.name, "");
    assert!(!contact.vip);
    assert_eq!(contact.level, 0);
    assert_eq!(contact.email, None);

    let person: Person = weak_decode(&json!({"name": "li", "age": null, "score": 2, "tags": null})).unwrap();
    assert_eq!(person.age, 0);
    assert!(person.tags.is_empty());

    let decoder = Decoder::new(DecoderConfig {
        metadata: true,
        ..DecoderConfig::default()
    });
    let (_, metadata) = decoder
        .decode_with_metadata::<Person>(&json!({"name": "li", "age": null, "score": 1}))
        .unwrap();
    assert!(metadata.keys.contains(&"name".to_string()));
    assert!(!metadata.keys.contains(&"age".to_string()));
}

#[derive(Debug, Deserialize)]
struct Label {
    text: String,
}

#[test]
fn test_weak_numbers_become_plain_decimal_strings() {
    for (input, expected) in [
        (json!(3.0), "3"),
        (json!(2.5), "2.5"),
        (json!(-7), "-7"),
        (json!(1e21), "1000000000000000000000"),
    ] {
        let label: Label = weak_decode(&json!({ "text": input })).unwrap();
        assert_eq!(label.text, expected);
    }
}
