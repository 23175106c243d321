//! Four-way conversion between typed models, JSON bytes, JSON text and
//! dynamic `serde_json::Value` trees.
//!
//! Every operation returns `Some` on success and `None` on failure. The cause
//! of a failure is never returned; it is emitted as a `debug` tracing event
//! with the operation name and error kind. Use [`crate::json`] when the error
//! itself is needed.
//!
//! The free functions use [`ConvertOptions::default`]. Build a [`Converter`]
//! to pick another output [`Layout`](crate::config::Layout).

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::config::ConvertOptions;
use crate::errors::Result;
use crate::json;

pub mod ext;

fn absent<T>(op: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(op, kind = err.kind(), error = %err, "conversion failed");
            None
        }
    }
}

/// Stateless converter carrying output options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Build a converter with the given output options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Options this converter writes with.
    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Serialize a model to JSON bytes in this converter's layout.
    pub fn model_to_bytes<M: Serialize + ?Sized>(&self, model: &M) -> Option<Vec<u8>> {
        absent("model_to_bytes", json::to_bytes(model, self.options.layout))
    }

    /// Serialize a model to a JSON string in this converter's layout.
    pub fn model_to_text<M: Serialize + ?Sized>(&self, model: &M) -> Option<String> {
        absent("model_to_text", json::to_text(model, self.options.layout))
    }

    /// Convert a model to a dynamic object.
    pub fn model_to_object<M: Serialize + ?Sized>(&self, model: &M) -> Option<Value> {
        absent("model_to_object", json::to_object(model))
    }

    /// Deserialize a dynamic object into a model.
    pub fn object_to_model<M, O>(&self, object: &O) -> Option<M>
    where
        M: DeserializeOwned,
        O: Serialize + ?Sized,
    {
        absent("object_to_model", json::from_object(object))
    }

    /// Serialize a dynamic object to JSON bytes in this converter's layout.
    pub fn object_to_bytes<O: Serialize + ?Sized>(&self, object: &O) -> Option<Vec<u8>> {
        absent(
            "object_to_bytes",
            json::object_to_bytes(object, self.options.layout),
        )
    }

    /// Serialize a dynamic object to a JSON string in this converter's layout.
    pub fn object_to_text<O: Serialize + ?Sized>(&self, object: &O) -> Option<String> {
        absent(
            "object_to_text",
            json::object_to_text(object, self.options.layout),
        )
    }

    /// Encode JSON text as UTF-8 bytes; always `Some`.
    pub fn text_to_bytes(&self, text: &str) -> Option<Vec<u8>> {
        Some(json::text_to_bytes(text))
    }

    /// Deserialize JSON text into a model.
    pub fn text_to_model<M: DeserializeOwned>(&self, text: &str) -> Option<M> {
        absent("text_to_model", json::from_text(text))
    }

    /// Parse JSON text into a dynamic object.
    pub fn text_to_object(&self, text: &str) -> Option<Value> {
        absent("text_to_object", json::text_to_object(text))
    }

    /// Deserialize JSON bytes into a model.
    pub fn bytes_to_model<M: DeserializeOwned>(&self, bytes: &[u8]) -> Option<M> {
        absent("bytes_to_model", json::from_bytes(bytes))
    }

    /// Parse JSON bytes into a dynamic object.
    pub fn bytes_to_object(&self, bytes: &[u8]) -> Option<Value> {
        absent("bytes_to_object", json::bytes_to_object(bytes))
    }

    /// Decode UTF-8 bytes into a string.
    pub fn bytes_to_text(&self, bytes: &[u8]) -> Option<String> {
        absent("bytes_to_text", json::bytes_to_text(bytes))
    }
}

/// Serialize a model to compact JSON bytes.
pub fn model_to_bytes<M: Serialize + ?Sized>(model: &M) -> Option<Vec<u8>> {
    Converter::default().model_to_bytes(model)
}

/// Serialize a model to a compact JSON string.
pub fn model_to_text<M: Serialize + ?Sized>(model: &M) -> Option<String> {
    Converter::default().model_to_text(model)
}

/// Convert a model to a dynamic object.
pub fn model_to_object<M: Serialize + ?Sized>(model: &M) -> Option<Value> {
    Converter::default().model_to_object(model)
}

/// Deserialize a dynamic object (object or array at the top level) into a model.
pub fn object_to_model<M, O>(object: &O) -> Option<M>
where
    M: DeserializeOwned,
    O: Serialize + ?Sized,
{
    Converter::default().object_to_model(object)
}

/// Serialize a dynamic object to compact JSON bytes.
pub fn object_to_bytes<O: Serialize + ?Sized>(object: &O) -> Option<Vec<u8>> {
    Converter::default().object_to_bytes(object)
}

/// Serialize a dynamic object to a compact JSON string.
pub fn object_to_text<O: Serialize + ?Sized>(object: &O) -> Option<String> {
    Converter::default().object_to_text(object)
}

/// Encode JSON text as UTF-8 bytes; always `Some`.
pub fn text_to_bytes(text: &str) -> Option<Vec<u8>> {
    Converter::default().text_to_bytes(text)
}

/// Deserialize JSON text into a model.
pub fn text_to_model<M: DeserializeOwned>(text: &str) -> Option<M> {
    Converter::default().text_to_model(text)
}

/// Parse JSON text into a dynamic object, rejecting malformed input.
pub fn text_to_object(text: &str) -> Option<Value> {
    Converter::default().text_to_object(text)
}

/// Deserialize JSON bytes into a model.
///
/// Unknown fields are ignored. A missing required field or a value of the
/// wrong JSON type yields `None`; an explicit `null` for an `Option` field
/// decodes as `None`.
pub fn bytes_to_model<M: DeserializeOwned>(bytes: &[u8]) -> Option<M> {
    Converter::default().bytes_to_model(bytes)
}

/// Parse JSON bytes into a dynamic object, rejecting malformed input.
pub fn bytes_to_object(bytes: &[u8]) -> Option<Value> {
    Converter::default().bytes_to_object(bytes)
}

/// Decode UTF-8 bytes into a string; invalid UTF-8 yields `None`.
pub fn bytes_to_text(bytes: &[u8]) -> Option<String> {
    Converter::default().bytes_to_text(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use proptest::prelude::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Address {
        street: String,
        zip: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Person {
        name: String,
        age: u32,
        active: bool,
        score: f64,
        nickname: Option<String>,
        address: Address,
        emails: Vec<String>,
        labels: BTreeMap<String, i64>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct OnlyA {
        a: i64,
    }

    fn person() -> Person {
        Person {
            name: "Ada".into(),
            age: 36,
            active: true,
            score: 98.5,
            nickname: None,
            address: Address {
                street: "1 Loop Rd".into(),
                zip: Some("90210".into()),
            },
            emails: vec!["ada@example.com".into()],
            labels: BTreeMap::from([("level".to_string(), 3)]),
        }
    }

    // --- model paths ---

    #[test]
    fn test_model_round_trip_through_bytes() {
        let bytes = model_to_bytes(&person()).unwrap();
        assert_eq!(bytes_to_model::<Person>(&bytes), Some(person()));
    }

    #[test]
    fn test_model_to_text_and_back() {
        let text = model_to_text(&person()).unwrap();
        assert!(text.starts_with(r#"{"name":"Ada","age":36"#));
        assert_eq!(text_to_model::<Person>(&text), Some(person()));
    }

    #[test]
    fn test_model_to_object() {
        let object = model_to_object(&person()).unwrap();
        assert_eq!(object["address"]["zip"], json!("90210"));
        assert_eq!(object["nickname"], Value::Null);
        assert_eq!(object_to_model::<Person, _>(&object), Some(person()));
    }

    #[test]
    fn test_model_with_nan_is_absent() {
        let mut p = person();
        p.score = f64::NAN;
        assert_eq!(model_to_bytes(&p), None);
        assert_eq!(model_to_text(&p), None);
        assert_eq!(model_to_object(&p), None);
    }

    #[test]
    fn test_model_with_infinity_is_absent() {
        assert_eq!(model_to_bytes(&[1.0f32, f32::INFINITY]), None);
    }

    #[test]
    fn test_sequence_of_models() {
        let people = vec![person(), person()];
        let text = model_to_text(&people).unwrap();
        assert_eq!(text_to_model::<Vec<Person>>(&text), Some(people));
    }

    // --- typed decoding rules ---

    #[test]
    fn test_extra_fields_are_ignored() {
        assert_eq!(
            bytes_to_model::<OnlyA>(br#"{"a":1,"b":2}"#),
            Some(OnlyA { a: 1 })
        );
    }

    #[test]
    fn test_missing_required_field_is_absent() {
        assert_eq!(bytes_to_model::<OnlyA>(br#"{"b":2}"#), None);
    }

    #[test]
    fn test_no_coercion_from_string_to_number() {
        assert_eq!(bytes_to_model::<OnlyA>(br#"{"a":"1"}"#), None);
    }

    #[test]
    fn test_explicit_null_for_optional_field() {
        let json = br#"{"street":"Main","zip":null}"#;
        assert_eq!(
            bytes_to_model::<Address>(json),
            Some(Address {
                street: "Main".into(),
                zip: None,
            })
        );
    }

    #[test]
    fn test_omitted_optional_field() {
        assert_eq!(
            bytes_to_model::<Address>(br#"{"street":"Main"}"#),
            Some(Address {
                street: "Main".into(),
                zip: None,
            })
        );
    }

    #[test]
    fn test_null_for_required_field_is_absent() {
        assert_eq!(bytes_to_model::<OnlyA>(br#"{"a":null}"#), None);
    }

    // --- dynamic object paths ---

    #[test]
    fn test_object_to_bytes_and_text() {
        let object = json!({"a": 1});
        assert_eq!(object_to_bytes(&object), Some(br#"{"a":1}"#.to_vec()));
        assert_eq!(object_to_text(&object), Some(r#"{"a":1}"#.to_string()));
    }

    #[test]
    fn test_object_with_non_string_key_is_absent() {
        let mut map: HashMap<Vec<u8>, i32> = HashMap::new();
        map.insert(vec![1, 2], 3);
        assert_eq!(object_to_bytes(&map), None);
        assert_eq!(object_to_text(&map), None);
        assert_eq!(object_to_model::<HashMap<String, i32>, _>(&map), None);
    }

    #[test]
    fn test_object_with_integer_keys_is_absent() {
        let ints = BTreeMap::from([(1, "one"), (2, "two")]);
        assert_eq!(object_to_bytes(&ints), None);
        assert_eq!(object_to_text(&ints), None);
        assert_eq!(object_to_model::<Value, _>(&BTreeMap::from([(1u8, 2.5)])), None);
    }

    #[test]
    fn test_object_with_bool_keys_is_absent() {
        let bools = HashMap::from([(true, 1)]);
        assert_eq!(object_to_bytes(&bools), None);
        assert_eq!(object_to_text(&bools), None);
    }

    #[test]
    fn test_object_with_nan_value_is_absent() {
        let map = BTreeMap::from([("x", f64::NAN)]);
        assert_eq!(object_to_bytes(&map), None);
    }

    #[test]
    fn test_scalar_object_is_absent() {
        assert_eq!(object_to_bytes(&json!(3)), None);
        assert_eq!(object_to_model::<i32, _>(&json!(3)), None);
    }

    #[test]
    fn test_object_to_model_shape_mismatch() {
        assert_eq!(object_to_model::<OnlyA, _>(&json!({"a": "x"})), None);
        assert_eq!(object_to_model::<OnlyA, _>(&json!({"a": 5, "z": 0})), Some(OnlyA { a: 5 }));
    }

    #[test]
    fn test_object_from_map_type() {
        let map = serde_json::Map::from_iter([("a".to_string(), json!(9))]);
        assert_eq!(object_to_model::<OnlyA, _>(&map), Some(OnlyA { a: 9 }));
    }

    // --- text and bytes paths ---

    #[test]
    fn test_text_to_object_rejects_malformed() {
        assert_eq!(text_to_object("{\"a\": }"), None);
        assert_eq!(text_to_object(""), None);
        assert_eq!(text_to_object("[1, 2"), None);
    }

    #[test]
    fn test_text_to_object_accepts_scalars() {
        assert_eq!(text_to_object("null"), Some(Value::Null));
        assert_eq!(text_to_object(" 12.5 "), Some(json!(12.5)));
    }

    #[test]
    fn test_bytes_to_object_invalid_utf8_is_absent() {
        assert_eq!(bytes_to_object(&[b'"', 0xff, b'"']), None);
    }

    #[test]
    fn test_bytes_to_text_invalid_utf8_is_absent() {
        assert_eq!(bytes_to_text(&[0xc3, 0x28]), None);
    }

    #[test]
    fn test_text_to_bytes_preserves_unicode() {
        let text = r#"{"city":"Đà Nẵng","emoji":"🦀"}"#;
        let bytes = text_to_bytes(text).unwrap();
        assert_eq!(bytes, text.as_bytes());
        assert_eq!(bytes_to_text(&bytes).as_deref(), Some(text));
    }

    // --- converter options ---

    #[test]
    fn test_pretty_converter() {
        let converter = Converter::new(ConvertOptions::pretty());
        assert_eq!(converter.options().layout, Layout::Pretty);
        let text = converter.object_to_text(&json!({"a": 1})).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
        assert_eq!(converter.text_to_model::<OnlyA>(&text), Some(OnlyA { a: 1 }));
    }

    #[test]
    fn test_default_converter_matches_free_functions() {
        let converter = Converter::default();
        assert_eq!(converter.model_to_bytes(&person()), model_to_bytes(&person()));
        assert_eq!(converter.bytes_to_text(b"[]"), bytes_to_text(b"[]"));
        assert_eq!(converter.text_to_bytes("[]"), text_to_bytes("[]"));
        assert_eq!(converter.bytes_to_object(b"{}"), Some(json!({})));
        assert_eq!(converter.model_to_object(&1u8), Some(json!(1)));
        assert_eq!(converter.object_to_bytes(&json!([])), Some(b"[]".to_vec()));
        assert_eq!(
            converter.object_to_model::<Vec<u8>, _>(&json!([1, 2])),
            Some(vec![1, 2])
        );
        assert_eq!(converter.text_to_object("true"), Some(json!(true)));
        assert_eq!(converter.bytes_to_model::<bool>(b"false"), Some(false));
        assert_eq!(converter.model_to_text(&"x"), Some("\"x\"".to_string()));
    }

    // --- diagnostics ---

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn output(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, captured.output())
    }

    #[test]
    fn test_failure_emits_debug_event() {
        let (result, logs) = with_captured_logs(|| bytes_to_text(&[0xc3, 0x28]));
        assert_eq!(result, None);
        assert!(logs.contains("DEBUG"), "logs: {logs}");
        assert!(logs.contains(r#"op="bytes_to_text""#), "logs: {logs}");
        assert!(logs.contains(r#"kind="encoding_mismatch""#), "logs: {logs}");
        assert!(logs.contains("conversion failed"), "logs: {logs}");
    }

    #[test]
    fn test_object_failure_names_operation() {
        let (result, logs) = with_captured_logs(|| object_to_text(&BTreeMap::from([(1, 2)])));
        assert_eq!(result, None);
        assert!(logs.contains(r#"op="object_to_text""#), "logs: {logs}");
        assert!(logs.contains(r#"kind="invalid_object""#), "logs: {logs}");
    }

    #[test]
    fn test_success_emits_nothing() {
        let (result, logs) = with_captured_logs(|| bytes_to_text(b"[1]"));
        assert_eq!(result.as_deref(), Some("[1]"));
        assert!(logs.is_empty(), "logs: {logs}");
    }

    #[test]
    fn test_public_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
        assert_send_sync::<ConvertOptions>();
        assert_send_sync::<crate::errors::ConvertError>();
    }


    fn arb_address() -> impl Strategy<Value = Address> {
        ("[a-zA-Z0-9 ]{0,16}", proptest::option::of("[0-9]{5}"))
            .prop_map(|(street, zip)| Address { street, zip })
    }

    fn arb_person() -> impl Strategy<Value = Person> {
        (
            "\\PC{0,12}",
            any::<u32>(),
            any::<bool>(),
            -1.0e9f64..1.0e9f64,
            proptest::option::of("[a-z]{1,8}"),
            arb_address(),
            proptest::collection::vec("[a-z@.]{0,10}", 0..4),
            proptest::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..4),
        )
            .prop_map(
                |(name, age, active, score, nickname, address, emails, labels)| Person {
                    name,
                    age,
                    active,
                    score,
                    nickname,
                    address,
                    emails,
                    labels,
                },
            )
    }

    proptest! {
        #[test]
        fn prop_model_bytes_round_trip(p in arb_person()) {
            let bytes = model_to_bytes(&p).unwrap();
            prop_assert_eq!(bytes_to_model::<Person>(&bytes), Some(p));
        }

        #[test]
        fn prop_model_object_round_trip(p in arb_person()) {
            let object = model_to_object(&p).unwrap();
            prop_assert_eq!(object_to_model::<Person, _>(&object), Some(p));
        }

        #[test]
        fn prop_text_bytes_round_trip(p in arb_person()) {
            let text = model_to_text(&p).unwrap();
            let bytes = text_to_bytes(&text).unwrap();
            prop_assert_eq!(bytes_to_text(&bytes), Some(text));
        }

        #[test]
        fn prop_conversions_are_idempotent(p in arb_person()) {
            prop_assert_eq!(model_to_bytes(&p), model_to_bytes(&p));
            let text = model_to_text(&p).unwrap();
            prop_assert_eq!(text_to_object(&text), text_to_object(&text));
            prop_assert_eq!(text_to_model::<Person>(&text), text_to_model::<Person>(&text));
        }

        #[test]
        fn prop_truncated_json_is_absent(p in arb_person(), cut in 1usize..8) {
            let bytes = model_to_bytes(&p).unwrap();
            let truncated = &bytes[..bytes.len() - cut];
            prop_assert_eq!(bytes_to_object(truncated), None);
            prop_assert_eq!(bytes_to_model::<Person>(truncated), None);
        }
    }
}
