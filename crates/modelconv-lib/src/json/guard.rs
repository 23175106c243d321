//! Pre-serialization check for values JSON cannot carry.
//!
//! `serde_json` writes `NaN` and the infinities as `null` without reporting an
//! error, which silently breaks the model round trip. [`check_finite`] walks a
//! value through a no-output serializer first and fails on any non-finite
//! float, including floats used as map keys. [`check_object`] additionally
//! requires every map key to already be a string, since `serde_json` would
//! otherwise quietly stringify integer and boolean keys.

use std::fmt::Display;

use serde::ser;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct GuardError(String);

impl ser::Error for GuardError {
    fn custom<T: Display>(msg: T) -> Self {
        GuardError(msg.to_string())
    }
}

/// Walk `value` and fail if it contains a NaN or infinite float.
///
/// Errors raised by the value's own `Serialize` impl are passed through.
pub fn check_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), GuardError> {
    value.serialize(FiniteFloats { string_keys: false })
}

/// Like [`check_finite`], and also fail on any map key that is not a string.
///
/// Strings, chars and unit enum variants count as string keys; integers,
/// booleans, floats and compound keys do not.
pub fn check_object<T: Serialize + ?Sized>(value: &T) -> Result<(), GuardError> {
    value.serialize(FiniteFloats { string_keys: true })
}

#[derive(Clone, Copy)]
struct FiniteFloats {
    string_keys: bool,
}

fn string_key<T: Serialize + ?Sized>(key: &T) -> Result<(), GuardError> {
    match serde_json::to_value(key) {
        Ok(serde_json::Value::String(_)) => Ok(()),
        Ok(other) => Err(GuardError(format!("map key {other} is not a string"))),
        Err(err) => Err(GuardError(err.to_string())),
    }
}

fn finite(kind: &str, value: f64) -> Result<(), GuardError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GuardError(format!(
            "{kind} value {value} cannot be represented in JSON"
        )))
    }
}

impl ser::Serializer for FiniteFloats {
    type Ok = ();
    type Error = GuardError;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), GuardError> {
        finite("f32", f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), GuardError> {
        finite("f64", v)
    }

    fn serialize_char(self, _v: char) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), GuardError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), GuardError> {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), GuardError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), GuardError> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, GuardError> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, GuardError> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, GuardError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, GuardError> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, GuardError> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, GuardError> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, GuardError> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteFloats {
    type Ok = ();
    type Error = GuardError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), GuardError> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), GuardError> {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteFloats {
    type Ok = ();
    type Error = GuardError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), GuardError> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), GuardError> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteFloats {
    type Ok = ();
    type Error = GuardError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), GuardError> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), GuardError> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteFloats {
    type Ok = ();
    type Error = GuardError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), GuardError> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), GuardError> {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteFloats {
    type Ok = ();
    type Error = GuardError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), GuardError> {
        if self.string_keys {
            string_key(key)?;
        }
        key.serialize(*self)
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), GuardError> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), GuardError> {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteFloats {
    type Ok = ();
    type Error = GuardError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), GuardError> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), GuardError> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteFloats {
    type Ok = ();
    type Error = GuardError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), GuardError> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), GuardError> {
        Ok(())
    }
}
