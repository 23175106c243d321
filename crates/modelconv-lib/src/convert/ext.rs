//! Method-style access to the conversions in [`crate::convert`].
//!
//! ```
//! use modelconv_lib::convert::ext::{BytesExt, FromJson, ModelExt};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let bytes = Point { x: 1, y: 2 }.to_json_bytes().unwrap();
//! assert_eq!(bytes.to_text().as_deref(), Some(r#"{"x":1,"y":2}"#));
//! assert_eq!(Point::from_bytes(&bytes), Some(Point { x: 1, y: 2 }));
//! ```

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use super::{
    bytes_to_model, bytes_to_object, bytes_to_text, model_to_bytes, model_to_object,
    model_to_text, object_to_bytes, object_to_model, object_to_text, text_to_bytes,
    text_to_model, text_to_object,
};

/// Encoding methods for every serializable model, sequences of models included.
pub trait ModelExt: Serialize {
    fn to_json_bytes(&self) -> Option<Vec<u8>> {
        model_to_bytes(self)
    }

    fn to_json_text(&self) -> Option<String> {
        model_to_text(self)
    }

    fn to_json_object(&self) -> Option<Value> {
        model_to_object(self)
    }
}

impl<T: Serialize + ?Sized> ModelExt for T {}

/// Constructors decoding a model from any of the other representations.
pub trait FromJson: DeserializeOwned {
    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytes_to_model(bytes)
    }

    fn from_object<O: Serialize + ?Sized>(object: &O) -> Option<Self> {
        object_to_model(object)
    }

    fn from_text(text: &str) -> Option<Self> {
        text_to_model(text)
    }
}

impl<T: DeserializeOwned> FromJson for T {}

/// Conversions out of a dynamic JSON container.
pub trait ObjectExt: Serialize {
    fn to_model<M: DeserializeOwned>(&self) -> Option<M> {
        object_to_model(self)
    }

    fn to_bytes(&self) -> Option<Vec<u8>> {
        object_to_bytes(self)
    }

    fn to_text(&self) -> Option<String> {
        object_to_text(self)
    }
}

impl ObjectExt for Value {}

impl ObjectExt for Map<String, Value> {}

/// Conversions out of JSON text.
pub trait TextExt {
    fn to_bytes(&self) -> Option<Vec<u8>>;

    fn to_model<M: DeserializeOwned>(&self) -> Option<M>;

    fn to_object(&self) -> Option<Value>;
}

impl TextExt for str {
    fn to_bytes(&self) -> Option<Vec<u8>> {
        text_to_bytes(self)
    }

    fn to_model<M: DeserializeOwned>(&self) -> Option<M> {
        text_to_model(self)
    }

    fn to_object(&self) -> Option<Value> {
        text_to_object(self)
    }
}

/// Conversions out of UTF-8 JSON bytes.
pub trait BytesExt {
    fn to_model<M: DeserializeOwned>(&self) -> Option<M>;

    fn to_object(&self) -> Option<Value>;

    fn to_text(&self) -> Option<String>;
}

impl BytesExt for [u8] {
    fn to_model<M: DeserializeOwned>(&self) -> Option<M> {
        bytes_to_model(self)
    }

    fn to_object(&self) -> Option<Value> {
        bytes_to_object(self)
    }

    fn to_text(&self) -> Option<String> {
        bytes_to_text(self)
    }
}
