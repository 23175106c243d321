// modelconv-lib: conversions between typed models, JSON bytes, JSON text and dynamic values

pub mod config;
pub mod convert;
pub mod errors;
pub mod json;
pub mod logger;

pub use config::{ConvertOptions, Layout};
pub use convert::ext::{BytesExt, FromJson, ModelExt, ObjectExt, TextExt};
pub use convert::{
    bytes_to_model, bytes_to_object, bytes_to_text, model_to_bytes, model_to_object,
    model_to_text, object_to_bytes, object_to_model, object_to_text, text_to_bytes,
    text_to_model, text_to_object, Converter,
};
pub use errors::ConvertError;
