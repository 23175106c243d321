use serde_json::error::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Encoding mismatch: {0}")]
    EncodingMismatch(#[from] std::str::Utf8Error),

    #[error("Invalid object: {0}")]
    InvalidObject(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Classify a `serde_json` error raised while reading JSON.
    ///
    /// Syntax, truncation and I/O failures mean the input was not valid JSON;
    /// data errors mean the JSON was valid but did not fit the target type.
    pub fn from_decode(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => ConvertError::ShapeMismatch(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => {
                ConvertError::Decoding(err.to_string())
            }
        }
    }

    /// Classify a `serde_json` error raised while writing a typed model.
    pub fn from_encode(err: serde_json::Error) -> Self {
        ConvertError::Encoding(err.to_string())
    }

    /// Short, stable name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::Encoding(_) => "encoding",
            ConvertError::Decoding(_) => "decoding",
            ConvertError::ShapeMismatch(_) => "shape_mismatch",
            ConvertError::EncodingMismatch(_) => "encoding_mismatch",
            ConvertError::InvalidObject(_) => "invalid_object",
        }
    }
}

impl From<std::string::FromUtf8Error> for ConvertError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ConvertError::EncodingMismatch(err.utf8_error())
    }
}
