use serde::{Deserialize, Serialize};

/// How encoded JSON is laid out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
    /// No insignificant whitespace.
    #[default]
    Compact,
    /// Two-space indentation, one member per line.
    Pretty,
}

/// Options applied by a [`crate::convert::Converter`].
///
/// The free functions in [`crate::convert`] use `ConvertOptions::default()`.
/// Embedding applications can keep these options in their own JSON config.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    pub layout: Layout,
}

impl ConvertOptions {
    pub fn compact() -> Self {
        Self {
            layout: Layout::Compact,
        }
    }

    pub fn pretty() -> Self {
        Self {
            layout: Layout::Pretty,
        }
    }
}
