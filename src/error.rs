//! Error taxonomy for inference and rendering.
//!
//! Every rejected input surfaces as one of these; nothing is retried and no
//! partial model is ever produced.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input text is not a single valid JSON document.
    #[error("malformed JSON at path {path} (line {line}, column {column}): {message}")]
    MalformedInput {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// The document parsed, but has a shape models cannot be inferred from.
    #[error("unsupported shape at path {path}: found {found}, {reason}")]
    UnsupportedShape {
        path: String,
        found: &'static str,
        reason: &'static str,
    },

    #[error("model name `{name}` derived from both `{first}` and `{second}`")]
    NamingCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("`{name}` (at path {path}) is not a valid identifier")]
    InvalidIdentifier { name: String, path: String },

    /// Two keys of one object emit the same field name after case conversion.
    #[error("field `{name}` appears twice in model `{model}` after case conversion")]
    DuplicateField { name: String, model: String },

    /// JSON Pointer / jq pre-selection failed.
    #[error("input selection failed: {message}")]
    Selection { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn selection(message: impl Into<String>) -> Self {
        Self::Selection { message: message.into() }
    }
}
