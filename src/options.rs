//! Knobs consumed by the builder and the renderer.
//!
//! The CLI owns parsing these from arguments; library callers construct them
//! directly (all of them implement `Default`).

use serde::Deserialize;

/// Name given to the model inferred for the top-level object.
pub const DEFAULT_ROOT_NAME: &str = "GeneratedModel";

/// Extension appended to the output base name.
pub const OUTPUT_EXTENSION: &str = "py";

/// What to do with JSON array values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayPolicy {
    /// `list[T]` for homogeneous primitive elements, `list[Any]` otherwise;
    /// arrays holding objects are still rejected.
    #[default]
    Infer,
    /// Any array fails with `UnsupportedShape`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InferOptions {
    pub root_name: String,
    /// Emit field names in snake_case instead of the verbatim JSON key.
    pub snake_case_fields: bool,
    pub array_policy: ArrayPolicy,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            snake_case_fields: false,
            array_policy: ArrayPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Wrap every primitive field as `Optional[T] = None`. References are
    /// never affected.
    pub force_optional: bool,
}

/// Where the rendered text goes; the caller supplies the base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub base_name: String,
}

impl OutputTarget {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self { base_name: base_name.into() }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, OUTPUT_EXTENSION)
    }
}
