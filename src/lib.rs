//! Infer pydantic models from one JSON sample document.
//!
//! Pipeline: parse (`path_de`) → build the type tree (`inference`) →
//! flatten (`lower`) → render (`codegen`).
//!
//! ```
//! use json_pyd::{generate, InferOptions, RenderOptions};
//!
//! let src = r#"{"name": "John", "address": {"city": "New York"}}"#;
//! let py = generate(src, &InferOptions::default(), &RenderOptions::default()).unwrap();
//! assert!(py.ends_with("class GeneratedModel(BaseModel):\n    name: str\n    address: Address\n"));
//! ```
pub mod cli;
pub mod codegen;
pub mod error;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod lower;
pub mod naming;
pub mod options;
pub mod path_de;

pub use error::{Error, Result};
pub use ir::{Field, FieldType, ModelDef, Primitive};
pub use options::{ArrayPolicy, InferOptions, OutputTarget, RenderOptions};

/// Parse `src`, infer its models and render them.
pub fn generate(src: &str, infer: &InferOptions, render: &RenderOptions) -> Result<String> {
    let root = inference::infer_from_str(src, infer)?;
    Ok(codegen::render(&root, render))
}
