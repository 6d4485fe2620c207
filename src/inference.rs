//! TypeTree builder: one JSON object in, one `ModelDef` tree out.
//!
//! Every nested object becomes its own model, named by PascalCase-converting
//! the key it was found under, and is linked from its parent through a
//! `FieldType::Reference`. Scalars map to a `Primitive` by their JSON kind;
//! `null` is always `Primitive::Unknown`.
//!
//! The builder is a pure function of the parsed document and the options:
//! - keys are visited in source order (`serde_json` with `preserve_order`);
//! - model names are unique per document, collisions are errors;
//! - arrays follow `ArrayPolicy`.
pub mod arr;
pub mod num;
pub mod obj;

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::ir::{Field, FieldType, ModelDef, Primitive};
use crate::naming::{is_identifier, snake_to_pascal, to_snake_case};
use crate::options::InferOptions;

pub use obj::ModelNames;

// ------------------------------ Observe ---------------------------------- //

/// Primitive kind of a non-container value.
pub fn observe_scalar(v: &Value) -> Primitive {
    match v {
        Value::Null => Primitive::Unknown,
        Value::Bool(_) => Primitive::Boolean,
        Value::Number(n) => num::classify(n),
        Value::String(_) => Primitive::String,
        // containers never reach here; callers dispatch them first
        Value::Array(_) | Value::Object(_) => Primitive::Unknown,
    }
}

pub fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One step from the document root to a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSeg {
    Key(String),
    Index(usize),
}

/// `billing_details.address`, `tags[2]`, `meta[""]`; the document root is `.`.
pub fn display_path(path: &[PathSeg]) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let mut out = String::new();
    for seg in path {
        match seg {
            PathSeg::Key(key) if key.is_empty() => out.push_str("[\"\"]"),
            PathSeg::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSeg::Index(i) => out.push_str(&format!("[{i}]")),
        }
    }
    out
}

// ------------------------------- Builder ---------------------------------- //

pub struct TypeTreeBuilder<'a> {
    options: &'a InferOptions,
    names: ModelNames,
    path: Vec<PathSeg>,
}

impl<'a> TypeTreeBuilder<'a> {
    pub fn new(options: &'a InferOptions) -> Self {
        Self { options, names: ModelNames::default(), path: Vec::new() }
    }

    /// Build the root model. The document must be a JSON object.
    ///
    /// Field names are emitted as given (or snake-cased); only derived model
    /// names have to be valid class identifiers.
    pub fn build(mut self, document: &Value) -> Result<ModelDef> {
        let Value::Object(map) = document else {
            return Err(Error::UnsupportedShape {
                path: ".".to_string(),
                found: kind_name(document),
                reason: "the top-level value must be an object",
            });
        };
        let root_name = self.options.root_name.clone();
        self.claim_model_name(&root_name)?;
        let root = self.build_model(root_name, map)?;
        debug!(root = %root.name, models = self.names.names().count(), "built type tree");
        Ok(root)
    }

    fn build_model(&mut self, name: String, map: &Map<String, Value>) -> Result<ModelDef> {
        let mut model = ModelDef::new(name);
        let mut idents = HashSet::with_capacity(map.len());
        for (key, value) in map {
            self.path.push(PathSeg::Key(key.clone()));
            let field = self.observe_field(key, value);
            self.path.pop();
            let field = field?;
            if !idents.insert(field.ident.clone()) {
                return Err(Error::DuplicateField { name: field.ident, model: model.name });
            }
            model.fields.push(field);
        }
        debug!(model = %model.name, fields = model.fields.len(), "inferred model");
        Ok(model)
    }

    fn observe_field(&mut self, key: &str, value: &Value) -> Result<Field> {
        let ident = if self.options.snake_case_fields {
            to_snake_case(key)
        } else {
            key.to_string()
        };

        let (ty, sample) = match value {
            Value::Object(map) => {
                let name = snake_to_pascal(key);
                self.claim_model_name(&name)?;
                let nested = self.build_model(name, map)?;
                (FieldType::Reference(Box::new(nested)), None)
            }
            Value::Array(xs) => {
                let ty = arr::observe_array(xs, &mut self.path, self.options.array_policy)?;
                (ty, Some(value.clone()))
            }
            scalar => (FieldType::Primitive(observe_scalar(scalar)), Some(scalar.clone())),
        };
        trace!(path = %display_path(&self.path), ?ty, "observed field");

        Ok(Field { name: key.to_string(), ident, ty, sample })
    }

    fn claim_model_name(&mut self, name: &str) -> Result<()> {
        let path = display_path(&self.path);
        if !is_identifier(name) {
            return Err(Error::InvalidIdentifier { name: name.to_string(), path });
        }
        self.names.claim(name, path)
    }
}

// ------------------------------- Front API -------------------------------- //

/// Build the type tree for an already-parsed document.
pub fn build(document: &Value, options: &InferOptions) -> Result<ModelDef> {
    TypeTreeBuilder::new(options).build(document)
}

/// Parse `src` and build its type tree.
pub fn infer_from_str(src: &str, options: &InferOptions) -> Result<ModelDef> {
    let document = crate::path_de::parse_document(src)?;
    build(&document, options)
}

// ------------------------------- Tests ------------------------------------ //
