// Typed model tree. Built once per document by `inference`, read-only afterwards.

use serde::Serialize;
use serde_json::Value;

/// Scalar kind inferred from a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Integer,
    Float,
    Boolean,
    Unknown,                 // JSON null: never narrowed to a concrete kind
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum FieldType {
    Primitive(Primitive),
    List(Box<FieldType>),    // only produced under `ArrayPolicy::Infer`
    Reference(Box<ModelDef>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,        // original key, verbatim
    pub ident: String,       // emitted field name (== name unless case conversion is on)
    pub ty: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Value>, // None for references
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDef {
    pub name: String,
    pub fields: Vec<Field>,  // source key order
}

impl FieldType {
    pub fn is_reference(&self) -> bool {
        matches!(self, FieldType::Reference(_))
    }

    /// The nested model this field points at, if any.
    pub fn model(&self) -> Option<&ModelDef> {
        match self {
            FieldType::Reference(model) => Some(model),
            _ => None,
        }
    }
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: Vec::new() }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Directly nested models, in field order.
    pub fn children(&self) -> impl Iterator<Item = &ModelDef> {
        self.fields.iter().filter_map(|f| f.ty.model())
    }
}
