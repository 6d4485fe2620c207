//! Pydantic source emission for a model tree.
//!
//! Output layout: the fixed import header, one blank line, then one
//! `class` block per model separated by blank lines. Blocks come in
//! `lower::flatten` order so every referenced class is already defined.
use tracing::debug;

use crate::ir::{FieldType, ModelDef, Primitive};
use crate::lower;
use crate::options::RenderOptions;

const TAB: &str = "    ";
const BASE_MODEL: &str = "BaseModel";

/// Always emitted in full, whether or not the body uses every name.
const IMPORTS: &[(&str, &[&str])] = &[
    ("pydantic", &[BASE_MODEL]),
    ("typing", &["Any", "Optional"]),
];

pub struct Codegen {
    options: RenderOptions,
    blocks: Vec<String>,
}

impl Codegen {
    pub fn new(options: RenderOptions) -> Self {
        Self { options, blocks: Vec::new() }
    }

    /// Queue the blocks for `root` and everything it references.
    pub fn emit(&mut self, root: &ModelDef) {
        let set = lower::flatten(root);
        for model in set.iter() {
            self.blocks.push(render_block(model, &self.options));
        }
        debug!(root = %root.name, blocks = set.len(), "rendered models");
    }

    pub fn into_string(self) -> String {
        let mut out = imports();
        out.push('\n');
        out.push_str(&self.blocks.join("\n"));
        out
    }
}

/// Full output text for one model tree.
pub fn render(root: &ModelDef, options: &RenderOptions) -> String {
    let mut cg = Codegen::new(*options);
    cg.emit(root);
    cg.into_string()
}

pub fn imports() -> String {
    IMPORTS
        .iter()
        .map(|(module, names)| format!("from {module} import {}\n", names.join(", ")))
        .collect()
}

/// One `class` block; fields in source order.
pub fn render_block(model: &ModelDef, options: &RenderOptions) -> String {
    let mut out = format!("class {}({BASE_MODEL}):\n", model.name);
    if model.fields.is_empty() {
        out.push_str(TAB);
        out.push_str("pass\n");
        return out;
    }
    for field in &model.fields {
        let line = match &field.ty {
            FieldType::Reference(nested) => format!("{TAB}{}: {}\n", field.ident, nested.name),
            ty if options.force_optional => {
                format!("{TAB}{}: Optional[{}] = None\n", field.ident, type_name(ty))
            }
            ty => format!("{TAB}{}: {}\n", field.ident, type_name(ty)),
        };
        out.push_str(&line);
    }
    out
}

pub fn type_name(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(p) => primitive_name(*p).to_string(),
        FieldType::List(item) => format!("list[{}]", type_name(item)),
        FieldType::Reference(model) => model.name.clone(),
    }
}

fn primitive_name(p: Primitive) -> &'static str {
    match p {
        Primitive::String => "str",
        Primitive::Integer => "int",
        Primitive::Float => "float",
        Primitive::Boolean => "bool",
        Primitive::Unknown => "Any",
    }
}
