//! Optional pre-selection of the sample document: a JSON Pointer, a jq
//! filter, or both (pointer first). Either must leave exactly one document.
use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// e.g. `/data/items/0/payload`
    pub json_pointer: Option<String>,
    pub jq_expr: Option<String>,
}

impl Selection {
    pub fn is_identity(&self) -> bool {
        self.json_pointer.is_none() && self.jq_expr.is_none()
    }

    pub fn apply(&self, document: Value) -> Result<Value> {
        let document = match self.json_pointer.as_deref() {
            None => document,
            Some(ptr) => select_pointer(document, ptr)?,
        };
        match self.jq_expr.as_deref() {
            None => Ok(document),
            Some(expr) => select_jq(expr, &document),
        }
    }
}

fn select_pointer(mut document: Value, ptr: &str) -> Result<Value> {
    document
        .pointer_mut(ptr)
        .map(Value::take)
        .ok_or_else(|| Error::selection(format!("JSON pointer `{ptr}` does not resolve")))
}

/// Run `expr` and demand exactly one output; stops pulling after the second.
fn select_jq(expr: &str, document: &Value) -> Result<Value> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let modules = loader
        .load(&arena, load::File { code: expr, path: () })
        .map_err(|errs| jq_error(expr, errs.iter().map(|(_, err)| format!("parse error: {err:?}"))))?;
    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| {
            jq_error(expr, errs.iter().flat_map(|(_, undefs)| {
                undefs.iter().map(|(name, undef)| format!("undefined `{name}`: {undef:?}"))
            }))
        })?;

    let inputs = RcIter::new(core::iter::empty());
    let mut outputs = filter.run((Ctx::new([], &inputs), Val::from(document.clone())));
    let first = outputs
        .next()
        .ok_or_else(|| Error::selection(format!("jq filter `{expr}` produced no document")))?
        .map_err(|e| Error::selection(format!("jq filter `{expr}` failed: {e:?}")))?;
    if outputs.next().is_some() {
        return Err(Error::selection(format!("jq filter `{expr}` produced more than one document")));
    }
    // Val renders as JSON text; read it back as a serde_json value
    serde_json::from_str(&first.to_string())
        .map_err(|e| Error::selection(format!("jq filter `{expr}` produced invalid JSON: {e}")))
}

fn jq_error(expr: &str, details: impl Iterator<Item = String>) -> Error {
    let details: Vec<String> = details.collect();
    Error::selection(format!("jq filter `{expr}`: {}", details.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({"data": {"items": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]}})
    }

    #[test]
    fn identity_selection_passes_through() {
        let sel = Selection::default();
        assert!(sel.is_identity());
        assert_eq!(sel.apply(doc()).unwrap(), doc());
    }

    #[test]
    fn pointer_selects_subdocument() {
        let sel = Selection { json_pointer: Some("/data/items/1".into()), jq_expr: None };
        assert_eq!(sel.apply(doc()).unwrap(), json!({"id": 2, "name": "b"}));
    }

    #[test]
    fn missing_pointer_is_an_error() {
        let sel = Selection { json_pointer: Some("/nope".into()), jq_expr: None };
        assert!(matches!(sel.apply(doc()), Err(Error::Selection { .. })));
    }

    #[test]
    fn jq_selects_single_document() {
        let sel = Selection { json_pointer: None, jq_expr: Some(".data.items[0]".into()) };
        assert_eq!(sel.apply(doc()).unwrap(), json!({"id": 1, "name": "a"}));
    }

    #[test]
    fn jq_with_many_outputs_is_rejected() {
        let sel = Selection { json_pointer: None, jq_expr: Some(".data.items[]".into()) };
        let err = sel.apply(doc()).unwrap_err();
        assert!(err.to_string().contains("more than one document"), "{err}");
    }

    #[test]
    fn jq_with_no_output_is_rejected() {
        let sel = Selection { json_pointer: None, jq_expr: Some(".data.items[] | select(.id > 5)".into()) };
        let err = sel.apply(doc()).unwrap_err();
        assert!(err.to_string().contains("produced no document"), "{err}");
    }

    #[test]
    fn jq_syntax_errors_are_selection_errors() {
        let sel = Selection { json_pointer: None, jq_expr: Some(".data[".into()) };
        assert!(matches!(sel.apply(doc()), Err(Error::Selection { .. })));
    }

    #[test]
    fn pointer_then_jq() {
        let sel = Selection { json_pointer: Some("/data".into()), jq_expr: Some(".items[1]".into()) };
        assert_eq!(sel.apply(doc()).unwrap(), json!({"id": 2, "name": "b"}));
    }
}
