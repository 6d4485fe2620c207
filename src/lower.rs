use crate::ir::ModelDef;

/// All models of one document in declaration order: every model referenced
/// by a field is declared before the model holding that field.
#[derive(Debug, Clone)]
pub struct ModelSet<'a> {
    models: Vec<&'a ModelDef>,
}

/// Pre-order walk from the root, then reversed. The root ends up last and
/// each child lands ahead of its parent.
pub fn flatten(root: &ModelDef) -> ModelSet<'_> {
    let mut models = Vec::new();
    visit(root, &mut models);
    models.reverse();
    ModelSet { models }
}

fn visit<'a>(model: &'a ModelDef, out: &mut Vec<&'a ModelDef>) {
    out.push(model);
    for child in model.children() {
        visit(child, out);
    }
}

impl<'a> ModelSet<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a ModelDef> + '_ {
        self.models.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.models.iter().position(|m| m.name == name)
    }

    pub fn root(&self) -> Option<&'a ModelDef> {
        self.models.last().copied()
    }
}
