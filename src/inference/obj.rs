use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Model names handed out so far within one document, with the JSON path
/// that claimed each. Iteration order is claim order.
#[derive(Clone, Debug, Default)]
pub struct ModelNames {
    claimed: IndexMap<String, String>,
}

impl ModelNames {
    pub(super) fn claim(&mut self, name: &str, path: String) -> Result<()> {
        if let Some(first) = self.claimed.get(name) {
            return Err(Error::NamingCollision {
                name: name.to_string(),
                first: first.clone(),
                second: path,
            });
        }
        self.claimed.insert(name.to_string(), path);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.claimed.keys().map(String::as_str)
    }
}
