use serde_json::Value;

use crate::error::{Error, Result};

/// Parse one JSON document, reporting syntax errors with their JSON path.
///
/// Trailing non-whitespace after the document is rejected as well.
pub fn parse_document(src: &str) -> Result<Value> {
    let mut de = serde_json::Deserializer::from_str(src);
    let value = match serde_path_to_error::deserialize::<_, Value>(&mut de) {
        Ok(v) => v,
        Err(err) => {
            let path = err.path().to_string();
            return Err(malformed(path, err.into_inner()));
        }
    };
    de.end().map_err(|err| malformed(".".to_string(), err))?;
    Ok(value)
}

fn malformed(path: String, err: serde_json::Error) -> Error {
    Error::MalformedInput {
        path,
        line: err.line(),
        column: err.column(),
        message: err.to_string(),
    }
}
