use serde_json::Number;

use crate::ir::Primitive;

/// Classified on the literal as written (`arbitrary_precision` keeps it):
/// no fraction and no exponent means integer, whatever its magnitude.
/// `-0` is an integer, `1.0` and `1e3` are floats.
pub fn classify(n: &Number) -> Primitive {
    if n.as_str().contains(['.', 'e', 'E']) {
        Primitive::Float
    } else {
        Primitive::Integer
    }
}
