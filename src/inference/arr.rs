use serde_json::Value;

use crate::error::{Error, Result};
use crate::ir::{FieldType, Primitive};
use crate::options::ArrayPolicy;
use super::{display_path, kind_name, observe_scalar, PathSeg};

/// Element type of an array: the shared type if every element agrees,
/// `Unknown` when empty or mixed. Objects anywhere inside are rejected,
/// since one sample per element gives no basis for a merged model.
pub(super) fn observe_array(xs: &[Value], path: &mut Vec<PathSeg>, policy: ArrayPolicy) -> Result<FieldType> {
    if policy == ArrayPolicy::Reject {
        return Err(Error::UnsupportedShape {
            path: display_path(path),
            found: "array",
            reason: "arrays are rejected by the active array policy",
        });
    }

    let mut item: Option<FieldType> = None;
    let mut mixed = false;
    for (i, el) in xs.iter().enumerate() {
        path.push(PathSeg::Index(i));
        let ty = match el {
            Value::Object(_) => Err(Error::UnsupportedShape {
                path: display_path(path),
                found: kind_name(el),
                reason: "objects inside arrays are not supported",
            }),
            Value::Array(inner) => observe_array(inner, path, policy),
            scalar => Ok(FieldType::Primitive(observe_scalar(scalar))),
        };
        path.pop();
        let ty = ty?;
        match &item {
            None => item = Some(ty),
            Some(seen) if *seen != ty => mixed = true,
            Some(_) => {}
        }
    }

    let item = match item {
        Some(ty) if !mixed => ty,
        _ => FieldType::Primitive(Primitive::Unknown),
    };
    Ok(FieldType::List(Box::new(item)))
}
