//! JSON bridge: lift documents into the value model and read off their
//! runtime type signature.

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

use crate::ir::TypeDesc;
use crate::value::{Instance, Value};

// ------------------------------ Values ----------------------------------- //

pub fn value_from_json(v: &Json) -> Value {
    match v {
        Json::Null => Value::None,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                // u64 beyond i64 and all non-integers
                Value::float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::Str(s.clone()),
        // arrays are not structured; shown by their compact text
        Json::Array(_) => Value::object(Instance::opaque("list", v.to_string())),
        Json::Object(m) => Value::Map(
            m.iter().map(|(k, v)| (k.clone(), value_from_json(v))).collect(),
        ),
    }
}

// ------------------------------ Signatures ------------------------------- //

pub fn type_of_json(v: &Json) -> TypeDesc {
    match v {
        Json::Null => TypeDesc::primitive("NoneType"),
        Json::Bool(_) => TypeDesc::primitive("bool"),
        Json::Number(n) if n.is_i64() => TypeDesc::primitive("int"),
        Json::Number(_) => TypeDesc::primitive("float"),
        Json::String(_) => TypeDesc::primitive("str"),
        Json::Array(xs) => type_of_array(xs),
        Json::Object(m) => type_of_object(m),
    }
}

/// Homogeneous arrays read as `list[T]`, mixed ones as a positional tuple.
fn type_of_array(xs: &[Json]) -> TypeDesc {
    let elems: Vec<TypeDesc> = xs.iter().map(type_of_json).collect();
    match elems.first() {
        None => TypeDesc::parametric("list", Vec::new()),
        Some(first) if elems.iter().all(|t| t == first) => {
            TypeDesc::parametric("list", vec![first.clone()])
        }
        Some(_) => TypeDesc::Tuple(elems),
    }
}

fn type_of_object(map: &Map<String, Json>) -> TypeDesc {
    let fields: IndexMap<String, TypeDesc> =
        map.iter().map(|(k, v)| (k.clone(), type_of_json(v))).collect();
    TypeDesc::Mapping(fields)
}

// ------------------------------- Tests ------------------------------------ //
