use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::ir::TypeDesc;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> std::result::Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Decode a [`TypeDesc`] written as externally tagged JSON, e.g.
/// `{"parametric": {"name": "List", "args": [{"primitive": "int"}]}}`.
pub fn type_desc_from_str(src: &str) -> Result<TypeDesc> {
    from_str_with_path(src).map_err(Error::Descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_type;

    #[test]
    fn descriptor_decodes() {
        let src = r#"{"parametric": {"name": "Dict", "args": [
            {"primitive": "str"},
            {"list": [{"primitive": "int"}, {"opaque": "T"}]}
        ]}}"#;
        let ty = type_desc_from_str(src).unwrap();
        assert_eq!(format_type(&ty), "Dict[str, [int, T]]");
    }

    #[test]
    fn descriptor_args_default_to_empty() {
        let ty = type_desc_from_str(r#"{"parametric": {"name": "Any"}}"#).unwrap();
        assert_eq!(format_type(&ty), "Any");
    }

    #[test]
    fn descriptor_errors_carry_the_path() {
        let src = r#"{"tuple": [{"primitive": "int"}, {"primitiv": "str"}]}"#;
        let err = type_desc_from_str(src).unwrap_err().to_string();
        assert!(err.starts_with("invalid type descriptor at JSON path"), "{err}");
        assert!(err.contains("[1]"), "{err}");
    }
}
