// Type descriptors for display. No reflection here, just shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDesc {
    Primitive(String),             // bare named type: `int`, `str`, `Foo`
    List(Vec<TypeDesc>),           // literal list of types, e.g. callable params
    Tuple(Vec<TypeDesc>),
    Mapping(IndexMap<String, TypeDesc>), // name → type, insertion order kept
    Parametric {
        name: String,              // may be empty: renders as a bare `( … )`
        #[serde(default)]
        args: Vec<TypeDesc>,
    },
    Schema(serde_json::Value),     // structured-record JSON schema
    Opaque(String),                // anything else, shown by its text
}

impl TypeDesc {
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }
    pub fn parametric(name: impl Into<String>, args: Vec<TypeDesc>) -> Self {
        Self::Parametric { name: name.into(), args }
    }
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TypeDesc)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<&str> for TypeDesc {
    fn from(name: &str) -> Self {
        Self::Primitive(name.to_string())
    }
}
