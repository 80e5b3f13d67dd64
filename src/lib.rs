//! Render in-memory values as labeled, colorized trees for debugging.
//!
//! Two entry points:
//! - [`format_type`]: type descriptor → compact or multi-line signature,
//! - [`describe`]: value → [`Node`] tree of field names, types and literals.
//!
//! ```
//! use shape_tree::{describe, TypeDesc, Value};
//! use shape_tree::value::{Field, Record};
//!
//! let item = Value::Record(Record {
//!     name: "Item".into(),
//!     fields: vec![
//!         Field::new("name", TypeDesc::primitive("str"), Value::Str("a".into())),
//!         Field::new("value", TypeDesc::primitive("int"), Value::Int(3)),
//!     ],
//! });
//! assert_eq!(describe(&item).to_plain(), "\n├── name : str = \"a\"\n└── value : int = 3\n");
//! ```
pub mod describe;
pub mod error;
pub mod format;
pub mod infer;
pub mod ir;
pub mod jq_exec;
pub mod markup;
pub mod path_de;
pub mod samples;
pub mod tree;
pub mod value;

pub use describe::{describe, describe_into};
pub use format::format_type;
pub use ir::TypeDesc;
pub use tree::Node;
pub use value::Value;
