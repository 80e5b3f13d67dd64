//! Recursive value describer: `Value` → labeled `Node` tree.
//!
//! Dispatch is ordered; the first matching shape wins:
//! record → map → type → scalar → none → object. Objects try their own
//! [`Describe`](crate::value::Describe) first, then their attributes, then
//! fall back to their string form.

use tracing::trace;

use crate::format::format_type;
use crate::markup::escape;
use crate::tree::Node;
use crate::value::{Object, Value};

/// Describe `value` into a fresh root with an empty label.
pub fn describe(value: &Value) -> Node {
    let mut root = Node::new("");
    describe_into(value, &mut root);
    root
}

/// Decorate `node` (label suffix and/or children) with a description of `value`.
pub fn describe_into(value: &Value, node: &mut Node) {
    match value {
        Value::Record(record) => {
            if record.fields.is_empty() {
                node.push_label(&literal(&value.repr()));
            }
            for field in &record.fields {
                let child = node.add(field_label(&field.name, &format_type(&field.ty)));
                describe_into(&field.value, child);
            }
        }
        Value::Map(entries) => {
            if entries.is_empty() {
                node.push_label(" = [orange3]{}[/orange3]");
            }
            for (key, entry) in entries {
                let child = node.add(field_label(&escape(key), &escape(&entry.type_name())));
                describe_into(entry, child);
            }
        }
        Value::Type(name) => {
            node.push_label(&format!(" = [orange3]{}[/orange3] type", escape(name)));
        }
        Value::Str(_) | Value::Int(_) | Value::Float(_) | Value::Bool(_) => {
            node.push_label(&literal(&value.repr()));
        }
        Value::None => node.push_label(" = [orange3]None[/orange3]"),
        Value::Object(obj) => describe_object(obj.as_ref(), node),
    }
}

fn describe_object(obj: &dyn Object, node: &mut Node) {
    let class = obj.class_name();
    node.push_label(&format!(" = [orange3]{}[/orange3] instance", escape(&class)));

    if let Some(custom) = obj.as_describe() {
        trace!(%class, "self-describing object");
        custom.describe(node);
        return;
    }

    match obj.attributes() {
        Some(attrs) => {
            for (name, attr) in attrs.iter().filter(|(name, _)| !name.starts_with('_')) {
                // one level only: attributes are shown by their literal form
                node.add(format!(
                    "{} = {}",
                    field_label(&escape(name), &escape(&attr.type_name())),
                    escape(&attr.repr()),
                ));
            }
        }
        None => {
            trace!(%class, "attributes not enumerable, using string form");
            node.push_label(&literal(&obj.to_string()));
        }
    }
}

fn field_label(name: &str, ty: &str) -> String {
    format!("[deep_sky_blue1]{name}[/deep_sky_blue1] [dim]: {ty}[/dim]")
}

fn literal(text: &str) -> String {
    format!(" = [orange3]{}[/orange3]", escape(text))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeDesc;
    use crate::value::{Describe, Field, Instance, Record};
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use std::fmt;

    fn record_a3() -> Value {
        Value::Record(Record {
            name: "Item".into(),
            fields: vec![
                Field::new("name", TypeDesc::primitive("str"), Value::Str("a".into())),
                Field::new("value", TypeDesc::primitive("int"), Value::Int(3)),
            ],
        })
    }

    #[test]
    fn record_fields_in_declared_order() {
        let node = describe(&record_a3());
        assert_eq!(node.label, "");
        assert_eq!(node.children.len(), 2);

        let labels: Vec<String> = node.children.iter().map(|c| c.label.clone()).collect();
        assert_eq!(labels, [
            "[deep_sky_blue1]name[/deep_sky_blue1] [dim]: str[/dim] = [orange3]\"a\"[/orange3]",
            "[deep_sky_blue1]value[/deep_sky_blue1] [dim]: int[/dim] = [orange3]3[/orange3]",
        ]);
        assert!(node.children.iter().all(Node::is_leaf));
    }

    #[test]
    fn record_renders_as_tree() {
        let expected = "
├── name : str = \"a\"
└── value : int = 3
";
        assert_eq!(describe(&record_a3()).to_plain(), expected);
    }

    #[test]
    fn record_without_fields_is_labeled() {
        let node = describe(&Value::Record(Record { name: "Empty".into(), fields: vec![] }));
        assert!(node.is_leaf());
        assert_eq!(node.to_plain(), " = Empty()\n");
    }

    #[test]
    fn attribute_names_are_escaped() {
        let obj = Instance::with_attributes("Styled", [("[bold]x", Value::Int(1))]);
        let node = describe(&Value::object(obj));
        assert_eq!(node.to_plain(), " = Styled instance\n└── [bold]x : int = 1\n");
    }

    #[test]
    fn empty_map_gets_marker() {
        let node = describe(&Value::Map(IndexMap::new()));
        assert_eq!(node.label, " = [orange3]{}[/orange3]");
        assert!(node.is_leaf());
        assert_eq!(node.to_plain(), " = {}\n");
    }

    #[test]
    fn map_entries_show_runtime_types() {
        let mut m = IndexMap::new();
        m.insert("b".to_string(), Value::float(1.5));
        m.insert("a".to_string(), Value::None);
        let plain = describe(&Value::Map(m)).to_plain();
        assert_eq!(plain, "\n├── b : float = 1.5\n└── a : NoneType = None\n");
    }

    #[test]
    fn none_and_type_markers() {
        assert_eq!(describe(&Value::None).to_plain(), " = None\n");
        assert_eq!(describe(&Value::Type("Place".into())).to_plain(), " = Place type\n");
    }

    #[test]
    fn literals_are_escaped() {
        let node = describe(&Value::Str("[red]x".into()));
        assert_eq!(node.label, " = [orange3]\"\\[red]x\"[/orange3]");
        assert_eq!(node.to_plain(), " = \"[red]x\"\n");
    }

    #[test]
    fn opaque_object_falls_back_to_string_form() {
        let node = describe(&Value::object(Instance::opaque("Socket", "<socket fd=3>")));
        assert!(node.is_leaf());
        assert_eq!(node.to_plain(), " = Socket instance = <socket fd=3>\n");
    }

    #[test]
    fn object_attributes_one_level_and_public_only() {
        let inner = Value::object(Instance::with_attributes("Inner", [("z", Value::Int(0))]));
        let obj = Instance::with_attributes("Point", [
            ("x", Value::Int(1)),
            ("_cache", Value::None),
            ("inner", inner),
        ]);
        let node = describe(&Value::object(obj));
        assert_eq!(node.children.len(), 2);
        assert!(node.children.iter().all(Node::is_leaf));
        let expected = " = Point instance
├── x : int = 1
└── inner : Inner = <Inner object>
";
        assert_eq!(node.to_plain(), expected);
    }

    struct Counter(u32);

    impl fmt::Display for Counter {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Counter({})", self.0)
        }
    }

    impl Describe for Counter {
        fn describe(&self, node: &mut Node) {
            node.add(format!("count = {}", self.0));
        }
    }

    impl Object for Counter {
        fn class_name(&self) -> String {
            "Counter".into()
        }
        fn as_describe(&self) -> Option<&dyn Describe> {
            Some(self)
        }
        fn attributes(&self) -> Option<Vec<(String, Value)>> {
            Some(vec![("ignored".into(), Value::Int(0))])
        }
    }

    #[test]
    fn self_description_wins_over_attributes() {
        let node = describe(&Value::object(Counter(4)));
        assert_eq!(node.to_plain(), " = Counter instance\n└── count = 4\n");
    }

    #[test]
    fn describe_into_decorates_existing_node() {
        let mut node = Node::new("[bold]root[/bold]");
        describe_into(&Value::Int(5), &mut node);
        assert_eq!(node.to_plain(), "root = 5\n");
    }

    #[test]
    fn describing_twice_is_identical() {
        let value = record_a3();
        assert_eq!(describe(&value), describe(&value));
    }
}
