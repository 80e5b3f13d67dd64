//! Type-signature formatting: `TypeDesc` → display markup.
//!
//! Short signatures stay on one line; anything wider than
//! [`INLINE_WIDTH`] is broken into one item per line, indented.

use crate::ir::TypeDesc;
use crate::markup::escape;

// ------------------------------- Policy ---------------------------------- //

pub const INLINE_WIDTH: usize = 50;  // max escaped chars of a one-line list
pub const INDENT: usize = 2;

// ------------------------------- Format ---------------------------------- //

pub fn format_type(ty: &TypeDesc) -> String {
    match ty {
        TypeDesc::Primitive(name) => escape(name),
        TypeDesc::List(elems) => print_list(&format_all(elems), "[", "]"),
        TypeDesc::Tuple(elems) => print_list(&format_all(elems), "(", ")"),
        TypeDesc::Mapping(entries) => {
            let items: Vec<String> = entries
                .iter()
                .map(|(name, ty)| format!("{name}: {}", format_type(ty)))
                .collect();
            print_list(&items, "{", "}")
        }
        TypeDesc::Parametric { name, args } => {
            let mut s = escape(name);
            if !args.is_empty() {
                let items = format_all(args);
                if name.is_empty() {
                    s = print_list(&items, "(", ")");
                } else {
                    s.push_str(&print_list(&items, "[", "]"));
                }
            }
            s
        }
        TypeDesc::Schema(schema) => escape(&schema_text(schema)),
        TypeDesc::Opaque(text) => escape(text),
    }
}

fn format_all(elems: &[TypeDesc]) -> Vec<String> {
    elems.iter().map(format_type).collect()
}

/// Join `items` between `open` and `close`: on one line when it fits,
/// otherwise one item per line.
pub fn print_list(items: &[String], open: &str, close: &str) -> String {
    let compact = format!("{open}{}{close}", items.join(", "));
    if escape(&compact).chars().count() <= INLINE_WIDTH {
        return compact;
    }
    let body = indent(&items.join(",\n"), INDENT);
    escape(&format!("{open}\n{body}\n{close}"))
}

/// Prefix every non-blank line with `width` spaces.
fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-space indented JSON; key order is whatever the schema was built with.
fn schema_text(schema: &serde_json::Value) -> String {
    serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string())
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn p(name: &str) -> TypeDesc {
        TypeDesc::primitive(name)
    }

    #[test]
    fn primitive_is_its_name() {
        assert_eq!(format_type(&p("int")), "int");
    }

    #[test]
    fn short_list_stays_compact() {
        let ty = TypeDesc::List(vec![p("int"), p("str")]);
        assert_eq!(format_type(&ty), "[int, str]");
    }

    #[test]
    fn tuple_and_mapping_brackets() {
        let tuple = TypeDesc::Tuple(vec![p("int"), p("float")]);
        assert_eq!(format_type(&tuple), "(int, float)");

        let mapping = TypeDesc::mapping([("lat", p("float")), ("lon", p("float"))]);
        assert_eq!(format_type(&mapping), "{lat: float, lon: float}");
    }

    #[test]
    fn long_list_breaks_one_item_per_line() {
        let names: Vec<TypeDesc> = (0..10).map(|i| p(&format!("VeryLongTypeName{i}"))).collect();
        let out = format_type(&TypeDesc::List(names));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "[");
        assert_eq!(lines[1], "  VeryLongTypeName0,");
        assert_eq!(lines[10], "  VeryLongTypeName9");
        assert_eq!(lines[11], "]");
    }

    #[test]
    fn width_boundary_is_inclusive() {
        // "[" + 48 chars + "]" is exactly 50
        let fits = TypeDesc::List(vec![p(&"A".repeat(48))]);
        assert_eq!(format_type(&fits).lines().count(), 1);

        let over = TypeDesc::List(vec![p(&"A".repeat(49))]);
        assert_eq!(format_type(&over), format!("[\n  {}\n]", "A".repeat(49)));
    }

    #[test]
    fn width_counts_escaped_text() {
        // 49 raw chars, but `[a…]` reads as a tag and escapes to 50
        let ty = TypeDesc::List(vec![p(&"a".repeat(47))]);
        assert_eq!(format_type(&ty).lines().count(), 1);

        let ty = TypeDesc::List(vec![p(&"a".repeat(48))]);
        assert_eq!(format_type(&ty).lines().count(), 3);
    }

    #[test]
    fn parametric_with_and_without_name() {
        let list_of_int = TypeDesc::parametric("List", vec![p("int")]);
        assert_eq!(format_type(&list_of_int), "List[int]");

        let bare = TypeDesc::parametric("", vec![p("int"), p("str")]);
        assert_eq!(format_type(&bare), "(int, str)");

        let no_args = TypeDesc::parametric("Any", vec![]);
        assert_eq!(format_type(&no_args), "Any");

        let nested = TypeDesc::parametric(
            "Dict",
            vec![p("str"), TypeDesc::parametric("Optional", vec![p("int")])],
        );
        assert_eq!(format_type(&nested), "Dict[str, Optional[int]]");
    }

    #[test]
    fn wide_parametric_escapes_the_block() {
        let inner = TypeDesc::parametric("List", vec![p("int")]);
        let args = vec![inner, p(&"x".repeat(45))];
        let out = format_type(&TypeDesc::parametric("Union", args));
        assert_eq!(out, format!("Union[\n  List\\[int],\n  {}\n]", "x".repeat(45)));
    }

    #[test]
    fn schema_is_indented_json_in_field_order() {
        let schema = json!({
            "title": "Location",
            "type": "object",
            "properties": { "lat": { "type": "number" }, "lon": { "type": "number" } }
        });
        let out = format_type(&TypeDesc::Schema(schema));
        let expected = r#"{
  "title": "Location",
  "type": "object",
  "properties": {
    "lat": {
      "type": "number"
    },
    "lon": {
      "type": "number"
    }
  }
}"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn opaque_text_is_escaped() {
        assert_eq!(format_type(&TypeDesc::Opaque("Foo[bar]".into())), "Foo\\[bar]");
    }

    #[test]
    fn formatting_is_deterministic() {
        let ty = TypeDesc::mapping([
            ("tags", TypeDesc::parametric("List", vec![p("str")])),
            ("where", TypeDesc::Tuple(vec![p("float"); 6])),
        ]);
        assert_eq!(format_type(&ty), format_type(&ty));
    }
}
