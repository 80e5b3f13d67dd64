//! Realistic records for the `demo` command and the dev runner:
//! place listings with nested records, optional fields, open-ended
//! attributes and a self-describing visit histogram.

use std::fmt;

use indexmap::IndexMap;
use serde_json::json;

use crate::ir::TypeDesc;
use crate::tree::Node;
use crate::value::{Describe, Field, Inspect, Instance, Model, Object, Typed, Value};

// ------------------------------ Location --------------------------------- //

#[derive(Debug, Clone)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Model for Location {
    const NAME: &'static str = "Location";

    fn schema() -> serde_json::Value {
        json!({
            "title": "Location",
            "type": "object",
            "properties": {
                "lat": { "title": "Lat", "type": "number" },
                "lon": { "title": "Lon", "type": "number" }
            },
            "required": ["lat", "lon"]
        })
    }

    fn fields(&self) -> Vec<Field> {
        vec![Field::of("lat", &self.lat), Field::of("lon", &self.lon)]
    }
}

impl Typed for Location {
    fn type_desc() -> TypeDesc {
        TypeDesc::Schema(Self::schema())
    }
}

impl Inspect for Location {
    fn inspect(&self) -> Value {
        Value::Record(self.record())
    }
}

// ------------------------------ Histogram -------------------------------- //

/// Visits per opening hour; renders its own bars.
#[derive(Debug, Clone, Default)]
pub struct Visits {
    pub by_hour: Vec<(u8, u32)>,
}

impl fmt::Display for Visits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Visits({} hours)", self.by_hour.len())
    }
}

impl Describe for Visits {
    fn describe(&self, node: &mut Node) {
        for (hour, count) in &self.by_hour {
            let bar = "█".repeat(*count as usize);
            node.add(format!("[dim]{hour:02}h[/dim] [green]{bar}[/green] {count}"));
        }
    }
}

impl Object for Visits {
    fn class_name(&self) -> String {
        "Visits".into()
    }

    fn as_describe(&self) -> Option<&dyn Describe> {
        Some(self)
    }
}

impl Typed for Visits {
    fn type_desc() -> TypeDesc {
        TypeDesc::primitive("Visits")
    }
}

impl Inspect for Visits {
    fn inspect(&self) -> Value {
        Value::object(self.clone())
    }
}

// -------------------------------- Place ---------------------------------- //

#[derive(Debug, Clone)]
pub struct Place {
    pub id: String,
    pub name: Option<String>,
    pub location: Option<Location>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub open_now: Option<bool>,
    pub tags: Vec<String>,
    pub attributes: IndexMap<String, serde_json::Value>,
    pub visits: Visits,
}

impl Model for Place {
    const NAME: &'static str = "Place";

    fn schema() -> serde_json::Value {
        json!({
            "title": "Place",
            "type": "object",
            "properties": {
                "id": { "title": "Id", "type": "string" },
                "name": { "title": "Name", "type": "string" },
                "location": { "$ref": "#/definitions/Location" },
                "website": { "title": "Website", "type": "string", "format": "uri" },
                "rating": { "title": "Rating", "type": "number" },
                "open_now": { "title": "Open Now", "type": "boolean" },
                "tags": { "title": "Tags", "type": "array", "items": { "type": "string" } },
                "attributes": { "title": "Attributes", "type": "object" }
            },
            "required": ["id"],
            "definitions": { "Location": Location::schema() }
        })
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::of("id", &self.id),
            Field::of("name", &self.name),
            Field::of("location", &self.location),
            Field::of("website", &self.website),
            Field::of("rating", &self.rating),
            Field::of("open_now", &self.open_now),
            Field::of("tags", &self.tags),
            Field::of("attributes", &self.attributes),
            Field::of("visits", &self.visits),
            // the record's own class, as a value
            Field::new(
                "model",
                TypeDesc::parametric("Type", vec![TypeDesc::primitive("Model")]),
                Value::Type(Self::NAME.into()),
            ),
        ]
    }
}

impl Inspect for Place {
    fn inspect(&self) -> Value {
        Value::Record(self.record())
    }
}

// ------------------------------- Samples --------------------------------- //

pub fn places() -> Vec<Place> {
    vec![
        Place {
            id: "0ahUKEa1ZQ".into(),
            name: Some("Acme Widgets".into()),
            location: Some(Location { lat: 37.4219, lon: -122.084 }),
            website: Some("https://example.com/a".into()),
            rating: Some(4.3),
            open_now: Some(true),
            tags: vec!["hardware".into(), "store".into()],
            attributes: [
                ("parking".to_string(), json!("street")),
                ("wheelchair".to_string(), json!(true)),
                ("price_level".to_string(), json!(2)),
            ]
            .into_iter()
            .collect(),
            visits: Visits { by_hour: vec![(9, 2), (12, 6), (17, 4)] },
        },
        Place {
            id: "0ahUKEa3ZQ".into(),
            name: None,
            location: None,
            website: Some("https://example.com/c".into()),
            rating: None,
            open_now: Some(false),
            tags: Vec::new(),
            attributes: IndexMap::new(),
            visits: Visits::default(),
        },
    ]
}

/// A mixed bag of loose values: objects with and without attributes.
pub fn loose_values() -> Vec<Value> {
    let cursor = Instance::with_attributes("Cursor", [
        ("row", Value::Int(3)),
        ("column", Value::Int(14)),
        ("_buffer", Value::Str("…".into())),
    ]);
    vec![
        Value::object(cursor),
        Value::object(Instance::opaque("Connection", "<Connection to [memory]>")),
        Value::Type("Location".into()),
        Value::None,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::describe;
    use pretty_assertions::assert_eq;

    #[test]
    fn sparse_place_renders() {
        let place = &places()[1];
        let expected = r#"
├── id : str = "0ahUKEa3ZQ"
├── name : Optional[str] = None
├── location : Optional[
│     {
│       "title": "Location",
│       "type": "object",
│       "properties": {
│         "lat": {
│           "title": "Lat",
│           "type": "number"
│         },
│         "lon": {
│           "title": "Lon",
│           "type": "number"
│         }
│       },
│       "required": [
│         "lat",
│         "lon"
│       ]
│     }
│   ] = None
├── website : Optional[str] = "https://example.com/c"
├── rating : Optional[float] = None
├── open_now : Optional[bool] = False
├── tags : List[str] = list instance = []
├── attributes : Dict[str, Any] = {}
├── visits : Visits = Visits instance
└── model : Type[Model] = Place type
"#;
        assert_eq!(describe(&place.inspect()).to_plain(), expected);
    }

    #[test]
    fn nested_record_and_custom_rendering() {
        let tree = describe(&places()[0].inspect());
        let location = &tree.children[2];
        assert_eq!(location.children.len(), 2);
        assert!(location.children[0].label.contains("lat"));

        let visits = &tree.children[8];
        assert_eq!(visits.children.len(), 3);
        assert_eq!(crate::markup::strip(&visits.children[1].label), "12h ██████ 6");
    }

    #[test]
    fn loose_values_render() {
        let plain: Vec<String> = loose_values().iter().map(|v| describe(v).to_plain()).collect();
        assert_eq!(plain[0], " = Cursor instance\n├── row : int = 3\n└── column : int = 14\n");
        assert_eq!(plain[1], " = Connection instance = <Connection to [memory]>\n");
        assert_eq!(plain[2], " = Location type\n");
        assert_eq!(plain[3], " = None\n");
    }
}
