//! Renders every sample twice, checks the trees match, prints them.
use serde_json::json;
use shape_tree::value::Inspect;
use shape_tree::{describe, format_type, infer, samples, Value};

fn json_samples() -> Vec<serde_json::Value> {
    vec![
        json!({
            "id": "0ahUKEa2ZQ",
            "name": "Acme Widgets - East",
            "where": [null, [37.4200, -122.0830], null],
            "rating": 4.5,
            "tags": ["hardware"],
            "extra": {}
        }),
        json!([]),
        json!(null),
        json!({ "nested": { "deeper": { "deepest": [1, 2, 3] } } }),
    ]
}

fn main() {
    colored::control::set_override(true);

    let mut values: Vec<Value> = samples::places().iter().map(Inspect::inspect).collect();
    values.extend(samples::loose_values());

    let mut failures = 0;
    for doc in json_samples() {
        println!("signature: {}", format_type(&infer::type_of_json(&doc)));
        values.push(infer::value_from_json(&doc));
    }

    for (i, value) in values.iter().enumerate() {
        let first = describe(value);
        let second = describe(value);
        if first == second {
            eprintln!("✅ sample {i}");
        } else {
            eprintln!("❌ sample {i}: describing twice gave different trees");
            failures += 1;
        }
        print!("{first}");
    }

    if failures > 0 {
        std::process::exit(1);
    }
}
