//! Minimal CLI: JSON documents → (tree | signature), descriptors → text
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use shape_tree::error::{Error, Result};
use shape_tree::tree::{ColorChoice, Node};
use shape_tree::value::{Inspect, Model};
use shape_tree::{describe, format_type, infer, jq_exec, path_de, samples};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// render JSON documents and type descriptors as colorized trees for inspection
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// when to emit ANSI colors
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    color: Color,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Color {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// describe each document as a labeled tree
    Tree(TreeOut),
    /// print the runtime type signature of each document
    Signature(SignatureOut),
    /// format a type descriptor given as JSON
    Format(FormatOut),
    /// describe the built-in sample records
    Demo(DemoOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat each document as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more JSON documents, given inline
    #[arg(num_args = 1.., required = true)]
    documents: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// label for each root node
    #[arg(long, default_value = "")]
    root_label: String,
}

#[derive(clap::Parser, Debug)]
struct SignatureOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct FormatOut {
    /// externally tagged descriptor, e.g. '{"list": [{"primitive": "int"}]}'
    descriptor: String,
}

#[derive(clap::Parser, Debug)]
struct DemoOut {
    /// also print the record schemas
    #[arg(long)]
    schema: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(serde_json::Value)) -> Result<()> {
        for (index, source) in self.documents.iter().enumerate() {
            let chunks: Vec<&str> = if self.ndjson {
                source.lines().filter(|l| !l.trim().is_empty()).collect()
            } else {
                vec![source.as_str()]
            };
            for chunk in chunks {
                let json_value = serde_json::from_str::<serde_json::Value>(chunk)
                    .map_err(|error| Error::Json {
                        context: format!("document #{}", index + 1),
                        message: error.to_string(),
                    })?;
                let json_value = match self.json_pointer.as_ref() {
                    None => json_value,
                    Some(ptr) => json_value
                        .pointer(ptr)
                        .cloned()
                        .ok_or_else(|| Error::Pointer(ptr.clone()))?,
                };
                match self.jq_expr.as_ref() {
                    None => apply(json_value),
                    Some(jq_expr) => {
                        let outputs = jq_exec::run_jaq(jq_expr, &json_value)?;
                        debug!(document = index + 1, outputs = outputs.len(), "jq filter applied");
                        outputs.into_iter().for_each(&mut apply);
                    }
                }
            }
        }
        Ok(())
    }
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        ColorChoice::from(self.color).apply();
        match &self.cmd {
            Command::Tree(target) => {
                target.input_settings.load_process(|value| {
                    let mut root = Node::new(target.root_label.clone());
                    describe::describe_into(&infer::value_from_json(&value), &mut root);
                    print!("{root}");
                })
            }
            Command::Signature(target) => {
                target.input_settings.load_process(|value| {
                    let signature = format_type(&infer::type_of_json(&value));
                    println!("{}", shape_tree::markup::render(&signature));
                })
            }
            Command::Format(target) => {
                let ty = path_de::type_desc_from_str(&target.descriptor)?;
                debug!(?ty, "decoded descriptor");
                println!("{}", shape_tree::markup::render(&format_type(&ty)));
                Ok(())
            }
            Command::Demo(target) => {
                if target.schema {
                    let schema = shape_tree::TypeDesc::Schema(samples::Place::schema());
                    println!("{}", shape_tree::markup::render(&format_type(&schema)));
                }
                for (i, place) in samples::places().iter().enumerate() {
                    let label = format!("[bold]places[{i}][/bold] [dim]: {}[/dim]", samples::Place::NAME);
                    let mut root = Node::new(label);
                    describe::describe_into(&place.inspect(), &mut root);
                    print!("{root}");
                }
                for value in samples::loose_values() {
                    print!("{}", describe::describe(&value));
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
