//! Labeled tree renderer.
//!
//! ```text
//! = Place instance
//! ├── name : str = "Acme Widgets"
//! └── location : Location
//!     ├── lat : float = 37.4219
//!     └── lon : float = -122.084
//! ```
//!
//! Labels are markup (see [`crate::markup`]); multi-line labels keep the
//! guide column on their continuation lines.

use std::fmt;

use crate::markup::{self, Span};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Defer to `colored`'s own detection (NO_COLOR, CLICOLOR, tty).
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Apply process-wide through `colored::control`.
    pub fn apply(self) {
        match self {
            ColorChoice::Auto => colored::control::unset_override(),
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
        }
    }
}

const BRANCH: &str = "├── ";
const LAST: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), children: Vec::new() }
    }

    /// Append a child and hand it back for decoration.
    pub fn add(&mut self, label: impl Into<String>) -> &mut Node {
        self.children.push(Node::new(label));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn push_label(&mut self, text: &str) {
        self.label.push_str(text);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Render with guides; `styled` selects ANSI painting over plain text.
    pub fn render(&self, styled: bool) -> String {
        let mut out = String::new();
        self.render_rec(&mut out, "", None, styled);
        out
    }

    /// Plain-text rendering, markup stripped.
    pub fn to_plain(&self) -> String {
        self.render(false)
    }

    fn render_rec(&self, out: &mut String, prefix: &str, last: Option<bool>, styled: bool) {
        let (head, tail) = match last {
            None => (String::new(), String::new()),
            Some(true) => (format!("{prefix}{LAST}"), format!("{prefix}{SPACE}")),
            Some(false) => (format!("{prefix}{BRANCH}"), format!("{prefix}{PIPE}")),
        };
        for (i, line) in label_lines(&self.label).iter().enumerate() {
            // continuation lines of a label hang under the label's first column
            out.push_str(if i == 0 { &head } else { &tail });
            for span in line {
                if styled {
                    out.push_str(&span.paint());
                } else {
                    out.push_str(&span.text);
                }
            }
            out.push('\n');
        }

        let n = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render_rec(out, &tail, Some(i + 1 == n), styled);
        }
    }
}

/// Split parsed label spans at newlines, keeping styles per line.
fn label_lines(label: &str) -> Vec<Vec<Span>> {
    let mut lines = vec![Vec::new()];
    for span in markup::parse(label) {
        let mut parts = span.text.split('\n');
        if let Some(first) = parts.next() {
            push_part(lines.last_mut(), first, &span);
        }
        for part in parts {
            lines.push(Vec::new());
            push_part(lines.last_mut(), part, &span);
        }
    }
    lines
}

fn push_part(line: Option<&mut Vec<Span>>, text: &str, span: &Span) {
    if let (Some(line), false) = (line, text.is_empty()) {
        line.push(Span { text: text.to_string(), styles: span.styles.clone() });
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled = colored::control::SHOULD_COLORIZE.should_colorize();
        f.write_str(&self.render(styled))
    }
}

// ------------------------------- Tests ------------------------------------ //
