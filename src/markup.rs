//! Inline style markup used in tree labels.
//!
//! Labels are plain strings with bracketed tags, e.g.
//! `[deep_sky_blue1]name[/deep_sky_blue1] [dim]: int[/dim]`. Literal brackets
//! that would read as a tag are protected with a backslash by [`escape`].
//! Only tags naming a known [`Style`] are interpreted; anything else is text.

use colored::{Color, ColoredString, Colorize};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\*)(\[[a-z#/@][^\[]*?\])").expect("valid escape regex"));

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\*)\[([a-z#/@][^\[]*?)\]").expect("valid tag regex"));

/// Escape `text` so it renders verbatim when embedded in markup.
pub fn escape(text: &str) -> String {
    let mut out = ESCAPE_RE
        .replace_all(text, |caps: &Captures| {
            let slashes = &caps[1];
            format!("{slashes}{slashes}\\{}", &caps[2])
        })
        .into_owned();
    // a trailing lone backslash must not escape the tag that follows
    if out.ends_with('\\') && !out.ends_with("\\\\") {
        out.push('\\');
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Bold,
    Dim,
    Italic,
    Underline,
    Fg(Color),
}

impl Style {
    pub fn from_name(name: &str) -> Option<Self> {
        let style = match name {
            "bold" => Style::Bold,
            "dim" => Style::Dim,
            "italic" => Style::Italic,
            "underline" => Style::Underline,
            // xterm-256 names that show up in labels
            "orange3" => Style::Fg(Color::TrueColor { r: 215, g: 135, b: 0 }),
            "deep_sky_blue1" => Style::Fg(Color::TrueColor { r: 0, g: 175, b: 255 }),
            "grey50" => Style::Fg(Color::TrueColor { r: 128, g: 128, b: 128 }),
            other => Style::Fg(other.parse::<Color>().ok()?),
        };
        Some(style)
    }

    fn apply(self, s: ColoredString) -> ColoredString {
        match self {
            Style::Bold => s.bold(),
            Style::Dim => s.dimmed(),
            Style::Italic => s.italic(),
            Style::Underline => s.underline(),
            Style::Fg(color) => s.color(color),
        }
    }
}

/// A run of text sharing one set of styles.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub styles: Vec<Style>,
}

impl Span {
    pub fn paint(&self) -> String {
        if self.styles.is_empty() {
            return self.text.clone();
        }
        self.styles
            .iter()
            .fold(self.text.as_str().normal(), |s, style| style.apply(s))
            .to_string()
    }
}

/// Parse markup into styled spans. Never fails: unbalanced or unknown tags
/// degrade to literal text.
pub fn parse(markup: &str) -> Vec<Span> {
    let mut spans = Vec::<Span>::new();
    let mut stack = Vec::<(String, Style)>::new();
    let mut text = String::new();
    let mut last = 0;

    let flush = |text: &mut String, stack: &[(String, Style)], spans: &mut Vec<Span>| {
        if !text.is_empty() {
            spans.push(Span {
                text: std::mem::take(text),
                styles: stack.iter().map(|(_, s)| *s).collect(),
            });
        }
    };

    for caps in TAG_RE.captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        text.push_str(&markup[last..whole.start()]);
        last = whole.end();

        let slashes = caps[1].len();
        let tag = &caps[2];
        text.push_str(&"\\".repeat(slashes / 2));
        if slashes % 2 == 1 {
            text.push('[');
            text.push_str(tag);
            text.push(']');
            continue;
        }

        if let Some(closing) = tag.strip_prefix('/') {
            let pos = if closing.is_empty() {
                stack.len().checked_sub(1)
            } else {
                stack.iter().rposition(|(name, _)| name == closing)
            };
            match pos {
                Some(pos) => {
                    flush(&mut text, &stack, &mut spans);
                    stack.remove(pos);
                }
                None => text.push_str(&format!("[{tag}]")),
            }
        } else {
            match Style::from_name(tag) {
                Some(style) => {
                    flush(&mut text, &stack, &mut spans);
                    stack.push((tag.to_string(), style));
                }
                None => text.push_str(&format!("[{tag}]")),
            }
        }
    }
    text.push_str(&markup[last..]);
    flush(&mut text, &stack, &mut spans);
    spans
}

/// Markup with all tags removed and escapes resolved.
pub fn strip(markup: &str) -> String {
    parse(markup).into_iter().map(|s| s.text).collect()
}

/// Markup rendered to terminal text (ANSI when `colored` decides to colorize).
pub fn render(markup: &str) -> String {
    parse(markup).iter().map(Span::paint).collect()
}

// ------------------------------- Tests ------------------------------------ //
