//! Structural Markup
//!
//! A small, lenient parser for the HTML-like fragments accepted by the
//! widget's markup-append operations. Parsing never fails: unknown tags are
//! kept as plain containers, stray closing tags are ignored and unclosed
//! elements are closed at the end of the fragment.
//!
//! A `class` attribute naming a [`StyleKind`] styles the enclosed text;
//! other classes are kept on the element but do not affect styling.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{OutputLine, Span};
use crate::style::StyleKind;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)([^>]*)>").unwrap());

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#).unwrap()
});

static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

/// Elements that never have children
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "wbr"];

/// A parsed markup node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// A parsed markup element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-cased tag name
    pub tag: String,
    /// Class names in attribute order
    pub classes: Vec<String>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(tag: &str, attributes: &str) -> Self {
        let classes = CLASS_RE
            .captures(attributes)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
            .map(|m| m.as_str().split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            tag: tag.to_ascii_lowercase(),
            classes,
            children: Vec::new(),
        }
    }

    /// The first class naming a style kind, if any
    pub fn style_kind(&self) -> Option<StyleKind> {
        self.classes
            .iter()
            .find_map(|class| StyleKind::from_class(class))
    }

    /// Concatenated text of this element and its descendants
    pub fn text(&self) -> String {
        self.spans(StyleKind::Log)
            .into_iter()
            .map(|span| span.text)
            .collect()
    }

    /// Flatten this element into styled runs
    pub fn spans(&self, inherited: StyleKind) -> Vec<Span> {
        if self.tag == "br" {
            return vec![Span::new("\n", inherited)];
        }
        let kind = self.style_kind().unwrap_or(inherited);
        to_spans(&self.children, kind)
    }

    /// Convert into a transcript line of its own
    pub fn to_line(&self) -> OutputLine {
        let kind = self.style_kind().unwrap_or_default();
        OutputLine::with_spans(self.spans(kind), kind)
    }
}

/// Flatten a node list into styled runs
pub fn to_spans(nodes: &[Node], inherited: StyleKind) -> Vec<Span> {
    let mut spans = Vec::new();
    for node in nodes {
        match node {
            Node::Text(text) => spans.push(Span::new(text.clone(), inherited)),
            Node::Element(element) => spans.extend(element.spans(inherited)),
        }
    }
    spans
}

/// Parse a markup fragment into its top-level nodes
///
/// The fragment is trimmed first.
pub fn parse_fragment(markup: &str) -> Vec<Node> {
    let source = COMMENT_RE.replace_all(markup.trim(), "");
    let mut builder = TreeBuilder::default();
    let mut last_end = 0;

    for caps in TAG_RE.captures_iter(&source) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        builder.text(&source[last_end..whole.start()]);
        last_end = whole.end();

        let closing = !caps[1].is_empty();
        let tag = &caps[2];
        let attributes = caps.get(3).map_or("", |m| m.as_str());

        if closing {
            builder.close(tag);
        } else {
            let self_closing = attributes.trim_end().ends_with('/');
            builder.open(Element::new(tag, attributes), self_closing);
        }
    }
    builder.text(&source[last_end..]);
    builder.finish()
}

/// Parse a fragment and return only its top-level elements
pub fn parse_elements(markup: &str) -> Vec<Element> {
    parse_fragment(markup)
        .into_iter()
        .filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
        .collect()
}

/// Decode the character references the widget understands
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match name {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "amp" => Some('&'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), |ch| ch.to_string())
        })
        .into_owned()
}

/// Open-element stack used while parsing
#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn text(&mut self, raw: &str) {
        if !raw.is_empty() {
            self.append(Node::Text(decode_entities(raw)));
        }
    }

    fn open(&mut self, element: Element, self_closing: bool) {
        if self_closing || VOID_TAGS.contains(&element.tag.as_str()) {
            self.append(Node::Element(element));
        } else {
            self.open.push(element);
        }
    }

    fn close(&mut self, tag: &str) {
        let tag = tag.to_ascii_lowercase();
        let Some(position) = self.open.iter().rposition(|el| el.tag == tag) else {
            return;
        };
        while self.open.len() > position {
            if let Some(element) = self.open.pop() {
                self.append(Node::Element(element));
            }
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while let Some(element) = self.open.pop() {
            self.append(Node::Element(element));
        }
        self.roots
    }
}
