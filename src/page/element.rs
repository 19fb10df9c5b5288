// src/page/element.rs
// =============================================================================
// A minimal element tree standing in for the browser DOM.
//
// The gallery never needs a full DOM, only:
// - elements with a tag, a class list, attributes and children
// - text nodes
// - class toggling (the `hide` class drives visibility)
// - text content, for filtering by what an item shows
// - serialisation to HTML, and a plain-text view of what is visible
//
// All text and attribute values are escaped when written out, so repository
// names and descriptions from the API can never inject markup.
// =============================================================================

/// Class that hides an element
pub const HIDE: &str = "hide";

// Elements written without a closing tag
const VOID_TAGS: &[&str] = &["img", "input", "meta", "br"];

// Elements that start on their own line in the plain-text view
const BLOCK_TAGS: &[&str] = &[
    "div", "p", "h1", "h2", "h3", "li", "ul", "section", "figure", "button", "main",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    // Builder helpers, used when assembling fragments

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.append_text(text);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Adds the class when `on`, removes it otherwise
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDE)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn append_text(&mut self, text: &str) {
        self.children.push(Node::Text(text.to_string()));
    }

    /// Removes every child node
    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Element children, skipping text nodes
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants, hidden or not
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(&escape(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    // Text a reader would see: hidden subtrees are skipped, block elements
    // start new lines, links show their target and inputs their value.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        self.write_visible_text(&mut out);
        out.lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_visible_text(&self, out: &mut String) {
        if self.is_hidden() {
            return;
        }
        let block = BLOCK_TAGS.contains(&self.tag.as_str());
        if block {
            out.push('\n');
        }

        match self.tag.as_str() {
            "img" => {
                if let Some(alt) = self.attr("alt") {
                    out.push_str(&format!("[{}]", alt));
                }
            }
            "input" => {
                let placeholder = self.attr("placeholder").unwrap_or("");
                let value = self.attr("value").unwrap_or("");
                out.push_str(&format!("{}: [{}]", placeholder, value));
            }
            _ => {
                for node in &self.children {
                    match node {
                        Node::Text(t) => out.push_str(t),
                        Node::Element(e) => e.write_visible_text(out),
                    }
                }
                if self.tag == "a" {
                    if let Some(href) = self.attr("href") {
                        out.push_str(&format!(" <{}>", href));
                    }
                }
            }
        }

        if block {
            out.push('\n');
        }
    }
}

// Escapes text for use in element content and double-quoted attributes
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why `impl Iterator<Item = &Element>` as a return type?
//    - The caller gets an iterator without us naming the concrete
//      FilterMap<Iter<Node>, closure> type (closures have no nameable type)
//
// 2. Why builder methods take `mut self`?
//    - They consume the element and hand it back, so fragments can be
//      written as one chained expression
// -----------------------------------------------------------------------------
