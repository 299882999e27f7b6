//! Owned response document and path extraction.
//!
//! Parsing is delegated to `roxmltree`; the borrowed parse tree is
//! converted into an owned [`Node`] tree immediately so that nothing
//! returned to a caller aliases the transport buffer. Path queries are
//! absolute, `/`-separated element names with an optional trailing
//! `@attr` segment, e.g. `/rsp/photoset/@id`.

use crate::error::{Error, Result};

/// One element of the response tree, fully owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Node>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by name, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Concatenated direct text content, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Child elements with the given name, in document order.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Node> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children_named(name).next()
    }

    /// Text content of the first child element with the given name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Node::text)
    }
}

/// An immutable response document, owned by the operation for the
/// duration of extraction and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Parses a response body into an owned tree.
    pub fn parse(xml: &str) -> Result<Document> {
        let parsed = roxmltree::Document::parse(xml)
            .map_err(|err| Error::malformed(format!("xml parse: {err}")))?;
        Ok(Document {
            root: convert(parsed.root_element()),
        })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluates a path query, returning the first match: the attribute
    /// value when the path ends in `@attr`, the element text otherwise.
    /// An absent field is a normal `None`, not an error.
    pub fn eval(&self, path: &str) -> Option<String> {
        let (segments, attr) = split_path(path);
        let node = self.descend(&segments).into_iter().next()?;
        match attr {
            Some(attr) => node.attr(attr).map(str::to_owned),
            None => Some(node.text().to_owned()),
        }
    }

    /// First element matching an element path.
    pub fn node(&self, path: &str) -> Option<&Node> {
        let (segments, attr) = split_path(path);
        debug_assert!(attr.is_none(), "node() takes an element path");
        self.descend(&segments).into_iter().next()
    }

    /// Every element matching an element path, in document order.
    pub fn nodes(&self, path: &str) -> Vec<&Node> {
        let (segments, attr) = split_path(path);
        debug_assert!(attr.is_none(), "nodes() takes an element path");
        self.descend(&segments)
    }

    fn descend(&self, segments: &[&str]) -> Vec<&Node> {
        let Some((first, rest)) = segments.split_first() else {
            return Vec::new();
        };
        if self.root.name != *first {
            return Vec::new();
        }
        let mut matches = vec![&self.root];
        for segment in rest {
            let mut next = Vec::new();
            for node in matches {
                next.extend(node.children_named(segment));
            }
            matches = next;
        }
        matches
    }
}

/// Splits `/a/b/@c` into (["a", "b"], Some("c")).
fn split_path(path: &str) -> (Vec<&str>, Option<&str>) {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut attr = None;
    if segments.last().is_some_and(|s| s.starts_with('@')) {
        attr = segments.pop().map(|s| &s[1..]);
    }
    (segments, attr)
}

fn convert(node: roxmltree::Node<'_, '_>) -> Node {
    let mut text = String::new();
    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(convert(child));
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or(""));
        }
    }
    Node {
        name: node.tag_name().name().to_owned(),
        attrs: node
            .attributes()
            .map(|a| (a.name().to_owned(), a.value().to_owned()))
            .collect(),
        text: text.trim().to_owned(),
        children,
    }
}
