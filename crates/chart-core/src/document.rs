// File: crates/chart-core/src/document.rs
// Summary: Minimal host document (element tree) that charts mount into and serialize from.
// Notes:
// - Nodes live in an arena; slots of removed subtrees are recycled by later appends.
// - Attributes keep insertion order so serialized markup is deterministic.

use std::fmt::Write as _;

use crate::error::RenderError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with a `body` root.
    pub fn new() -> Self {
        let body = Node { tag: "body".into(), attrs: Vec::new(), text: None, children: Vec::new() };
        Self { nodes: vec![body], free: Vec::new(), root: NodeId(0) }
    }

    /// Document holding one `<div id=..>` container per given id.
    pub fn with_mount_points<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut doc = Self::new();
        for id in ids {
            doc.add_mount_point(id);
        }
        doc
    }

    pub fn root(&self) -> NodeId { self.root }

    pub fn add_mount_point(&mut self, id: &str) -> NodeId {
        let div = self.append(self.root, "div");
        self.set_attr(div, "id", id);
        div
    }

    /// Resolve a mount-point identifier to its container element.
    pub fn mount(&self, id: &str) -> Result<NodeId, RenderError> {
        self.find_by_id(id).ok_or_else(|| RenderError::MountPointNotFound(id.to_string()))
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.attr(n, "id") == Some(id))
    }

    /// Create `<tag>` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let node = Node { tag: tag.to_string(), attrs: Vec::new(), text: None, children: Vec::new() };
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        };
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Set (or replace) an attribute, keeping its original position.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        let attrs = &mut self.nodes[node.0].attrs;
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => attrs.push((name.to_string(), value)),
        }
        self
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        self.nodes[node.0].attrs.retain(|(k, _)| k != name);
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0]
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node.0].text = Some(text.into());
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].text.as_deref()
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Detach and recycle every descendant of `node`.
    /// `NodeId`s held for those descendants become invalid.
    pub fn clear_children(&mut self, node: NodeId) {
        let gone = self.descendants(node);
        self.nodes[node.0].children.clear();
        self.free.extend(gone.into_iter().map(|n| n.0));
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// All reachable descendants of `scope` in document order (excluding `scope`).
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// First descendant carrying every class in `classes` (space separated).
    pub fn select_class(&self, scope: NodeId, classes: &str) -> Option<NodeId> {
        self.select_all_class(scope, classes).into_iter().next()
    }

    pub fn select_all_class(&self, scope: NodeId, classes: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| classes.split_whitespace().all(|c| self.has_class(n, c)))
            .collect()
    }

    pub fn select_all_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope).into_iter().filter(|&n| self.tag(n) == tag).collect()
    }

    /// Serialize `node` and its subtree.
    pub fn to_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    /// Serialize the whole document as a standalone HTML page.
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>\n<html>{}</html>\n", self.to_markup(self.root))
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let n = &self.nodes[node.0];
        out.push('<');
        out.push_str(&n.tag);
        for (k, v) in &n.attrs {
            let _ = write!(out, " {}=\"{}\"", k, escape(v, true));
        }
        out.push('>');
        if let Some(text) = &n.text {
            out.push_str(&escape(text, false));
        }
        for &c in &n.children {
            self.write_node(c, out);
        }
        let _ = write!(out, "</{}>", n.tag);
    }
}

fn escape(s: &str, attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
