//! The story document: an arena of content nodes.
//!
//! Children are owned through index lists, while the parent and next sibling
//! links are plain [`NodeId`] handles used only to walk the tree.
use core::fmt;
use std::collections::HashMap;

use strum::Display;

use crate::story_error::StoryError;

/// Handle to a node stored in a [`Document`]. Two handles are equal iff they
/// refer to the same node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum NodeKind {
    Element,
    Text,
}

/// A node in the document tree: either an element with a tag, classes and
/// attributes, or a text leaf.
#[derive(Debug)]
pub struct ContentNode {
    kind: NodeKind,
    tag: Option<String>,
    text: Option<String>,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl ContentNode {
    fn new_element(tag: &str) -> ContentNode {
        ContentNode {
            kind: NodeKind::Element,
            tag: Some(tag.to_ascii_lowercase()),
            text: None,
            classes: Vec::new(),
            attributes: HashMap::new(),
            children: Vec::new(),
            parent: None,
            next_sibling: None,
        }
    }

    fn new_text(text: &str) -> ContentNode {
        ContentNode {
            kind: NodeKind::Text,
            tag: None,
            text: Some(text.to_string()),
            classes: Vec::new(),
            attributes: HashMap::new(),
            children: Vec::new(),
            parent: None,
            next_sibling: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Lowercase tag name, `None` for text nodes.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    pub fn is_element(&self, tag: &str) -> bool {
        self.tag
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| v.as_str())
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }
}

/// Owns every node of a story document. Nodes are never removed, so a
/// [`NodeId`] stays valid for the whole life of the document.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<ContentNode>,
}

impl Document {
    pub fn new() -> Document {
        Document { nodes: Vec::new() }
    }

    /// Creates a detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(ContentNode::new_element(tag))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(ContentNode::new_text(text))
    }

    fn push(&mut self, node: ContentNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &ContentNode {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut ContentNode {
        &mut self.nodes[id.0]
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let node = self.get_mut(id);

        if !node.has_class(class) {
            node.classes.push(class.to_string());
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.get_mut(id)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Appends a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), StoryError> {
        if self.get(parent).is_text() {
            return Err(StoryError::BadArgument(format!(
                "text node {} can't have children",
                parent
            )));
        }

        if parent == child || self.get(child).parent.is_some() {
            return Err(StoryError::BadArgument(format!(
                "node {} is already attached",
                child
            )));
        }

        if let Some(&last) = self.get(parent).children.last() {
            self.get_mut(last).next_sibling = Some(child);
        }

        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);

        Ok(())
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).children.first().copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).next_sibling
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    /// Concatenated text of all the descendant text nodes, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut sb = String::new();
        self.collect_text(id, &mut sb);
        sb
    }

    fn collect_text(&self, id: NodeId, sb: &mut String) {
        let node = self.get(id);

        if let Some(text) = &node.text {
            sb.push_str(text);
        }

        for child in &node.children {
            self.collect_text(*child, sb);
        }
    }

    /// All the nodes under `root` (itself included) that satisfy `predicate`,
    /// in document order.
    pub fn find_all<F>(&self, root: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&ContentNode) -> bool,
    {
        let mut found = Vec::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let node = self.get(id);

            if predicate(node) {
                found.push(id);
            }

            stack.extend(node.children.iter().rev());
        }

        found
    }

    /// Creates a string representing the hierarchy under `root`, marking the
    /// node at `position` with `<---`.
    pub fn build_string_of_hierarchy(&self, root: NodeId, position: Option<NodeId>) -> String {
        let mut sb = String::new();
        self.hierarchy_line(root, 0, position, &mut sb);
        sb
    }

    fn hierarchy_line(
        &self,
        id: NodeId,
        indentation: usize,
        position: Option<NodeId>,
        sb: &mut String,
    ) {
        let node = self.get(id);

        sb.push_str(&"  ".repeat(indentation));

        match node.kind {
            NodeKind::Text => {
                sb.push('"');
                sb.push_str(node.text.as_deref().unwrap_or_default());
                sb.push('"');
            }
            NodeKind::Element => {
                sb.push('<');
                sb.push_str(node.tag.as_deref().unwrap_or_default());

                if !node.classes.is_empty() {
                    sb.push_str(" class=\"");
                    sb.push_str(&node.classes.join(" "));
                    sb.push('"');
                }

                let mut attrs: Vec<_> = node.attributes.iter().collect();
                attrs.sort();
                for (k, v) in attrs {
                    sb.push_str(&format!(" {}=\"{}\"", k, v));
                }

                sb.push('>');
            }
        }

        if position == Some(id) {
            sb.push_str("  <---");
        }

        sb.push('\n');

        for child in &node.children {
            self.hierarchy_line(*child, indentation + 1, position, sb);
        }
    }
}
