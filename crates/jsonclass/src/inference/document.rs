//! Arena representation of a JSON document
//!
//! Nodes live in one `Vec` and refer to their children by `NodeId`. The id is
//! a node's identity: two structurally equal objects are still two nodes,
//! while one node wired under two parents (or under its own descendant) is a
//! shared reference. Documents converted from `serde_json::Value` are always
//! trees; the builder API can express sharing and cycles.

use serde_json::{Number, Value};

use crate::core::DiagramError;

/// Index of a node inside a [`JsonDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One JSON value whose children are arena references
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<NodeId>),
    Object(Vec<(String, NodeId)>),
}

impl JsonNode {
    /// Objects and arrays carry fields; everything else is primitive
    pub fn is_container(&self) -> bool {
        matches!(self, JsonNode::Array(_) | JsonNode::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonNode::Array(_))
    }

    fn empty_like(value: &Value) -> Self {
        match value {
            Value::Null => JsonNode::Null,
            Value::Bool(b) => JsonNode::Bool(*b),
            Value::Number(n) => JsonNode::Number(n.clone()),
            Value::String(s) => JsonNode::String(s.clone()),
            Value::Array(items) => JsonNode::Array(Vec::with_capacity(items.len())),
            Value::Object(map) => JsonNode::Object(Vec::with_capacity(map.len())),
        }
    }
}

/// Arena-backed JSON document with a designated root
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    nodes: Vec<JsonNode>,
    root: NodeId,
}

impl JsonDocument {
    /// Create a document whose root is `root`
    pub fn new(root: JsonNode) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Convert a parsed value; every nested value becomes a fresh node
    pub fn from_value(value: &Value) -> Self {
        let mut doc = Self::new(JsonNode::empty_like(value));
        let mut stack: Vec<(NodeId, &Value)> = vec![(doc.root, value)];

        while let Some((id, value)) = stack.pop() {
            match value {
                Value::Array(items) => {
                    for item in items {
                        let child = doc.alloc(JsonNode::empty_like(item));
                        if let JsonNode::Array(children) = &mut doc.nodes[id.0] {
                            children.push(child);
                        }
                        stack.push((child, item));
                    }
                }
                Value::Object(map) => {
                    for (key, item) in map {
                        let child = doc.alloc(JsonNode::empty_like(item));
                        if let JsonNode::Object(fields) = &mut doc.nodes[id.0] {
                            fields.push((key.clone(), child));
                        }
                        stack.push((child, item));
                    }
                }
                _ => {}
            }
        }

        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node; ids handed out by this document always resolve
    pub fn get(&self, id: NodeId) -> Option<&JsonNode> {
        self.nodes.get(id.0)
    }

    /// Add a detached node and return its id
    pub fn add_node(&mut self, node: JsonNode) -> Result<NodeId, DiagramError> {
        self.check_children(&node)?;
        Ok(self.alloc(node))
    }

    /// Append `child` to the array `array`
    pub fn push_element(&mut self, array: NodeId, child: NodeId) -> Result<(), DiagramError> {
        self.check(child)?;
        match self.nodes.get_mut(array.0) {
            Some(JsonNode::Array(children)) => {
                children.push(child);
                Ok(())
            }
            Some(_) => Err(DiagramError::document_error(format!(
                "node {} is not an array",
                array.0
            ))),
            None => Err(out_of_range(array)),
        }
    }

    /// Set `key` on the object `object` to `child`
    ///
    /// An existing key keeps its position and is rebound, matching how a
    /// JSON object assignment behaves.
    pub fn insert_field(
        &mut self,
        object: NodeId,
        key: impl Into<String>,
        child: NodeId,
    ) -> Result<(), DiagramError> {
        self.check(child)?;
        let key = key.into();
        match self.nodes.get_mut(object.0) {
            Some(JsonNode::Object(fields)) => {
                match fields.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = child,
                    None => fields.push((key, child)),
                }
                Ok(())
            }
            Some(_) => Err(DiagramError::document_error(format!(
                "node {} is not an object",
                object.0
            ))),
            None => Err(out_of_range(object)),
        }
    }

    fn alloc(&mut self, node: JsonNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn check(&self, id: NodeId) -> Result<(), DiagramError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(out_of_range(id))
        }
    }

    fn check_children(&self, node: &JsonNode) -> Result<(), DiagramError> {
        match node {
            JsonNode::Array(children) => children.iter().try_for_each(|c| self.check(*c)),
            JsonNode::Object(fields) => fields.iter().try_for_each(|(_, c)| self.check(*c)),
            _ => Ok(()),
        }
    }
}

impl From<&Value> for JsonDocument {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

fn out_of_range(id: NodeId) -> DiagramError {
    DiagramError::document_error(format!("node {} is out of range", id.0))
}
