//! Class extraction
//!
//! Walks a [`JsonDocument`] depth-first and emits one [`ClassDescriptor`] per
//! container node on its first visit. The walk uses an explicit stack, so
//! document depth is bounded by memory rather than by the call stack, and
//! the output order is exactly the pre-order of the recursive definition:
//! a node's own descriptor first, then each nested class subtree in key
//! order.
//!
//! Arrays are sampled through their first element only. A revisited node
//! (shared reference or cycle) is skipped silently; the property that
//! pointed at it keeps its annotation even though no descriptor is emitted
//! for that occurrence.

use std::borrow::Cow;

use tracing::{debug, info, span, trace, Level};

use super::document::{JsonDocument, JsonNode, NodeId};
use super::guard::VisitedGuard;
use super::naming::NameAllocator;
use super::schema::{ClassDescriptor, PrimitiveType, PropertyDescriptor, TypeAnnotation};
use crate::core::RootNaming;

/// Extracts class descriptors from one document
pub struct ClassExtractor<'a> {
    document: &'a JsonDocument,
    names: NameAllocator,
}

impl<'a> ClassExtractor<'a> {
    pub fn new(document: &'a JsonDocument) -> Self {
        Self {
            document,
            names: NameAllocator::new(),
        }
    }

    /// Extract from the document root with a fresh guard
    pub fn extract_root(&self, naming: &RootNaming) -> Vec<ClassDescriptor> {
        let root = self.document.root();
        let is_array = self.document.get(root).is_some_and(JsonNode::is_array);
        let mut guard = VisitedGuard::new();
        self.extract(root, naming.name_for(is_array), &mut guard)
    }

    /// Extract classes reachable from `node`, naming `node`'s own class `name`
    ///
    /// Returns an empty list when `node` is primitive or already in `guard`.
    pub fn extract(
        &self,
        node: NodeId,
        name: &str,
        guard: &mut VisitedGuard,
    ) -> Vec<ClassDescriptor> {
        let extract_span = span!(Level::INFO, "extract_classes", root = name);
        let _enter = extract_span.enter();

        let mut classes = Vec::new();
        let mut pending: Vec<(NodeId, String)> = vec![(node, name.to_string())];

        while let Some((id, class_name)) = pending.pop() {
            let Some(current) = self.document.get(id) else {
                continue;
            };
            if !current.is_container() {
                continue;
            }
            if !guard.visit(id) {
                trace!(class = %class_name, node = id.index(), "Skipping revisited node");
                continue;
            }

            let mut properties = Vec::new();
            let mut nested: Vec<(NodeId, String)> = Vec::new();

            for (key, child) in fields(current) {
                let annotation = self.annotate(&key, child, &mut nested);
                trace!(class = %class_name, key = %key, annotation = %annotation, "Inferred property");
                properties.push(PropertyDescriptor::new(key, annotation));
            }

            debug!(
                class = %class_name,
                properties = properties.len(),
                nested = nested.len(),
                "Extracted class"
            );
            classes.push(ClassDescriptor::new(class_name, properties));

            // Reverse so the first key's subtree is popped first
            pending.extend(nested.into_iter().rev());
        }

        info!(class_count = classes.len(), visited = guard.len(), "Extraction completed");
        classes
    }

    /// Annotate one field and queue any class it introduces
    fn annotate(
        &self,
        key: &str,
        child: NodeId,
        nested: &mut Vec<(NodeId, String)>,
    ) -> TypeAnnotation {
        match self.document.get(child) {
            Some(JsonNode::Array(items)) => {
                let first = items
                    .first()
                    .and_then(|&id| self.document.get(id).map(|node| (id, node)));
                match first {
                    Some((id, node)) if node.is_container() => {
                        let class_name = self.names.class_name_for(key);
                        nested.push((id, class_name.clone()));
                        TypeAnnotation::ClassArray(class_name)
                    }
                    Some((_, node)) => primitive_type(node)
                        .map_or(TypeAnnotation::AnyArray, TypeAnnotation::PrimitiveArray),
                    None => TypeAnnotation::AnyArray,
                }
            }
            Some(JsonNode::Object(_)) => {
                let class_name = self.names.class_name_for(key);
                nested.push((child, class_name.clone()));
                TypeAnnotation::Class(class_name)
            }
            Some(node) => TypeAnnotation::Primitive(
                primitive_type(node).unwrap_or(PrimitiveType::Null),
            ),
            // Dangling ids cannot be produced through the document API
            None => TypeAnnotation::Primitive(PrimitiveType::Null),
        }
    }
}

/// Own fields of a container: object keys, or array indices as strings
fn fields(node: &JsonNode) -> Vec<(Cow<'_, str>, NodeId)> {
    match node {
        JsonNode::Object(fields) => fields
            .iter()
            .map(|(key, id)| (Cow::Borrowed(key.as_str()), *id))
            .collect(),
        JsonNode::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, id)| (Cow::Owned(i.to_string()), *id))
            .collect(),
        _ => Vec::new(),
    }
}

/// Type name of a primitive node; `None` for containers
pub fn primitive_type(node: &JsonNode) -> Option<PrimitiveType> {
    match node {
        JsonNode::Null => Some(PrimitiveType::Null),
        JsonNode::Bool(_) => Some(PrimitiveType::Boolean),
        JsonNode::Number(_) => Some(PrimitiveType::Number),
        JsonNode::String(_) => Some(PrimitiveType::String),
        JsonNode::Array(_) | JsonNode::Object(_) => None,
    }
}
