//! Relationship derivation
//!
//! A second pass over extracted classes: every property whose annotation
//! names a class (an identifier starting with an upper-case ASCII letter,
//! optionally followed by `[]`) yields one directed edge from the owning
//! class to that name. Nothing is deduplicated and targets are not checked
//! against the class list, so dangling references produce edges too.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, span, Level};

use super::schema::{ClassDescriptor, Edge};
use crate::core::EdgeIdPolicy;

static CLASS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Za-z0-9_]*)(\[\])?$").expect("class reference pattern is valid")
});

/// Derives edges from property annotations
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipResolver {
    id_policy: EdgeIdPolicy,
}

impl RelationshipResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_policy(id_policy: EdgeIdPolicy) -> Self {
        Self { id_policy }
    }

    /// One edge per class-referencing property, in class then property order
    pub fn resolve_edges(&self, classes: &[ClassDescriptor]) -> Vec<Edge> {
        let resolve_span = span!(Level::INFO, "resolve_edges", class_count = classes.len());
        let _enter = resolve_span.enter();

        let mut edges = Vec::new();
        let mut seen_ids: HashMap<String, usize> = HashMap::new();

        for class in classes {
            for property in &class.properties {
                let annotation = property.type_annotation();
                let Some(target) = referenced_class(&annotation) else {
                    continue;
                };

                let mut edge = Edge::new(class.name.as_str(), target);
                if self.id_policy == EdgeIdPolicy::Unique {
                    let count = seen_ids.entry(edge.id.clone()).or_insert(0);
                    *count += 1;
                    if *count > 1 {
                        let id = format!("{}-{}", edge.id, count);
                        edge = edge.with_id(id);
                    }
                }

                debug!(id = %edge.id, source = %edge.source, target = %edge.target, "Derived edge");
                edges.push(edge);
            }
        }

        info!(edge_count = edges.len(), "Relationship resolution completed");
        edges
    }
}

/// Class name referenced by an annotation string, if it names one
pub fn referenced_class(annotation: &str) -> Option<&str> {
    CLASS_REFERENCE
        .captures(annotation)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
