//! Inference pipeline
//!
//! Wires the passes together: document → ClassExtractor → (optionally)
//! RelationshipResolver → [`ClassSchema`]. Each run builds its own guard, so
//! one inferrer can be shared across threads and reused freely.

use serde_json::Value;
use tracing::{info, span, Level};

use super::document::JsonDocument;
use super::extractor::ClassExtractor;
use super::relationships::RelationshipResolver;
use super::schema::ClassSchema;
use crate::core::InferenceConfig;

/// Runs schema inference with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    config: InferenceConfig,
}

impl SchemaInferrer {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infer from an already-parsed value
    pub fn infer_value(&self, value: &Value) -> ClassSchema {
        self.infer(&JsonDocument::from_value(value))
    }

    /// Infer from an arena document (which may contain shared nodes or cycles)
    pub fn infer(&self, document: &JsonDocument) -> ClassSchema {
        let infer_span = span!(
            Level::INFO,
            "infer_schema",
            nodes = document.len(),
            with_edges = self.config.include_edges
        );
        let _enter = infer_span.enter();

        let classes = ClassExtractor::new(document).extract_root(&self.config.root_naming);

        let schema = if self.config.include_edges {
            let edges = RelationshipResolver::with_id_policy(self.config.edge_ids)
                .resolve_edges(&classes);
            ClassSchema::with_edges(classes, edges)
        } else {
            ClassSchema::classes_only(classes)
        };

        info!(
            classes = schema.class_count(),
            edges = schema.edge_count(),
            "Inference completed"
        );
        schema
    }
}
