//! jsonclass - Infer class diagrams from arbitrary JSON
//!
//! Every JSON object (and every array, treated as an object keyed by index)
//! becomes a class. Property types are annotated from the values found, and
//! properties that point at another class turn into directed edges.
//!
//! # Quick Start
//!
//! ```rust
//! use jsonclass::infer_from_str;
//!
//! let schema = infer_from_str(r#"{"user": {"name": "Ann", "age": 30}}"#).unwrap();
//! assert_eq!(schema.classes[0].name, "Root");
//! assert_eq!(schema.classes[1].property_lines(), vec!["name: string", "age: number"]);
//! assert_eq!(schema.edges()[0].id, "e-Root-User");
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use jsonclass::prelude::*;
//! use serde_json::json;
//!
//! let value = json!([{"id": 1}]);
//! let config = InferenceConfig::classes_only().with_root_name("Payload");
//! let schema = SchemaInferrer::new(config).infer_value(&value);
//! assert_eq!(schema.classes[0].name, "Payload");
//! assert!(schema.edges.is_none());
//!
//! let renderer = ClassDiagramRenderer::new(RenderConfig::new(CharacterSet::Ascii));
//! let text = renderer.render_schema(&schema).unwrap();
//! assert!(text.contains("Payload"));
//! ```

pub mod core;
pub mod diagram;
pub mod inference;
pub mod ingest;

pub use crate::core::*;

use serde_json::Value;

use crate::diagram::ClassDiagramRenderer;
use crate::inference::{ClassSchema, SchemaInferrer};
use crate::ingest::TextCollector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CharacterSet, DiagramError, EdgeIdPolicy, InferenceConfig, RenderConfig, RootNaming,
    };
    pub use crate::diagram::{ClassDiagramRenderer, ClassLayoutAlgorithm, Viewport};
    pub use crate::inference::{
        ClassDescriptor, ClassExtractor, ClassSchema, Edge, JsonDocument, NameAllocator,
        PropertyDescriptor, RelationshipResolver, SchemaInferrer, TypeAnnotation, VisitedGuard,
    };
    pub use crate::ingest::{FileLoader, TextCollector};
}

/// Infer the class list only, without edges
///
/// # Example
/// ```rust
/// use jsonclass::infer_classes;
/// use serde_json::json;
///
/// let schema = infer_classes(&json!({"tags": ["a", "b"]}));
/// assert_eq!(schema.classes[0].property_lines(), vec!["tags: string[]"]);
/// assert!(schema.edges.is_none());
/// ```
pub fn infer_classes(value: &Value) -> ClassSchema {
    SchemaInferrer::new(InferenceConfig::classes_only()).infer_value(value)
}

/// Infer classes together with their relationship edges
pub fn infer_schema(value: &Value) -> ClassSchema {
    SchemaInferrer::default().infer_value(value)
}

/// Parse JSON text and infer classes with edges
///
/// Malformed text yields a [`DiagramError::Parse`] and no schema.
pub fn infer_from_str(input: &str) -> Result<ClassSchema, DiagramError> {
    let value = TextCollector::new().collect(input)?;
    Ok(infer_schema(&value))
}

/// Render JSON text as a class diagram with the default configuration
///
/// # Example
/// ```rust
/// use jsonclass::render;
///
/// let text = render(r#"{"owner": {"login": "octo"}}"#).unwrap();
/// assert!(text.contains("Owner"));
/// assert!(text.contains("login: string"));
/// ```
pub fn render(input: &str) -> anyhow::Result<String> {
    let value = TextCollector::new().collect(input)?;
    render_with_config(&value, RenderConfig::default())
}

/// Render an already-parsed value with a specific configuration
pub fn render_with_config(value: &Value, config: RenderConfig) -> anyhow::Result<String> {
    let schema = infer_schema(value);
    ClassDiagramRenderer::new(config).render_schema(&schema)
}
