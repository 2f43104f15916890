//! Schema inference from unannotated JSON
//!
//! The pieces, leaves first:
//!
//! - [`NameAllocator`] turns a property key into a class name
//! - [`VisitedGuard`] remembers which container nodes were already processed
//! - [`ClassExtractor`] walks a [`JsonDocument`] and emits [`ClassDescriptor`]s
//! - [`RelationshipResolver`] derives [`Edge`]s from property annotations
//! - [`SchemaInferrer`] runs the passes for one [`InferenceConfig`](crate::core::InferenceConfig)

mod document;
mod extractor;
mod guard;
mod naming;
mod pipeline;
mod relationships;
mod schema;

pub use document::{JsonDocument, JsonNode, NodeId};
pub use extractor::{primitive_type, ClassExtractor};
pub use guard::VisitedGuard;
pub use naming::{capitalize, NameAllocator};
pub use pipeline::SchemaInferrer;
pub use relationships::{referenced_class, RelationshipResolver};
pub use schema::{
    ClassDescriptor, ClassSchema, Edge, PrimitiveType, PropertyDescriptor, TypeAnnotation,
};
