//! Inference over arena documents with shared nodes and cycles

use jsonclass::inference::{
    ClassExtractor, JsonDocument, JsonNode, SchemaInferrer, VisitedGuard,
};
use jsonclass::RootNaming;

/// root = { name: "n", self: root }
fn self_referencing() -> JsonDocument {
    let mut doc = JsonDocument::new(JsonNode::Object(Vec::new()));
    let root = doc.root();
    let name = doc.add_node(JsonNode::String("n".into())).unwrap();
    doc.insert_field(root, "name", name).unwrap();
    doc.insert_field(root, "self", root).unwrap();
    doc
}

#[test]
fn test_self_reference_terminates() {
    let schema = SchemaInferrer::default().infer(&self_referencing());

    assert_eq!(schema.class_count(), 1);
    assert_eq!(
        schema.classes[0].property_lines(),
        vec!["name: string", "self: Self"]
    );
    // The edge points at a class that is never emitted
    assert_eq!(schema.edges().len(), 1);
    assert_eq!(schema.edges()[0].target, "Self");
    assert!(schema.get_class("Self").is_none());
}

#[test]
fn test_mutual_cycle() {
    // root = { parent: p }, p = { child: root }
    let mut doc = JsonDocument::new(JsonNode::Object(Vec::new()));
    let root = doc.root();
    let parent = doc.add_node(JsonNode::Object(Vec::new())).unwrap();
    doc.insert_field(root, "parent", parent).unwrap();
    doc.insert_field(parent, "child", root).unwrap();

    let schema = SchemaInferrer::default().infer(&doc);
    let names: Vec<_> = schema.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Root", "Parent"]);
    assert_eq!(
        schema.get_class("Parent").unwrap().property_lines(),
        vec!["child: Child"]
    );
}

#[test]
fn test_cycle_through_array() {
    // root = { items: [root] }
    let mut doc = JsonDocument::new(JsonNode::Object(Vec::new()));
    let root = doc.root();
    let items = doc.add_node(JsonNode::Array(Vec::new())).unwrap();
    doc.push_element(items, root).unwrap();
    doc.insert_field(root, "items", items).unwrap();

    let schema = SchemaInferrer::default().infer(&doc);
    assert_eq!(schema.class_count(), 1);
    assert_eq!(schema.classes[0].property_lines(), vec!["items: Items[]"]);
}

#[test]
fn test_shared_node_emitted_once() {
    let mut doc = JsonDocument::new(JsonNode::Object(Vec::new()));
    let root = doc.root();
    let shared = doc.add_node(JsonNode::Object(Vec::new())).unwrap();
    let flag = doc.add_node(JsonNode::Bool(true)).unwrap();
    doc.insert_field(shared, "on", flag).unwrap();
    doc.insert_field(root, "first", shared).unwrap();
    doc.insert_field(root, "second", shared).unwrap();

    let schema = SchemaInferrer::default().infer(&doc);
    let names: Vec<_> = schema.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Root", "First"]);
    assert_eq!(
        schema.classes[0].property_lines(),
        vec!["first: First", "second: Second"]
    );
}

#[test]
fn test_guard_shared_between_calls() {
    let doc = self_referencing();
    let extractor = ClassExtractor::new(&doc);
    let mut guard = VisitedGuard::new();

    let first = extractor.extract(doc.root(), "Root", &mut guard);
    let second = extractor.extract(doc.root(), "Root", &mut guard);
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert!(guard.is_visited(doc.root()));
}

#[test]
fn test_fresh_guard_per_root_extraction() {
    let doc = self_referencing();
    let extractor = ClassExtractor::new(&doc);
    let first = extractor.extract_root(&RootNaming::ByShape);
    let second = extractor.extract_root(&RootNaming::ByShape);
    assert_eq!(first, second);
}
