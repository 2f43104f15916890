//! Diagram rendering tests through the public API

use jsonclass::diagram::{ClassDiagramRenderer, ClassLayoutAlgorithm, Viewport};
use jsonclass::{infer_schema, CharacterSet, RenderConfig};
use serde_json::{json, Map, Value};

fn wide_object(count: usize) -> Value {
    let map: Map<String, Value> = (0..count)
        .map(|i| (format!("k{i}"), json!({"v": i})))
        .collect();
    Value::Object(map)
}

#[test]
fn test_every_visible_class_is_drawn() {
    let schema = infer_schema(&json!({"user": {"id": 1}, "order": {"total": 2.5}}));
    let output = ClassDiagramRenderer::default().render_schema(&schema).unwrap();

    for name in ["Root", "User", "Order"] {
        assert!(output.contains(name), "missing {name}");
    }
    assert!(output.contains("total: number"));
    assert_eq!(output.matches('▼').count(), 2);
}

#[test]
fn test_default_threshold_is_one_hundred() {
    let schema = infer_schema(&wide_object(150));
    assert_eq!(schema.class_count(), 151);

    let renderer = ClassDiagramRenderer::default();
    let mut viewport = renderer.viewport_for(&schema);
    assert_eq!(viewport.visible_count(), 100);

    let output = renderer.render(&schema, &viewport).unwrap();
    assert!(output.ends_with("... showing 100 of 151 classes"));

    assert_eq!(viewport.show_more(), 51);
    let output = renderer.render(&schema, &viewport).unwrap();
    assert!(!output.contains("... showing"));
}

#[test]
fn test_hidden_targets_count_as_skipped() {
    let schema = infer_schema(&wide_object(10));
    let layout = ClassLayoutAlgorithm::new(RenderConfig::default())
        .layout(&schema, 4)
        .unwrap();
    assert_eq!(layout.classes.len(), 4);
    assert_eq!(layout.connectors.len(), 3);
    assert_eq!(layout.skipped_edges, 7);
}

#[test]
fn test_grid_columns() {
    let schema = infer_schema(&wide_object(5));
    let layout = ClassLayoutAlgorithm::new(RenderConfig::default().with_columns(2))
        .layout(&schema, 100)
        .unwrap();
    let rows: Vec<_> = layout.classes.iter().map(|c| c.row).collect();
    assert_eq!(rows, vec![0, 0, 1, 1, 2, 2]);
}

#[test]
fn test_ascii_output_is_pure_ascii() {
    let schema = infer_schema(&wide_object(7));
    let renderer = ClassDiagramRenderer::new(RenderConfig::new(CharacterSet::Ascii));
    let output = renderer.render_schema(&schema).unwrap();
    assert!(output.is_ascii());
    // Seven "v: number" rows plus one arrow head per target
    assert_eq!(output.matches('v').count(), 14);
}

#[test]
fn test_duplicate_class_names_resolve_to_first() {
    let schema = infer_schema(&json!({"user": {"id": 1}, "team": {"user": {"e": "x"}}}));
    let layout = ClassLayoutAlgorithm::default().layout(&schema, 100).unwrap();
    let first_user = layout.classes.iter().find(|c| c.name == "User").unwrap();
    let last_points: Vec<_> = layout
        .connectors
        .iter()
        .filter(|c| c.target == "User")
        .map(|c| *c.points.last().unwrap())
        .collect();
    assert_eq!(last_points.len(), 2);
    for point in last_points {
        assert_eq!(point, (first_user.anchor_x(), first_user.y - 1));
    }
}

#[test]
fn test_viewport_all() {
    let schema = infer_schema(&wide_object(3));
    let output = ClassDiagramRenderer::default()
        .render(&schema, &Viewport::all(schema.class_count()))
        .unwrap();
    assert!(!output.contains("showing"));
}
