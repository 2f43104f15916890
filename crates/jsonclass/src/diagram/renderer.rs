//! Class diagram renderer
//!
//! Draws laid-out class boxes and their connectors onto a [`TextCanvas`].

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};
use unicode_width::UnicodeWidthStr;

use super::layout::{ClassLayoutAlgorithm, ClassLayoutResult, PositionedClass};
use super::viewport::Viewport;
use crate::core::{BoxChars, ConnectorRouter, DiagramError, RenderConfig, Rule, TextCanvas};
use crate::inference::ClassSchema;

/// Renders a [`ClassSchema`] as a text diagram
pub struct ClassDiagramRenderer {
    config: RenderConfig,
}

impl ClassDiagramRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Viewport for `schema` using the configured reveal threshold and step
    pub fn viewport_for(&self, schema: &ClassSchema) -> Viewport {
        Viewport::new(
            schema.class_count(),
            self.config.initial_visible,
            self.config.reveal_step,
        )
    }

    /// Draw a class box on the canvas
    fn draw_class(&self, canvas: &mut TextCanvas, class: &PositionedClass, chars: &BoxChars) {
        let (x, w) = (class.x, class.width);
        let mut y = class.y;

        canvas.draw_rule(x, y, w, chars.ends(Rule::Top), chars.horizontal);
        y += 1;

        let padding = (w - 2).saturating_sub(UnicodeWidthStr::width(class.name.as_str())) / 2;
        canvas.draw_framed(x, y, w, chars.vertical, 1 + padding, &class.name);
        y += 1;

        if !class.properties.is_empty() {
            canvas.draw_rule(x, y, w, chars.ends(Rule::Separator), chars.horizontal);
            y += 1;

            for property in &class.properties {
                canvas.draw_framed(x, y, w, chars.vertical, 2, property);
                y += 1;
            }
        }

        canvas.draw_rule(x, y, w, chars.ends(Rule::Bottom), chars.horizontal);
    }

    /// Render a finished layout
    pub fn render_layout(&self, layout: &ClassLayoutResult) -> Result<String> {
        if layout.classes.is_empty() {
            return Ok(String::new());
        }

        let chars = BoxChars::rectangle(self.config.style);
        let mut canvas = TextCanvas::new(layout.width + 1, layout.height + 1);

        for class in &layout.classes {
            self.draw_class(&mut canvas, class, &chars);
        }

        let mut router = ConnectorRouter::new(self.config.style);
        for connector in &layout.connectors {
            debug!(id = %connector.id, points = connector.points.len(), "Routing connector");
            router.add_path(&connector.points);
        }
        router.draw(&mut canvas);

        // Mark where connectors leave their source boxes
        for connector in &layout.connectors {
            if let Some(&(x, y)) = connector.points.first() {
                canvas.set_char(x, y - 1, chars.t_down);
            }
        }

        Ok(canvas.to_string())
    }

    /// Render the classes the viewport currently shows
    ///
    /// Edges pointing at hidden classes are left out. When classes are
    /// hidden, a footer line reports how many are shown.
    pub fn render(&self, schema: &ClassSchema, viewport: &Viewport) -> Result<String> {
        let render_span = span!(
            Level::INFO,
            "render_diagram",
            visible = viewport.visible_count(),
            total = viewport.total()
        );
        let _enter = render_span.enter();

        if viewport.total() != schema.class_count() {
            return Err(DiagramError::render_error(format!(
                "viewport covers {} classes but the schema has {}",
                viewport.total(),
                schema.class_count()
            ))
            .into());
        }

        let layout = ClassLayoutAlgorithm::new(self.config)
            .layout(schema, viewport.visible_count())?;
        if layout.skipped_edges > 0 {
            warn!(
                skipped = layout.skipped_edges,
                "Edges without visible endpoints were not drawn"
            );
        }

        let mut output = self.render_layout(&layout)?;
        if viewport.has_more() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&format!(
                "... showing {} of {} classes",
                viewport.visible_count(),
                viewport.total()
            ));
        }

        info!(output_len = output.len(), "Render completed");
        Ok(output)
    }

    /// Render with the configured initial threshold
    pub fn render_schema(&self, schema: &ClassSchema) -> Result<String> {
        self.render(schema, &self.viewport_for(schema))
    }
}

impl Default for ClassDiagramRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CharacterSet;
    use crate::inference::SchemaInferrer;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> ClassSchema {
        SchemaInferrer::default().infer_value(&value)
    }

    #[test]
    fn test_render_empty() {
        let renderer = ClassDiagramRenderer::default();
        let result = renderer.render_schema(&ClassSchema::default()).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_render_single_class() {
        let renderer = ClassDiagramRenderer::default();
        let result = renderer.render_schema(&schema(json!({"id": 1}))).unwrap();

        let expected = "\
┌────────────┐
│    Root    │
├────────────┤
│ id: number │
└────────────┘";
        assert_eq!(result, expected);
    }

    #[test]
    fn test_render_class_without_properties() {
        let renderer = ClassDiagramRenderer::default();
        let result = renderer.render_schema(&schema(json!({}))).unwrap();
        assert_eq!(result, "┌──────┐\n│ Root │\n└──────┘");
    }

    #[test]
    fn test_render_ascii_style() {
        let renderer = ClassDiagramRenderer::new(RenderConfig::new(CharacterSet::Ascii));
        let result = renderer
            .render_schema(&schema(json!({"user": {"name": "x"}})))
            .unwrap();

        assert!(result.is_ascii());
        assert!(result.contains("Root"));
        assert!(result.contains("User"));
        assert!(result.contains("name: string"));
        assert!(result.contains('v'));
    }

    #[test]
    fn test_render_connector_between_rows() {
        let config = RenderConfig::default().with_columns(1);
        let renderer = ClassDiagramRenderer::new(config);
        let result = renderer
            .render_schema(&schema(json!({"user": {"id": 1}})))
            .unwrap();

        let lines: Vec<&str> = result.lines().collect();
        let arrow_row = lines.iter().position(|l| l.contains('▼')).unwrap();
        assert!(lines[arrow_row + 1].contains('┌'));
        assert!(result.contains('┬'));
        assert!(result.contains("user: User"));
    }

    #[test]
    fn test_render_same_row_connector() {
        let renderer = ClassDiagramRenderer::default();
        let result = renderer.render_schema(&schema(json!({"a": {}}))).unwrap();
        assert_eq!(result.matches('▼').count(), 1);
        assert!(result.contains('╰'));
        assert!(result.contains('╮'));
    }

    #[test]
    fn test_footer_when_classes_hidden() {
        let config = RenderConfig::default().with_initial_visible(2);
        let renderer = ClassDiagramRenderer::new(config);
        let result = renderer
            .render_schema(&schema(json!({"a": {}, "b": {}, "c": {}})))
            .unwrap();

        assert!(result.ends_with("... showing 2 of 4 classes"));
        assert!(result.contains("Root"));
        assert!(result.contains("│ A │"));
        assert!(!result.contains("│ C │"));
    }

    #[test]
    fn test_show_more_reveals_classes() {
        let config = RenderConfig::default()
            .with_initial_visible(1)
            .with_reveal_step(10);
        let renderer = ClassDiagramRenderer::new(config);
        let schema = schema(json!({"a": {}, "b": {}}));

        let mut viewport = renderer.viewport_for(&schema);
        let before = renderer.render(&schema, &viewport).unwrap();
        assert!(before.contains("showing 1 of 3"));

        viewport.show_more();
        let after = renderer.render(&schema, &viewport).unwrap();
        assert!(!after.contains("showing"));
        assert!(after.contains("│ B │"));
    }

    #[test]
    fn test_viewport_must_match_schema() {
        let renderer = ClassDiagramRenderer::default();
        let schema = schema(json!({"a": {}}));
        let err = renderer.render(&schema, &Viewport::all(5)).unwrap_err();
        assert!(err.to_string().contains("Render error"));
    }

    #[test]
    fn test_render_wide_characters() {
        let renderer = ClassDiagramRenderer::default();
        let result = renderer.render_schema(&schema(json!({"名前": "x"}))).unwrap();
        let widths: Vec<usize> = result
            .lines()
            .map(UnicodeWidthStr::width)
            .collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}
