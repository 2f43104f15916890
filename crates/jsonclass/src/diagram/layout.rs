//! Class diagram layout
//!
//! Classes are placed row-major in a grid with a fixed number of columns.
//! Every cell has the same size (widest and tallest visible box), so the
//! horizontal and vertical pitch is constant across the diagram.
//!
//! Connectors run through the free space between cells:
//!
//! ```text
//!   channel 0      ─────────────   (above row 0)
//!   row 0          [A]  [B]  [C]
//!   channel 1      ─────────────   (between rows 0 and 1)
//!   row 1          [D]  [E]
//!   channel 2      ─────────────   (below the last row)
//! ```
//!
//! plus a vertical gutter left of every column. A connector leaves the
//! bottom of its source box, takes a lane in the channel below the source
//! row and, unless the target sits in the next row, climbs or descends
//! through a lane in the gutter left of the target column to the channel
//! above the target row. It enters the target from the top. Gaps widen to
//! fit however many lanes the connectors need.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, info, span, Level};
use unicode_width::UnicodeWidthStr;

use crate::core::{DiagramError, RenderConfig};
use crate::inference::{ClassDescriptor, ClassSchema};

/// Class box with its position and the text rows it shows
#[derive(Debug, Clone)]
pub struct PositionedClass {
    pub name: String,
    pub properties: Vec<String>,
    pub column: usize,
    pub row: usize,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PositionedClass {
    /// Column where connectors attach (bottom for outgoing, top for incoming)
    pub fn anchor_x(&self) -> usize {
        self.x + self.width / 2
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }
}

/// Routed connector for one edge
#[derive(Debug, Clone)]
pub struct PositionedConnector {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Orthogonal waypoints; the last one carries the arrow marker
    pub points: Vec<(usize, usize)>,
}

/// Layout result containing all positioned elements
#[derive(Debug)]
pub struct ClassLayoutResult {
    pub classes: Vec<PositionedClass>,
    pub connectors: Vec<PositionedConnector>,
    /// Edges whose source or target is hidden or was never emitted
    pub skipped_edges: usize,
    pub width: usize,
    pub height: usize,
}

/// Lanes one connector occupies
#[derive(Debug, Clone, Copy)]
struct Route {
    edge: usize,
    source: usize,
    target: usize,
    /// Lane in the channel below the source row, when the path detours
    below_source: Option<usize>,
    /// Lane in the gutter left of the target column, when the path detours
    gutter: Option<usize>,
    /// Lane in the channel above the target row
    above_target: usize,
}

/// Grid layout for inferred class diagrams
pub struct ClassLayoutAlgorithm {
    config: RenderConfig,
    box_padding: usize,
}

impl ClassLayoutAlgorithm {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            box_padding: 1,
        }
    }

    /// Size of the box for one class: name row, separator, property rows
    fn class_dimensions(&self, name: &str, properties: &[String]) -> (usize, usize) {
        let max_width = properties
            .iter()
            .map(|p| UnicodeWidthStr::width(p.as_str()))
            .chain(std::iter::once(UnicodeWidthStr::width(name)))
            .max()
            .unwrap_or(0);

        let width = max_width + self.box_padding * 2 + 2;
        let mut height = 3;
        if !properties.is_empty() {
            height += 1 + properties.len();
        }
        (width, height)
    }

    /// Lay out the first `visible` classes of `schema` and route their edges
    pub fn layout(&self, schema: &ClassSchema, visible: usize) -> Result<ClassLayoutResult> {
        let layout_span = span!(Level::INFO, "layout_classes", visible);
        let _enter = layout_span.enter();

        let columns = self.config.columns;
        if columns == 0 {
            return Err(
                DiagramError::layout_error("grid needs at least one column".to_string()).into(),
            );
        }

        let shown: &[ClassDescriptor] = &schema.classes[..visible.min(schema.classes.len())];
        if shown.is_empty() {
            return Ok(ClassLayoutResult {
                classes: Vec::new(),
                connectors: Vec::new(),
                skipped_edges: schema.edge_count(),
                width: 0,
                height: 0,
            });
        }

        let mut classes: Vec<PositionedClass> = shown
            .iter()
            .enumerate()
            .map(|(i, class)| {
                let properties = class.property_lines();
                let (width, height) = self.class_dimensions(&class.name, &properties);
                PositionedClass {
                    name: class.name.clone(),
                    properties,
                    column: i % columns,
                    row: i / columns,
                    x: 0,
                    y: 0,
                    width,
                    height,
                }
            })
            .collect();

        let rows = classes.len().div_ceil(columns);
        let used_columns = classes.len().min(columns);
        let cell_width = classes.iter().map(|c| c.width).max().unwrap_or(0);
        let cell_height = classes.iter().map(|c| c.height).max().unwrap_or(0);

        // First visible class with each name
        let mut by_name: HashMap<&str, usize> = HashMap::new();
        for (i, class) in classes.iter().enumerate() {
            by_name.entry(class.name.as_str()).or_insert(i);
        }

        // Assign lanes before positions: gap sizes depend on lane counts.
        // Connectors from one source share its outgoing lane, connectors into
        // one target share its gutter and incoming lanes, so they merge.
        let mut channel_lanes = vec![0usize; rows + 1];
        let mut gutter_lanes = vec![0usize; columns];
        let mut outgoing: HashMap<usize, usize> = HashMap::new();
        let mut incoming: HashMap<usize, usize> = HashMap::new();
        let mut gutters: HashMap<usize, usize> = HashMap::new();
        let mut routes = Vec::new();
        let mut skipped_edges = 0;

        for (edge_index, edge) in schema.edges().iter().enumerate() {
            let source = by_name.get(edge.source.as_str()).copied();
            let target = by_name.get(edge.target.as_str()).copied();
            let (Some(source), Some(target)) = (source, target) else {
                debug!(id = %edge.id, source = %edge.source, target = %edge.target, "Skipping edge without visible endpoints");
                skipped_edges += 1;
                continue;
            };

            let (s, t) = (&classes[source], &classes[target]);
            let above_target = *incoming
                .entry(target)
                .or_insert_with(|| take_lane(&mut channel_lanes[t.row]));

            let (below_source, gutter) = if t.row == s.row + 1 {
                (None, None)
            } else {
                let below = *outgoing
                    .entry(source)
                    .or_insert_with(|| take_lane(&mut channel_lanes[s.row + 1]));
                let gutter = *gutters
                    .entry(target)
                    .or_insert_with(|| take_lane(&mut gutter_lanes[t.column]));
                (Some(below), Some(gutter))
            };

            routes.push(Route {
                edge: edge_index,
                source,
                target,
                below_source,
                gutter,
                above_target,
            });
        }

        let max_channel = channel_lanes.iter().copied().max().unwrap_or(0);
        let max_gutter = gutter_lanes.iter().copied().max().unwrap_or(0);
        // One free row for the arrow marker, one free column beside each box
        let row_gap = self.config.row_gap.max(max_channel + 1);
        let column_gap = self.config.column_gap.max(max_gutter + 2);
        let column_pitch = cell_width + column_gap;
        let row_pitch = cell_height + row_gap;

        for class in &mut classes {
            class.x = column_gap + class.column * column_pitch;
            class.y = row_gap + class.row * row_pitch;
        }

        let channel_top = |channel: usize| channel * row_pitch;
        let gutter_left = |column: usize| column * column_pitch;

        let connectors: Vec<PositionedConnector> = routes
            .iter()
            .map(|route| {
                let edge = &schema.edges()[route.edge];
                let s = &classes[route.source];
                let t = &classes[route.target];
                let lane_above_target = channel_top(t.row) + route.above_target;

                let mut points = vec![(s.anchor_x(), s.bottom())];
                if let (Some(below), Some(gutter)) = (route.below_source, route.gutter) {
                    let lane_y = channel_top(s.row + 1) + below;
                    let lane_x = gutter_left(t.column) + 1 + gutter;
                    points.push((s.anchor_x(), lane_y));
                    points.push((lane_x, lane_y));
                    points.push((lane_x, lane_above_target));
                } else {
                    points.push((s.anchor_x(), lane_above_target));
                }
                points.push((t.anchor_x(), lane_above_target));
                points.push((t.anchor_x(), t.y - 1));

                PositionedConnector {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    points,
                }
            })
            .collect();

        let width = column_gap + used_columns * column_pitch;
        let height = rows * row_pitch + row_gap;

        info!(
            classes = classes.len(),
            connectors = connectors.len(),
            skipped_edges,
            width,
            height,
            "Layout completed"
        );

        Ok(ClassLayoutResult {
            classes,
            connectors,
            skipped_edges,
            width,
            height,
        })
    }
}

impl Default for ClassLayoutAlgorithm {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn take_lane(counter: &mut usize) -> usize {
    let lane = *counter;
    *counter += 1;
    lane
}
