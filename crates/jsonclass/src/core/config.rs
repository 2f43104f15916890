//! Configuration for inference and rendering
//!
//! Both configs are plain values with builder-style setters. The CLI maps
//! its flags onto them; library callers usually start from `Default`.

use super::CharacterSet;

/// Class name used for an object (or primitive) root
pub const ROOT_NAME: &str = "Root";

/// Class name used for an array root
pub const ROOT_ARRAY_NAME: &str = "RootArray";

/// How the top-level descriptor is named
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RootNaming {
    /// `Root` for objects and primitives, `RootArray` for arrays
    #[default]
    ByShape,
    /// One name regardless of the root's shape
    Fixed(String),
}

impl RootNaming {
    /// Pick the root class name for a value of the given shape
    pub fn name_for(&self, is_array: bool) -> &str {
        match self {
            RootNaming::ByShape if is_array => ROOT_ARRAY_NAME,
            RootNaming::ByShape => ROOT_NAME,
            RootNaming::Fixed(name) => name,
        }
    }
}

/// How edge identifiers are derived when a source/target pair repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EdgeIdPolicy {
    /// Every edge is `e-Source-Target`; repeated pairs share an id
    #[default]
    Shared,
    /// Repeats get `-2`, `-3`, ... appended so ids are unique
    Unique,
}

/// Settings for one inference run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub root_naming: RootNaming,
    pub edge_ids: EdgeIdPolicy,
    /// Run the relationship pass (classes-with-edges mode)
    pub include_edges: bool,
}

impl InferenceConfig {
    pub fn new() -> Self {
        Self {
            root_naming: RootNaming::default(),
            edge_ids: EdgeIdPolicy::default(),
            include_edges: true,
        }
    }

    /// Classes-only mode: skip the relationship pass
    pub fn classes_only() -> Self {
        Self::new().with_edges(false)
    }

    pub fn with_root_naming(mut self, root_naming: RootNaming) -> Self {
        self.root_naming = root_naming;
        self
    }

    pub fn with_root_name(self, name: impl Into<String>) -> Self {
        self.with_root_naming(RootNaming::Fixed(name.into()))
    }

    pub fn with_edge_ids(mut self, edge_ids: EdgeIdPolicy) -> Self {
        self.edge_ids = edge_ids;
        self
    }

    pub fn with_edges(mut self, include_edges: bool) -> Self {
        self.include_edges = include_edges;
        self
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for the ASCII class diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub style: CharacterSet,
    /// Classes per grid row before wrapping
    pub columns: usize,
    /// Minimum blank columns between boxes
    pub column_gap: usize,
    /// Minimum blank rows between box rows
    pub row_gap: usize,
    /// Classes shown before any "show more" step
    pub initial_visible: usize,
    /// Classes added by each "show more" step
    pub reveal_step: usize,
}

impl RenderConfig {
    pub fn new(style: CharacterSet) -> Self {
        Self {
            style,
            columns: 5,
            column_gap: 4,
            row_gap: 2,
            initial_visible: 100,
            reveal_step: 100,
        }
    }

    pub fn with_style(mut self, style: CharacterSet) -> Self {
        self.style = style;
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_initial_visible(mut self, initial_visible: usize) -> Self {
        self.initial_visible = initial_visible;
        self
    }

    pub fn with_reveal_step(mut self, reveal_step: usize) -> Self {
        self.reveal_step = reveal_step;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(CharacterSet::default())
    }
}
