//! Incremental reveal of large class lists
//!
//! The visible count starts at a threshold and only ever grows, one step at
//! a time, up to the number of classes. Already shown classes are never
//! hidden again.

/// How many classes of a schema are currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    total: usize,
    visible: usize,
    step: usize,
}

impl Viewport {
    /// Show up to `initial` of `total` classes; `step` more per reveal
    pub fn new(total: usize, initial: usize, step: usize) -> Self {
        Self {
            total,
            visible: initial.min(total),
            step: step.max(1),
        }
    }

    /// Show everything at once
    pub fn all(total: usize) -> Self {
        Self::new(total, total, 1)
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn hidden_count(&self) -> usize {
        self.total - self.visible
    }

    /// True while a "show more" step would reveal something
    pub fn has_more(&self) -> bool {
        self.visible < self.total
    }

    /// Reveal one more step; returns how many classes became visible
    pub fn show_more(&mut self) -> usize {
        let before = self.visible;
        self.visible = self.visible.saturating_add(self.step).min(self.total);
        self.visible - before
    }
}
