//! Text rendering of inferred class diagrams

mod layout;
mod renderer;
mod viewport;

pub use layout::{ClassLayoutAlgorithm, ClassLayoutResult, PositionedClass, PositionedConnector};
pub use renderer::ClassDiagramRenderer;
pub use viewport::Viewport;
