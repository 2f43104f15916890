//! Core infrastructure shared by inference, ingestion and rendering
//!
//! Errors, logging and configuration live here, together with the drawing
//! primitives the diagram renderer builds on.

mod box_drawing;
mod canvas;
mod config;
mod edge_routing;
mod error;
pub mod logging;
mod types;

pub use box_drawing::*;
pub use canvas::*;
pub use config::*;
pub use edge_routing::*;
pub use error::*;
pub use logging::*;
pub use types::*;
