//! Core error types for schema inference and diagram output
//!
//! Inference itself is total: every JSON value yields a (possibly degenerate)
//! class list. Errors only arise at the edges of the pipeline, when raw text
//! is ingested, when a document is assembled by hand, or when a diagram is
//! laid out and rendered.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised around the inference pipeline
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Failed to parse JSON: {message} at line {line}, column {column}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document error: {message}")]
    Document { message: String },

    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("Render error: {message}")]
    Render { message: String },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::Parse {
            message,
            line,
            column,
        }
    }

    /// Create a new I/O error tied to the path that failed
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new document error
    pub fn document_error(message: String) -> Self {
        Self::Document { message }
    }

    /// Create a new layout error
    pub fn layout_error(message: String) -> Self {
        Self::Layout { message }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::Render { message }
    }

    /// Returns true for failures caused by malformed JSON text
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<serde_json::Error> for DiagramError {
    fn from(err: serde_json::Error) -> Self {
        let line = err.line();
        let column = err.column();
        // serde_json appends its own " at line X column Y"; keep only the reason
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        Self::parse_error(message, line, column)
    }
}
