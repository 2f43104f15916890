//! Turning raw text into JSON values
//!
//! Both collectors share one contract: on success they hand back the parsed
//! value for inference, on failure they return a [`DiagramError`] whose
//! message is fit to show the user, and nothing downstream runs.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, error, span, Level};

use crate::core::DiagramError;

/// Parses JSON pasted or piped in as text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCollector;

impl TextCollector {
    pub fn new() -> Self {
        Self
    }

    pub fn collect(&self, text: &str) -> Result<Value, DiagramError> {
        let collect_span = span!(Level::DEBUG, "collect_text", input_len = text.len());
        let _enter = collect_span.enter();

        match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                debug!("Parsed JSON text");
                Ok(value)
            }
            Err(e) => {
                let err = DiagramError::from(e);
                error!(error = %err, "Rejected JSON text");
                Err(err)
            }
        }
    }
}

/// Reads a file and parses its content as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader {
    text: TextCollector,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Value, DiagramError> {
        let path = path.as_ref();
        let load_span = span!(Level::DEBUG, "load_file", path = %path.display());
        let _enter = load_span.enter();

        let content =
            fs::read_to_string(path).map_err(|e| DiagramError::io_error(path, e))?;
        debug!(bytes = content.len(), "Read input file");
        self.text.collect(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_collect_valid_text() {
        let value = TextCollector::new().collect(r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(value, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_collect_accepts_bare_primitives() {
        assert_eq!(TextCollector::new().collect("null").unwrap(), Value::Null);
        assert_eq!(TextCollector::new().collect(" 7 ").unwrap(), json!(7));
    }

    #[test]
    fn test_collect_invalid_text_reports_position() {
        let err = TextCollector::new().collect("{\"a\": tru}").unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_collect_empty_text_fails() {
        assert!(TextCollector::new().collect("").is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, r#"{"user": {"id": 1}}"#).unwrap();

        let value = FileLoader::new().load(&path).unwrap();
        assert_eq!(value, json!({"user": {"id": 1}}));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = FileLoader::new().load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DiagramError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[1, 2,").unwrap();
        assert!(FileLoader::new().load(&path).unwrap_err().is_parse_error());
    }
}
