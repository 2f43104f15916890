//! Command-line interface for the jsonclass utility
//!
//! Reads a JSON document, infers its classes and either prints them as JSON
//! or draws them as a text class diagram.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::colorizer::colorize_output;
use jsonclass::core::logging::init_logging;
use jsonclass::diagram::ClassDiagramRenderer;
use jsonclass::inference::{ClassSchema, SchemaInferrer};
use jsonclass::ingest::TextCollector;
use jsonclass::{CharacterSet, EdgeIdPolicy, InferenceConfig, RenderConfig};

/// jsonclass - Infer class diagrams from JSON documents
#[derive(Parser)]
#[command(name = "jsonclass")]
#[command(about = "Infer classes and their relationships from arbitrary JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the inferred classes as JSON (no relationships)
    Classes {
        /// Input JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name for the root class instead of Root/RootArray
        #[arg(long)]
        root_name: Option<String>,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the inferred classes and relationship edges as JSON
    Schema {
        /// Input JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name for the root class instead of Root/RootArray
        #[arg(long)]
        root_name: Option<String>,

        /// Suffix repeated edge ids so every id is unique
        #[arg(long)]
        unique_edge_ids: bool,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Draw the inferred classes as a text class diagram
    Render {
        /// Input JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Character set to use for rendering output
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// Classes per grid row
        #[arg(long, default_value_t = 5)]
        columns: usize,

        /// Classes shown before any "show more" step
        #[arg(long, default_value_t = 100)]
        limit: usize,

        /// Number of "show more" steps to apply
        #[arg(long, default_value_t = 0)]
        more: usize,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Suffix repeated edge ids so every id is unique
        #[arg(long)]
        unique_edge_ids: bool,
    },
}

/// Supported output character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Options for the render command
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub style: StyleChoice,
    pub columns: usize,
    pub limit: usize,
    pub more: usize,
    pub color: ColorChoice,
    pub unique_edge_ids: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: StyleChoice::Unicode,
            columns: 5,
            limit: 100,
            more: 0,
            color: ColorChoice::Never,
            unique_edge_ids: false,
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct JsonClassApp {
    collector: TextCollector,
}

impl JsonClassApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var("JSONCLASS_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("JSONCLASS_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("jsonclass v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Classes {
                input,
                output,
                root_name,
                compact,
            } => {
                let config = Self::inference_config(false, root_name, false);
                self.json_command(input, output, config, compact, cli.verbose)
            }
            Commands::Schema {
                input,
                output,
                root_name,
                unique_edge_ids,
                compact,
            } => {
                let config = Self::inference_config(true, root_name, unique_edge_ids);
                self.json_command(input, output, config, compact, cli.verbose)
            }
            Commands::Render {
                input,
                output,
                style,
                columns,
                limit,
                more,
                color,
                unique_edge_ids,
            } => {
                let options = RenderOptions {
                    style,
                    columns,
                    limit,
                    more,
                    color,
                    unique_edge_ids,
                };
                self.render_command(input, output, options, cli.verbose)
            }
        }
    }

    fn inference_config(
        include_edges: bool,
        root_name: Option<String>,
        unique_edge_ids: bool,
    ) -> InferenceConfig {
        let mut config = InferenceConfig::new().with_edges(include_edges);
        if let Some(name) = root_name {
            config = config.with_root_name(name);
        }
        if unique_edge_ids {
            config = config.with_edge_ids(EdgeIdPolicy::Unique);
        }
        config
    }

    /// Parse the content and run inference; nothing is written on failure
    pub fn infer(&self, content: &str, config: InferenceConfig) -> Result<ClassSchema> {
        let value = self.collector.collect(content)?;
        Ok(SchemaInferrer::new(config).infer_value(&value))
    }

    /// Handle the classes and schema commands
    fn json_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        config: InferenceConfig,
        compact: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let schema = self.infer(&content, config)?;
        let json = Self::to_json(&schema, compact)?;

        if verbose {
            eprintln!(
                "Inferred {} classes and {} edges",
                schema.class_count(),
                schema.edge_count()
            );
        }
        self.write_output(output, &json)
    }

    fn to_json(schema: &ClassSchema, compact: bool) -> Result<String> {
        let json = if compact {
            serde_json::to_string(schema)?
        } else {
            serde_json::to_string_pretty(schema)?
        };
        Ok(json)
    }

    /// Infer and draw a diagram for `content`
    pub fn render_diagram(&self, content: &str, options: RenderOptions) -> Result<String> {
        let config = Self::inference_config(true, None, options.unique_edge_ids);
        let schema = self.infer(content, config)?;

        let render_config = RenderConfig::new(options.style.into())
            .with_columns(options.columns)
            .with_initial_visible(options.limit);
        let renderer = ClassDiagramRenderer::new(render_config);

        let mut viewport = renderer.viewport_for(&schema);
        for _ in 0..options.more {
            if viewport.show_more() == 0 {
                break;
            }
        }
        debug!(
            visible = viewport.visible_count(),
            total = viewport.total(),
            "Viewport ready"
        );

        renderer.render(&schema, &viewport)
    }

    /// Handle the render command
    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        options: RenderOptions,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let diagram = self.render_diagram(&content, options)?;
        info!(bytes = diagram.len(), "Diagram rendered");

        let final_output = if self.should_colorize(&output, options.color) {
            colorize_output(&diagram)
        } else {
            diagram
        };
        self.write_output(output, &final_output)
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&io::stdout()),
                    Some(p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
            _ => {
                let mut stdin = io::stdin();
                if crossterm::tty::IsTty::is_tty(&stdin) {
                    eprintln!("Reading JSON from stdin (end with Ctrl-D)");
                }
                let mut content = String::new();
                stdin.read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing_classes_command() {
        let args = vec![
            "jsonclass",
            "classes",
            "--input",
            "data.json",
            "--output",
            "out.json",
            "--root-name",
            "Payload",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Classes {
                input,
                output,
                root_name,
                compact,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "data.json");
                assert_eq!(output.unwrap().to_string_lossy(), "out.json");
                assert_eq!(root_name.as_deref(), Some("Payload"));
                assert!(!compact);
            }
            _ => panic!("Expected Classes command"),
        }
    }

    #[test]
    fn test_cli_parsing_schema_command() {
        let args = vec!["jsonclass", "schema", "--unique-edge-ids", "--compact"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Schema {
                input,
                unique_edge_ids,
                compact,
                ..
            } => {
                assert!(input.is_none());
                assert!(unique_edge_ids);
                assert!(compact);
            }
            _ => panic!("Expected Schema command"),
        }
    }

    #[test]
    fn test_cli_parsing_render_defaults() {
        let args = vec!["jsonclass", "render"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render {
                style,
                columns,
                limit,
                more,
                color,
                ..
            } => {
                assert_eq!(style, StyleChoice::Unicode);
                assert_eq!(columns, 5);
                assert_eq!(limit, 100);
                assert_eq!(more, 0);
                assert_eq!(color, ColorChoice::Auto);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = vec!["jsonclass", "render", "--verbose", "--log-level", "debug"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_unknown_style_rejected() {
        let args = vec!["jsonclass", "render", "--style", "fancy"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_infer_rejects_malformed_json() {
        let app = JsonClassApp::new();
        let err = app.infer("{\"a\": }", InferenceConfig::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_classes_json_has_no_edges_key() {
        let app = JsonClassApp::new();
        let schema = app
            .infer(r#"{"user": {"id": 1}}"#, InferenceConfig::classes_only())
            .unwrap();
        let json = JsonClassApp::to_json(&schema, true).unwrap();
        assert_eq!(
            json,
            r#"{"classes":[{"name":"Root","properties":["user: User"]},{"name":"User","properties":["id: number"]}]}"#
        );
    }

    #[test]
    fn test_schema_json_includes_edges() {
        let app = JsonClassApp::new();
        let schema = app
            .infer(r#"{"user": {"id": 1}}"#, InferenceConfig::new())
            .unwrap();
        let json = JsonClassApp::to_json(&schema, true).unwrap();
        assert!(json.ends_with(r#""edges":[{"id":"e-Root-User","source":"Root","target":"User"}]}"#));
    }

    #[test]
    fn test_render_diagram_with_limit_and_more() {
        let app = JsonClassApp::new();
        let content = r#"{"a": {}, "b": {}, "c": {}}"#;

        let limited = RenderOptions {
            limit: 1,
            ..RenderOptions::default()
        };
        let output = app.render_diagram(content, limited).unwrap();
        assert!(output.ends_with("... showing 1 of 4 classes"));

        let expanded = RenderOptions {
            limit: 1,
            more: 1,
            ..RenderOptions::default()
        };
        let output = app.render_diagram(content, expanded).unwrap();
        assert!(!output.contains("showing"));
    }

    #[test]
    fn test_render_diagram_ascii() {
        let app = JsonClassApp::new();
        let options = RenderOptions {
            style: StyleChoice::Ascii,
            ..RenderOptions::default()
        };
        let output = app.render_diagram(r#"{"id": "x"}"#, options).unwrap();
        assert!(output.is_ascii());
        assert!(output.contains("id: string"));
    }

    #[test]
    fn test_read_input_from_file() {
        let app = JsonClassApp::new();
        let input = r#"{"a": 1}"#;

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input.json");
        fs::write(&file_path, input).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, input);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = JsonClassApp::new();
        let dir = tempdir().unwrap();
        let err = app
            .read_input(Some(dir.path().join("missing.json")))
            .unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = JsonClassApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("output.txt");

        app.write_output(Some(file_path.clone()), "Test output").unwrap();

        let read_content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(read_content, "Test output");
    }

    #[test]
    fn test_failed_parse_leaves_output_untouched() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.json");
        let output = dir.path().join("out.json");
        fs::write(&input, "[1, 2").unwrap();
        fs::write(&output, "previous").unwrap();

        let cli = Cli::try_parse_from(vec![
            "jsonclass".to_string(),
            "schema".to_string(),
            "-i".to_string(),
            input.to_string_lossy().into_owned(),
            "-o".to_string(),
            output.to_string_lossy().into_owned(),
        ])
        .unwrap();

        assert!(JsonClassApp::new().run(cli).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_run_writes_schema_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        fs::write(&input, r#"[{"tag": "x"}]"#).unwrap();

        let cli = Cli::try_parse_from(vec![
            "jsonclass".to_string(),
            "classes".to_string(),
            "--compact".to_string(),
            "-i".to_string(),
            input.to_string_lossy().into_owned(),
            "-o".to_string(),
            output.to_string_lossy().into_owned(),
        ])
        .unwrap();

        JsonClassApp::new().run(cli).unwrap();
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with(r#"{"classes":[{"name":"RootArray","properties":["0: 0"]},{"name":"0","properties":["tag: string"]}]}"#));
    }
}
