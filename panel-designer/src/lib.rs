//! # Panel Designer
//!
//! Headless host for the panel layout designer.
//!
//! Loads an optional layout document, replays a script of editor actions
//! against it and writes the resulting layout document.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p panel-designer -- --input layout.json --script edits.json
//! ```
//!
//! A script is a JSON array of actions:
//!
//! ```json
//! [
//!   { "action": "addPanel", "shape": "square" },
//!   { "action": "resizePanel", "panel": 0, "width": 500, "height": 400, "handle": "e" },
//!   { "action": "undo" }
//! ]
//! ```
//!
//! `addPanel` actions without a `container` are placed in the configured
//! container size.
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `DesignerConfig` - Input/output paths, container size and history depth
//! - `run` - Import, replay and export in one pass

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use panel_core::config::CONFIG_FILE_NAME;
use panel_core::{Action, CanvasError, ContainerSize, Editor, EditorConfig, Outcome};
use thiserror::Error;

/// Default container width used to place new panels.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 1280.0;

/// Default container height used to place new panels.
pub const DEFAULT_CONTAINER_HEIGHT: f64 = 720.0;

/// Command-line arguments for panel-designer.
#[derive(Debug, Clone, Parser)]
#[command(name = "panel-designer")]
#[command(about = "Replay panel layout edits and export the result")]
#[command(version)]
pub struct CliArgs {
    /// Layout document to start from (empty canvas if omitted)
    #[arg(long, env = "PANEL_INPUT")]
    pub input: Option<PathBuf>,

    /// JSON array of editor actions to replay
    #[arg(long, env = "PANEL_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Where to write the resulting layout document
    #[arg(long, env = "PANEL_OUTPUT", default_value = CONFIG_FILE_NAME)]
    pub output: PathBuf,

    /// Container width used to center new panels
    #[arg(long, env = "PANEL_CONTAINER_WIDTH", default_value_t = DEFAULT_CONTAINER_WIDTH)]
    pub container_width: f64,

    /// Container height used to center new panels
    #[arg(long, env = "PANEL_CONTAINER_HEIGHT", default_value_t = DEFAULT_CONTAINER_HEIGHT)]
    pub container_height: f64,

    /// Maximum undo steps kept (0 keeps everything)
    #[arg(long, env = "PANEL_HISTORY_DEPTH", default_value_t = 0)]
    pub history_depth: usize,
}

/// Designer run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerConfig {
    /// Layout document to start from.
    pub input: Option<PathBuf>,
    /// Action script to replay.
    pub script: Option<PathBuf>,
    /// Output document path.
    pub output: PathBuf,
    /// Container new panels are centered in.
    pub container: ContainerSize,
    /// Undo depth bound; `None` keeps everything.
    pub history_depth: Option<usize>,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignerConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: None,
            script: None,
            output: PathBuf::from(CONFIG_FILE_NAME),
            container: ContainerSize::new(DEFAULT_CONTAINER_WIDTH, DEFAULT_CONTAINER_HEIGHT),
            history_depth: None,
        }
    }

    /// Editor options for this run.
    #[must_use]
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history_depth: self.history_depth,
            ..EditorConfig::default()
        }
    }
}

impl From<CliArgs> for DesignerConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            input: args.input,
            script: args.script,
            output: args.output,
            container: ContainerSize::new(args.container_width, args.container_height),
            history_depth: (args.history_depth > 0).then_some(args.history_depth),
        }
    }
}

/// Errors from a designer run.
#[derive(Debug, Error)]
pub enum DesignerError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The script is not a JSON array of actions.
    #[error("Invalid action script: {0}")]
    Script(#[source] serde_json::Error),

    /// An action in the script failed.
    #[error("Action {index} failed: {source}")]
    Action {
        /// Zero-based position in the script.
        index: usize,
        /// Editor error.
        #[source]
        source: CanvasError,
    },

    /// Importing or exporting the layout failed.
    #[error(transparent)]
    Layout(#[from] CanvasError),
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Actions that changed something.
    pub applied: usize,
    /// Actions that were no-ops.
    pub ignored: usize,
    /// Panels in the exported layout.
    pub panels: usize,
    /// Undo steps available at the end of the run.
    pub undo_depth: usize,
}

/// Parse an action script.
///
/// # Errors
///
/// Returns [`DesignerError::Script`] if the text is not a JSON array of
/// actions.
pub fn parse_script(text: &str) -> Result<Vec<Action>, DesignerError> {
    serde_json::from_str(text).map_err(DesignerError::Script)
}

/// Apply `actions` in order, placing container-less panels in `container`.
///
/// Stops at the first failing action.
///
/// # Errors
///
/// Returns [`DesignerError::Action`] with the position of the failing action.
pub fn replay(
    editor: &mut Editor,
    actions: Vec<Action>,
    container: ContainerSize,
    summary: &mut RunSummary,
) -> Result<(), DesignerError> {
    for (index, action) in actions.into_iter().enumerate() {
        let action = match action {
            Action::AddPanel {
                shape,
                container: None,
            } => Action::AddPanel {
                shape,
                container: Some(container),
            },
            other => other,
        };
        let outcome = editor
            .dispatch(action)
            .map_err(|source| DesignerError::Action { index, source })?;
        if outcome == Outcome::Ignored {
            tracing::debug!("Action {index} had no effect");
            summary.ignored += 1;
        } else {
            summary.applied += 1;
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, DesignerError> {
    fs::read_to_string(path).map_err(|source| DesignerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Import, replay and export according to `config`.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, the input document
/// or script is malformed, or an action fails. The output file is only
/// written when every step succeeds.
pub fn run(config: &DesignerConfig) -> Result<RunSummary, DesignerError> {
    let mut editor = Editor::new(config.editor_config());
    let mut summary = RunSummary::default();

    if let Some(ref input) = config.input {
        tracing::info!("Importing layout from {}", input.display());
        editor.import_config(&read(input)?)?;
    }

    if let Some(ref script) = config.script {
        let actions = parse_script(&read(script)?)?;
        tracing::info!("Replaying {} actions from {}", actions.len(), script.display());
        replay(&mut editor, actions, config.container, &mut summary)?;
    }

    let text = editor.export_config()?;
    fs::write(&config.output, text).map_err(|source| DesignerError::Io {
        path: config.output.clone(),
        source,
    })?;

    summary.panels = editor.panels().len();
    summary.undo_depth = editor.history().undo_depth();
    tracing::info!(
        "Wrote {} panels to {}",
        summary.panels,
        config.output.display()
    );
    Ok(summary)
}
