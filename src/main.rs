//! `castle-replay` - drive a castle from a JSON gesture script.
//!
//! ```text
//! castle-replay script.json
//! ```
//!
//! The script names a viewport, an optional trash rectangle and a list of
//! steps. Each step is a pointer event or a command. The final board is
//! printed as JSON on stdout.

use anyhow::{Context, Result, bail};
use number_castle::castle::Castle;
use number_castle::history::HistorySnapshot;
use number_castle::input::{DragOutcome, HeadlessHost, PointerEvent};
use number_castle::settings::Settings;
use number_castle::types::{Bounds, Size};
use number_castle::CastleError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Script {
    viewport: Size,
    #[serde(default)]
    header_height: f32,
    #[serde(default)]
    reference_width: Option<f32>,
    /// Probed for its natural width when no explicit width is given
    #[serde(default)]
    reference_image: Option<PathBuf>,
    #[serde(default)]
    trash: Option<Bounds>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    Pointer(PointerEvent),
    Undo,
    Redo,
    ToggleOrientation,
    Cancel,
    /// Resize and let the debounce settle
    Resize(Size),
}

#[derive(Debug, Serialize)]
struct Report {
    outcomes: Vec<DragOutcome>,
    history_index: isize,
    history_len: usize,
    board: HistorySnapshot,
}

/// Initialise logging. `RUST_LOG` overrides the level only when debug
/// logging is enabled in the settings.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_script(path: &Path) -> Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let script: Script = serde_json::from_str(&content)
        .with_context(|| format!("parsing script {}", path.display()))?;
    if script.viewport.width <= 0.0 || script.viewport.height <= 0.0 {
        return Err(CastleError::InvalidScript("viewport must be positive".into()).into());
    }
    Ok(script)
}

fn run(script: Script, settings: Settings) -> Report {
    let host = match script.trash {
        Some(trash) => HeadlessHost::with_trash(trash),
        None => HeadlessHost::new(),
    };
    let settings = Settings {
        help_shown: true,
        ..settings
    };
    let mut castle = Castle::new(host, script.viewport, script.header_height, settings);
    match (script.reference_width, &script.reference_image) {
        (Some(width), _) => {
            castle.set_reference_width(width);
        }
        (None, Some(path)) => {
            castle.load_reference(path);
        }
        (None, None) => {}
    }

    let mut outcomes = Vec::new();
    for (index, step) in script.steps.into_iter().enumerate() {
        match step {
            Step::Pointer(event) => {
                let response = castle.pointer(event);
                if let Some(outcome) = response.outcome {
                    info!(step = index, ?outcome, "drag finished");
                    outcomes.push(outcome);
                }
            }
            Step::Undo => {
                castle.undo();
            }
            Step::Redo => {
                castle.redo();
            }
            Step::ToggleOrientation => {
                let orientation = castle.toggle_orientation();
                info!(step = index, orientation = orientation.label(), "orientation toggled");
            }
            Step::Cancel => {
                if let Some(outcome) = castle.cancel_drag() {
                    outcomes.push(outcome);
                }
            }
            Step::Resize(viewport) => {
                let now = Instant::now();
                castle.resize(viewport, now);
                if let Some(settled) = now.checked_add(castle.settings().resize_debounce()) {
                    castle.tick(settled);
                }
            }
        }
    }

    castle.stats().log_summary();
    let board = castle.board();
    Report {
        outcomes,
        history_index: board.current_history_index(),
        history_len: board.history_len(),
        board: board.snapshot(),
    }
}

fn main() -> Result<()> {
    let settings = Settings::load();
    init_logging(settings.debug_logging);

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: castle-replay <script.json>");
    };

    let script = load_script(&path)?;
    info!(steps = script.steps.len(), "replaying {}", path.display());

    let report = run(script, settings);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
