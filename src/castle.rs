//! Top-level controller for one castle board.
//!
//! Owns the placement store, the drag controller, the resolved geometry and
//! the host capabilities. Views forward raw events here and draw whatever
//! `scene()` returns.

use crate::board::Board;
use crate::constants::DEFAULT_REFERENCE_WIDTH;
use crate::debounce::ResizeDebouncer;
use crate::geometry::{
    CellMeasure, Geometry, GeometryInput, resolve, sanitize_reference_width,
};
use crate::input::{
    DragController, DragHost, DragOutcome, DragSource, EventDisposition, PointerEvent,
    PointerPhase,
};
use crate::perf::{GestureStats, measure};
use crate::reference::reference_width_or_default;
use crate::scene::Scene;
use crate::settings::Settings;
use crate::template::TemplateSet;
use crate::types::{Orientation, Size};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of dispatching one pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerResponse {
    pub disposition: EventDisposition,
    /// Set when the event ended a drag
    pub outcome: Option<DragOutcome>,
}

pub struct Castle<H: DragHost> {
    host: H,
    board: Board,
    drag: DragController,
    input: GeometryInput,
    geometry: Geometry,
    templates: TemplateSet,
    resize: ResizeDebouncer,
    settings: Settings,
    show_help: bool,
    stats: GestureStats,
}

impl<H: DragHost> Castle<H> {
    /// Build a castle for `viewport`. First-run help is shown when the
    /// settings say it has not been seen yet; the flag is then set in memory.
    pub fn new(host: H, viewport: Size, header_height: f32, mut settings: Settings) -> Self {
        let input = GeometryInput::new(viewport, header_height, DEFAULT_REFERENCE_WIDTH);
        let geometry = resolve(&input);
        let templates = TemplateSet::from_geometry(&geometry);

        let show_help = !settings.help_shown;
        settings.help_shown = true;

        Self {
            host,
            board: Board::new(),
            drag: DragController::new(settings.drag_config()),
            input,
            geometry,
            templates,
            resize: ResizeDebouncer::new(settings.resize_debounce()),
            settings,
            show_help,
            stats: GestureStats::new(),
        }
    }

    /// Like `new`, with settings read from `settings_path`. When the help
    /// overlay is shown for the first time the flag is written back.
    pub fn open(host: H, viewport: Size, header_height: f32, settings_path: &Path) -> Self {
        let settings = Settings::load_or_default(settings_path);
        let first_run = !settings.help_shown;
        let castle = Self::new(host, viewport, header_height, settings);
        if first_run {
            if let Err(e) = castle.settings.save_to(settings_path) {
                warn!(error = %e, "could not persist help flag");
            }
        }
        castle
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &GestureStats {
        &self.stats
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    pub fn scene(&self) -> Scene {
        Scene::build(
            &self.board,
            &self.templates,
            self.drag.state(),
            &self.geometry,
            self.show_help,
        )
    }

    // ------------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------------

    /// Dispatch one pointer event from the view.
    pub fn pointer(&mut self, event: PointerEvent) -> PointerResponse {
        let (response, elapsed_ms) = measure(|| self.dispatch(&event));
        let name = match event.phase {
            PointerPhase::Down => "pointer_down",
            PointerPhase::Move => "pointer_move",
            PointerPhase::Up => "pointer_up",
            PointerPhase::Cancel => "pointer_cancel",
        };
        self.stats.record(name, elapsed_ms);
        response
    }

    fn dispatch(&mut self, event: &PointerEvent) -> PointerResponse {
        if event.phase != PointerPhase::Down {
            let (disposition, outcome) =
                self.drag.handle(event, &mut self.board, self.geometry.cell_size, &mut self.host);
            return PointerResponse {
                disposition,
                outcome,
            };
        }

        // Placed entities draw above the sidebars, so they win the hit test
        let hit = self
            .board
            .entity_at(event.position)
            .and_then(|id| self.board.get(id))
            .map(|entity| (DragSource::Placed(entity.id), entity.position))
            .or_else(|| {
                self.templates
                    .template_at(event.position)
                    .map(|t| (DragSource::Template(t.kind), t.anchor))
            });

        let Some((source, origin)) = hit else {
            return PointerResponse::default();
        };
        PointerResponse {
            disposition: self.drag.begin(event, source, origin, &mut self.host),
            outcome: None,
        }
    }

    /// Abort the active drag (Escape, focus loss).
    pub fn cancel_drag(&mut self) -> Option<DragOutcome> {
        self.drag.cancel(&mut self.board, &mut self.host)
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// Queue a raw resize. The geometry is recomputed by `tick` once the
    /// burst settles.
    pub fn resize(&mut self, viewport: Size, now: Instant) {
        self.resize.push(viewport, now);
    }

    /// Apply a settled resize. Returns true when the geometry changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(viewport) = self.resize.tick(now) else {
            return false;
        };
        self.input.window = viewport;
        self.recompute()
    }

    /// Use the natural width of a freshly loaded reference illustration.
    pub fn set_reference_width(&mut self, width: f32) -> bool {
        self.input.reference_width = sanitize_reference_width(width);
        self.recompute()
    }

    /// Probe the reference illustration at `path` and use its natural
    /// width. Unreadable images fall back to the default width.
    pub fn load_reference(&mut self, path: &Path) -> bool {
        self.set_reference_width(reference_width_or_default(path))
    }

    pub fn set_header_height(&mut self, header_height: f32) -> bool {
        self.input.header_height = header_height;
        self.recompute()
    }

    /// Override the derived cell size with one measured by the view.
    pub fn set_measured_cell(&mut self, cell: Option<f32>) -> bool {
        self.input.measured_cell = cell;
        self.recompute()
    }

    /// Derive the cell size from the width the view drew the castle
    /// illustration at. A non-positive width drops back to the derived size.
    pub fn set_rendered_castle_width(&mut self, rendered_width: f32) -> bool {
        let cell = (rendered_width.is_finite() && rendered_width > 0.0)
            .then(|| CellMeasure::from_rendered_width(rendered_width));
        self.set_measured_cell(cell)
    }

    fn recompute(&mut self) -> bool {
        let (geometry, elapsed_ms) = measure(|| resolve(&self.input));
        self.stats.record("geometry", elapsed_ms);
        if geometry == self.geometry {
            return false;
        }
        self.geometry = geometry;
        self.templates = TemplateSet::from_geometry(&geometry);
        debug!(
            width = geometry.container_width,
            height = geometry.container_height,
            cell = geometry.cell_size,
            "geometry recomputed"
        );
        true
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    pub fn toggle_orientation(&mut self) -> Orientation {
        self.cancel_drag();
        self.board.toggle_orientation()
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_drag();
        self.board.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_drag();
        self.board.redo()
    }

    pub fn toggle_help(&mut self) -> bool {
        self.show_help = !self.show_help;
        self.show_help
    }

    /// Take new tunables from a reloaded settings file. The help flag is
    /// kept as it is in memory.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.drag.set_config(settings.drag_config());
        self.resize.set_delay(settings.resize_debounce());
        self.settings = Settings {
            help_shown: self.settings.help_shown,
            ..settings
        };
        info!(
            trash_buffer = self.settings.trash_buffer,
            eager_move = self.settings.eager_move,
            "settings applied"
        );
    }
}
