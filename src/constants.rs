//! Application-wide constants.
//!
//! Centralizes magic numbers and layout values so geometry, drag handling and
//! settings defaults agree with each other.

// ============================================================================
// Reference Illustration
// ============================================================================

/// Fallback natural width when the reference image reports nothing usable
pub const DEFAULT_REFERENCE_WIDTH: f32 = 867.0;

/// Height/width ratio of the castle illustration
pub const CASTLE_ASPECT_RATIO: f32 = 65.03 / 86.7;

/// Natural width of the full-size castle artwork
pub const CASTLE_ARTWORK_WIDTH: f32 = 1024.0;

/// Edge of one numbered window in the full-size artwork
pub const CASTLE_WINDOW_SIZE: f32 = 52.0;

// ============================================================================
// Layout Constants
// ============================================================================

/// Vertical margin kept free below the header
pub const VERTICAL_MARGIN: f32 = 40.0;

/// Share of the viewport width the castle may use in portrait
pub const PORTRAIT_WIDTH_FRACTION: f32 = 0.9;

/// Share of the viewport width the castle may use in landscape
pub const LANDSCAPE_WIDTH_FRACTION: f32 = 0.6;

/// Viewports narrower than this are treated as mobile
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Lower bound for the derived cell size
pub const MIN_CELL_SIZE: f32 = 15.0;

/// Cell size divisor applied to the castle width when nothing was measured
pub const CELL_WIDTH_DIVISOR: f32 = 20.0;

/// Cells covered by a mask along each axis
pub const MASK_CELLS: f32 = 3.0;

/// Minimum height of the template row above the castle (portrait mobile)
pub const MIN_TOP_ROW_HEIGHT: f32 = 80.0;

/// Minimum height of the template row below the castle (portrait mobile)
pub const MIN_BOTTOM_ROW_HEIGHT: f32 = 100.0;

/// Padding added around a template inside its row (portrait mobile)
pub const ROW_PADDING: f32 = 20.0;

/// Minimum gap between stacked cache templates
pub const MIN_TEMPLATE_SPACING: f32 = 5.0;

/// Gap between cache templates as a fraction of the cell size
pub const TEMPLATE_SPACING_FRACTION: f32 = 0.1;

// ============================================================================
// Input Handling
// ============================================================================

/// Extra pixels added on every side of the trash when testing drops
pub const TRASH_BUFFER: f32 = 40.0;

// ============================================================================
// Timing
// ============================================================================

/// Quiet period before a burst of resize events triggers a recompute
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Upper bound for a configured resize quiet period
pub const MAX_RESIZE_DEBOUNCE_MS: u64 = 5_000;

/// Quiet period before a settings file change is reported
pub const SETTINGS_RELOAD_DEBOUNCE_MS: u64 = 250;
