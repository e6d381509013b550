//! Geometry resolver - derives every pixel size the board uses.
//!
//! Inputs are volatile (window size, header height, the natural width of the
//! reference illustration) and the output is recomputed from scratch on every
//! resize. Nothing here holds state.
//!
//! ## Layout
//!
//! ```text
//! Row (landscape or desktop):        Column (portrait mobile):
//! +------+-------------+------+      +---------------------+
//! |caches|   castle    | mask |      |  caches (top row)   |
//! |      |             |      |      +---------------------+
//! +------+-------------+------+      |       castle        |
//!                                    +---------------------+
//!                                    |  mask (bottom row)  |
//!                                    +---------------------+
//! ```

use crate::constants::{
    CASTLE_ARTWORK_WIDTH, CASTLE_ASPECT_RATIO, CASTLE_WINDOW_SIZE, CELL_WIDTH_DIVISOR,
    DEFAULT_REFERENCE_WIDTH, LANDSCAPE_WIDTH_FRACTION, MASK_CELLS, MIN_BOTTOM_ROW_HEIGHT,
    MIN_CELL_SIZE, MIN_TEMPLATE_SPACING, MIN_TOP_ROW_HEIGHT, MOBILE_BREAKPOINT,
    PORTRAIT_WIDTH_FRACTION, ROW_PADDING, TEMPLATE_SPACING_FRACTION, VERTICAL_MARGIN,
};
use crate::profile_scope;
use crate::types::{Bounds, CacheColor, Point, Size};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Raw inputs to the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryInput {
    /// Inner window size
    pub window: Size,
    /// Height of the header bar above the board
    pub header_height: f32,
    /// Natural pixel width of the loaded reference illustration
    pub reference_width: f32,
    /// Measured on-screen size of one grid cell, when the view knows it
    #[serde(default)]
    pub measured_cell: Option<f32>,
}

impl GeometryInput {
    pub fn new(window: Size, header_height: f32, reference_width: f32) -> Self {
        Self {
            window,
            header_height,
            reference_width,
            measured_cell: None,
        }
    }

    pub fn with_measured_cell(mut self, cell: f32) -> Self {
        self.measured_cell = Some(cell);
        self
    }
}

/// How the sidebars are arranged around the castle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum LayoutMode {
    /// Templates in columns left and right of the castle
    Row,
    /// Templates in rows above and below the castle
    Column {
        top_row: f32,
        bottom_row: f32,
        main_area: f32,
    },
}

/// Resolved pixel geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Geometry {
    pub window: Size,
    pub header_height: f32,
    /// Rendered castle width
    pub container_width: f32,
    /// Rendered castle height
    pub container_height: f32,
    pub cell_size: f32,
    /// Always `3 × cell_size`
    pub mask_size: f32,
    pub is_portrait: bool,
    pub is_mobile: bool,
    pub layout: LayoutMode,
}

/// Template slots on either side of the castle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sidebars {
    /// Holds the cache templates (left column or top row)
    pub caches: Bounds,
    /// Holds the mask template (right column or bottom row)
    pub mask: Bounds,
}

/// Top-left anchors of every source template.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TemplateAnchors {
    /// One anchor per palette entry, in `CacheColor::ALL` order
    pub caches: [Point; 5],
    pub mask: Point,
}

impl TemplateAnchors {
    pub fn cache(&self, color: CacheColor) -> Point {
        let index = CacheColor::ALL
            .iter()
            .position(|c| *c == color)
            .unwrap_or_default();
        self.caches[index]
    }
}

/// Cell size measurement helpers.
pub struct CellMeasure;

impl CellMeasure {
    /// On-screen size of one castle window when the artwork is drawn at
    /// `rendered_width` pixels.
    pub fn from_rendered_width(rendered_width: f32) -> f32 {
        CASTLE_WINDOW_SIZE * (rendered_width / CASTLE_ARTWORK_WIDTH)
    }
}

/// Substitute the default width for anything that is not a positive number.
pub fn sanitize_reference_width(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        warn!(
            reference_width = width,
            fallback = DEFAULT_REFERENCE_WIDTH,
            "invalid reference width, using default"
        );
        DEFAULT_REFERENCE_WIDTH
    }
}

/// Resolve the geometry for the given inputs.
pub fn resolve(input: &GeometryInput) -> Geometry {
    profile_scope!("geometry_resolve");

    let reference_width = sanitize_reference_width(input.reference_width);
    let window = input.window;
    let is_portrait = window.is_portrait();
    let is_mobile = window.width < MOBILE_BREAKPOINT;

    let max_height = window.height - input.header_height - VERTICAL_MARGIN;
    let max_width = if is_portrait {
        window.width * PORTRAIT_WIDTH_FRACTION
    } else {
        window.width * LANDSCAPE_WIDTH_FRACTION
    };

    let (width, height) = if is_portrait {
        let mut width = max_width.min(reference_width);
        let mut height = width * CASTLE_ASPECT_RATIO;
        if height > max_height {
            height = max_height;
            width = height / CASTLE_ASPECT_RATIO;
        }
        (width, height)
    } else {
        let mut height = max_height.min(reference_width * CASTLE_ASPECT_RATIO);
        let mut width = height / CASTLE_ASPECT_RATIO;
        if width > max_width {
            width = max_width;
            height = width * CASTLE_ASPECT_RATIO;
        }
        (width, height)
    };

    let cell_size = match input.measured_cell {
        Some(cell) if cell.is_finite() && cell > 0.0 => cell,
        _ => MIN_CELL_SIZE.max(width / CELL_WIDTH_DIVISOR),
    };
    let mask_size = cell_size * MASK_CELLS;

    let layout = if is_portrait && is_mobile {
        let main_height = window.height - input.header_height;
        let top_row = MIN_TOP_ROW_HEIGHT.max(cell_size + ROW_PADDING);
        let bottom_row = MIN_BOTTOM_ROW_HEIGHT.max(mask_size + ROW_PADDING);
        LayoutMode::Column {
            top_row,
            bottom_row,
            main_area: main_height - top_row - bottom_row,
        }
    } else {
        LayoutMode::Row
    };

    Geometry {
        window,
        header_height: input.header_height,
        container_width: width,
        container_height: height,
        cell_size,
        mask_size,
        is_portrait,
        is_mobile,
        layout,
    }
}

impl Geometry {
    /// Height available below the header.
    pub fn main_height(&self) -> f32 {
        self.window.height - self.header_height
    }

    /// Where the castle is drawn, centred in its area.
    pub fn castle_bounds(&self) -> Bounds {
        let x = (self.window.width - self.container_width) / 2.0;
        let y = match self.layout {
            LayoutMode::Row => {
                self.header_height + (self.main_height() - self.container_height) / 2.0
            }
            LayoutMode::Column { top_row, main_area, .. } => {
                self.header_height + top_row + (main_area - self.container_height) / 2.0
            }
        };
        Bounds::from_ltwh(x, y, self.container_width, self.container_height)
    }

    /// The two template slots for the current layout.
    pub fn sidebars(&self) -> Sidebars {
        match self.layout {
            LayoutMode::Row => {
                let castle = self.castle_bounds();
                let main_height = self.main_height();
                Sidebars {
                    caches: Bounds::from_ltwh(0.0, self.header_height, castle.left(), main_height),
                    mask: Bounds::from_ltwh(
                        castle.right(),
                        self.header_height,
                        self.window.width - castle.right(),
                        main_height,
                    ),
                }
            }
            LayoutMode::Column {
                top_row,
                bottom_row,
                main_area,
            } => Sidebars {
                caches: Bounds::from_ltwh(0.0, self.header_height, self.window.width, top_row),
                mask: Bounds::from_ltwh(
                    0.0,
                    self.header_height + top_row + main_area,
                    self.window.width,
                    bottom_row,
                ),
            },
        }
    }

    /// Gap between neighbouring cache templates.
    pub fn template_spacing(&self) -> f32 {
        MIN_TEMPLATE_SPACING.max((self.cell_size * TEMPLATE_SPACING_FRACTION).round())
    }

    /// Anchors of the five cache templates and the mask template.
    pub fn template_anchors(&self) -> TemplateAnchors {
        let sidebars = self.sidebars();
        let cell = self.cell_size;
        let spacing = self.template_spacing();
        let count = CacheColor::ALL.len() as f32;
        let total = (cell + spacing) * count - spacing;

        let mut caches = [Point::ZERO; 5];
        let column = sidebars.caches;
        if matches!(self.layout, LayoutMode::Column { .. }) {
            let start_x = column.left() + (column.size.width - total) / 2.0;
            let center_y = column.top() + (column.size.height - cell) / 2.0;
            for (index, anchor) in caches.iter_mut().enumerate() {
                *anchor = Point::new(start_x + index as f32 * (cell + spacing), center_y);
            }
        } else {
            let start_y = column.top() + (column.size.height - total) / 2.0;
            let center_x = column.left() + (column.size.width - cell) / 2.0;
            for (index, anchor) in caches.iter_mut().enumerate() {
                *anchor = Point::new(center_x, start_y + index as f32 * (cell + spacing));
            }
        }

        let slot = sidebars.mask;
        let mask = Point::new(
            slot.left() + (slot.size.width - self.mask_size) / 2.0,
            slot.top() + (slot.size.height - self.mask_size) / 2.0,
        );

        TemplateAnchors { caches, mask }
    }
}
