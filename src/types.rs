//! Core types for the number castle board.
//!
//! This module defines the fundamental data structures shared by the store,
//! the history, the drag controller and the published scene: pixel geometry
//! primitives, placed entities and their content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// ============================================================================
// Geometry Primitives
// ============================================================================

/// A point in viewport pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Shorthand constructor, reads like `point(px, px)` call sites in view code.
#[inline]
pub const fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A square of the given edge.
    #[inline]
    pub const fn square(edge: f32) -> Self {
        Self::new(edge, edge)
    }

    /// Portrait when taller than wide.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

/// An axis-aligned rectangle (top-left origin).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(Point::new(left, top), Size::new(width, height))
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Inclusive containment test, edges count as inside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Grow the rectangle by `amount` on all four sides.
    pub fn expanded(&self, amount: f32) -> Self {
        Self::from_ltwh(
            self.left() - amount,
            self.top() - amount,
            self.size.width + amount * 2.0,
            self.size.height + amount * 2.0,
        )
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Opaque identifier of a placed entity, unique for the lifetime of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag of a placed entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Cache,
    Mask,
}

/// The fixed palette of cache tiles, in sidebar order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheColor {
    Brick,
    Amber,
    Orange,
    Blue,
    Cyan,
}

impl CacheColor {
    pub const ALL: [CacheColor; 5] = [
        CacheColor::Brick,
        CacheColor::Amber,
        CacheColor::Orange,
        CacheColor::Blue,
        CacheColor::Cyan,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            CacheColor::Brick => "#B33514",
            CacheColor::Amber => "#FF9117",
            CacheColor::Orange => "#FF5700",
            CacheColor::Blue => "#0079B3",
            CacheColor::Cyan => "#00FFEA",
        }
    }

    /// Parse a `#RRGGBB` string (case-insensitive) back into a palette entry.
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(hex.trim()))
    }
}

/// Numbering direction of the castle grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Grid reads 0 → 99.
    Ascending,
    /// Grid reads 99 → 0.
    #[default]
    Descending,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Ascending => Orientation::Descending,
            Orientation::Descending => Orientation::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Orientation::Ascending => "0-99",
            Orientation::Descending => "99-0",
        }
    }

    /// Reference illustration drawn for this numbering direction.
    pub fn castle_asset(self) -> &'static str {
        match self {
            Orientation::Ascending => "chateau-inverse.png",
            Orientation::Descending => "chateau.png",
        }
    }
}

/// The 3×3 labels painted on a mask, row-major, `None` for blank cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MaskLabels(pub [[Option<&'static str>; 3]; 3]);

impl MaskLabels {
    pub fn for_orientation(orientation: Orientation) -> Self {
        let (above, below) = match orientation {
            Orientation::Ascending => ("+10", "-10"),
            Orientation::Descending => ("-10", "+10"),
        };
        Self([
            [None, Some(above), None],
            [Some("-1"), None, Some("+1")],
            [None, Some(below), None],
        ])
    }

    pub fn above(&self) -> &'static str {
        self.0[0][1].unwrap_or_default()
    }

    pub fn below(&self) -> &'static str {
        self.0[2][1].unwrap_or_default()
    }
}

/// What a placed entity shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityContent {
    Cache { color: CacheColor },
    Mask { orientation: Orientation },
}

impl EntityContent {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityContent::Cache { .. } => EntityKind::Cache,
            EntityContent::Mask { .. } => EntityKind::Mask,
        }
    }

    /// Edge of the entity for a given grid cell size.
    pub fn edge_for_cell(&self, cell_size: f32) -> f32 {
        match self {
            EntityContent::Cache { .. } => cell_size,
            EntityContent::Mask { .. } => cell_size * 3.0,
        }
    }
}

/// A cache or mask dropped onto the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedEntity {
    pub id: EntityId,
    pub content: EntityContent,
    pub position: Point,
    /// Edge length in pixels (entities are square).
    pub size: f32,
}

impl PlacedEntity {
    pub fn kind(&self) -> EntityKind {
        self.content.kind()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, Size::square(self.size))
    }

    pub fn color(&self) -> Option<CacheColor> {
        match self.content {
            EntityContent::Cache { color } => Some(color),
            EntityContent::Mask { .. } => None,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        match self.content {
            EntityContent::Mask { orientation } => Some(orientation),
            EntityContent::Cache { .. } => None,
        }
    }

    pub fn mask_labels(&self) -> Option<MaskLabels> {
        self.orientation().map(MaskLabels::for_orientation)
    }
}
