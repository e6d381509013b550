//! Source templates - the non-deletable factories in the sidebars.
//!
//! There is one template per cache colour and one for the mask. Dragging a
//! template never moves it: the drag shows a ghost that spawns a new entity
//! on release, and the template is redrawn at its anchor.

use crate::geometry::Geometry;
use crate::types::{Bounds, CacheColor, EntityContent, Orientation, Point, Size};
use serde::Serialize;

/// Which factory a template produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TemplateKind {
    Cache(CacheColor),
    Mask,
}

impl TemplateKind {
    /// All templates in sidebar order: the palette, then the mask.
    pub fn all() -> impl Iterator<Item = TemplateKind> {
        CacheColor::ALL
            .into_iter()
            .map(TemplateKind::Cache)
            .chain(std::iter::once(TemplateKind::Mask))
    }

    /// Content of the entity spawned from this template. Masks take the
    /// board's current orientation.
    pub fn content(self, orientation: Orientation) -> EntityContent {
        match self {
            Self::Cache(color) => EntityContent::Cache { color },
            Self::Mask => EntityContent::Mask { orientation },
        }
    }

    /// Stable key for views.
    pub fn key(self) -> String {
        match self {
            Self::Cache(color) => {
                format!("template-cache-{}", color.hex().trim_start_matches('#'))
            }
            Self::Mask => "template-mask".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SourceTemplate {
    pub kind: TemplateKind,
    /// Top-left of the resting position
    pub anchor: Point,
    /// Edge length
    pub size: f32,
}

impl SourceTemplate {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.anchor, Size::square(self.size))
    }
}

/// The six templates laid out for one geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TemplateSet {
    templates: Vec<SourceTemplate>,
}

impl TemplateSet {
    /// Lay out templates from the geometry's anchors. Called again after
    /// every debounced resize.
    pub fn from_geometry(geometry: &Geometry) -> Self {
        let anchors = geometry.template_anchors();
        let templates = TemplateKind::all()
            .map(|kind| match kind {
                TemplateKind::Cache(color) => SourceTemplate {
                    kind,
                    anchor: anchors.cache(color),
                    size: geometry.cell_size,
                },
                TemplateKind::Mask => SourceTemplate {
                    kind,
                    anchor: anchors.mask,
                    size: geometry.mask_size,
                },
            })
            .collect();
        Self { templates }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceTemplate> {
        self.templates.iter()
    }

    pub fn get(&self, kind: TemplateKind) -> Option<&SourceTemplate> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    /// Template under the point, if any.
    pub fn template_at(&self, p: Point) -> Option<&SourceTemplate> {
        self.templates.iter().find(|t| t.bounds().contains(p))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
