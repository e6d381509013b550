//! Render description published by the castle.
//!
//! Views are stateless: they draw a `Scene` and forward pointer events. The
//! scene carries everything needed to draw one frame, in paint order.

use crate::board::Board;
use crate::geometry::Geometry;
use crate::input::{DragSource, DragState};
use crate::template::{TemplateKind, TemplateSet};
use crate::types::{Bounds, EntityKind, MaskLabels, Orientation, PlacedEntity, Point};
use serde::Serialize;

/// One drawable tile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sprite {
    /// Stable across frames
    pub key: String,
    pub kind: EntityKind,
    /// True for sidebar factories
    pub template: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<MaskLabels>,
    pub position: Point,
    pub size: f32,
    pub dragging: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub geometry: Geometry,
    pub castle: Bounds,
    pub castle_asset: &'static str,
    pub orientation: Orientation,
    pub orientation_label: &'static str,
    pub can_undo: bool,
    pub can_redo: bool,
    pub show_help: bool,
    /// Templates, then placed entities in insertion order, then the dragged
    /// sprite on top
    pub sprites: Vec<Sprite>,
}

impl Scene {
    pub fn build(
        board: &Board,
        templates: &TemplateSet,
        drag: &DragState,
        geometry: &Geometry,
        show_help: bool,
    ) -> Self {
        let orientation = board.orientation();
        let dragged = drag.source();
        let drag_position = drag.current();

        let mut sprites = Vec::with_capacity(templates.len() + board.len());
        let mut on_top = None;

        for template in templates.iter() {
            let sprite =
                template_sprite(template.kind, template.anchor, template.size, orientation);
            match (dragged, drag_position) {
                (Some(DragSource::Template(kind)), Some(position)) if kind == template.kind => {
                    on_top = Some(Sprite {
                        position,
                        dragging: true,
                        ..sprite
                    });
                }
                _ => sprites.push(sprite),
            }
        }

        for entity in board.entities() {
            let sprite = entity_sprite(entity);
            match (dragged, drag_position) {
                (Some(DragSource::Placed(id)), Some(position)) if id == entity.id => {
                    on_top = Some(Sprite {
                        position,
                        dragging: true,
                        ..sprite
                    });
                }
                _ => sprites.push(sprite),
            }
        }

        sprites.extend(on_top);

        Self {
            geometry: *geometry,
            castle: geometry.castle_bounds(),
            castle_asset: orientation.castle_asset(),
            orientation,
            orientation_label: orientation.label(),
            can_undo: board.can_undo(),
            can_redo: board.can_redo(),
            show_help,
            sprites,
        }
    }

    pub fn dragged(&self) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.dragging)
    }

    pub fn sprite(&self, key: &str) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.key == key)
    }

    /// Sprites for placed entities only.
    pub fn placed(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(|s| !s.template)
    }
}

fn template_sprite(
    kind: TemplateKind,
    anchor: Point,
    size: f32,
    orientation: Orientation,
) -> Sprite {
    let (entity_kind, color, labels) = match kind {
        TemplateKind::Cache(color) => (EntityKind::Cache, Some(color.hex()), None),
        TemplateKind::Mask => (
            EntityKind::Mask,
            None,
            Some(MaskLabels::for_orientation(orientation)),
        ),
    };
    Sprite {
        key: kind.key(),
        kind: entity_kind,
        template: true,
        color,
        labels,
        position: anchor,
        size,
        dragging: false,
    }
}

fn entity_sprite(entity: &PlacedEntity) -> Sprite {
    Sprite {
        key: format!("entity-{}", entity.id.0),
        kind: entity.kind(),
        template: false,
        color: entity.color().map(|c| c.hex()),
        labels: entity.mask_labels(),
        position: entity.position,
        size: entity.size,
        dragging: false,
    }
}
