//! Session module - the mutable world for one level
//!
//! Ties the entity store to the shape lifecycle: InPack -> Active ->
//! {Placed | InPack}. Each operation is one atomic transition triggered by an
//! externally delivered event; the session never runs concurrently with
//! itself. Reads at the public boundary return cloned values so collaborators
//! cannot alias live state.

use log::debug;

use pentomino_types::{ComponentKind, EntityId, ShapeId};

use crate::component::{Component, Mouse, Placement, Position};
use crate::entity::Entity;
use crate::level::{build_store, LevelDef, LevelError};
use crate::matrix::Matrix;
use crate::shapes::library_matrix;
use crate::store::{EntityStore, StoreError};

/// Mutable world state for one level.
#[derive(Debug, Clone)]
pub struct GameSession {
    store: EntityStore,
    solved: bool,
}

impl GameSession {
    /// Load a level and build its entity set
    pub fn new(def: &LevelDef) -> Result<Self, LevelError> {
        Ok(Self {
            store: build_store(def)?,
            solved: false,
        })
    }

    /// True once every board cell is occupied.
    pub fn solved(&self) -> bool {
        self.solved
    }

    /// Direct read access for the placement engine.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    // ---- Read boundary (cloning, safe to hand to collaborators) ----

    pub fn get_entity(&self, id: EntityId) -> Option<Entity> {
        self.store.get(id).cloned()
    }

    pub fn query_entities(
        &self,
        include: &[ComponentKind],
        exclude: &[ComponentKind],
    ) -> Vec<Entity> {
        self.store
            .query(include, exclude)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The shape currently being dragged, if any.
    pub fn active_shape_id(&self) -> Option<ShapeId> {
        self.store
            .query(&[ComponentKind::Active], &[])
            .first()
            .and_then(|entity| match entity.id() {
                EntityId::Shape(shape) => Some(shape),
                EntityId::Board => None,
            })
    }

    // ---- Store write passthroughs (component-level intents) ----

    pub fn add_entity(&mut self, entity: Entity) -> Result<(), StoreError> {
        self.store.add_entity(entity)
    }

    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        self.store.remove_entity(id)
    }

    pub fn update_entity(
        &mut self,
        id: EntityId,
        components: impl IntoIterator<Item = Component>,
    ) -> Result<(), StoreError> {
        self.store.update_entity(id, components)
    }

    pub fn add_component(&mut self, id: EntityId, component: Component) -> Result<(), StoreError> {
        self.store.add_component(id, component)
    }

    pub fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> bool {
        self.store.remove_component(id, kind)
    }

    pub fn update_component(
        &mut self,
        id: EntityId,
        kind: ComponentKind,
        f: impl FnOnce(&mut Component),
    ) -> bool {
        self.store.update_component(id, kind, f)
    }

    /// Bulk-update one component kind across every entity matching the query.
    pub fn update_matching(
        &mut self,
        include: &[ComponentKind],
        exclude: &[ComponentKind],
        kind: ComponentKind,
        f: impl Fn(&mut Component),
    ) {
        self.store.update_matching(include, exclude, kind, f);
    }

    // ---- Lifecycle transitions ----

    /// Pick a shape out of the tray. Any previously active shape goes back to
    /// its slot first, so at most one shape is ever active.
    pub fn pick_shape(&mut self, id: ShapeId) -> bool {
        let entity_id = EntityId::Shape(id);
        let Some(entity) = self.store.get(entity_id) else {
            return false;
        };
        if !entity.has(ComponentKind::InPack) {
            return false;
        }
        let start = entity
            .hint_box()
            .map(|hint| hint.center())
            .or_else(|| entity.position().map(|p| (p.x, p.y)))
            .unwrap_or((0.0, 0.0));

        if let Some(previous) = self.active_shape_id() {
            self.return_to_pack(previous);
        }

        self.store.remove_component(entity_id, ComponentKind::InPack);
        let _ = self.store.add_component(entity_id, Component::Active);
        let _ = self.store.add_component(
            entity_id,
            Component::Mouse(Mouse {
                mx: start.0,
                my: start.1,
            }),
        );
        debug!("shape {} picked", id.as_str());
        true
    }

    /// Update the drag pointer on the active shape.
    pub fn move_pointer(&mut self, x: f32, y: f32) -> bool {
        let Some(active) = self.active_shape_id() else {
            return false;
        };
        let _ = self.store.add_component(
            EntityId::Shape(active),
            Component::Mouse(Mouse { mx: x, my: y }),
        );
        true
    }

    /// Rotate a shape 90 degrees clockwise. Only the active shape rotates.
    pub fn rotate_shape(&mut self, id: ShapeId) -> bool {
        let entity_id = EntityId::Shape(id);
        let Some(entity) = self.store.get(entity_id) else {
            return false;
        };
        if !entity.has(ComponentKind::Active) {
            return false;
        }
        let Some(rotated) = entity.matrix().map(Matrix::rotated_cw) else {
            return false;
        };
        self.store
            .update_component(entity_id, ComponentKind::Matrix, move |component| {
                *component = Component::Matrix(rotated);
            });
        self.store
            .update_component(entity_id, ComponentKind::Rotate, |component| {
                if let Component::Rotate(rotate) = component {
                    rotate.angle = rotate.angle.rotated_cw();
                }
            });
        true
    }

    /// Mirror a shape horizontally. Only the active shape mirrors.
    pub fn mirror_shape(&mut self, id: ShapeId) -> bool {
        let entity_id = EntityId::Shape(id);
        let Some(entity) = self.store.get(entity_id) else {
            return false;
        };
        if !entity.has(ComponentKind::Active) {
            return false;
        }
        let Some(mirrored) = entity.matrix().map(Matrix::mirrored) else {
            return false;
        };
        let was_mirrored = entity.has(ComponentKind::Mirrored);
        self.store
            .update_component(entity_id, ComponentKind::Matrix, move |component| {
                *component = Component::Matrix(mirrored);
            });
        if was_mirrored {
            self.store
                .remove_component(entity_id, ComponentKind::Mirrored);
        } else {
            let _ = self.store.add_component(entity_id, Component::Mirrored);
        }
        true
    }

    /// Return an active shape to its tray slot, restoring the library
    /// orientation: angle back to zero, matrix back to the unrotated,
    /// unmirrored definition.
    pub fn return_to_pack(&mut self, id: ShapeId) -> bool {
        let entity_id = EntityId::Shape(id);
        let Some(entity) = self.store.get(entity_id) else {
            return false;
        };
        if !entity.has(ComponentKind::Active) {
            return false;
        }
        let slot = entity.hint_box();

        self.store.remove_component(entity_id, ComponentKind::Active);
        self.store.remove_component(entity_id, ComponentKind::Mouse);
        self.store
            .remove_component(entity_id, ComponentKind::Mirrored);
        let _ = self.store.add_component(entity_id, Component::InPack);
        let _ = self
            .store
            .add_component(entity_id, Component::Matrix(library_matrix(id)));
        self.store
            .update_component(entity_id, ComponentKind::Rotate, |component| {
                *component = Component::Rotate(Default::default());
            });
        if let Some(slot) = slot {
            let _ = self.store.add_component(
                entity_id,
                Component::Position(Position {
                    x: slot.x,
                    y: slot.y,
                }),
            );
        }
        debug!("shape {} returned to pack", id.as_str());
        true
    }

    /// Lock the active shape onto the board: the merged matrix becomes the
    /// board matrix, the shape becomes immovable at the snapped position, and
    /// a full board marks the level solved.
    pub fn commit_placement(
        &mut self,
        id: ShapeId,
        position: Position,
        cell: Placement,
        merged: Matrix,
    ) -> bool {
        let entity_id = EntityId::Shape(id);
        let Some(entity) = self.store.get(entity_id) else {
            return false;
        };
        if !entity.has(ComponentKind::Active) {
            return false;
        }

        let filled = merged.is_filled();
        let _ = self
            .store
            .add_component(EntityId::Board, Component::Matrix(merged));

        self.store.remove_component(entity_id, ComponentKind::Active);
        self.store.remove_component(entity_id, ComponentKind::Mouse);
        let _ = self.store.add_component(entity_id, Component::Placed);
        let _ = self
            .store
            .add_component(entity_id, Component::Placement(cell));
        let _ = self
            .store
            .add_component(entity_id, Component::Position(position));

        if filled {
            self.solved = true;
            debug!("board filled, level solved");
        }
        debug!(
            "shape {} placed at cell ({}, {})",
            id.as_str(),
            cell.cell_x,
            cell.cell_y
        );
        true
    }

    /// Re-scale every entity that carries a ratio. Non-finite or negative
    /// ratios are ignored.
    pub fn set_ratio_for_all(&mut self, ratio: f32) -> bool {
        if !ratio.is_finite() || ratio < 0.0 {
            return false;
        }
        self.store.update_matching(
            &[ComponentKind::Ratio],
            &[],
            ComponentKind::Ratio,
            |component| {
                if let Component::Ratio(r) = component {
                    r.ratio = ratio;
                }
            },
        );
        true
    }
}
