//! Entity store - normalized entity collection with query support
//!
//! Entities live in an id-keyed map with a side list preserving insertion
//! order, so queries iterate deterministically without sorting. Every mutation
//! validates before writing; readers only ever observe complete states. The
//! store is cloneable, which is what undo/replay and snapshotting build on.

use std::collections::HashMap;

use log::warn;

use pentomino_types::{ComponentKind, EntityId};

use crate::component::Component;
use crate::entity::Entity;

/// Store mutation failures. Both are recoverable: a duplicate add is rejected
/// and logged, a stale id on the update paths degrades to a no-op instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    DuplicateEntity(EntityId),
    UnknownEntity(EntityId),
}

impl StoreError {
    pub fn code(self) -> &'static str {
        match self {
            StoreError::DuplicateEntity(_) => "duplicate_entity",
            StoreError::UnknownEntity(_) => "unknown_entity",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            StoreError::DuplicateEntity(_) => "an entity with this id already exists",
            StoreError::UnknownEntity(_) => "no entity with this id exists",
        }
    }
}

/// Normalized entity collection: insertion-ordered id list + id-keyed map.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    ids: Vec<EntityId>,
    entities: HashMap<EntityId, Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Entity ids in insertion order
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Insert a new entity. Rejects an id that is already present.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), StoreError> {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            warn!("rejected duplicate entity {}", id.as_str());
            return Err(StoreError::DuplicateEntity(id));
        }
        self.ids.push(id);
        self.entities.insert(id, entity);
        Ok(())
    }

    /// Remove an entity and its components. Returns the removed entity.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.ids.retain(|&existing| existing != id);
        Some(entity)
    }

    /// Shallow-merge a set of components into an existing entity: each given
    /// component replaces the entity's component of the same kind, other
    /// components are untouched.
    pub fn update_entity(
        &mut self,
        id: EntityId,
        components: impl IntoIterator<Item = Component>,
    ) -> Result<(), StoreError> {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                for component in components {
                    entity.insert(component);
                }
                Ok(())
            }
            None => Err(StoreError::UnknownEntity(id)),
        }
    }

    /// Attach a component to an entity, replacing any existing component of
    /// the same kind.
    pub fn add_component(&mut self, id: EntityId, component: Component) -> Result<(), StoreError> {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.insert(component);
                Ok(())
            }
            None => Err(StoreError::UnknownEntity(id)),
        }
    }

    /// Detach a component. No-op when the entity or the component is absent.
    /// Returns whether anything was removed.
    pub fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> bool {
        self.entities
            .get_mut(&id)
            .and_then(|entity| entity.remove(kind))
            .is_some()
    }

    /// Apply `f` to the entity's component of the given kind. Stale ids and
    /// missing components are absorbed as no-ops (rapid input can legitimately
    /// race ahead of the state); returns whether the update was applied. The
    /// component's kind is preserved by construction.
    pub fn update_component(
        &mut self,
        id: EntityId,
        kind: ComponentKind,
        f: impl FnOnce(&mut Component),
    ) -> bool {
        match self
            .entities
            .get_mut(&id)
            .and_then(|entity| entity.component_mut(kind))
        {
            Some(component) => {
                f(component);
                true
            }
            None => false,
        }
    }

    /// Entities whose kind set is a superset of `include` and disjoint from
    /// `exclude`, in insertion order.
    pub fn query(&self, include: &[ComponentKind], exclude: &[ComponentKind]) -> Vec<&Entity> {
        self.iter()
            .filter(|entity| entity.matches(include, exclude))
            .collect()
    }

    /// Apply `f` to the `kind` component of every entity matching the query.
    /// Matching entities without the target component are skipped.
    pub fn update_matching(
        &mut self,
        include: &[ComponentKind],
        exclude: &[ComponentKind],
        kind: ComponentKind,
        f: impl Fn(&mut Component),
    ) {
        let targets: Vec<EntityId> = self
            .query(include, exclude)
            .iter()
            .map(|entity| entity.id())
            .collect();
        for id in targets {
            self.update_component(id, kind, &f);
        }
    }
}
