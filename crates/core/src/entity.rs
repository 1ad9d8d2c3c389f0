//! Entity module - a uniquely identified game object and its components
//!
//! An entity owns at most one component per kind; inserting a component whose
//! kind is already present replaces the old one. The component list keeps
//! insertion order and lives inline (no heap allocation for the list itself).

use arrayvec::ArrayVec;

use pentomino_types::{ComponentKind, EntityId, COMPONENT_KIND_COUNT};

use crate::component::{Component, HintBox, Mouse, Placement, Position, Ratio, Rotate};
use crate::matrix::Matrix;

/// A game object: stable identity plus one component per kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    components: ArrayVec<Component, COMPONENT_KIND_COUNT>,
}

impl Entity {
    /// Create an entity from an initial component list. Later duplicates of a
    /// kind replace earlier ones.
    pub fn new(id: EntityId, components: impl IntoIterator<Item = Component>) -> Self {
        let mut entity = Self {
            id,
            components: ArrayVec::new(),
        };
        for component in components {
            entity.insert(component);
        }
        entity
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Components in insertion order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    /// True iff the kind set contains every `include` kind and none of `exclude`.
    pub fn matches(&self, include: &[ComponentKind], exclude: &[ComponentKind]) -> bool {
        include.iter().all(|&kind| self.has(kind)) && !exclude.iter().any(|&kind| self.has(kind))
    }

    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    pub(crate) fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    /// Insert a component, replacing any existing component of the same kind.
    pub fn insert(&mut self, component: Component) {
        match self
            .components
            .iter_mut()
            .find(|c| c.kind() == component.kind())
        {
            Some(slot) => *slot = component,
            // One slot per kind, so capacity cannot overflow.
            None => self.components.push(component),
        }
    }

    /// Remove the component of the given kind; no-op when absent.
    pub fn remove(&mut self, kind: ComponentKind) -> Option<Component> {
        let index = self.components.iter().position(|c| c.kind() == kind)?;
        Some(self.components.remove(index))
    }

    // Typed accessors for the payload-carrying kinds.

    pub fn position(&self) -> Option<Position> {
        match self.component(ComponentKind::Position)? {
            Component::Position(p) => Some(*p),
            _ => None,
        }
    }

    pub fn mouse(&self) -> Option<Mouse> {
        match self.component(ComponentKind::Mouse)? {
            Component::Mouse(m) => Some(*m),
            _ => None,
        }
    }

    pub fn rotate(&self) -> Option<Rotate> {
        match self.component(ComponentKind::Rotate)? {
            Component::Rotate(r) => Some(*r),
            _ => None,
        }
    }

    pub fn ratio(&self) -> Option<Ratio> {
        match self.component(ComponentKind::Ratio)? {
            Component::Ratio(r) => Some(*r),
            _ => None,
        }
    }

    pub fn matrix(&self) -> Option<&Matrix> {
        match self.component(ComponentKind::Matrix)? {
            Component::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn hint_box(&self) -> Option<HintBox> {
        match self.component(ComponentKind::HintBox)? {
            Component::HintBox(h) => Some(*h),
            _ => None,
        }
    }

    pub fn placement(&self) -> Option<Placement> {
        match self.component(ComponentKind::Placement)? {
            Component::Placement(p) => Some(*p),
            _ => None,
        }
    }
}
