//! Entity store invariants over the public facade

use pentomino::core::component::{Mouse, Ratio};
use pentomino::core::{Component, Entity, EntityStore, GameSession, LevelDef, StoreError};
use pentomino::types::{ComponentKind, EntityId, ShapeId};

#[test]
fn test_component_uniqueness_after_repeated_adds() {
    let mut store = EntityStore::new();
    store
        .add_entity(Entity::new(EntityId::Board, std::iter::empty::<Component>()))
        .unwrap();

    for ratio in [1.0, 1.5, 2.0] {
        store
            .add_component(EntityId::Board, Component::Ratio(Ratio { ratio }))
            .unwrap();
    }

    let entity = store.get(EntityId::Board).unwrap();
    let ratios = entity
        .components()
        .iter()
        .filter(|c| c.kind() == ComponentKind::Ratio)
        .count();
    assert_eq!(ratios, 1);
    assert_eq!(entity.ratio().unwrap().ratio, 2.0);
}

#[test]
fn test_duplicate_entity_is_rejected_not_fatal() {
    let mut store = EntityStore::new();
    store
        .add_entity(Entity::new(EntityId::Board, std::iter::empty::<Component>()))
        .unwrap();

    let err = store
        .add_entity(Entity::new(EntityId::Board, [Component::InPack]))
        .unwrap_err();
    assert_eq!(err, StoreError::DuplicateEntity(EntityId::Board));

    // Original entity untouched.
    assert_eq!(store.len(), 1);
    assert!(!store.get(EntityId::Board).unwrap().has(ComponentKind::InPack));
}

#[test]
fn test_stale_id_updates_are_absorbed() {
    let def = LevelDef::from_size_token("5x5", vec![ShapeId::W]).unwrap();
    let mut session = GameSession::new(&def).unwrap();

    let before = session.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
    // Shape X never existed in this level; the update must be a no-op.
    let applied = session.update_component(
        EntityId::Shape(ShapeId::X),
        ComponentKind::Mouse,
        |component| {
            if let Component::Mouse(mouse) = component {
                mouse.mx = 999.0;
            }
        },
    );
    assert!(!applied);
    assert_eq!(
        session.get_entity(EntityId::Shape(ShapeId::W)).unwrap(),
        before
    );
}

#[test]
fn test_query_order_matches_entity_insertion() {
    let def =
        LevelDef::from_size_token("5x5", vec![ShapeId::Z, ShapeId::F, ShapeId::I]).unwrap();
    let session = GameSession::new(&def).unwrap();

    let ids: Vec<EntityId> = session
        .query_entities(&[ComponentKind::InPack], &[])
        .iter()
        .map(|entity| entity.id())
        .collect();
    assert_eq!(
        ids,
        vec![
            EntityId::Shape(ShapeId::Z),
            EntityId::Shape(ShapeId::F),
            EntityId::Shape(ShapeId::I),
        ]
    );
}

#[test]
fn test_exclude_filters_matches() {
    let def = LevelDef::from_size_token("5x5", vec![ShapeId::W, ShapeId::X]).unwrap();
    let mut session = GameSession::new(&def).unwrap();
    session.pick_shape(ShapeId::W);

    let packed = session.query_entities(&[ComponentKind::Matrix], &[ComponentKind::Active]);
    // Board plus the shape still in the pack.
    assert_eq!(packed.len(), 2);
    assert!(packed.iter().all(|e| e.id() != EntityId::Shape(ShapeId::W)));
}

#[test]
fn test_external_component_intents_flow_through_session() {
    let def = LevelDef::from_size_token("5x5", vec![ShapeId::W]).unwrap();
    let mut session = GameSession::new(&def).unwrap();
    let id = EntityId::Shape(ShapeId::W);

    session
        .add_component(id, Component::Mouse(Mouse { mx: 1.0, my: 2.0 }))
        .unwrap();
    assert!(session.get_entity(id).unwrap().mouse().is_some());

    assert!(session.remove_component(id, ComponentKind::Mouse));
    assert!(session.get_entity(id).unwrap().mouse().is_none());
    // Removing again is a no-op.
    assert!(!session.remove_component(id, ComponentKind::Mouse));
}
