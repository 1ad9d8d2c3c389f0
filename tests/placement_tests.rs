//! End-to-end placement scenarios over the public facade

use pentomino::core::{library_matrix, GameSession, LevelDef};
use pentomino::engine::{apply_intent, attempt_placement, can_place, place, IntentOutcome};
use pentomino::types::{ComponentKind, EntityId, Intent, ShapeId, DEFAULT_CELL_SIZE};

fn session() -> GameSession {
    let mut def = LevelDef::from_size_token("5x5", vec![ShapeId::W, ShapeId::P]).unwrap();
    def.board_position = (100.0, 100.0);
    GameSession::new(&def).unwrap()
}

#[test]
fn test_scenario_a_w_over_top_left_block() {
    // Board 5x5 at (100,100), ratio 1, cell size 32. W is 3x3, so the pointer
    // that centers it over the top-left 3x3 block is (100+48, 100+48).
    let mut s = session();
    s.pick_shape(ShapeId::W);
    s.move_pointer(148.0, 148.0);

    let board = s.get_entity(EntityId::Board).unwrap();
    let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();

    let fit = can_place(&board, &shape, DEFAULT_CELL_SIZE).expect("W fits at the origin");
    assert_eq!(fit.cell, (0, 0));
    assert_eq!(fit.position, (100.0, 100.0));

    let merged = place(&board, &shape, DEFAULT_CELL_SIZE).expect("merge succeeds");
    // W pattern occupies exactly these cells with its own code.
    let expected = [
        (0, 0),
        (0, 1),
        (1, 1),
        (1, 2),
        (2, 2),
    ];
    for (x, y) in expected {
        assert_eq!(merged.get(x, y), Some(8), "cell ({}, {})", x, y);
    }
    assert_eq!(merged.occupied_count(), 5);
}

#[test]
fn test_scenario_b_pointer_far_outside_board() {
    let mut s = session();
    s.pick_shape(ShapeId::W);
    s.move_pointer(1000.0, 1000.0);

    let board = s.get_entity(EntityId::Board).unwrap();
    let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
    assert!(can_place(&board, &shape, DEFAULT_CELL_SIZE).is_none());
    assert!(place(&board, &shape, DEFAULT_CELL_SIZE).is_none());
}

#[test]
fn test_scenario_c_second_shape_collides() {
    let mut s = session();
    s.pick_shape(ShapeId::W);
    s.move_pointer(148.0, 148.0);
    attempt_placement(&mut s, DEFAULT_CELL_SIZE).expect("first placement succeeds");

    // P is 3x2; centered over the board's top-left corner it overlaps W.
    s.pick_shape(ShapeId::P);
    s.move_pointer(132.0, 148.0);

    let board = s.get_entity(EntityId::Board).unwrap();
    let shape = s.get_entity(EntityId::Shape(ShapeId::P)).unwrap();
    assert!(can_place(&board, &shape, DEFAULT_CELL_SIZE).is_none());
}

#[test]
fn test_scenario_d_rotated_w_exact_cells() {
    let mut s = session();
    s.pick_shape(ShapeId::W);
    s.rotate_shape(ShapeId::W);

    let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
    let matrix = shape.matrix().unwrap();
    assert_eq!(matrix.rows(), 3);
    assert_eq!(matrix.columns(), 3);
    assert_eq!(matrix.cells(), &[0, 8, 8, 8, 8, 0, 8, 0, 0]);
}

#[test]
fn test_bounds_rejected_beyond_tolerance_in_every_direction() {
    let mut s = session();
    s.pick_shape(ShapeId::W);

    let board = s.get_entity(EntityId::Board).unwrap();
    // 11px outside the slack on each axis.
    let offsets = [
        (148.0 - 59.0, 148.0),
        (148.0, 148.0 - 59.0),
        (212.0 + 59.0, 212.0),
        (212.0, 212.0 + 59.0),
    ];
    for (mx, my) in offsets {
        s.move_pointer(mx, my);
        let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
        assert!(
            can_place(&board, &shape, DEFAULT_CELL_SIZE).is_none(),
            "pointer ({}, {}) should be out of bounds",
            mx,
            my
        );
    }
}

#[test]
fn test_place_leaves_inputs_unchanged() {
    let mut s = session();
    s.pick_shape(ShapeId::W);
    s.move_pointer(148.0, 148.0);

    let board = s.get_entity(EntityId::Board).unwrap();
    let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();

    let board_before = board.clone();
    let shape_before = shape.clone();
    place(&board, &shape, DEFAULT_CELL_SIZE).expect("merge succeeds");

    assert_eq!(board, board_before);
    assert_eq!(shape, shape_before);
}

#[test]
fn test_failed_commit_resets_shape_to_library_state() {
    let mut s = session();
    apply_intent(&mut s, Intent::Pick(ShapeId::W), DEFAULT_CELL_SIZE);
    apply_intent(&mut s, Intent::Rotate(ShapeId::W), DEFAULT_CELL_SIZE);
    apply_intent(&mut s, Intent::Mirror(ShapeId::W), DEFAULT_CELL_SIZE);
    apply_intent(
        &mut s,
        Intent::PointerMove { x: 1000.0, y: 1000.0 },
        DEFAULT_CELL_SIZE,
    );

    assert_eq!(
        apply_intent(&mut s, Intent::Place, DEFAULT_CELL_SIZE),
        IntentOutcome::Returned(ShapeId::W)
    );

    let w = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
    assert!(w.has(ComponentKind::InPack));
    assert!(!w.has(ComponentKind::Active));
    assert!(!w.has(ComponentKind::Mirrored));
    assert_eq!(w.rotate().unwrap().angle.degrees(), 0);
    assert_eq!(w.matrix().unwrap(), &library_matrix(ShapeId::W));
}

#[test]
fn test_solving_a_level_sets_the_flag() {
    // 3x3 board whose blockers leave exactly the W pattern free.
    let def = pentomino::core::LevelDef {
        board: pentomino::core::BoardDef::Cells {
            rows: 3,
            cells: vec![0, 99, 99, 0, 0, 99, 99, 0, 0],
        },
        shapes: vec![ShapeId::W],
        board_position: (0.0, 0.0),
    };
    let mut s = GameSession::new(&def).unwrap();

    s.pick_shape(ShapeId::W);
    s.move_pointer(48.0, 48.0);
    let fit = attempt_placement(&mut s, DEFAULT_CELL_SIZE).expect("W fills the free cells");
    assert_eq!(fit.cell, (0, 0));
    assert!(s.solved());
}
