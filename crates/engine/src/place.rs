//! Placement math and the intent reducer.
//!
//! `can_place` and `place` are pure functions over entity views; "cannot place
//! here" is an expected, high-frequency outcome and is reported as `None`,
//! never as an error. `apply_intent` funnels every external event through one
//! synchronous dispatch point so each event yields one atomic transition.

use log::debug;

use pentomino_core::component::{Placement, Position};
use pentomino_core::{Entity, GameSession, Matrix};
use pentomino_types::{EntityId, Intent, ShapeId, EDGE_TOLERANCE};

/// A legal placement: the discrete board cell of the shape's top-left plus
/// the continuous pixel position to snap the shape to. The position is derived
/// from the rounded cell, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementFit {
    pub cell: (i32, i32),
    pub position: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NoActiveShape,
    BoardUnavailable,
    InvalidPlacement,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NoActiveShape => "no_active",
            PlaceError::BoardUnavailable => "no_board",
            PlaceError::InvalidPlacement => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NoActiveShape => "no shape is being dragged",
            PlaceError::BoardUnavailable => "board entity is missing its matrix or position",
            PlaceError::InvalidPlacement => "shape does not fit at the pointer position",
        }
    }
}

/// Decide whether `shape` may be placed on `board` at its current pointer.
///
/// The shape anchors at its geometric center under the pointer. The bounds
/// check allows an inward slack of `EDGE_TOLERANCE * ratio` pixels so strict
/// edge contact still passes; cell indices are derived with `round`, which
/// tolerates sub-pixel snapping jitter.
pub fn can_place(board: &Entity, shape: &Entity, cell_size: f32) -> Option<PlacementFit> {
    let board_matrix = board.matrix()?;
    let shape_matrix = shape.matrix()?;
    let board_pos = board.position()?;
    let mouse = shape.mouse()?;
    let ratio = shape.ratio().map(|r| r.ratio).unwrap_or(1.0);

    let unit = cell_size * ratio;
    if unit <= 0.0 {
        return None;
    }

    let half_w = shape_matrix.columns() as f32 * unit / 2.0;
    let half_h = shape_matrix.rows() as f32 * unit / 2.0;
    let board_w = board_matrix.columns() as f32 * unit;
    let board_h = board_matrix.rows() as f32 * unit;
    let tolerance = EDGE_TOLERANCE * ratio;

    if mouse.mx - half_w < board_pos.x - tolerance
        || mouse.mx + half_w > board_pos.x + board_w + tolerance
        || mouse.my - half_h < board_pos.y - tolerance
        || mouse.my + half_h > board_pos.y + board_h + tolerance
    {
        return None;
    }

    let cell_x = ((mouse.mx - half_w - board_pos.x) / unit).round() as i32;
    let cell_y = ((mouse.my - half_h - board_pos.y) / unit).round() as i32;

    let shape_cols = shape_matrix.columns();
    for (i, row) in shape_matrix.cells().chunks(shape_cols).enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if value == 0 {
                continue;
            }
            match board_matrix.get(cell_x + j as i32, cell_y + i as i32) {
                Some(0) => {}
                _ => return None,
            }
        }
    }

    Some(PlacementFit {
        cell: (cell_x, cell_y),
        position: (
            board_pos.x + cell_x as f32 * unit,
            board_pos.y + cell_y as f32 * unit,
        ),
    })
}

/// Merge the shape into a copy of the board matrix at its legal placement.
/// Neither argument is modified; the caller commits the returned matrix.
pub fn place(board: &Entity, shape: &Entity, cell_size: f32) -> Option<Matrix> {
    let fit = can_place(board, shape, cell_size)?;
    board
        .matrix()?
        .overlay(shape.matrix()?, fit.cell.0, fit.cell.1)
}

/// True iff the board's every cell is occupied, by any shape. A board without
/// a matrix is never filled.
pub fn is_board_filled(board: &Entity) -> bool {
    board.matrix().map(Matrix::is_filled).unwrap_or(false)
}

/// Try to lock the active shape onto the board at its current pointer.
///
/// On success the merged matrix is committed and the shape becomes immovable.
/// An illegal position is the routine failure path: the shape returns to the
/// tray in its library orientation and `InvalidPlacement` is reported.
pub fn attempt_placement(
    session: &mut GameSession,
    cell_size: f32,
) -> Result<PlacementFit, PlaceError> {
    let Some(active) = session.active_shape_id() else {
        return Err(PlaceError::NoActiveShape);
    };
    let Some(board) = session.get_entity(EntityId::Board) else {
        return Err(PlaceError::BoardUnavailable);
    };
    if board.matrix().is_none() || board.position().is_none() {
        return Err(PlaceError::BoardUnavailable);
    }
    let Some(shape) = session.get_entity(EntityId::Shape(active)) else {
        return Err(PlaceError::NoActiveShape);
    };

    let merged = can_place(&board, &shape, cell_size).and_then(|fit| {
        board
            .matrix()
            .and_then(|m| shape.matrix().map(|s| (m, s)))
            .and_then(|(m, s)| m.overlay(s, fit.cell.0, fit.cell.1))
            .map(|merged| (fit, merged))
    });

    match merged {
        Some((fit, merged)) => {
            session.commit_placement(
                active,
                Position {
                    x: fit.position.0,
                    y: fit.position.1,
                },
                Placement {
                    cell_x: fit.cell.0,
                    cell_y: fit.cell.1,
                },
                merged,
            );
            Ok(fit)
        }
        None => {
            debug!("placement rejected, {} back to pack", active.as_str());
            session.return_to_pack(active);
            Err(PlaceError::InvalidPlacement)
        }
    }
}

/// Result of feeding one intent through the reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntentOutcome {
    /// The transition happened.
    Applied,
    /// Stale or out-of-state intent; state unchanged.
    Ignored,
    /// Placement committed.
    Placed(PlacementFit),
    /// Placement failed; the shape went back to the tray.
    Returned(ShapeId),
}

/// Apply one external intent to the session. Every event produces exactly one
/// atomic transition (or none); nothing here blocks or suspends.
pub fn apply_intent(session: &mut GameSession, intent: Intent, cell_size: f32) -> IntentOutcome {
    let applied = |ok: bool| {
        if ok {
            IntentOutcome::Applied
        } else {
            IntentOutcome::Ignored
        }
    };
    match intent {
        Intent::Pick(id) => applied(session.pick_shape(id)),
        Intent::PointerMove { x, y } => applied(session.move_pointer(x, y)),
        Intent::Rotate(id) => applied(session.rotate_shape(id)),
        Intent::Mirror(id) => applied(session.mirror_shape(id)),
        Intent::Reset(id) => applied(session.return_to_pack(id)),
        Intent::SetRatio(ratio) => applied(session.set_ratio_for_all(ratio)),
        Intent::Place => {
            let active = session.active_shape_id();
            match attempt_placement(session, cell_size) {
                Ok(fit) => IntentOutcome::Placed(fit),
                Err(PlaceError::InvalidPlacement) => match active {
                    Some(id) => IntentOutcome::Returned(id),
                    None => IntentOutcome::Ignored,
                },
                Err(_) => IntentOutcome::Ignored,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentomino_core::{LevelDef, ShapeState};
    use pentomino_types::{ComponentKind, ShapeId, DEFAULT_CELL_SIZE};

    fn session_at(board_position: (f32, f32)) -> GameSession {
        let mut def = LevelDef::from_size_token("5x5", vec![ShapeId::W, ShapeId::X]).unwrap();
        def.board_position = board_position;
        GameSession::new(&def).unwrap()
    }

    /// Pointer that centers a 3x3 shape over the board's top-left 3x3 block.
    fn top_left_pointer(board_position: (f32, f32)) -> (f32, f32) {
        (board_position.0 + 48.0, board_position.1 + 48.0)
    }

    #[test]
    fn test_can_place_top_left() {
        let mut s = session_at((100.0, 100.0));
        s.pick_shape(ShapeId::W);
        let (mx, my) = top_left_pointer((100.0, 100.0));
        s.move_pointer(mx, my);

        let board = s.get_entity(EntityId::Board).unwrap();
        let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
        let fit = can_place(&board, &shape, DEFAULT_CELL_SIZE).unwrap();
        assert_eq!(fit.cell, (0, 0));
        assert_eq!(fit.position, (100.0, 100.0));
    }

    #[test]
    fn test_can_place_far_outside_board() {
        let mut s = session_at((100.0, 100.0));
        s.pick_shape(ShapeId::W);
        s.move_pointer(1000.0, 1000.0);

        let board = s.get_entity(EntityId::Board).unwrap();
        let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
        assert!(can_place(&board, &shape, DEFAULT_CELL_SIZE).is_none());
    }

    #[test]
    fn test_bounds_tolerance_margin() {
        let mut s = session_at((100.0, 100.0));
        s.pick_shape(ShapeId::W);

        let board = s.get_entity(EntityId::Board).unwrap();

        // Just inside the 10px slack: still legal.
        s.move_pointer(148.0 - 9.0, 148.0);
        let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
        assert!(can_place(&board, &shape, DEFAULT_CELL_SIZE).is_some());

        // Beyond the slack: rejected.
        s.move_pointer(148.0 - 11.0, 148.0);
        let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
        assert!(can_place(&board, &shape, DEFAULT_CELL_SIZE).is_none());
    }

    #[test]
    fn test_place_merges_without_mutating_inputs() {
        let mut s = session_at((100.0, 100.0));
        s.pick_shape(ShapeId::W);
        let (mx, my) = top_left_pointer((100.0, 100.0));
        s.move_pointer(mx, my);

        let board = s.get_entity(EntityId::Board).unwrap();
        let shape = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
        let board_cells_before = board.matrix().unwrap().cells().to_vec();
        let shape_cells_before = shape.matrix().unwrap().cells().to_vec();

        let merged = place(&board, &shape, DEFAULT_CELL_SIZE).unwrap();
        assert_eq!(merged.occupied_count(), 5);
        assert_eq!(merged.get(0, 0), Some(8));
        assert_eq!(merged.get(1, 1), Some(8));
        assert_eq!(merged.get(2, 2), Some(8));

        assert_eq!(board.matrix().unwrap().cells(), &board_cells_before[..]);
        assert_eq!(shape.matrix().unwrap().cells(), &shape_cells_before[..]);
    }

    #[test]
    fn test_attempt_placement_commits() {
        let mut s = session_at((100.0, 100.0));
        s.pick_shape(ShapeId::W);
        let (mx, my) = top_left_pointer((100.0, 100.0));
        s.move_pointer(mx, my);

        let fit = attempt_placement(&mut s, DEFAULT_CELL_SIZE).unwrap();
        assert_eq!(fit.cell, (0, 0));

        let board = s.get_entity(EntityId::Board).unwrap();
        assert_eq!(board.matrix().unwrap().get(0, 0), Some(8));

        let w = s.get_entity(EntityId::Shape(ShapeId::W)).unwrap();
        assert!(w.has(ComponentKind::Placed));
        assert!(!w.has(ComponentKind::Active));
        assert_eq!(w.placement().unwrap().cell_x, 0);
        assert_eq!(w.position().unwrap().x, 100.0);
        assert!(!s.solved());
    }

    #[test]
    fn test_attempt_placement_collision_resets_shape() {
        let mut s = session_at((100.0, 100.0));
        let (mx, my) = top_left_pointer((100.0, 100.0));

        s.pick_shape(ShapeId::W);
        s.move_pointer(mx, my);
        attempt_placement(&mut s, DEFAULT_CELL_SIZE).unwrap();

        // Second shape over the same cells collides.
        s.pick_shape(ShapeId::X);
        s.rotate_shape(ShapeId::X);
        s.move_pointer(mx, my);
        let err = attempt_placement(&mut s, DEFAULT_CELL_SIZE).unwrap_err();
        assert_eq!(err, PlaceError::InvalidPlacement);
        assert_eq!(err.code(), "invalid_place");

        let x = s.get_entity(EntityId::Shape(ShapeId::X)).unwrap();
        assert!(x.has(ComponentKind::InPack));
        assert_eq!(
            x.matrix().unwrap(),
            &pentomino_core::library_matrix(ShapeId::X)
        );
    }

    #[test]
    fn test_board_filled_check() {
        let s = session_at((0.0, 0.0));
        let board = s.get_entity(EntityId::Board).unwrap();
        assert!(!is_board_filled(&board));

        let def = LevelDef {
            board: pentomino_core::BoardDef::Cells {
                rows: 2,
                cells: vec![1, 8, 12, 3],
            },
            shapes: vec![ShapeId::W],
            board_position: (0.0, 0.0),
        };
        let full = GameSession::new(&def).unwrap();
        assert!(is_board_filled(&full.get_entity(EntityId::Board).unwrap()));
    }

    #[test]
    fn test_attempt_placement_without_active_shape() {
        let mut s = session_at((100.0, 100.0));
        assert_eq!(
            attempt_placement(&mut s, DEFAULT_CELL_SIZE).unwrap_err(),
            PlaceError::NoActiveShape
        );
    }

    #[test]
    fn test_apply_intent_full_drag_and_drop() {
        let mut s = session_at((0.0, 0.0));

        assert_eq!(
            apply_intent(&mut s, Intent::Pick(ShapeId::W), DEFAULT_CELL_SIZE),
            IntentOutcome::Applied
        );
        assert_eq!(
            apply_intent(
                &mut s,
                Intent::PointerMove { x: 48.0, y: 48.0 },
                DEFAULT_CELL_SIZE
            ),
            IntentOutcome::Applied
        );
        let outcome = apply_intent(&mut s, Intent::Place, DEFAULT_CELL_SIZE);
        match outcome {
            IntentOutcome::Placed(fit) => assert_eq!(fit.cell, (0, 0)),
            other => panic!("expected placement, got {:?}", other),
        }

        let snap = s.snapshot();
        let w = snap.shapes.iter().find(|sh| sh.id == ShapeId::W).unwrap();
        assert_eq!(w.state, ShapeState::Placed);
    }

    #[test]
    fn test_apply_intent_reports_returned_shape() {
        let mut s = session_at((0.0, 0.0));
        apply_intent(&mut s, Intent::Pick(ShapeId::W), DEFAULT_CELL_SIZE);
        apply_intent(
            &mut s,
            Intent::PointerMove { x: 2000.0, y: 2000.0 },
            DEFAULT_CELL_SIZE,
        );
        assert_eq!(
            apply_intent(&mut s, Intent::Place, DEFAULT_CELL_SIZE),
            IntentOutcome::Returned(ShapeId::W)
        );
    }

    #[test]
    fn test_apply_intent_ignores_stale_events() {
        let mut s = session_at((0.0, 0.0));
        assert_eq!(
            apply_intent(&mut s, Intent::Rotate(ShapeId::W), DEFAULT_CELL_SIZE),
            IntentOutcome::Ignored
        );
        assert_eq!(
            apply_intent(&mut s, Intent::Place, DEFAULT_CELL_SIZE),
            IntentOutcome::Ignored
        );
        assert_eq!(
            apply_intent(
                &mut s,
                Intent::PointerMove { x: 1.0, y: 1.0 },
                DEFAULT_CELL_SIZE
            ),
            IntentOutcome::Ignored
        );
    }
}
