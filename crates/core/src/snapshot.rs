//! Read-only view of a session for renderers and observers.

use pentomino_types::{ComponentKind, EntityId, ShapeId, ALL_SHAPES};

use crate::component::HintBox;
use crate::session::GameSession;

/// Lifecycle state of a shape as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeState {
    Pack,
    Active,
    Placed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<u8>,
    pub position: (f32, f32),
    pub ratio: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSnapshot {
    pub id: ShapeId,
    pub state: ShapeState,
    pub rows: usize,
    pub cells: Vec<u8>,
    pub position: (f32, f32),
    pub angle: u16,
    pub mirrored: bool,
    pub mouse: Option<(f32, f32)>,
    pub cell: Option<(i32, i32)>,
    pub hint_box: Option<HintBox>,
}

/// Complete observable state of a session at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub board: BoardSnapshot,
    pub shapes: Vec<ShapeSnapshot>,
    pub solved: bool,
}

impl GameSession {
    /// Capture the full observable state. The result shares nothing with the
    /// live session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let board_entity = self.get_entity(EntityId::Board);
        let board = match &board_entity {
            Some(entity) => {
                let position = entity.position().map(|p| (p.x, p.y)).unwrap_or((0.0, 0.0));
                let ratio = entity.ratio().map(|r| r.ratio).unwrap_or(1.0);
                match entity.matrix() {
                    Some(matrix) => BoardSnapshot {
                        rows: matrix.rows(),
                        columns: matrix.columns(),
                        cells: matrix.cells().to_vec(),
                        position,
                        ratio,
                    },
                    None => BoardSnapshot {
                        rows: 0,
                        columns: 0,
                        cells: Vec::new(),
                        position,
                        ratio,
                    },
                }
            }
            None => BoardSnapshot {
                rows: 0,
                columns: 0,
                cells: Vec::new(),
                position: (0.0, 0.0),
                ratio: 1.0,
            },
        };

        let mut shapes = Vec::new();
        for id in ALL_SHAPES {
            let Some(entity) = self.get_entity(EntityId::Shape(id)) else {
                continue;
            };
            let state = if entity.has(ComponentKind::Placed) {
                ShapeState::Placed
            } else if entity.has(ComponentKind::Active) {
                ShapeState::Active
            } else {
                ShapeState::Pack
            };
            let (rows, cells) = match entity.matrix() {
                Some(matrix) => (matrix.rows(), matrix.cells().to_vec()),
                None => (0, Vec::new()),
            };
            shapes.push(ShapeSnapshot {
                id,
                state,
                rows,
                cells,
                position: entity.position().map(|p| (p.x, p.y)).unwrap_or((0.0, 0.0)),
                angle: entity.rotate().map(|r| r.angle.degrees()).unwrap_or(0),
                mirrored: entity.has(ComponentKind::Mirrored),
                mouse: entity.mouse().map(|m| (m.mx, m.my)),
                cell: entity.placement().map(|p| (p.cell_x, p.cell_y)),
                hint_box: entity.hint_box(),
            });
        }

        SessionSnapshot {
            board,
            shapes,
            solved: self.solved(),
        }
    }
}
