//! Level module - level definitions and entity construction
//!
//! A level names a board (either a size token like "5x5" or an explicit
//! prefilled grid with blocker cells) and the shapes available in the tray.
//! Loading builds the full entity set; a board grid whose flat data is not
//! rectangular aborts the load.

use pentomino_types::{
    EntityId, ShapeId, DEFAULT_CELL_SIZE, TRAY_GAP_CELLS, TRAY_SLOT_CELLS,
};

use crate::component::{Component, HintBox, Position, Ratio, Rotate, Size, View};
use crate::entity::Entity;
use crate::matrix::{Matrix, MatrixError};
use crate::shapes::library_matrix;
use crate::store::EntityStore;

/// Tray slots per row before wrapping below.
const TRAY_COLUMNS: usize = 4;

/// Level-load failures. All are fatal for the level being loaded; the host
/// surfaces them as a "level failed to load" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    BadBoardSize,
    MalformedMatrix { rows: usize, len: usize },
    DuplicateShape(ShapeId),
    EmptyShapeList,
}

impl LevelError {
    pub fn code(self) -> &'static str {
        match self {
            LevelError::BadBoardSize => "bad_board_size",
            LevelError::MalformedMatrix { .. } => "malformed_matrix",
            LevelError::DuplicateShape(_) => "duplicate_shape",
            LevelError::EmptyShapeList => "empty_shape_list",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LevelError::BadBoardSize => "board size token must look like \"5x5\"",
            LevelError::MalformedMatrix { .. } => {
                "board matrix length is not divisible by its row count"
            }
            LevelError::DuplicateShape(_) => "a shape id appears twice in the level",
            LevelError::EmptyShapeList => "a level needs at least one shape",
        }
    }
}

impl From<MatrixError> for LevelError {
    fn from(err: MatrixError) -> Self {
        match err {
            MatrixError::MalformedMatrix { rows, len } => LevelError::MalformedMatrix { rows, len },
        }
    }
}

/// Board description inside a level definition.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardDef {
    /// Empty board of the given dimensions.
    Size { rows: usize, columns: usize },
    /// Explicit flat grid; nonzero cells are immovable blockers.
    Cells { rows: usize, cells: Vec<u8> },
}

/// A level: board description, tray shapes, board anchor on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDef {
    pub board: BoardDef,
    pub shapes: Vec<ShapeId>,
    pub board_position: (f32, f32),
}

impl LevelDef {
    /// Build a definition from a size token like "5x5" (rows x columns).
    pub fn from_size_token(token: &str, shapes: Vec<ShapeId>) -> Result<Self, LevelError> {
        let (rows, columns) = parse_size_token(token)?;
        Ok(Self {
            board: BoardDef::Size { rows, columns },
            shapes,
            board_position: (0.0, 0.0),
        })
    }
}

/// Parse a "RxC" token into (rows, columns).
pub fn parse_size_token(token: &str) -> Result<(usize, usize), LevelError> {
    let mut parts = token.split(['x', 'X']);
    let rows = parts
        .next()
        .and_then(|p| p.trim().parse::<usize>().ok())
        .ok_or(LevelError::BadBoardSize)?;
    let columns = parts
        .next()
        .and_then(|p| p.trim().parse::<usize>().ok())
        .ok_or(LevelError::BadBoardSize)?;
    if parts.next().is_some() || rows == 0 || columns == 0 {
        return Err(LevelError::BadBoardSize);
    }
    Ok((rows, columns))
}

/// Build the level's entity set: one board entity plus one entity per tray
/// shape, each in its pack slot.
pub fn build_store(def: &LevelDef) -> Result<EntityStore, LevelError> {
    let board_matrix = match &def.board {
        BoardDef::Size { rows, columns } => {
            if *rows == 0 || *columns == 0 {
                return Err(LevelError::BadBoardSize);
            }
            Matrix::zeroed(*rows, *columns)
        }
        BoardDef::Cells { rows, cells } => Matrix::new(*rows, cells.clone())?,
    };

    if def.shapes.is_empty() {
        return Err(LevelError::EmptyShapeList);
    }
    for (index, &shape) in def.shapes.iter().enumerate() {
        if def.shapes[..index].contains(&shape) {
            return Err(LevelError::DuplicateShape(shape));
        }
    }

    let (board_x, board_y) = def.board_position;
    let board_width = board_matrix.columns() as f32 * DEFAULT_CELL_SIZE;
    let board_height = board_matrix.rows() as f32 * DEFAULT_CELL_SIZE;

    let mut store = EntityStore::new();
    let board = Entity::new(
        EntityId::Board,
        [
            Component::Position(Position {
                x: board_x,
                y: board_y,
            }),
            Component::Ratio(Ratio::default()),
            Component::Size(Size {
                width: board_width,
                height: board_height,
            }),
            Component::Matrix(board_matrix),
        ],
    );
    // The store is freshly built, so these adds cannot collide.
    let _ = store.add_entity(board);

    let slot_side = TRAY_SLOT_CELLS as f32 * DEFAULT_CELL_SIZE;
    let tray_top = board_y + board_height + TRAY_GAP_CELLS as f32 * DEFAULT_CELL_SIZE;
    for (index, &shape) in def.shapes.iter().enumerate() {
        let slot = HintBox {
            x: board_x + (index % TRAY_COLUMNS) as f32 * slot_side,
            y: tray_top + (index / TRAY_COLUMNS) as f32 * slot_side,
            width: slot_side,
            height: slot_side,
        };
        let entity = Entity::new(
            EntityId::Shape(shape),
            [
                Component::Position(Position { x: slot.x, y: slot.y }),
                Component::Ratio(Ratio::default()),
                Component::Rotate(Rotate::default()),
                Component::View(View { img: Some(shape) }),
                Component::HintBox(slot),
                Component::Matrix(library_matrix(shape)),
                Component::InPack,
            ],
        );
        let _ = store.add_entity(entity);
    }

    Ok(store)
}
