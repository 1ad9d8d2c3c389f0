//! Shape library - canonical pentomino matrices
//!
//! Each of the twelve pentominoes has one library orientation (unrotated,
//! unmirrored). Occupied cells carry the shape's cell code so ownership
//! survives merging into the board.

use pentomino_types::ShapeId;

use crate::matrix::Matrix;

/// Canonical matrix for a shape, in its library orientation.
pub fn library_matrix(id: ShapeId) -> Matrix {
    let c = id.code();
    let (rows, cells) = match id {
        ShapeId::F => (3, vec![0, c, c, c, c, 0, 0, c, 0]),
        ShapeId::I => (1, vec![c, c, c, c, c]),
        ShapeId::L => (4, vec![c, 0, c, 0, c, 0, c, c]),
        ShapeId::N => (4, vec![0, c, 0, c, c, c, c, 0]),
        ShapeId::P => (3, vec![c, c, c, c, c, 0]),
        ShapeId::T => (3, vec![c, c, c, 0, c, 0, 0, c, 0]),
        ShapeId::U => (2, vec![c, 0, c, c, c, c]),
        ShapeId::W => (3, vec![c, 0, 0, c, c, 0, 0, c, c]),
        ShapeId::V => (3, vec![c, 0, 0, c, 0, 0, c, c, c]),
        ShapeId::X => (3, vec![0, c, 0, c, c, c, 0, c, 0]),
        ShapeId::Y => (4, vec![0, c, c, c, 0, c, 0, c]),
        ShapeId::Z => (3, vec![c, c, 0, 0, c, 0, 0, c, c]),
    };
    Matrix::from_parts(rows, cells)
}
