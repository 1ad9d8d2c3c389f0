//! Matrix module - flat row-major grid encoding for shapes and the board
//!
//! Uses a flat vector for cache locality; coordinates are (x, y) with x as the
//! column (left to right) and y as the row (top to bottom). Cell value 0 means
//! empty; a nonzero value is the cell code of the owning shape.

/// Construction failure for a grid whose flat data does not describe a
/// rectangle. Fatal at level-load time since it indicates corrupt level data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    MalformedMatrix { rows: usize, len: usize },
}

impl MatrixError {
    pub fn code(self) -> &'static str {
        match self {
            MatrixError::MalformedMatrix { .. } => "malformed_matrix",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MatrixError::MalformedMatrix { .. } => {
                "matrix length is not divisible by its row count"
            }
        }
    }
}

/// A rectangular grid stored as a flat row-major array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cells: Vec<u8>,
}

impl Matrix {
    /// Create a matrix from flat row-major cells.
    /// Fails when `cells.len()` is not a positive multiple of `rows`.
    pub fn new(rows: usize, cells: Vec<u8>) -> Result<Self, MatrixError> {
        if rows == 0 || cells.is_empty() || cells.len() % rows != 0 {
            return Err(MatrixError::MalformedMatrix {
                rows,
                len: cells.len(),
            });
        }
        Ok(Self { rows, cells })
    }

    /// Create an all-empty matrix
    pub fn zeroed(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            cells: vec![0; rows * columns],
        }
    }

    /// Construct from parts known to be rectangular (library shape tables).
    pub(crate) fn from_parts(rows: usize, cells: Vec<u8>) -> Self {
        debug_assert!(rows > 0 && !cells.is_empty() && cells.len() % rows == 0);
        Self { rows, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.cells.len() / self.rows
    }

    /// Flat row-major cell data
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.columns() as i32 || y < 0 || y >= self.rows as i32 {
            return None;
        }
        Some((y as usize) * self.columns() + (x as usize))
    }

    /// Get cell at (x, y). Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// True iff every cell is occupied (nonzero, regardless of owner).
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|&cell| cell != 0)
    }

    /// Count of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Rotate 90 degrees clockwise. An `rows x columns` matrix becomes
    /// `columns x rows`; the remap is `out[j*rows + (rows-1-i)] = in[i*cols+j]`.
    pub fn rotated_cw(&self) -> Matrix {
        let rows = self.rows;
        let cols = self.columns();
        let mut out = vec![0u8; self.cells.len()];
        for i in 0..rows {
            for j in 0..cols {
                out[j * rows + (rows - 1 - i)] = self.cells[i * cols + j];
            }
        }
        Matrix {
            rows: cols,
            cells: out,
        }
    }

    /// Mirror horizontally: reverse the column order of every row.
    pub fn mirrored(&self) -> Matrix {
        let cols = self.columns();
        let mut out = self.cells.clone();
        for row in out.chunks_mut(cols) {
            row.reverse();
        }
        Matrix {
            rows: self.rows,
            cells: out,
        }
    }

    /// Write `shape`'s nonzero cells into a copy of this matrix with the
    /// shape's top-left mapped to `(cell_x, cell_y)`. Returns None when any
    /// nonzero cell would land out of bounds or on an occupied cell; the
    /// receiver is never modified.
    pub fn overlay(&self, shape: &Matrix, cell_x: i32, cell_y: i32) -> Option<Matrix> {
        let mut merged = self.clone();
        let shape_cols = shape.columns();
        for (i, row) in shape.cells.chunks(shape_cols).enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let x = cell_x + j as i32;
                let y = cell_y + i as i32;
                match merged.get(x, y) {
                    Some(0) => {
                        merged.set(x, y, value);
                    }
                    _ => return None,
                }
            }
        }
        Some(merged)
    }
}
