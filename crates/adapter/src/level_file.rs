//! Level file format - JSON description consumed at load time
//!
//! A level file names a board (size token or explicit grid) and the tray
//! shapes. Parsing failures are fatal for the level being loaded and surface
//! as a "level failed to load" error to the host.

use anyhow::{anyhow, Result};
use serde::Deserialize;

use pentomino_core::level::parse_size_token;
use pentomino_core::{BoardDef, LevelDef};
use pentomino_types::ShapeId;

/// On-disk level description.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelFile {
    pub board: BoardField,
    pub shapes: Vec<String>,
    #[serde(default)]
    pub board_position: Option<[f32; 2]>,
}

/// Board description: a "5x5" size token or an explicit flat grid whose
/// nonzero cells are immovable blockers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BoardField {
    Token(String),
    Cells { rows: usize, cells: Vec<u8> },
}

/// Parse a level file from JSON.
pub fn parse_level(json: &str) -> Result<LevelDef> {
    let file: LevelFile =
        serde_json::from_str(json).map_err(|e| anyhow!("level failed to load: {}", e))?;
    level_def(&file)
}

/// Convert a parsed file into a core level definition.
pub fn level_def(file: &LevelFile) -> Result<LevelDef> {
    let shapes = file
        .shapes
        .iter()
        .map(|name| {
            ShapeId::from_str(name)
                .ok_or_else(|| anyhow!("level failed to load: unknown shape id \"{}\"", name))
        })
        .collect::<Result<Vec<_>>>()?;

    let board = match &file.board {
        BoardField::Token(token) => {
            let (rows, columns) = parse_size_token(token)
                .map_err(|e| anyhow!("level failed to load: {}", e.message()))?;
            BoardDef::Size { rows, columns }
        }
        BoardField::Cells { rows, cells } => BoardDef::Cells {
            rows: *rows,
            cells: cells.clone(),
        },
    };

    let board_position = match file.board_position {
        Some([x, y]) => (x, y),
        None => (0.0, 0.0),
    };

    Ok(LevelDef {
        board,
        shapes,
        board_position,
    })
}
