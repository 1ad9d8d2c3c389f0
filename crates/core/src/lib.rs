//! Core state engine - pure, deterministic, and testable
//!
//! This crate owns the world model for one puzzle level: entities, their
//! typed components, the query engine over them, the matrix encoding shared
//! by shapes and the board, and the shape lifecycle state machine. It has
//! zero dependencies on rendering, input devices, or I/O.
//!
//! # Module Structure
//!
//! - [`component`]: the tagged component schema (one variant per kind)
//! - [`entity`]: an id plus at most one component per kind
//! - [`store`]: normalized entity collection with include/exclude queries
//! - [`matrix`]: flat row-major grids with rotate/mirror/merge transforms
//! - [`shapes`]: the twelve canonical pentomino definitions
//! - [`level`]: level definitions and entity-set construction
//! - [`session`]: the per-level world and its lifecycle transitions
//! - [`snapshot`]: cloned observable state for renderers
//!
//! # Example
//!
//! ```
//! use pentomino_core::{GameSession, LevelDef};
//! use pentomino_types::ShapeId;
//!
//! let def = LevelDef::from_size_token("5x5", vec![ShapeId::W]).unwrap();
//! let mut session = GameSession::new(&def).unwrap();
//!
//! session.pick_shape(ShapeId::W);
//! session.move_pointer(148.0, 148.0);
//! session.rotate_shape(ShapeId::W);
//!
//! assert_eq!(session.active_shape_id(), Some(ShapeId::W));
//! ```

pub mod component;
pub mod entity;
pub mod level;
pub mod matrix;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod store;

pub use pentomino_types as types;

// Re-export commonly used types for convenience
pub use component::Component;
pub use entity::Entity;
pub use level::{BoardDef, LevelDef, LevelError};
pub use matrix::{Matrix, MatrixError};
pub use session::GameSession;
pub use shapes::library_matrix;
pub use snapshot::{SessionSnapshot, ShapeSnapshot, ShapeState};
pub use store::{EntityStore, StoreError};
