//! Pentomino puzzle engine (workspace facade crate).
//!
//! This package keeps a single `pentomino::{core,engine,adapter,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.

pub use pentomino_adapter as adapter;
pub use pentomino_core as core;
pub use pentomino_engine as engine;
pub use pentomino_types as types;
