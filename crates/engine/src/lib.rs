//! Placement engine - geometry checks and the intent reducer over the core
//! session. Pure decision logic; all component deltas are applied through the
//! session's transition methods.

pub mod place;

pub use place::{
    apply_intent, attempt_placement, can_place, is_board_filled, place, IntentOutcome, PlaceError,
    PlacementFit,
};
