//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (state engine, placement math, adapter protocol).
//!
//! # Pixel geometry
//!
//! All pixel math is floating point. Two constants govern placement:
//!
//! - `DEFAULT_CELL_SIZE`: 32.0 - pixels per grid cell before ratio scaling
//! - `EDGE_TOLERANCE`: 10.0 - inward bounds slack, scaled by the current ratio,
//!   so a piece resting almost exactly on the board edge still counts as inside

/// Pixels per grid cell at ratio 1.0.
pub const DEFAULT_CELL_SIZE: f32 = 32.0;

/// Bounds-check slack in pixels at ratio 1.0. The effective margin is
/// `EDGE_TOLERANCE * ratio` and loosens strict edge contact; it must not be
/// changed independently of the placement tests.
pub const EDGE_TOLERANCE: f32 = 10.0;

/// Side length of a tray slot in grid cells (every pentomino fits in 5x5).
pub const TRAY_SLOT_CELLS: usize = 5;

/// Gap between the board edge and the tray, in grid cells.
pub const TRAY_GAP_CELLS: usize = 1;

/// The twelve pentomino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    F,
    I,
    L,
    N,
    P,
    T,
    U,
    W,
    V,
    X,
    Y,
    Z,
}

/// All shapes in library order. The order fixes each shape's cell code.
pub const ALL_SHAPES: [ShapeId; 12] = [
    ShapeId::F,
    ShapeId::I,
    ShapeId::L,
    ShapeId::N,
    ShapeId::P,
    ShapeId::T,
    ShapeId::U,
    ShapeId::W,
    ShapeId::V,
    ShapeId::X,
    ShapeId::Y,
    ShapeId::Z,
];

impl ShapeId {
    /// Parse shape id from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "f" => Some(ShapeId::F),
            "i" => Some(ShapeId::I),
            "l" => Some(ShapeId::L),
            "n" => Some(ShapeId::N),
            "p" => Some(ShapeId::P),
            "t" => Some(ShapeId::T),
            "u" => Some(ShapeId::U),
            "w" => Some(ShapeId::W),
            "v" => Some(ShapeId::V),
            "x" => Some(ShapeId::X),
            "y" => Some(ShapeId::Y),
            "z" => Some(ShapeId::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeId::F => "f",
            ShapeId::I => "i",
            ShapeId::L => "l",
            ShapeId::N => "n",
            ShapeId::P => "p",
            ShapeId::T => "t",
            ShapeId::U => "u",
            ShapeId::W => "w",
            ShapeId::V => "v",
            ShapeId::X => "x",
            ShapeId::Y => "y",
            ShapeId::Z => "z",
        }
    }

    /// Nonzero cell code written into matrices owned by this shape.
    pub fn code(&self) -> u8 {
        match self {
            ShapeId::F => 1,
            ShapeId::I => 2,
            ShapeId::L => 3,
            ShapeId::N => 4,
            ShapeId::P => 5,
            ShapeId::T => 6,
            ShapeId::U => 7,
            ShapeId::W => 8,
            ShapeId::V => 9,
            ShapeId::X => 10,
            ShapeId::Y => 11,
            ShapeId::Z => 12,
        }
    }
}

/// Stable entity identity. The board is a well-known singleton; every shape
/// entity is keyed by its shape id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Board,
    Shape(ShapeId),
}

impl EntityId {
    /// Parse entity id from token ("BOARD", "SHAPE_W", case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if lower == "board" {
            return Some(EntityId::Board);
        }
        lower
            .strip_prefix("shape_")
            .and_then(ShapeId::from_str)
            .map(EntityId::Shape)
    }

    /// Convert to token string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityId::Board => "BOARD",
            EntityId::Shape(ShapeId::F) => "SHAPE_F",
            EntityId::Shape(ShapeId::I) => "SHAPE_I",
            EntityId::Shape(ShapeId::L) => "SHAPE_L",
            EntityId::Shape(ShapeId::N) => "SHAPE_N",
            EntityId::Shape(ShapeId::P) => "SHAPE_P",
            EntityId::Shape(ShapeId::T) => "SHAPE_T",
            EntityId::Shape(ShapeId::U) => "SHAPE_U",
            EntityId::Shape(ShapeId::W) => "SHAPE_W",
            EntityId::Shape(ShapeId::V) => "SHAPE_V",
            EntityId::Shape(ShapeId::X) => "SHAPE_X",
            EntityId::Shape(ShapeId::Y) => "SHAPE_Y",
            EntityId::Shape(ShapeId::Z) => "SHAPE_Z",
        }
    }
}

/// Component kinds. A kind appears at most once per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Position,
    Mouse,
    Rotate,
    Ratio,
    Matrix,
    View,
    HintBox,
    Size,
    Placement,
    InPack,
    Active,
    Placed,
    Mirrored,
}

/// Number of distinct component kinds; bounds per-entity component storage.
pub const COMPONENT_KIND_COUNT: usize = 13;

impl ComponentKind {
    /// Parse kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "position" => Some(ComponentKind::Position),
            "mouse" => Some(ComponentKind::Mouse),
            "rotate" => Some(ComponentKind::Rotate),
            "ratio" => Some(ComponentKind::Ratio),
            "matrix" => Some(ComponentKind::Matrix),
            "view" => Some(ComponentKind::View),
            "hintbox" => Some(ComponentKind::HintBox),
            "size" => Some(ComponentKind::Size),
            "placement" => Some(ComponentKind::Placement),
            "inpack" => Some(ComponentKind::InPack),
            "active" => Some(ComponentKind::Active),
            "placed" => Some(ComponentKind::Placed),
            "mirrored" => Some(ComponentKind::Mirrored),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Position => "position",
            ComponentKind::Mouse => "mouse",
            ComponentKind::Rotate => "rotate",
            ComponentKind::Ratio => "ratio",
            ComponentKind::Matrix => "matrix",
            ComponentKind::View => "view",
            ComponentKind::HintBox => "hintbox",
            ComponentKind::Size => "size",
            ComponentKind::Placement => "placement",
            ComponentKind::InPack => "inpack",
            ComponentKind::Active => "active",
            ComponentKind::Placed => "placed",
            ComponentKind::Mirrored => "mirrored",
        }
    }
}

/// Right-angle rotation states. No intermediate angles are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Angle {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Angle {
    /// Rotate 90 degrees clockwise
    pub fn rotated_cw(&self) -> Self {
        match self {
            Angle::Deg0 => Angle::Deg90,
            Angle::Deg90 => Angle::Deg180,
            Angle::Deg180 => Angle::Deg270,
            Angle::Deg270 => Angle::Deg0,
        }
    }

    /// Angle in degrees
    pub fn degrees(&self) -> u16 {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg90 => 90,
            Angle::Deg180 => 180,
            Angle::Deg270 => 270,
        }
    }

    /// Parse from degree value; only the four right angles are accepted
    pub fn from_degrees(deg: u16) -> Option<Self> {
        match deg {
            0 => Some(Angle::Deg0),
            90 => Some(Angle::Deg90),
            180 => Some(Angle::Deg180),
            270 => Some(Angle::Deg270),
            _ => None,
        }
    }
}

/// Player intents delivered by the input collaborator. Each intent produces
/// exactly one atomic state transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Pick a shape out of the tray and make it the active shape.
    Pick(ShapeId),
    /// Pointer moved while dragging; updates the active shape's mouse anchor.
    PointerMove { x: f32, y: f32 },
    /// Rotate the active shape 90 degrees clockwise.
    Rotate(ShapeId),
    /// Mirror the active shape horizontally.
    Mirror(ShapeId),
    /// Commit the active shape onto the board at the current pointer.
    Place,
    /// Return the active shape to the tray, resetting its orientation.
    Reset(ShapeId),
    /// Display scale changed; re-scale every entity that carries a ratio.
    SetRatio(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_id_roundtrip() {
        for shape in ALL_SHAPES {
            assert_eq!(ShapeId::from_str(shape.as_str()), Some(shape));
        }
        assert_eq!(ShapeId::from_str("W"), Some(ShapeId::W));
        assert_eq!(ShapeId::from_str("q"), None);
    }

    #[test]
    fn test_shape_codes_unique_and_nonzero() {
        let mut seen = [false; 13];
        for shape in ALL_SHAPES {
            let code = shape.code() as usize;
            assert!(code > 0 && code <= 12);
            assert!(!seen[code], "duplicate code {}", code);
            seen[code] = true;
        }
    }

    #[test]
    fn test_entity_id_tokens() {
        assert_eq!(EntityId::Board.as_str(), "BOARD");
        assert_eq!(EntityId::Shape(ShapeId::W).as_str(), "SHAPE_W");
        assert_eq!(EntityId::from_str("board"), Some(EntityId::Board));
        assert_eq!(
            EntityId::from_str("SHAPE_W"),
            Some(EntityId::Shape(ShapeId::W))
        );
        assert_eq!(EntityId::from_str("SHAPE_"), None);
    }

    #[test]
    fn test_angle_full_turn() {
        let mut angle = Angle::Deg0;
        for _ in 0..4 {
            angle = angle.rotated_cw();
        }
        assert_eq!(angle, Angle::Deg0);
    }

    #[test]
    fn test_angle_from_degrees_rejects_intermediate() {
        assert_eq!(Angle::from_degrees(90), Some(Angle::Deg90));
        assert_eq!(Angle::from_degrees(45), None);
        assert_eq!(Angle::from_degrees(360), None);
    }

    #[test]
    fn test_component_kind_roundtrip() {
        for kind in [
            ComponentKind::Position,
            ComponentKind::Mouse,
            ComponentKind::Matrix,
            ComponentKind::HintBox,
            ComponentKind::Mirrored,
        ] {
            assert_eq!(ComponentKind::from_str(kind.as_str()), Some(kind));
        }
    }
}
