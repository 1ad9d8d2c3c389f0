//! Component schema - the typed facets an entity can carry
//!
//! Every component is one variant of a single tagged enum; the variant is the
//! kind. Components are plain data with no behavior of their own.

use pentomino_types::{Angle, ComponentKind, ShapeId};

use crate::matrix::Matrix;

/// On-screen anchor in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Last pointer location attached to the shape being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mouse {
    pub mx: f32,
    pub my: f32,
}

/// Current rotation of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotate {
    pub angle: Angle,
}

impl Default for Rotate {
    fn default() -> Self {
        Self { angle: Angle::Deg0 }
    }
}

/// Current display scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio {
    pub ratio: f32,
}

impl Default for Ratio {
    fn default() -> Self {
        Self { ratio: 1.0 }
    }
}

/// Which sprite the renderer should draw. `None` means no sprite yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View {
    pub img: Option<ShapeId>,
}

/// Screen rectangle a tray slot occupies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HintBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl HintBox {
    /// Center of the slot rectangle
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Generic box size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Board cell a shape is locked into once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub cell_x: i32,
    pub cell_y: i32,
}

/// One typed facet of an entity's state. Tag variants carry no payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Position(Position),
    Mouse(Mouse),
    Rotate(Rotate),
    Ratio(Ratio),
    Matrix(Matrix),
    View(View),
    HintBox(HintBox),
    Size(Size),
    Placement(Placement),
    /// Marker: shape sits in the tray.
    InPack,
    /// Marker: shape is being dragged by the player.
    Active,
    /// Marker: shape is locked onto the board.
    Placed,
    /// Marker: shape has been mirrored from its library orientation.
    Mirrored,
}

impl Component {
    /// The kind tag of this component
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Mouse(_) => ComponentKind::Mouse,
            Component::Rotate(_) => ComponentKind::Rotate,
            Component::Ratio(_) => ComponentKind::Ratio,
            Component::Matrix(_) => ComponentKind::Matrix,
            Component::View(_) => ComponentKind::View,
            Component::HintBox(_) => ComponentKind::HintBox,
            Component::Size(_) => ComponentKind::Size,
            Component::Placement(_) => ComponentKind::Placement,
            Component::InPack => ComponentKind::InPack,
            Component::Active => ComponentKind::Active,
            Component::Placed => ComponentKind::Placed,
            Component::Mirrored => ComponentKind::Mirrored,
        }
    }
}
