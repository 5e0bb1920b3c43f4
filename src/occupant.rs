use std::fmt;

use crate::error::Result;
use crate::geometry::Coordinate;
use crate::shape::Shape;

/// Handle to an occupant owned by a [`Board`](crate::board::Board).
///
/// Handles are never reused within a board, so a stale handle resolves to
/// nothing rather than to a different occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccupantId(pub(crate) u32);

impl OccupantId {
    /// The board's shared Empty occupant.
    pub const EMPTY: OccupantId = OccupantId(0);

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OccupantKind {
    Empty,
    Wall,
    Symbol,
    Player,
    Box,
    Compound,
}

impl OccupantKind {
    pub(crate) const COUNT: usize = 6;

    pub(crate) fn index(&self) -> usize {
        match self {
            OccupantKind::Empty => 0,
            OccupantKind::Wall => 1,
            OccupantKind::Symbol => 2,
            OccupantKind::Player => 3,
            OccupantKind::Box => 4,
            OccupantKind::Compound => 5,
        }
    }
}

impl fmt::Display for OccupantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccupantKind::Empty => write!(f, "empty"),
            OccupantKind::Wall => write!(f, "wall"),
            OccupantKind::Symbol => write!(f, "symbol"),
            OccupantKind::Player => write!(f, "player"),
            OccupantKind::Box => write!(f, "box"),
            OccupantKind::Compound => write!(f, "compound"),
        }
    }
}

/// What other occupants may do to this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// May move itself, and may be displaced by a swap.
    pub movable: bool,
    /// May be overwritten by a replacing move or by the leading edge of a push.
    pub replaceable: bool,
    /// May be shoved one cell along by a push.
    pub pushable: bool,
}

impl Capabilities {
    pub const fn new(movable: bool, replaceable: bool, pushable: bool) -> Self {
        Capabilities {
            movable,
            replaceable,
            pushable,
        }
    }
}

/// An entity that fills one or more board cells.
///
/// `position` is the anchor (top-left cell of the shape) and is maintained by
/// the board; occupants outside a board report [`Coordinate::UNPLACED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    kind: OccupantKind,
    shape: Shape,
    capabilities: Capabilities,
    position: Coordinate,
}

impl Occupant {
    pub fn new(kind: OccupantKind, shape: Shape, capabilities: Capabilities) -> Self {
        Occupant {
            kind,
            shape,
            capabilities,
            position: Coordinate::UNPLACED,
        }
    }

    pub fn empty() -> Self {
        Self::new(OccupantKind::Empty, Shape::single('.'), Capabilities::new(false, true, false))
    }

    pub fn wall() -> Self {
        Self::new(OccupantKind::Wall, Shape::single('#'), Capabilities::new(false, false, false))
    }

    /// A fixed marker showing `glyph`.
    pub fn symbol(glyph: char) -> Self {
        Self::new(OccupantKind::Symbol, Shape::single(glyph), Capabilities::new(false, false, false))
    }

    pub fn player() -> Self {
        Self::player_with_glyph('@')
    }

    pub fn player_with_glyph(glyph: char) -> Self {
        Self::new(OccupantKind::Player, Shape::single(glyph), Capabilities::new(true, false, false))
    }

    pub fn crate_box() -> Self {
        Self::box_with_glyph('O')
    }

    pub fn box_with_glyph(glyph: char) -> Self {
        Self::new(OccupantKind::Box, Shape::single(glyph), Capabilities::new(true, false, true))
    }

    /// A multi-cell object. Movable, neither replaceable nor pushable.
    pub fn compound(shape: Shape) -> Self {
        Self::new(OccupantKind::Compound, shape, Capabilities::new(true, false, false))
    }

    /// The stock 3x3 compound object.
    pub fn big_box() -> Result<Self> {
        Ok(Self::compound(Shape::filled('~', 3, 3)?))
    }

    /// Replace the default capability set.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn kind(&self) -> OccupantKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn is_empty(&self) -> bool {
        self.kind == OccupantKind::Empty
    }

    pub fn is_movable(&self) -> bool {
        self.capabilities.movable
    }

    pub fn is_replaceable(&self) -> bool {
        self.capabilities.replaceable
    }

    pub fn is_pushable(&self) -> bool {
        self.capabilities.pushable
    }

    pub fn set_movable(&mut self, movable: bool) {
        self.capabilities.movable = movable;
    }

    pub fn set_replaceable(&mut self, replaceable: bool) {
        self.capabilities.replaceable = replaceable;
    }

    pub fn set_pushable(&mut self, pushable: bool) {
        self.capabilities.pushable = pushable;
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn is_placed(&self) -> bool {
        self.position != Coordinate::UNPLACED
    }

    pub(crate) fn set_position(&mut self, position: Coordinate) {
        self.position = position;
    }

    /// Glyph at the shape's top-left cell; the identity glyph for text import.
    pub fn display_char(&self) -> char {
        self.shape.display_char()
    }

    /// Cells covered at the current anchor. Empty when unplaced.
    pub fn occupied_positions(&self) -> Vec<Coordinate> {
        if !self.is_placed() {
            return Vec::new();
        }
        self.shape.occupied_positions(self.position).collect()
    }

    /// Glyph this occupant shows on the absolute cell `pos`.
    pub fn glyph_for_cell(&self, pos: Coordinate) -> Result<char> {
        self.shape
            .glyph_at(pos.x - self.position.x, pos.y - self.position.y)
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_char())
    }
}
