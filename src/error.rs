use thiserror::Error;

use crate::geometry::Coordinate;
use crate::occupant::OccupantId;

/// Errors surfaced by board construction, indexing and text import.
///
/// Illegal moves are not errors: the movement operations report them as
/// `false`. Only caller misuse reaches [`GridError::InvalidOperation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {pos} is outside the {width}x{height} board")]
    OutOfBounds {
        pos: Coordinate,
        width: usize,
        height: usize,
    },

    #[error("offset ({dx}, {dy}) is outside the {width}x{height} shape")]
    OutOfRange {
        dx: i32,
        dy: i32,
        width: usize,
        height: usize,
    },

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("glyph '{glyph}' is claimed by both `{first}` and `{second}`")]
    AmbiguousGlyph {
        glyph: char,
        first: String,
        second: String,
    },

    #[error("unknown glyph '{glyph}' at {pos}")]
    UnknownGlyph { glyph: char, pos: Coordinate },

    #[error("malformed board text: {0}")]
    MalformedBoard(String),

    #[error("footprint blocked at {0}")]
    Blocked(Coordinate),

    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("no occupant with handle {0}")]
    UnknownOccupant(OccupantId),

    #[error("shrinking {width}x{height} board to {new_width}x{new_height} discards cells; pass force")]
    ShrinkRequiresForce {
        width: usize,
        height: usize,
        new_width: usize,
        new_height: usize,
    },
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;
