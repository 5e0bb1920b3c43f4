//! A grid puzzle engine: boards of positioned, possibly multi-cell occupants,
//! overwrite-policy moves with chained pushes, and A* pathfinding over the
//! same occupancy rules.

pub mod board;
pub mod error;
pub mod geometry;
pub mod glyphs;
pub mod heuristic;
pub mod movement;
pub mod occupant;
pub mod pathfinding;
pub mod pqueue;
pub mod region;
pub mod shape;
pub mod zobrist;

pub use board::{Board, Snapshot};
pub use error::{GridError, Result};
pub use geometry::{ALL_DIRECTIONS, CARDINAL_DIRECTIONS, Coordinate, Direction};
pub use glyphs::{GlyphTable, GlyphTableBuilder, OccupantFactory};
pub use heuristic::{Chebyshev, Euclidean, Heuristic, Manhattan, NullHeuristic};
pub use movement::{MAX_PUSH_CHAIN, OverwriteBehavior};
pub use occupant::{Capabilities, Occupant, OccupantId, OccupantKind};
pub use pathfinding::{Path, Pathfinder, avoiding, only_empty, uniform_cost, walkable};
pub use region::{Color, Region};
pub use shape::Shape;
pub use zobrist::Zobrist;
