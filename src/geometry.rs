use std::fmt;
use std::ops::{Add, Sub};

/// A board position. `x` is the column, `y` is the row, `(0, 0)` is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Anchor of an occupant that is not on any board.
    pub const UNPLACED: Coordinate = Coordinate { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    pub fn manhattan_distance(self, other: Coordinate) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn euclidean_distance(self, other: Coordinate) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn chebyshev_distance(self, other: Coordinate) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Coordinate { x, y }
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Direction> for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Direction) -> Coordinate {
        self + rhs.delta()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

pub const CARDINAL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

impl Direction {
    pub const UP: Direction = Direction::North;
    pub const DOWN: Direction = Direction::South;
    pub const LEFT: Direction = Direction::West;
    pub const RIGHT: Direction = Direction::East;

    pub fn delta(&self) -> Coordinate {
        let (dx, dy) = match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        };
        Coordinate::new(dx, dy)
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    pub fn is_diagonal(&self) -> bool {
        let delta = self.delta();
        delta.x != 0 && delta.y != 0
    }

    /// Parse a move letter: `U`/`D`/`L`/`R` or compass `N`/`S`/`E`/`W`, any case.
    pub fn from_char(ch: char) -> Option<Direction> {
        match ch.to_ascii_uppercase() {
            'U' | 'N' => Some(Direction::North),
            'D' | 'S' => Some(Direction::South),
            'R' | 'E' => Some(Direction::East),
            'L' | 'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "North"),
            Direction::South => write!(f, "South"),
            Direction::East => write!(f, "East"),
            Direction::West => write!(f, "West"),
            Direction::NorthEast => write!(f, "NorthEast"),
            Direction::NorthWest => write!(f, "NorthWest"),
            Direction::SouthEast => write!(f, "SouthEast"),
            Direction::SouthWest => write!(f, "SouthWest"),
        }
    }
}
