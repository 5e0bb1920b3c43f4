use std::collections::BTreeSet;
use std::fmt;

use crate::geometry::Coordinate;

/// Terminal background colour a renderer may use for a region. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGray,
}

impl Color {
    /// ANSI SGR background code.
    pub fn ansi_background(&self) -> u8 {
        match self {
            Color::Black => 40,
            Color::Red => 41,
            Color::Green => 42,
            Color::Yellow => 43,
            Color::Blue => 44,
            Color::Magenta => 45,
            Color::Cyan => 46,
            Color::White => 47,
            Color::DarkGray => 100,
        }
    }
}

/// A named set of cells. Purely a labelling overlay: regions place no
/// constraint on what occupies their cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    name: String,
    color: Color,
    positions: BTreeSet<Coordinate>,
}

impl Region {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Region {
            name: name.into(),
            color,
            positions: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn positions(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.positions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        self.positions.contains(&pos)
    }

    pub fn add_position(&mut self, pos: Coordinate) {
        self.positions.insert(pos);
    }

    pub fn add_positions<I>(&mut self, positions: I)
    where
        I: IntoIterator,
        I::Item: Into<Coordinate>,
    {
        self.positions.extend(positions.into_iter().map(Into::into));
    }

    pub fn remove_position(&mut self, pos: Coordinate) -> bool {
        self.positions.remove(&pos)
    }

    /// Add every cell of the rectangle spanned by two corners, inclusive.
    pub fn add_rectangle(&mut self, a: Coordinate, b: Coordinate) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                self.positions.insert(Coordinate::new(x, y));
            }
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} cells)", self.name, self.positions.len())
    }
}
