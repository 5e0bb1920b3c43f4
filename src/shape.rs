use crate::error::{GridError, Result};
use crate::geometry::Coordinate;

/// Rectangular footprint of an occupant, one display glyph per cell.
///
/// Immutable once built. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    glyphs: Vec<char>,
    width: usize,
    height: usize,
}

impl Shape {
    /// Build a shape from rows of glyphs. Every row must have the same,
    /// non-zero length.
    pub fn new(rows: Vec<Vec<char>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);

        if height == 0 || width == 0 {
            return Err(GridError::InvalidShape("pattern cannot be empty".to_string()));
        }
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(GridError::InvalidShape(format!(
                "pattern must be rectangular: row {} has {} glyphs, expected {}",
                y,
                row.len(),
                width
            )));
        }

        Ok(Shape {
            glyphs: rows.into_iter().flatten().collect(),
            width,
            height,
        })
    }

    /// A 1x1 shape.
    pub fn single(glyph: char) -> Self {
        Shape {
            glyphs: vec![glyph],
            width: 1,
            height: 1,
        }
    }

    /// A `width` x `height` shape where every cell shows `glyph`.
    pub fn filled(glyph: char, width: usize, height: usize) -> Result<Self> {
        Self::new(vec![vec![glyph; width]; height])
    }

    /// Parse newline-separated rows, e.g. `"~~~\n~~~\n~~~"`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(text.lines().map(|line| line.chars().collect()).collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_single_cell(&self) -> bool {
        self.glyphs.len() == 1
    }

    /// Glyph at the top-left cell.
    pub fn display_char(&self) -> char {
        self.glyphs[0]
    }

    pub fn glyph_at(&self, dx: i32, dy: i32) -> Result<char> {
        let in_range = dx >= 0 && dy >= 0 && (dx as usize) < self.width && (dy as usize) < self.height;
        if !in_range {
            return Err(GridError::OutOfRange {
                dx,
                dy,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.glyphs[dy as usize * self.width + dx as usize])
    }

    /// Absolute cells covered when the top-left cell sits on `anchor`.
    pub fn occupied_positions(&self, anchor: Coordinate) -> impl Iterator<Item = Coordinate> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |dy| (0..width).map(move |dx| Coordinate::new(anchor.x + dx, anchor.y + dy)))
    }
}
