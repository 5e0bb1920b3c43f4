use indexmap::IndexMap;

use crate::error::{GridError, Result};
use crate::geometry::Coordinate;
use crate::occupant::Occupant;

/// Builds a fresh occupant for a glyph.
pub type OccupantFactory = fn() -> Occupant;

const STANDARD: [(&str, OccupantFactory); 4] = [
    ("empty", Occupant::empty),
    ("wall", Occupant::wall),
    ("player", Occupant::player),
    ("box", Occupant::crate_box),
];

#[derive(Debug, Clone)]
struct GlyphEntry {
    label: String,
    factory: OccupantFactory,
}

/// Mapping from display glyph to the occupant it denotes in board text.
///
/// Collisions are rejected when the table is built, so a lookup is always
/// unambiguous.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    entries: IndexMap<char, GlyphEntry>,
}

impl GlyphTable {
    pub fn builder() -> GlyphTableBuilder {
        GlyphTableBuilder::default()
    }

    /// Build a new occupant for `glyph`, found at `pos` in the source text.
    pub fn create(&self, glyph: char, pos: Coordinate) -> Result<Occupant> {
        self.entries
            .get(&glyph)
            .map(|entry| (entry.factory)())
            .ok_or(GridError::UnknownGlyph { glyph, pos })
    }

    pub fn contains(&self, glyph: char) -> bool {
        self.entries.contains_key(&glyph)
    }

    pub fn label(&self, glyph: char) -> Option<&str> {
        self.entries.get(&glyph).map(|entry| entry.label.as_str())
    }

    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GlyphTable {
    /// Empty `.`, wall `#`, player `@` and box `O`.
    fn default() -> Self {
        let entries = STANDARD
            .into_iter()
            .map(|(label, factory)| {
                let entry = GlyphEntry {
                    label: label.to_string(),
                    factory,
                };
                (factory().display_char(), entry)
            })
            .collect();
        GlyphTable { entries }
    }
}

#[derive(Debug, Default)]
pub struct GlyphTableBuilder {
    registrations: Vec<(String, OccupantFactory)>,
}

impl GlyphTableBuilder {
    /// Register the standard empty, wall, player and box glyphs.
    pub fn with_defaults(mut self) -> Self {
        self.registrations
            .extend(STANDARD.into_iter().map(|(label, factory)| (label.to_string(), factory)));
        self
    }

    /// Register an occupant kind under the glyph its factory displays.
    pub fn register(mut self, label: impl Into<String>, factory: OccupantFactory) -> Self {
        self.registrations.push((label.into(), factory));
        self
    }

    pub fn build(self) -> Result<GlyphTable> {
        let mut entries: IndexMap<char, GlyphEntry> = IndexMap::new();

        for (label, factory) in self.registrations {
            let sample = factory();
            if !sample.shape().is_single_cell() {
                return Err(GridError::InvalidShape(format!(
                    "`{}` spans {}x{} cells; only single-cell occupants can be read from text",
                    label,
                    sample.shape().width(),
                    sample.shape().height()
                )));
            }

            let glyph = sample.display_char();
            if let Some(existing) = entries.get(&glyph) {
                return Err(GridError::AmbiguousGlyph {
                    glyph,
                    first: existing.label.clone(),
                    second: label,
                });
            }
            entries.insert(glyph, GlyphEntry { label, factory });
        }

        Ok(GlyphTable { entries })
    }
}
