use std::collections::HashSet;
use std::fmt;

use arrayvec::ArrayVec;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{GridError, Result};
use crate::geometry::{ALL_DIRECTIONS, CARDINAL_DIRECTIONS, Coordinate, Direction};
use crate::glyphs::GlyphTable;
use crate::occupant::{Occupant, OccupantId, OccupantKind};
use crate::region::{Color, Region};

/// A `width` x `height` grid where every cell references exactly one occupant.
///
/// The board owns its occupants; callers hold [`OccupantId`] handles. Free
/// cells reference the shared [`OccupantId::EMPTY`]. Every other placed
/// occupant is referenced by exactly the cells of its shape at its anchor.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    // Row-major, indexed by y * width + x
    cells: Vec<OccupantId>,
    // Arena indexed by handle; slot 0 is the shared Empty occupant
    occupants: Vec<Option<Occupant>>,
    regions: IndexMap<String, Region>,
}

/// A whole-board copy taken by [`Board::snapshot`].
#[derive(Debug, Clone)]
pub struct Snapshot(Board);

impl Snapshot {
    pub fn board(&self) -> &Board {
        &self.0
    }
}

impl Board {
    /// Create a board with every cell Empty.
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![OccupantId::EMPTY; width * height],
            occupants: vec![Some(Occupant::empty())],
            regions: IndexMap::new(),
        }
    }

    /// Parse board text using the standard glyph table.
    ///
    /// Characters:
    /// - `.` = Empty
    /// - `#` = Wall
    /// - `@` = Player
    /// - `O` = Box
    pub fn load_state(text: &str) -> Result<Self> {
        Self::load_state_with(text, &GlyphTable::default())
    }

    /// Parse newline-separated rows of equal length, one glyph per cell.
    pub fn load_state_with(text: &str, glyphs: &GlyphTable) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();

        if lines.is_empty() {
            return Err(GridError::MalformedBoard("empty board".to_string()));
        }

        let height = lines.len();
        let width = lines[0].chars().count();
        if width == 0 {
            return Err(GridError::MalformedBoard("first row is empty".to_string()));
        }
        if let Some((y, line)) = lines
            .iter()
            .enumerate()
            .find(|(_, line)| line.chars().count() != width)
        {
            return Err(GridError::MalformedBoard(format!(
                "row {} has {} glyphs, expected {}",
                y,
                line.chars().count(),
                width
            )));
        }

        let mut board = Board::new(width, height);
        for (y, line) in lines.iter().enumerate() {
            for (x, glyph) in line.chars().enumerate() {
                let pos = Coordinate::new(x as i32, y as i32);
                let occupant = glyphs.create(glyph, pos)?;
                if occupant.is_empty() {
                    continue;
                }
                board.spawn(occupant, pos)?;
            }
        }

        Ok(board)
    }

    /// Render one glyph per cell, one line per row. Multi-cell occupants
    /// show the glyph at each cell's offset from their anchor.
    pub fn save_state(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Coordinate::new(x as i32, y as i32);
                text.push(self.glyph_at(pos).unwrap_or('?'));
            }
            text.push('\n');
        }
        text
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Coordinate) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Coordinate) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    fn checked_index(&self, pos: Coordinate) -> Result<usize> {
        self.index(pos).ok_or(GridError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        })
    }

    /// Handle stored in `pos`, or `None` outside the board.
    pub(crate) fn cell(&self, pos: Coordinate) -> Option<OccupantId> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// Handle of the occupant covering `pos`.
    pub fn id_at(&self, pos: Coordinate) -> Result<OccupantId> {
        self.checked_index(pos).map(|index| self.cells[index])
    }

    /// Occupant covering `pos`.
    pub fn get(&self, pos: Coordinate) -> Result<&Occupant> {
        let id = self.id_at(pos)?;
        self.resolve(id)
    }

    /// Glyph shown at `pos`. Multi-cell occupants show the glyph at the
    /// cell's offset from their anchor; free cells show the Empty glyph.
    pub fn glyph_at(&self, pos: Coordinate) -> Result<char> {
        let occupant = self.get(pos)?;
        if occupant.is_empty() {
            return Ok(occupant.display_char());
        }
        occupant.glyph_for_cell(pos)
    }

    pub fn is_empty_at(&self, pos: Coordinate) -> Result<bool> {
        Ok(self.id_at(pos)?.is_empty())
    }

    pub fn occupant(&self, id: OccupantId) -> Option<&Occupant> {
        self.occupants.get(id.0 as usize)?.as_ref()
    }

    /// Mutable access for capability changes. The shared Empty occupant is
    /// not available.
    pub fn occupant_mut(&mut self, id: OccupantId) -> Option<&mut Occupant> {
        if id.is_empty() {
            return None;
        }
        self.occupants.get_mut(id.0 as usize)?.as_mut()
    }

    pub(crate) fn resolve(&self, id: OccupantId) -> Result<&Occupant> {
        self.occupant(id).ok_or(GridError::UnknownOccupant(id))
    }

    /// Hand an occupant to the board without placing it.
    ///
    /// Handles are never reused, so the arena grows by one slot per insert
    /// and discarded slots stay behind as `None`. Long sessions that discard
    /// many occupants should rebuild the board from `save_state` text.
    pub fn insert(&mut self, mut occupant: Occupant) -> OccupantId {
        occupant.set_position(Coordinate::UNPLACED);
        let id = OccupantId(self.occupants.len() as u32);
        self.occupants.push(Some(occupant));
        id
    }

    /// Put an unplaced occupant on the board with its top-left cell at `anchor`.
    ///
    /// Fails with [`GridError::Blocked`] unless every cell of the footprint is
    /// on the board and Empty. Nothing is written on failure.
    pub fn place(&mut self, id: OccupantId, anchor: Coordinate) -> Result<()> {
        let occupant = self.resolve(id)?;
        if occupant.is_empty() {
            return Err(GridError::InvalidOperation("the empty occupant cannot be placed"));
        }
        if occupant.is_placed() {
            return Err(GridError::InvalidOperation("occupant is already placed; move it instead"));
        }

        let footprint: Vec<Coordinate> = occupant.shape().occupied_positions(anchor).collect();
        for &pos in &footprint {
            match self.cell(pos) {
                Some(existing) if existing.is_empty() => {}
                _ => {
                    debug!("Placement of {} at {} blocked at {}", id, anchor, pos);
                    return Err(GridError::Blocked(pos));
                }
            }
        }

        self.write_footprint(id, anchor);
        Ok(())
    }

    /// Insert and place in one step. The occupant is dropped if placement fails.
    pub fn spawn(&mut self, occupant: Occupant, anchor: Coordinate) -> Result<OccupantId> {
        let id = self.insert(occupant);
        if let Err(err) = self.place(id, anchor) {
            // Never handed out, so the slot can be reclaimed
            self.occupants.pop();
            return Err(err);
        }
        Ok(id)
    }

    /// Take an occupant off the board, leaving Empty behind. The occupant
    /// stays owned by the board, unplaced, and may be placed again.
    pub fn remove(&mut self, id: OccupantId) -> Result<()> {
        if id.is_empty() {
            return Ok(());
        }
        let footprint = self.resolve(id)?.occupied_positions();
        for pos in footprint {
            if let Some(index) = self.index(pos) {
                if self.cells[index] == id {
                    self.cells[index] = OccupantId::EMPTY;
                }
            }
        }
        if let Some(occupant) = self.occupants[id.0 as usize].as_mut() {
            occupant.set_position(Coordinate::UNPLACED);
        }
        Ok(())
    }

    /// Remove an occupant and release it from the board entirely.
    pub fn discard(&mut self, id: OccupantId) -> Result<Occupant> {
        if id.is_empty() {
            return Err(GridError::InvalidOperation("the empty occupant cannot be discarded"));
        }
        self.remove(id)?;
        self.occupants[id.0 as usize]
            .take()
            .ok_or(GridError::UnknownOccupant(id))
    }

    /// Assign a single-cell occupant (or Empty) to one cell.
    ///
    /// An occupant already placed elsewhere is moved; a single-cell occupant
    /// previously in `pos` becomes unplaced. Multi-cell occupants can neither
    /// be assigned nor partially overwritten this way.
    pub fn set(&mut self, pos: Coordinate, id: OccupantId) -> Result<()> {
        let index = self.checked_index(pos)?;
        let incoming = self.resolve(id)?;
        if !incoming.shape().is_single_cell() {
            return Err(GridError::InvalidOperation(
                "multi-cell occupants must be placed, not assigned to a cell",
            ));
        }

        let existing = self.cells[index];
        if existing == id {
            return Ok(());
        }
        if !existing.is_empty() {
            if !self.resolve(existing)?.shape().is_single_cell() {
                return Err(GridError::InvalidOperation(
                    "cannot overwrite one cell of a multi-cell occupant",
                ));
            }
            self.remove(existing)?;
        }

        if id.is_empty() {
            self.cells[index] = OccupantId::EMPTY;
            return Ok(());
        }

        self.remove(id)?;
        self.write_footprint(id, pos);
        Ok(())
    }

    /// Set `pos` back to Empty.
    pub fn clear(&mut self, pos: Coordinate) -> Result<()> {
        self.set(pos, OccupantId::EMPTY)
    }

    pub fn footprint(&self, id: OccupantId) -> Result<Vec<Coordinate>> {
        Ok(self.resolve(id)?.occupied_positions())
    }

    fn write_footprint(&mut self, id: OccupantId, anchor: Coordinate) {
        let footprint: Vec<Coordinate> = match self.occupant(id) {
            Some(occupant) => occupant.shape().occupied_positions(anchor).collect(),
            None => return,
        };
        for pos in footprint {
            if let Some(index) = self.index(pos) {
                self.cells[index] = id;
            }
        }
        if let Some(occupant) = self.occupants[id.0 as usize].as_mut() {
            occupant.set_position(anchor);
        }
    }

    /// Move a batch of occupants to new anchors in one step: every old
    /// footprint is vacated before any new footprint is written.
    ///
    /// The caller guarantees every destination cell is Empty or vacated by
    /// the batch.
    pub(crate) fn relocate_all(&mut self, plan: &[(OccupantId, Coordinate)]) {
        for &(id, _) in plan {
            let footprint = self.occupant(id).map(Occupant::occupied_positions).unwrap_or_default();
            for pos in footprint {
                if let Some(index) = self.index(pos) {
                    if self.cells[index] == id {
                        self.cells[index] = OccupantId::EMPTY;
                    }
                }
            }
        }
        for &(id, anchor) in plan {
            self.write_footprint(id, anchor);
        }
    }

    pub(crate) fn relocate(&mut self, id: OccupantId, anchor: Coordinate) {
        self.relocate_all(&[(id, anchor)]);
    }

    pub fn get_row(&self, y: i32) -> Result<Vec<OccupantId>> {
        let start = self.checked_index(Coordinate::new(0, y))?;
        Ok(self.cells[start..start + self.width].to_vec())
    }

    pub fn get_column(&self, x: i32) -> Result<Vec<OccupantId>> {
        self.checked_index(Coordinate::new(x, 0))?;
        Ok((0..self.height)
            .map(|y| self.cells[y * self.width + x as usize])
            .collect())
    }

    /// Rows of handles covering the rectangle spanned by two corners,
    /// inclusive. Cells off the board read as Empty.
    pub fn get_area(&self, a: Coordinate, b: Coordinate) -> Vec<Vec<OccupantId>> {
        (a.y.min(b.y)..=a.y.max(b.y))
            .map(|y| {
                (a.x.min(b.x)..=a.x.max(b.x))
                    .map(|x| self.cell(Coordinate::new(x, y)).unwrap_or(OccupantId::EMPTY))
                    .collect()
            })
            .collect()
    }

    /// Paste a block of single-cell occupants (or Empty) with its top-left
    /// cell at `anchor`, one [`Board::set`] per cell. Cells that fall off
    /// the board are skipped.
    ///
    /// Fails before writing anything if a handle does not resolve, names a
    /// multi-cell occupant, or would overwrite part of a multi-cell occupant.
    pub fn set_area(&mut self, anchor: Coordinate, rows: &[Vec<OccupantId>]) -> Result<()> {
        let mut writes = Vec::new();
        for (dy, row) in rows.iter().enumerate() {
            for (dx, &id) in row.iter().enumerate() {
                let pos = Coordinate::new(anchor.x + dx as i32, anchor.y + dy as i32);
                let Some(existing) = self.cell(pos) else {
                    continue;
                };
                if !self.resolve(id)?.shape().is_single_cell() {
                    return Err(GridError::InvalidOperation(
                        "multi-cell occupants must be placed, not assigned to a cell",
                    ));
                }
                if existing != id && !self.resolve(existing)?.shape().is_single_cell() {
                    return Err(GridError::InvalidOperation(
                        "cannot overwrite one cell of a multi-cell occupant",
                    ));
                }
                writes.push((pos, id));
            }
        }

        for (pos, id) in writes {
            self.set(pos, id)?;
        }
        Ok(())
    }

    /// Empty every cell. Occupants stay owned by the board, unplaced.
    pub fn clear_all(&mut self) {
        self.cells.fill(OccupantId::EMPTY);
        for occupant in self.occupants.iter_mut().skip(1).flatten() {
            occupant.set_position(Coordinate::UNPLACED);
        }
    }

    /// Remove every occupant touching the rectangle spanned by two corners.
    /// Returns the handles removed; they remain owned by the board, unplaced.
    pub fn clear_area(&mut self, a: Coordinate, b: Coordinate) -> Vec<OccupantId> {
        let mut removed = Vec::new();
        for row in self.get_area(a, b) {
            for id in row {
                if !id.is_empty() && !removed.contains(&id) {
                    removed.push(id);
                }
            }
        }
        for &id in &removed {
            // Every handle came from a cell, so it resolves
            let _ = self.remove(id);
        }
        removed
    }

    /// Walk a Bresenham line from `start` towards `end`, collecting each cell.
    ///
    /// Stops at the board edge, at `end`, or after the first cell whose
    /// occupant kind is listed in `blockers` (that cell is included).
    pub fn get_line(
        &self,
        start: Coordinate,
        end: Coordinate,
        blockers: &[OccupantKind],
    ) -> Vec<(Coordinate, OccupantId)> {
        let mut line = Vec::new();
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        let sx = if start.x < end.x { 1 } else { -1 };
        let sy = if start.y < end.y { 1 } else { -1 };
        let mut err = dx - dy;
        let mut pos = start;

        loop {
            let Some(id) = self.cell(pos) else {
                break;
            };
            line.push((pos, id));
            let blocked = self
                .occupant(id)
                .is_some_and(|occupant| blockers.contains(&occupant.kind()));
            if blocked || pos == end {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                pos.x += sx;
            }
            if e2 < dx {
                err += dx;
                pos.y += sy;
            }
        }

        line
    }

    /// In-bounds neighbouring cells, cardinal first, then diagonals if asked.
    pub fn find_neighbors(&self, pos: Coordinate, diagonals: bool) -> ArrayVec<(Coordinate, OccupantId), 8> {
        self.neighbor_positions(pos, diagonals)
            .into_iter()
            .filter_map(|next| self.cell(next).map(|id| (next, id)))
            .collect()
    }

    pub(crate) fn neighbor_positions(&self, pos: Coordinate, diagonals: bool) -> ArrayVec<Coordinate, 8> {
        let directions: &[Direction] = if diagonals {
            &ALL_DIRECTIONS
        } else {
            &CARDINAL_DIRECTIONS
        };
        directions
            .iter()
            .map(|&dir| pos + dir)
            .filter(|&next| self.in_bounds(next))
            .collect()
    }

    /// Every placed occupant of `kind` with its anchor, in row-major anchor
    /// order. For [`OccupantKind::Empty`] this lists every free cell.
    pub fn find_objects_of_type(&self, kind: OccupantKind) -> Vec<(OccupantId, Coordinate)> {
        let mut found = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Coordinate::new(x as i32, y as i32);
                let id = self.cells[y * self.width + x];
                let Some(occupant) = self.occupant(id) else {
                    continue;
                };
                if occupant.kind() != kind {
                    continue;
                }
                // Report multi-cell occupants once, at their anchor
                if id.is_empty() || occupant.position() == pos {
                    found.push((id, pos));
                }
            }
        }
        found
    }

    /// Placed occupants other than Empty, in handle order.
    pub fn occupants(&self) -> impl Iterator<Item = (OccupantId, &Occupant)> + '_ {
        self.occupants
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, slot)| {
                let occupant = slot.as_ref()?;
                occupant
                    .is_placed()
                    .then_some((OccupantId(index as u32), occupant))
            })
    }

    /// Check the single-ownership invariant: each placed occupant is
    /// referenced by exactly the cells of its footprint, and nothing else is
    /// referenced.
    pub fn is_consistent(&self) -> bool {
        for y in 0..self.height {
            for x in 0..self.width {
                let id = self.cells[y * self.width + x];
                if id.is_empty() {
                    continue;
                }
                let Some(occupant) = self.occupant(id) else {
                    return false;
                };
                let pos = Coordinate::new(x as i32, y as i32);
                if !occupant.occupied_positions().contains(&pos) {
                    return false;
                }
            }
        }

        self.occupants().all(|(id, occupant)| {
            occupant
                .occupied_positions()
                .into_iter()
                .all(|pos| self.cell(pos) == Some(id))
        })
    }

    /// Change the board dimensions. Growing fills new cells with Empty.
    /// Shrinking requires `force`; occupants that no longer fit are removed.
    pub fn resize(&mut self, width: usize, height: usize, force: bool) -> Result<()> {
        if (width < self.width || height < self.height) && !force {
            return Err(GridError::ShrinkRequiresForce {
                width: self.width,
                height: self.height,
                new_width: width,
                new_height: height,
            });
        }

        let fits = |pos: Coordinate| (pos.x as usize) < width && (pos.y as usize) < height;
        let evicted: Vec<OccupantId> = self
            .occupants()
            .filter(|(_, occupant)| !occupant.occupied_positions().into_iter().all(|pos| fits(pos)))
            .map(|(id, _)| id)
            .collect();
        for &id in &evicted {
            warn!("Resize to {}x{} removed occupant {} from the board", width, height, id);
            self.remove(id)?;
        }

        let mut cells = vec![OccupantId::EMPTY; width * height];
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                cells[y * width + x] = self.cells[y * self.width + x];
            }
        }
        self.cells = cells;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Add a region, or recolour the existing region with that name.
    pub fn add_region(&mut self, name: impl Into<String>, color: Color) -> &mut Region {
        let name = name.into();
        let region = self
            .regions
            .entry(name.clone())
            .or_insert_with(|| Region::new(name, color));
        region.set_color(color);
        region
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    pub fn region_mut(&mut self, name: &str) -> Option<&mut Region> {
        self.regions.get_mut(name)
    }

    pub fn remove_region(&mut self, name: &str) -> Option<Region> {
        self.regions.shift_remove(name)
    }

    /// Regions in the order they were added.
    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.values()
    }

    /// First region (in insertion order) containing `pos`.
    pub fn get_region_at(&self, pos: Coordinate) -> Option<&Region> {
        self.regions.values().find(|region| region.contains(pos))
    }

    /// Cells claimed by more than one region.
    pub fn overlapping_cells(&self) -> Vec<Coordinate> {
        let mut seen = HashSet::new();
        let mut overlaps = Vec::new();
        for pos in self.regions.values().flat_map(Region::positions) {
            if !seen.insert(pos) && !overlaps.contains(&pos) {
                overlaps.push(pos);
            }
        }
        overlaps
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        *self = snapshot.0.clone();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.save_state())
    }
}
