use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::error::{GridError, Result};
use crate::geometry::Coordinate;
use crate::occupant::OccupantKind;

/// Zobrist hash for board states of one size.
///
/// Two boards hash equal when every cell holds the same kind of occupant
/// showing the same glyph, which is what a visited-state set in a solver
/// needs. Handles play no part.
pub struct Zobrist {
    width: usize,
    height: usize,
    /// cell_hashes[cell][kind]
    cell_hashes: Vec<[u64; OccupantKind::COUNT]>,
    glyph_salt: u64,
}

impl Zobrist {
    pub fn new(width: usize, height: usize) -> Self {
        // Use a seeded PRNG for reproducible Zobrist hashes
        let mut rng = ChaCha8Rng::seed_from_u64(0x123456789abcdef0);

        let cell_hashes: Vec<[u64; OccupantKind::COUNT]> = (0..width * height)
            .map(|_| std::array::from_fn(|_| rng.next_u64()))
            .collect();

        Zobrist {
            width,
            height,
            cell_hashes,
            glyph_salt: rng.next_u64(),
        }
    }

    /// Hash contribution of an occupant of `kind` showing `glyph` at `pos`.
    /// `None` outside the table's dimensions.
    pub fn cell_hash(&self, pos: Coordinate, kind: OccupantKind, glyph: char) -> Option<u64> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        let key = self.cell_hashes[pos.y as usize * self.width + pos.x as usize][kind.index()];
        Some(key ^ mix(glyph as u64 ^ self.glyph_salt).wrapping_mul(key | 1))
    }

    /// Compute the hash for a board state.
    pub fn hash_board(&self, board: &Board) -> Result<u64> {
        if board.width() != self.width || board.height() != self.height {
            return Err(GridError::InvalidOperation(
                "board dimensions do not match the hash table",
            ));
        }

        let mut hash = 0u64;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = Coordinate::new(x, y);
                let occupant = board.get(pos)?;
                let glyph = board.glyph_at(pos)?;
                if let Some(cell) = self.cell_hash(pos, occupant.kind(), glyph) {
                    hash ^= cell;
                }
            }
        }
        Ok(hash)
    }
}

/// splitmix64 finaliser.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
