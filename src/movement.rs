use std::collections::HashSet;
use std::fmt;

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::board::Board;
use crate::error::{GridError, Result};
use crate::geometry::{CARDINAL_DIRECTIONS, Coordinate, Direction};
use crate::occupant::{Occupant, OccupantId};

/// Longest push chain, counted in links after the first, that may still move.
pub const MAX_PUSH_CHAIN: usize = 50;

type Chain = ArrayVec<OccupantId, { MAX_PUSH_CHAIN + 1 }>;

/// What a move does about non-Empty cells in its way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverwriteBehavior {
    /// Any other occupant in the way blocks the move.
    #[default]
    Fail,
    /// Movable occupants in the way trade places with the mover.
    Swap,
    /// Replaceable occupants in the way are overwritten and discarded.
    Replace,
    /// Pushable occupants in the way are shoved one cell along the move.
    /// Only meaningful for a move by direction.
    Push,
}

impl fmt::Display for OverwriteBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverwriteBehavior::Fail => write!(f, "fail"),
            OverwriteBehavior::Swap => write!(f, "swap"),
            OverwriteBehavior::Replace => write!(f, "replace"),
            OverwriteBehavior::Push => write!(f, "push"),
        }
    }
}

/// Everything a legal move will write, worked out before anything is written.
#[derive(Debug, Default)]
struct MovePlan {
    relocations: Vec<(OccupantId, Coordinate)>,
    discards: Vec<OccupantId>,
    pushes: Vec<OccupantId>,
}

impl Board {
    /// Whether `id` could move its anchor to `anchor` under `policy`.
    ///
    /// Illegal moves are `Ok(false)`. [`OverwriteBehavior::Push`] has no
    /// direction to push along here and is rejected as an invalid operation.
    pub fn can_move_to(&self, id: OccupantId, anchor: Coordinate, policy: OverwriteBehavior) -> Result<bool> {
        if policy == OverwriteBehavior::Push {
            return Err(GridError::InvalidOperation("cannot push via absolute move"));
        }
        self.resolve(id)?;
        Ok(self.plan_move(id, anchor, policy, None).is_some())
    }

    /// Move `id` so its anchor lands on `anchor`. Returns `Ok(false)` and
    /// leaves the board untouched if the move is illegal.
    pub fn move_to(&mut self, id: OccupantId, anchor: Coordinate, policy: OverwriteBehavior) -> Result<bool> {
        if policy == OverwriteBehavior::Push {
            return Err(GridError::InvalidOperation("cannot push via absolute move"));
        }
        self.resolve(id)?;
        match self.plan_move(id, anchor, policy, None) {
            Some(plan) => {
                self.commit(plan, None);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether `id` could take one step in `direction` under `policy`.
    pub fn can_move(&self, id: OccupantId, direction: Direction, policy: OverwriteBehavior) -> bool {
        let Some(occupant) = self.occupant(id) else {
            return false;
        };
        let anchor = occupant.position() + direction;
        self.plan_move(id, anchor, policy, Some(direction)).is_some()
    }

    /// Take one step in `direction`. Returns `false` and leaves the board
    /// untouched if the step is illegal.
    pub fn move_by(&mut self, id: OccupantId, direction: Direction, policy: OverwriteBehavior) -> bool {
        let Some(occupant) = self.occupant(id) else {
            return false;
        };
        let anchor = occupant.position() + direction;
        match self.plan_move(id, anchor, policy, Some(direction)) {
            Some(plan) => {
                self.commit(plan, Some(direction));
                true
            }
            None => false,
        }
    }

    /// Cardinal directions `id` could currently step in under `policy`.
    pub fn valid_moves(&self, id: OccupantId, policy: OverwriteBehavior) -> ArrayVec<Direction, 4> {
        CARDINAL_DIRECTIONS
            .into_iter()
            .filter(|&direction| self.can_move(id, direction, policy))
            .collect()
    }

    /// Whether the pushable occupant `id`, and every pushable occupant lined
    /// up ahead of it, can be shoved one cell in `direction`.
    ///
    /// The chain must end in an Empty or replaceable cell on the board and
    /// may hold at most [`MAX_PUSH_CHAIN`] links beyond the first.
    pub fn can_push_chain(&self, id: OccupantId, direction: Direction) -> bool {
        self.collect_chain(id, direction).is_some()
    }

    /// Shove the chain headed by `id` one cell in `direction`, farthest link
    /// first. A replaceable occupant at the chain's leading edge is discarded.
    ///
    /// Callers check [`Board::can_push_chain`] first: a link that finds its
    /// destination occupied stops the push without undoing links already
    /// moved.
    pub fn push_chain(&mut self, id: OccupantId, direction: Direction) -> bool {
        let Some(chain) = self.collect_chain(id, direction) else {
            return false;
        };

        if let Some(&last) = chain.last() {
            let edge = self.occupant(last).map(|o| o.position() + direction);
            if let Some(target) = edge.and_then(|pos| self.cell(pos)) {
                if !target.is_empty() {
                    debug!("Push chain overwrote {} at the leading edge", target);
                    // The target came from a cell, so it resolves
                    let _ = self.discard(target);
                }
            }
        }

        for &link in chain.iter().rev() {
            let Some(from) = self.occupant(link).map(Occupant::position) else {
                return false;
            };
            let to = from + direction;
            // Re-read: the link ahead has just moved out of this cell
            if self.cell(to) != Some(OccupantId::EMPTY) {
                debug!("Push chain stopped: {} cannot enter {}", link, to);
                return false;
            }
            trace!("Pushing {} from {} to {}", link, from, to);
            self.relocate(link, to);
        }
        true
    }

    /// Links of the push chain headed by `id`, nearest first, if the whole
    /// chain can move.
    fn collect_chain(&self, id: OccupantId, direction: Direction) -> Option<Chain> {
        let mut chain = Chain::new();
        let mut current = id;

        loop {
            let occupant = self.occupant(current)?;
            if !is_chain_link(occupant) {
                return None;
            }
            if chain.try_push(current).is_err() {
                debug!("Push chain from {} exceeds {} links", id, MAX_PUSH_CHAIN);
                return None;
            }

            let next = occupant.position() + direction;
            let target = self.cell(next)?;
            if target.is_empty() {
                return Some(chain);
            }

            let ahead = self.occupant(target)?;
            if is_chain_link(ahead) {
                trace!("Push chain continues from {} into {}", current, target);
                current = target;
            } else if ahead.is_replaceable() {
                return Some(chain);
            } else {
                return None;
            }
        }
    }

    /// Work out the full effect of moving `id` to `anchor`, or `None` if any
    /// cell of the new footprint rules the move out.
    fn plan_move(
        &self,
        id: OccupantId,
        anchor: Coordinate,
        policy: OverwriteBehavior,
        direction: Option<Direction>,
    ) -> Option<MovePlan> {
        let mover = self.occupant(id)?;
        if !mover.is_placed() || !mover.is_movable() {
            debug!("Occupant {} cannot move: unplaced or immovable", id);
            return None;
        }

        let mut plan = MovePlan::default();
        let mut swapped: Vec<OccupantId> = Vec::new();

        for pos in mover.shape().occupied_positions(anchor) {
            let Some(target) = self.cell(pos) else {
                debug!("Move of {} to {} leaves the board at {}", id, anchor, pos);
                return None;
            };
            if target == id || target.is_empty() {
                continue;
            }
            let occupant = self.occupant(target)?;

            let allowed = match policy {
                OverwriteBehavior::Fail => false,
                OverwriteBehavior::Swap => {
                    push_unique(&mut swapped, target);
                    occupant.is_movable()
                }
                OverwriteBehavior::Replace => {
                    push_unique(&mut plan.discards, target);
                    occupant.is_replaceable()
                }
                OverwriteBehavior::Push => match direction {
                    Some(direction) if is_chain_link(occupant) => {
                        push_unique(&mut plan.pushes, target);
                        self.can_push_chain(target, direction)
                    }
                    Some(_) if occupant.is_replaceable() => {
                        push_unique(&mut plan.discards, target);
                        true
                    }
                    _ => false,
                },
            };

            if !allowed {
                debug!(
                    "Move of {} to {} blocked by {} at {} under {}",
                    id,
                    anchor,
                    target,
                    pos,
                    policy
                );
                return None;
            }
        }

        plan.relocations.push((id, anchor));
        if !swapped.is_empty() {
            let offset = mover.position() - anchor;
            let mut shifted = plan.relocations.clone();
            for &other in &swapped {
                let position = self.occupant(other)?.position();
                shifted.push((other, position + offset));
            }

            if self.relocations_fit(&shifted) {
                plan.relocations = shifted;
            } else if let Some(exchanged) = self.exchange_into_vacated(id, mover, anchor, &swapped) {
                plan.relocations = exchanged;
            } else {
                debug!("Swap of {} to {} leaves no room for the displaced occupants", id, anchor);
                return None;
            }
        }

        Some(plan)
    }

    /// Swap fallback: single-cell occupants in the way take the cells the
    /// mover leaves behind, in row-major order.
    fn exchange_into_vacated(
        &self,
        id: OccupantId,
        mover: &Occupant,
        anchor: Coordinate,
        swapped: &[OccupantId],
    ) -> Option<Vec<(OccupantId, Coordinate)>> {
        let landing: Vec<Coordinate> = mover.shape().occupied_positions(anchor).collect();
        let mut vacated = mover
            .occupied_positions()
            .into_iter()
            .filter(|pos| !landing.contains(pos));

        let mut relocations = vec![(id, anchor)];
        for &other in swapped {
            if !self.occupant(other)?.shape().is_single_cell() {
                return None;
            }
            relocations.push((other, vacated.next()?));
        }
        self.relocations_fit(&relocations).then_some(relocations)
    }

    /// Whether every relocation lands on cells that are on the board, Empty
    /// or vacated by the batch, and claimed by no other relocation.
    fn relocations_fit(&self, relocations: &[(OccupantId, Coordinate)]) -> bool {
        let moving: HashSet<OccupantId> = relocations.iter().map(|&(id, _)| id).collect();
        let mut claimed = HashSet::new();

        for &(id, anchor) in relocations {
            let Some(occupant) = self.occupant(id) else {
                return false;
            };
            for pos in occupant.shape().occupied_positions(anchor) {
                let vacant = match self.cell(pos) {
                    Some(existing) => existing.is_empty() || moving.contains(&existing),
                    None => false,
                };
                if !vacant || !claimed.insert(pos) {
                    return false;
                }
            }
        }
        true
    }

    fn commit(&mut self, plan: MovePlan, direction: Option<Direction>) {
        if let Some(direction) = direction {
            for &head in &plan.pushes {
                self.push_chain(head, direction);
            }
        }
        for &replaced in &plan.discards {
            debug!("Discarding replaced occupant {}", replaced);
            // Planned from live cells, so every handle resolves
            let _ = self.discard(replaced);
        }
        self.relocate_all(&plan.relocations);
    }
}

/// Push chains only run through single-cell pushable occupants.
fn is_chain_link(occupant: &Occupant) -> bool {
    occupant.is_pushable() && occupant.shape().is_single_cell()
}

fn push_unique(ids: &mut Vec<OccupantId>, id: OccupantId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupant::{Capabilities, OccupantKind};
    use crate::shape::Shape;

    fn player_of(board: &Board) -> OccupantId {
        board.find_objects_of_type(OccupantKind::Player)[0].0
    }

    #[test]
    fn test_fail_move_into_empty() {
        let mut board = Board::load_state(".....\n.@...\n.....\n").unwrap();
        let player = player_of(&board);
        assert!(board.move_by(player, Direction::East, OverwriteBehavior::Fail));
        assert_eq!(board.save_state(), ".....\n..@..\n.....\n");
        assert_eq!(board.occupant(player).unwrap().position(), Coordinate::new(2, 1));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_fail_move_blocked() {
        let mut board = Board::load_state("#@O\n").unwrap();
        let player = player_of(&board);
        assert!(!board.move_by(player, Direction::West, OverwriteBehavior::Fail));
        assert!(!board.move_by(player, Direction::East, OverwriteBehavior::Fail));
        assert!(!board.move_by(player, Direction::North, OverwriteBehavior::Fail));
        assert_eq!(board.save_state(), "#@O\n");
    }

    #[test]
    fn test_immovable_occupant_does_not_move() {
        let mut board = Board::load_state("#..\n").unwrap();
        let wall = board.id_at(Coordinate::new(0, 0)).unwrap();
        assert!(!board.move_by(wall, Direction::East, OverwriteBehavior::Fail));
        assert!(!board.can_move_to(wall, Coordinate::new(2, 0), OverwriteBehavior::Fail).unwrap());
    }

    #[test]
    fn test_swap_with_movable() {
        let mut board = Board::load_state("@O.\n").unwrap();
        let player = player_of(&board);
        let crate_box = board.id_at(Coordinate::new(1, 0)).unwrap();

        assert!(board.move_by(player, Direction::East, OverwriteBehavior::Swap));
        assert_eq!(board.save_state(), "O@.\n");
        assert_eq!(board.occupant(crate_box).unwrap().position(), Coordinate::new(0, 0));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_swap_absolute() {
        let mut board = Board::load_state("@..O\n").unwrap();
        let player = player_of(&board);
        assert!(board.move_to(player, Coordinate::new(3, 0), OverwriteBehavior::Swap).unwrap());
        assert_eq!(board.save_state(), "O..@\n");
    }

    #[test]
    fn test_swap_refuses_immovable() {
        let mut board = Board::load_state("@#\n").unwrap();
        let player = player_of(&board);
        assert!(!board.move_by(player, Direction::East, OverwriteBehavior::Swap));
        assert_eq!(board.save_state(), "@#\n");
    }

    #[test]
    fn test_replace_overwrites_replaceable() {
        let mut board = Board::new(3, 1);
        let player = board.spawn(Occupant::player(), Coordinate::new(0, 0)).unwrap();
        let coin = Occupant::symbol('$').with_capabilities(Capabilities::new(false, true, false));
        let coin = board.spawn(coin, Coordinate::new(1, 0)).unwrap();

        assert!(!board.can_move(player, Direction::East, OverwriteBehavior::Fail));
        assert!(board.move_by(player, Direction::East, OverwriteBehavior::Replace));
        assert_eq!(board.save_state(), ".@.\n");
        assert!(board.occupant(coin).is_none());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_replace_refuses_irreplaceable() {
        let mut board = Board::load_state("@O\n").unwrap();
        let player = player_of(&board);
        assert!(!board.move_by(player, Direction::East, OverwriteBehavior::Replace));
    }

    #[test]
    fn test_push_via_absolute_move_is_invalid() {
        let mut board = Board::load_state("@O.\n").unwrap();
        let player = player_of(&board);
        assert_eq!(
            board.move_to(player, Coordinate::new(1, 0), OverwriteBehavior::Push),
            Err(GridError::InvalidOperation("cannot push via absolute move"))
        );
        assert!(board.can_move_to(player, Coordinate::new(1, 0), OverwriteBehavior::Push).is_err());
        assert_eq!(board.save_state(), "@O.\n");
    }

    #[test]
    fn test_unknown_handle() {
        let mut board = Board::new(2, 2);
        let ghost = board.spawn(Occupant::player(), Coordinate::new(0, 0)).unwrap();
        board.discard(ghost).unwrap();
        assert_eq!(
            board.move_to(ghost, Coordinate::new(1, 1), OverwriteBehavior::Fail),
            Err(GridError::UnknownOccupant(ghost))
        );
        assert!(!board.move_by(ghost, Direction::East, OverwriteBehavior::Fail));
    }

    #[test]
    fn test_push_single_box() {
        let mut board = Board::load_state("@O.\n").unwrap();
        let player = player_of(&board);
        assert!(board.move_by(player, Direction::East, OverwriteBehavior::Push));
        assert_eq!(board.save_state(), ".@O\n");
        assert!(board.is_consistent());
    }

    #[test]
    fn test_push_chain_of_three_moves_farthest_first() {
        let mut board = Board::load_state("@OOO.\n").unwrap();
        let player = player_of(&board);
        assert!(board.move_by(player, Direction::East, OverwriteBehavior::Push));
        assert_eq!(board.save_state(), ".@OOO\n");
        assert!(board.is_consistent());

        // Against the edge now
        assert!(!board.move_by(player, Direction::East, OverwriteBehavior::Push));
        assert_eq!(board.save_state(), ".@OOO\n");
    }

    #[test]
    fn test_push_blocked_by_wall() {
        let mut board = Board::load_state("@OO#\n").unwrap();
        let player = player_of(&board);
        let head = board.id_at(Coordinate::new(1, 0)).unwrap();
        assert!(!board.can_push_chain(head, Direction::East));
        assert!(!board.move_by(player, Direction::East, OverwriteBehavior::Push));
        assert_eq!(board.save_state(), "@OO#\n");
    }

    #[test]
    fn test_push_into_empty_cell_without_box() {
        let mut board = Board::load_state("@..\n").unwrap();
        let player = player_of(&board);
        assert!(board.move_by(player, Direction::East, OverwriteBehavior::Push));
        assert_eq!(board.save_state(), ".@.\n");
    }

    #[test]
    fn test_push_leading_edge_overwrites_replaceable() {
        let mut board = Board::new(4, 1);
        let player = board.spawn(Occupant::player(), Coordinate::new(0, 0)).unwrap();
        board.spawn(Occupant::crate_box(), Coordinate::new(1, 0)).unwrap();
        let grass = Occupant::symbol(',').with_capabilities(Capabilities::new(false, true, false));
        let grass = board.spawn(grass, Coordinate::new(2, 0)).unwrap();

        assert!(board.move_by(player, Direction::East, OverwriteBehavior::Push));
        assert_eq!(board.save_state(), ".@O.\n");
        assert!(board.occupant(grass).is_none());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_push_into_non_pushable_non_replaceable() {
        let mut board = Board::load_state("@#.\n").unwrap();
        let player = player_of(&board);
        assert!(!board.move_by(player, Direction::East, OverwriteBehavior::Push));
    }

    #[test]
    fn test_push_chain_length_limit() {
        let width = MAX_PUSH_CHAIN + 4;
        let mut board = Board::new(width, 1);
        board.spawn(Occupant::player(), Coordinate::new(0, 0)).unwrap();

        // 51 boxes: the head plus MAX_PUSH_CHAIN more
        for x in 1..=MAX_PUSH_CHAIN + 1 {
            board.spawn(Occupant::crate_box(), Coordinate::new(x as i32, 0)).unwrap();
        }
        let head = board.id_at(Coordinate::new(1, 0)).unwrap();
        assert!(board.can_push_chain(head, Direction::East));

        // One more and the chain is too long
        board
            .spawn(Occupant::crate_box(), Coordinate::new(MAX_PUSH_CHAIN as i32 + 2, 0))
            .unwrap();
        assert!(!board.can_push_chain(head, Direction::East));
    }

    #[test]
    fn test_push_diagonal() {
        let mut board = Board::load_state("@..\n.O.\n...\n").unwrap();
        let player = player_of(&board);
        assert!(board.move_by(player, Direction::SouthEast, OverwriteBehavior::Push));
        assert_eq!(board.save_state(), "...\n.@.\n..O\n");
    }

    #[test]
    fn test_multi_cell_move() {
        let mut board = Board::new(5, 5);
        let big = board.spawn(Occupant::big_box().unwrap(), Coordinate::new(0, 0)).unwrap();
        assert!(board.move_by(big, Direction::East, OverwriteBehavior::Fail));
        assert_eq!(board.occupant(big).unwrap().position(), Coordinate::new(1, 0));
        assert!(board.is_empty_at(Coordinate::new(0, 1)).unwrap());
        assert_eq!(board.id_at(Coordinate::new(3, 2)).unwrap(), big);
        assert!(board.is_consistent());

        // Three columns wide, so it cannot move past x = 2
        assert!(board.move_by(big, Direction::East, OverwriteBehavior::Fail));
        assert!(!board.move_by(big, Direction::East, OverwriteBehavior::Fail));
    }

    #[test]
    fn test_multi_cell_pushes_row_of_boxes() {
        let mut board = Board::new(5, 3);
        let big = board
            .spawn(Occupant::compound(Shape::filled('~', 2, 2).unwrap()), Coordinate::new(0, 0))
            .unwrap();
        board.spawn(Occupant::crate_box(), Coordinate::new(2, 0)).unwrap();
        board.spawn(Occupant::crate_box(), Coordinate::new(2, 1)).unwrap();

        assert!(board.move_by(big, Direction::East, OverwriteBehavior::Push));
        assert_eq!(board.save_state(), ".~~O.\n.~~O.\n.....\n");
        assert!(board.is_consistent());
    }

    #[test]
    fn test_multi_cell_swap_with_single() {
        let mut board = Board::new(3, 2);
        let big = board
            .spawn(Occupant::compound(Shape::filled('~', 1, 2).unwrap()), Coordinate::new(0, 0))
            .unwrap();
        let player = board.spawn(Occupant::player(), Coordinate::new(1, 1)).unwrap();

        assert!(board.move_by(big, Direction::East, OverwriteBehavior::Swap));
        assert_eq!(board.occupant(player).unwrap().position(), Coordinate::new(0, 1));
        assert_eq!(board.save_state(), ".~.\n@~.\n");
        assert!(board.is_consistent());
    }

    #[test]
    fn test_wide_swap_fills_vacated_cell() {
        // Shifting the player back by one would land it on the log itself
        let mut board = Board::new(3, 1);
        let log = Occupant::compound(Shape::filled('=', 2, 1).unwrap());
        let log = board.spawn(log, Coordinate::new(0, 0)).unwrap();
        let player = board.spawn(Occupant::player(), Coordinate::new(2, 0)).unwrap();

        assert!(board.can_move(log, Direction::East, OverwriteBehavior::Swap));
        assert!(board.move_by(log, Direction::East, OverwriteBehavior::Swap));
        assert_eq!(board.save_state(), "@==\n");
        assert_eq!(board.occupant(player).unwrap().position(), Coordinate::new(0, 0));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_wide_swap_two_blockers() {
        let mut board = Board::new(2, 3);
        let slab = Occupant::compound(Shape::filled('~', 2, 1).unwrap());
        let slab = board.spawn(slab, Coordinate::new(0, 0)).unwrap();
        board.spawn(Occupant::player(), Coordinate::new(0, 1)).unwrap();
        board.spawn(Occupant::crate_box(), Coordinate::new(1, 1)).unwrap();

        assert!(board.move_by(slab, Direction::South, OverwriteBehavior::Swap));
        assert_eq!(board.save_state(), "@O\n~~\n..\n");
        assert!(board.is_consistent());
    }

    #[test]
    fn test_swap_without_room_fails() {
        // A 2x1 blocker cannot fit into the single cell the mover vacates
        let mut board = Board::new(4, 1);
        let player = board.spawn(Occupant::player(), Coordinate::new(0, 0)).unwrap();
        let log = Occupant::compound(Shape::filled('=', 2, 1).unwrap());
        board.spawn(log, Coordinate::new(1, 0)).unwrap();

        assert!(!board.move_by(player, Direction::East, OverwriteBehavior::Swap));
        assert_eq!(board.save_state(), "@==.\n");
    }

    #[test]
    fn test_move_to_own_position() {
        let mut board = Board::load_state(".@.\n").unwrap();
        let player = player_of(&board);
        assert!(board.move_to(player, Coordinate::new(1, 0), OverwriteBehavior::Fail).unwrap());
        assert_eq!(board.save_state(), ".@.\n");
    }

    #[test]
    fn test_move_off_board() {
        let mut board = Board::load_state("@.\n").unwrap();
        let player = player_of(&board);
        assert!(!board.move_to(player, Coordinate::new(5, 0), OverwriteBehavior::Fail).unwrap());
        assert!(!board.move_by(player, Direction::West, OverwriteBehavior::Push));
    }

    #[test]
    fn test_valid_moves() {
        let board = Board::load_state("#.#\n.@O\n#.#\n").unwrap();
        let player = player_of(&board);
        let fail: Vec<Direction> = board.valid_moves(player, OverwriteBehavior::Fail).into_iter().collect();
        assert_eq!(fail, vec![Direction::North, Direction::South, Direction::West]);

        // The box sits against the edge, so pushing east is still illegal
        let push = board.valid_moves(player, OverwriteBehavior::Push);
        assert!(!push.contains(&Direction::East));
    }
}
