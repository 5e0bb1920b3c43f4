use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::board::Board;
use crate::geometry::{ALL_DIRECTIONS, Coordinate, Direction};
use crate::heuristic::{Chebyshev, Heuristic, Manhattan};
use crate::occupant::{Occupant, OccupantKind};
use crate::pqueue::PriorityQueue;

/// A route from start to goal, both included.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub steps: Vec<Coordinate>,
    pub cost: f64,
}

impl Path {
    /// Number of moves along the path.
    pub fn moves(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// The unit steps between consecutive cells.
    pub fn directions(&self) -> Vec<Direction> {
        self.steps
            .windows(2)
            .filter_map(|pair| {
                let delta = pair[1] - pair[0];
                ALL_DIRECTIONS.into_iter().find(|dir| dir.delta() == delta)
            })
            .collect()
    }
}

/// Every step costs one.
pub fn uniform_cost(_from: Coordinate, _to: Coordinate, _goal: Coordinate) -> f64 {
    1.0
}

/// Traversable only through free cells.
pub fn only_empty(occupant: &Occupant) -> bool {
    occupant.is_empty()
}

/// Traversable through anything except the listed kinds.
pub fn avoiding(kinds: &[OccupantKind]) -> impl Fn(&Occupant) -> bool + '_ {
    move |occupant| !kinds.contains(&occupant.kind())
}

/// Traversable only through the listed kinds.
pub fn walkable(kinds: &[OccupantKind]) -> impl Fn(&Occupant) -> bool + '_ {
    move |occupant| kinds.contains(&occupant.kind())
}

/// A* search over a board. Reads the board, never changes it.
///
/// The traversability predicate is applied to the occupant of every cell
/// the search would enter, the goal included. The start cell is not checked.
pub struct Pathfinder<'a> {
    board: &'a Board,
    diagonal: bool,
    max_expansions: Option<usize>,
}

impl<'a> Pathfinder<'a> {
    pub fn new(board: &'a Board) -> Self {
        Pathfinder {
            board,
            diagonal: false,
            max_expansions: None,
        }
    }

    /// Allow the four diagonal steps as well.
    pub fn diagonal(mut self, diagonal: bool) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Give up after expanding this many cells.
    pub fn max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Shortest path with unit step costs. Estimates with Manhattan distance,
    /// or Chebyshev distance when diagonal steps are allowed, so the result
    /// is optimal either way.
    pub fn find_path<T>(&self, start: Coordinate, goal: Coordinate, traversable: T) -> Option<Path>
    where
        T: Fn(&Occupant) -> bool,
    {
        if self.diagonal {
            self.find_path_with(start, goal, traversable, uniform_cost, Chebyshev)
        } else {
            self.find_path_with(start, goal, traversable, uniform_cost, Manhattan)
        }
    }

    /// A* with a caller-supplied step cost `cost(from, to, goal)` and
    /// heuristic.
    ///
    /// Cells are never reopened once expanded, so the path is only
    /// guaranteed shortest when the heuristic is consistent: `h(a)` never
    /// exceeds `cost(a, b) + h(b)` for neighbouring `a` and `b`. A heuristic
    /// that is merely admissible may yield a longer path.
    pub fn find_path_with<T, C, H>(
        &self,
        start: Coordinate,
        goal: Coordinate,
        traversable: T,
        cost: C,
        heuristic: H,
    ) -> Option<Path>
    where
        T: Fn(&Occupant) -> bool,
        C: Fn(Coordinate, Coordinate, Coordinate) -> f64,
        H: Heuristic,
    {
        if !self.board.in_bounds(start) || !self.board.in_bounds(goal) {
            debug!("No path from {} to {}: endpoint off the board", start, goal);
            return None;
        }
        if start == goal {
            return Some(Path {
                steps: vec![start],
                cost: 0.0,
            });
        }

        let mut frontier = PriorityQueue::new();
        let mut best: HashMap<Coordinate, f64> = HashMap::new();
        let mut came_from: HashMap<Coordinate, Coordinate> = HashMap::new();
        let mut closed: HashSet<Coordinate> = HashSet::new();
        let mut expansions = 0usize;

        best.insert(start, 0.0);
        frontier.push(heuristic.estimate(start, goal), start);

        while let Some(current) = frontier.pop_min() {
            if !closed.insert(current) {
                continue;
            }
            let g = best.get(&current).copied().unwrap_or(f64::INFINITY);

            if current == goal {
                let path = Path {
                    steps: reconstruct(&came_from, start, goal),
                    cost: g,
                };
                debug!(
                    "Found path from {} to {}: {} moves, cost {}, {} expansions",
                    start,
                    goal,
                    path.moves(),
                    path.cost,
                    expansions
                );
                return Some(path);
            }

            expansions += 1;
            if self.max_expansions.is_some_and(|limit| expansions > limit) {
                debug!("Gave up on path from {} to {} after {} expansions", start, goal, expansions - 1);
                return None;
            }

            for next in self.board.neighbor_positions(current, self.diagonal) {
                if closed.contains(&next) {
                    continue;
                }
                let Ok(occupant) = self.board.get(next) else {
                    continue;
                };
                if !traversable(occupant) {
                    continue;
                }

                let tentative = g + cost(current, next, goal);
                if tentative < best.get(&next).copied().unwrap_or(f64::INFINITY) {
                    best.insert(next, tentative);
                    came_from.insert(next, current);
                    frontier.push(tentative + heuristic.estimate(next, goal), next);
                }
            }
        }

        debug!("No path from {} to {} after {} expansions", start, goal, expansions);
        None
    }
}

fn reconstruct(came_from: &HashMap<Coordinate, Coordinate>, start: Coordinate, goal: Coordinate) -> Vec<Coordinate> {
    let mut steps = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&previous) => {
                steps.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    steps.reverse();
    steps
}
