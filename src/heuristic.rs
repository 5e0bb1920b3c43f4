use crate::geometry::Coordinate;

/// Estimates the remaining cost from a cell to the goal.
///
/// A* only returns shortest paths when the estimate never exceeds the true
/// remaining cost.
pub trait Heuristic {
    fn estimate(&self, from: Coordinate, goal: Coordinate) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(Coordinate, Coordinate) -> f64,
{
    fn estimate(&self, from: Coordinate, goal: Coordinate) -> f64 {
        self(from, goal)
    }
}

/// Always zero: A* degrades to uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHeuristic;

impl Heuristic for NullHeuristic {
    fn estimate(&self, _from: Coordinate, _goal: Coordinate) -> f64 {
        0.0
    }
}

/// Sum of axis distances. Exact on an open board with cardinal steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, from: Coordinate, goal: Coordinate) -> f64 {
        from.manhattan_distance(goal) as f64
    }
}

/// Straight-line distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    fn estimate(&self, from: Coordinate, goal: Coordinate) -> f64 {
        from.euclidean_distance(goal)
    }
}

/// Largest axis distance. Exact on an open board with unit diagonal steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

impl Heuristic for Chebyshev {
    fn estimate(&self, from: Coordinate, goal: Coordinate) -> f64 {
        from.chebyshev_distance(goal) as f64
    }
}
