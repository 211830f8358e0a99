use crate::algorithms::Strategy;
use crate::engine::{Outcome, SearchReport};
use crate::grid::Grid;
use pathfinding::prelude::astar;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Statistics {
    pub strategy: Strategy,
    pub outcome: Outcome,
    pub explored: usize,
    pub path_length: usize,
    /// Shortest possible path on the same walls, if the end is reachable.
    pub optimal_path_length: Option<usize>,
    pub route_efficiency: f64,
}

impl Statistics {
    pub fn new(grid: &Grid, report: &SearchReport) -> Self {
        let mut stats = Statistics {
            strategy: report.strategy,
            outcome: report.outcome,
            explored: report.explored,
            path_length: report.path_length(),
            optimal_path_length: optimal_path_length(grid),
            route_efficiency: 0.0,
        };
        stats.calculate_efficiency();
        stats
    }

    /// Path length over optimal length; 1.0 means the path is a shortest one.
    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match self.optimal_path_length {
            Some(optimal) if self.outcome == Outcome::Found && optimal > 0 => {
                self.path_length as f64 / optimal as f64
            }
            Some(0) if self.outcome == Outcome::Found => 1.0,
            _ => 0.0,
        };
    }
}

/// Shortest path length in moves over the grid's walls, computed independently
/// with the `pathfinding` crate's A*.
pub fn optimal_path_length(grid: &Grid) -> Option<usize> {
    let goal = grid.end;
    astar(
        &grid.start,
        |p| {
            grid.open_neighbors(p)
                .into_iter()
                .map(|successor| (successor, 1u32))
                .collect::<Vec<_>>()
        },
        |p| p.manhattan(&goal),
        |p| *p == goal,
    )
    .map(|(_, cost)| cost as usize)
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.strategy)?;
        match self.outcome {
            Outcome::Found => writeln!(f, "Result: path found")?,
            Outcome::Exhausted => writeln!(f, "Result: no path")?,
            Outcome::Aborted(reason) => writeln!(f, "Result: aborted ({})", reason)?,
        }
        writeln!(f, "Cells Explored: {}", self.explored)?;
        if self.outcome == Outcome::Found {
            writeln!(f, "Path Length: {} moves ({} nodes)", self.path_length, self.path_length + 1)?;
        }
        match self.optimal_path_length {
            Some(optimal) => writeln!(f, "Optimal Path Length: {}", optimal)?,
            None => writeln!(f, "Optimal Path Length: unreachable")?,
        }
        if self.route_efficiency > 0.0 {
            writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;
        }
        Ok(())
    }
}
