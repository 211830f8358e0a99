pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;
pub mod greedy;
pub mod path;
pub mod random;

use std::fmt;

use clap::ValueEnum;

use crate::algorithms::a_star::AStar;
use crate::algorithms::bfs::Bfs;
use crate::algorithms::common::Frontier;
use crate::algorithms::dfs::Dfs;
use crate::algorithms::greedy::Greedy;
use crate::algorithms::random::RandomSearch;
use crate::grid::Position;

/// The five exploration strategies the engine can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    Bfs,
    Dfs,
    Random,
    Greedy,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Random,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Random => "Random Search",
            Strategy::Greedy => "Greedy Search",
            Strategy::AStar => "A*",
        }
    }

    /// Whether the strategy always returns a shortest path on a unit-cost grid.
    pub fn is_optimal(self) -> bool {
        matches!(self, Strategy::Bfs | Strategy::AStar)
    }

    /// Builds an empty frontier. `seed` only affects [`Strategy::Random`].
    pub fn frontier(self, goal: Position, seed: Option<u64>) -> Box<dyn Frontier> {
        match self {
            Strategy::Bfs => Box::new(Bfs::new()),
            Strategy::Dfs => Box::new(Dfs::new()),
            Strategy::Random => Box::new(RandomSearch::new(seed)),
            Strategy::Greedy => Box::new(Greedy::new(goal)),
            Strategy::AStar => Box::new(AStar::new(goal)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
