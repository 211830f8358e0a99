use crate::grid::Position;
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Predecessor that first discovered each cell. The start maps to itself.
/// Entries are never overwritten.
pub type ParentMap = FxHashMap<Position, Position>;

/// Step count from the start, fixed when a cell is first discovered.
pub type CostMap = FxHashMap<Position, u32>;

/// The open set of one search strategy.
///
/// The engine owns discovery (the parent map); a frontier only decides the
/// order in which discovered cells come back out.
pub trait Frontier {
    /// Seeds the frontier with the start cell.
    fn seed(&mut self, start: Position);

    /// Removes the next cell to process.
    fn pop(&mut self) -> Option<Position>;

    /// Inserts cells that `current` just discovered, given in direction order.
    fn extend(&mut self, current: Position, discovered: &[Position]);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Min-priority queue ordered by `(priority, tie, insertion order)`.
#[derive(Debug, Default)]
pub struct MinQueue {
    heap: BinaryHeap<Reverse<(u32, u32, u64, Position)>>,
    counter: u64,
}

impl MinQueue {
    /// Equal priorities come out oldest first.
    pub fn push(&mut self, priority: u32, pos: Position) {
        self.push_with_tie(priority, 0, pos);
    }

    /// Equal priorities come out by ascending `tie`, then oldest first.
    pub fn push_with_tie(&mut self, priority: u32, tie: u32, pos: Position) {
        self.heap.push(Reverse((priority, tie, self.counter, pos)));
        self.counter += 1;
    }

    pub fn pop(&mut self) -> Option<Position> {
        self.heap.pop().map(|Reverse((_, _, _, pos))| pos)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
