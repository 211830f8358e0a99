use crate::algorithms::common::ParentMap;
use crate::grid::Position;

/// Walks the parent map back from `end` to the self-parented start and
/// returns the path in start-to-end order.
///
/// Returns an empty path if `end` was never discovered or the chain is
/// broken, which only happens when called after an unsuccessful run.
pub fn reconstruct_path(parents: &ParentMap, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;

    loop {
        let Some(&parent) = parents.get(&current) else {
            return Vec::new();
        };
        if parent == current {
            break;
        }
        // A chain longer than the map has a cycle.
        if path.len() > parents.len() {
            return Vec::new();
        }
        path.push(parent);
        current = parent;
    }

    path.reverse();
    path
}
