use crate::algorithms::common::Frontier;
use crate::grid::Position;

/// Depth-first: a LIFO stack. Discovered cells are pushed in reverse
/// direction order so the leftmost direction is explored first.
#[derive(Debug, Default)]
pub struct Dfs {
    stack: Vec<Position>,
}

impl Dfs {
    pub fn new() -> Self {
        Dfs::default()
    }
}

impl Frontier for Dfs {
    fn seed(&mut self, start: Position) {
        self.stack.push(start);
    }

    fn pop(&mut self) -> Option<Position> {
        self.stack.pop()
    }

    fn extend(&mut self, _current: Position, discovered: &[Position]) {
        self.stack.extend(discovered.iter().rev().copied());
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_direction_comes_out_first() {
        let mut f = Dfs::new();
        f.seed(Position::new(1, 1));
        f.pop();

        let left = Position::new(0, 1);
        let right = Position::new(2, 1);
        let down = Position::new(1, 2);
        f.extend(Position::new(1, 1), &[left, right, down]);
        assert_eq!(f.pop(), Some(left));

        // Children of `left` are explored before its siblings.
        let below_left = Position::new(0, 2);
        f.extend(left, &[below_left]);
        assert_eq!(f.pop(), Some(below_left));
        assert_eq!(f.pop(), Some(right));
        assert_eq!(f.pop(), Some(down));
        assert_eq!(f.pop(), None);
    }
}
