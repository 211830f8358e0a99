use crate::algorithms::common::Frontier;
use crate::grid::Position;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Random search: a FIFO queue, but each batch of discovered cells is
/// shuffled before it is enqueued.
pub struct RandomSearch {
    queue: VecDeque<Position>,
    rng: StdRng,
}

impl RandomSearch {
    /// A `seed` makes the run reproducible; `None` draws from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        RandomSearch {
            queue: VecDeque::new(),
            rng,
        }
    }
}

impl Frontier for RandomSearch {
    fn seed(&mut self, start: Position) {
        self.queue.push_back(start);
    }

    fn pop(&mut self) -> Option<Position> {
        self.queue.pop_front()
    }

    fn extend(&mut self, _current: Position, discovered: &[Position]) {
        let mut batch = discovered.to_vec();
        batch.shuffle(&mut self.rng);
        self.queue.extend(batch);
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(f: &mut RandomSearch) -> Vec<Position> {
        std::iter::from_fn(|| f.pop()).collect()
    }

    #[test]
    fn batch_is_a_permutation_queued_behind_older_cells() {
        let batch = [
            Position::new(0, 1),
            Position::new(2, 1),
            Position::new(1, 0),
            Position::new(1, 2),
        ];
        let mut f = RandomSearch::new(Some(7));
        f.seed(Position::new(1, 1));
        f.extend(Position::new(1, 1), &batch);

        let out = drain(&mut f);
        assert_eq!(out[0], Position::new(1, 1));
        let mut rest = out[1..].to_vec();
        rest.sort();
        let mut expected = batch.to_vec();
        expected.sort();
        assert_eq!(rest, expected);
    }

    #[test]
    fn same_seed_same_order() {
        let batch: Vec<Position> = (0..8).map(|x| Position::new(x, 0)).collect();
        let mut a = RandomSearch::new(Some(42));
        let mut b = RandomSearch::new(Some(42));
        a.extend(Position::new(0, 1), &batch);
        b.extend(Position::new(0, 1), &batch);
        assert_eq!(drain(&mut a), drain(&mut b));
    }
}
