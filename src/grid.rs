use std::fmt;

/// A cell coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(&self, other: &Position) -> u32 {
        (self.x.abs_diff(other.x) + self.y.abs_diff(other.y)) as u32
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Expansion order for every strategy: left, right, up, down.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Wall,
    Start,
    End,
    Visited,
    Path,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Free => ' ',
            Cell::Wall => '#',
            Cell::Start => 'S',
            Cell::End => 'E',
            Cell::Visited => '.',
            Cell::Path => '*',
        }
    }
}

/// The maze as a mutable matrix of cell states, stored row-major (`cells[y][x]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Cell>>,
    pub start: Position,
    pub end: Position,
}

impl Grid {
    /// Builds a grid from rows that must all have the same, non-zero length.
    /// Returns `None` when the rows are ragged or either endpoint is out of bounds.
    pub fn from_cells(cells: Vec<Vec<Cell>>, start: Position, end: Position) -> Option<Self> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 || cells.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut grid = Grid {
            width,
            height,
            cells,
            start,
            end,
        };
        if !grid.in_bounds(start) || !grid.in_bounds(end) {
            return None;
        }
        grid.set(start, Cell::Start);
        grid.set(end, Cell::End);
        Some(grid)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
            *slot = cell;
        }
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Wall)
    }

    /// In-bounds orthogonal neighbours in left, right, up, down order.
    /// Walls are included; the search discards them when they are popped.
    pub fn get_neighbors(&self, pos: &Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        for (dx, dy) in DIRECTIONS {
            let (Some(nx), Some(ny)) = (pos.x.checked_add_signed(dx), pos.y.checked_add_signed(dy))
            else {
                continue;
            };
            let next_pos = Position { x: nx, y: ny };
            if self.in_bounds(next_pos) {
                neighbors.push(next_pos);
            }
        }
        neighbors
    }

    /// Open neighbours only, for callers that need the traversable graph.
    pub fn open_neighbors(&self, pos: &Position) -> Vec<Position> {
        self.get_neighbors(pos)
            .into_iter()
            .filter(|p| !self.is_wall(*p))
            .collect()
    }

    /// Marks a processed cell, leaving the start and end markers intact.
    pub fn mark_visited(&mut self, pos: Position) {
        if self.get(pos) == Some(Cell::Free) {
            self.set(pos, Cell::Visited);
        }
    }

    /// Stamps a solved path, then restores the start and end markers over it.
    pub fn mark_path(&mut self, path: &[Position]) {
        for &pos in path {
            self.set(pos, Cell::Path);
        }
        self.set(self.start, Cell::Start);
        self.set(self.end, Cell::End);
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|c| **c == cell).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: usize, height: usize) -> Grid {
        Grid::from_cells(
            vec![vec![Cell::Free; width]; height],
            Position::new(0, 0),
            Position::new(width - 1, height - 1),
        )
        .unwrap()
    }

    #[test]
    fn neighbours_follow_left_right_up_down() {
        let grid = open_grid(3, 3);
        let n = grid.get_neighbors(&Position::new(1, 1));
        assert_eq!(
            n,
            vec![
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn neighbours_are_clipped_at_the_border() {
        let grid = open_grid(3, 2);
        let n = grid.get_neighbors(&Position::new(0, 0));
        assert_eq!(n, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let cells = vec![vec![Cell::Free; 3], vec![Cell::Free; 2]];
        assert!(Grid::from_cells(cells, Position::new(0, 0), Position::new(1, 1)).is_none());
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let cells = vec![vec![Cell::Free; 2]; 2];
        assert!(Grid::from_cells(cells, Position::new(0, 0), Position::new(2, 0)).is_none());
    }

    #[test]
    fn marking_keeps_endpoints() {
        let mut grid = open_grid(3, 1);
        grid.mark_visited(Position::new(0, 0));
        grid.mark_visited(Position::new(1, 0));
        assert_eq!(grid.get(Position::new(0, 0)), Some(Cell::Start));
        assert_eq!(grid.get(Position::new(1, 0)), Some(Cell::Visited));

        grid.mark_path(&[Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]);
        assert_eq!(grid.to_string(), "S*E\n");
    }
}
