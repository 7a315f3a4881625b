use crate::event::Coord;

/// Directions checked for lines: right, down, and both diagonals.
const LINE_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Fixed-size, row-major grid of typed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Creates a `rows` × `cols` grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, coord: Coord) -> Option<T> {
        self.index(coord).map(|index| self.cells[index])
    }

    /// Overwrites a cell. Returns `false` when the coordinate is off the grid.
    pub fn set(&mut self, coord: Coord, value: T) -> bool {
        match self.index(coord) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    /// Converts every cell, row by row, for building views.
    pub fn map_rows<U>(&self, f: impl Fn(T) -> U) -> Vec<Vec<U>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| f(*cell)).collect())
            .collect()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.cols + coord.col)
    }

    fn step(&self, coord: Coord, (d_row, d_col): (isize, isize)) -> Option<Coord> {
        let row = coord.row.checked_add_signed(d_row)?;
        let col = coord.col.checked_add_signed(d_col)?;
        let next = Coord::new(row, col);
        self.contains(next).then_some(next)
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    /// Whether no cell holds `empty` any more.
    pub fn is_full(&self, empty: T) -> bool {
        self.cells.iter().all(|cell| *cell != empty)
    }

    /// Length of the longest straight line of cells equal to the one at `from`,
    /// counting `from` itself. Returns 0 when `from` is off the grid.
    pub fn longest_line(&self, from: Coord) -> usize {
        let Some(value) = self.get(from) else {
            return 0;
        };

        LINE_DIRECTIONS
            .iter()
            .map(|&(d_row, d_col)| {
                1 + self.run(from, (d_row, d_col), value) + self.run(from, (-d_row, -d_col), value)
            })
            .max()
            .unwrap_or(1)
    }

    fn run(&self, from: Coord, direction: (isize, isize), value: T) -> usize {
        let mut count = 0;
        let mut current = from;
        while let Some(next) = self.step(current, direction) {
            if self.get(next) != Some(value) {
                break;
            }
            count += 1;
            current = next;
        }
        count
    }
}
