use super::{color::Rgba, point::Point};

/// A single playfield cell.
///
/// Defaults to unfilled with a black-opaque color. Cells are reset on game
/// restart and when rows above a cleared row shift downward, and are set
/// filled and colored when a piece locks into them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    pub filled: bool,
    pub color: Rgba,
}

/// Fixed-size playfield storage with point-indexed access.
///
/// The grid owns no game rules; it is storage plus queries. There are
/// deliberately two access paths:
///
/// - [`Grid::cell_at`] and [`Grid::cell_at_mut`] are unchecked hot-path
///   accessors. Callers must have proven the point in bounds with
///   [`Grid::valid_point`] first; anything else is a caller bug that panics
///   in debug builds and is unspecified in release builds.
/// - Boundary-crossing logic (collision checks, lock writes) always calls
///   [`Grid::valid_point`] before indexing and skips out-of-range points.
///
/// The two paths are intentionally not unified into a single checked
/// accessor: the split documents which callers have already proven safety.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: i32,
    rows: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub const DEFAULT_COLUMNS: i32 = 10;
    pub const DEFAULT_ROWS: i32 = 24;

    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn new(columns: i32, rows: i32) -> Self {
        assert!(columns > 0 && rows > 0, "grid dimensions must be positive");
        Self {
            columns,
            rows,
            cells: vec![Cell::default(); (columns * rows) as usize],
        }
    }

    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// True iff `point` addresses a cell of this grid.
    #[must_use]
    pub const fn valid_point(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.columns && point.y >= 0 && point.y < self.rows
    }

    #[expect(clippy::cast_sign_loss)]
    const fn index(&self, point: Point) -> usize {
        (point.y * self.columns + point.x) as usize
    }

    /// Returns the cell at `point`.
    ///
    /// # Preconditions
    ///
    /// `valid_point(point)` must hold. Checked only in debug builds.
    #[must_use]
    pub fn cell_at(&self, point: Point) -> &Cell {
        debug_assert!(self.valid_point(point), "out-of-range point {point:?}");
        &self.cells[self.index(point)]
    }

    /// Mutable variant of [`Grid::cell_at`]; same precondition.
    pub fn cell_at_mut(&mut self, point: Point) -> &mut Cell {
        debug_assert!(self.valid_point(point), "out-of-range point {point:?}");
        let index = self.index(point);
        &mut self.cells[index]
    }

    /// True iff every cell of `row` is filled.
    #[must_use]
    pub fn row_filled(&self, row: i32) -> bool {
        (0..self.columns).all(|x| self.cell_at(Point::new(x, row)).filled)
    }

    /// Removes `row`, shifting every row above it down by one and clearing
    /// the freed top row.
    pub fn remove_row(&mut self, row: i32) {
        for y in row..self.rows - 1 {
            for x in 0..self.columns {
                let above = *self.cell_at(Point::new(x, y + 1));
                *self.cell_at_mut(Point::new(x, y)) = above;
            }
        }
        for x in 0..self.columns {
            *self.cell_at_mut(Point::new(x, self.rows - 1)) = Cell::default();
        }
    }

    /// Sets every cell back to unfilled with the default color.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COLUMNS, Self::DEFAULT_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(grid: &mut Grid, point: Point) {
        let cell = grid.cell_at_mut(point);
        cell.filled = true;
        cell.color = Rgba::WHITE;
    }

    #[test]
    fn test_valid_point_bounds() {
        let grid = Grid::default();
        assert!(grid.valid_point(Point::new(0, 0)));
        assert!(grid.valid_point(Point::new(9, 23)));
        assert!(!grid.valid_point(Point::new(-1, 0)));
        assert!(!grid.valid_point(Point::new(10, 0)));
        assert!(!grid.valid_point(Point::new(0, -1)));
        assert!(!grid.valid_point(Point::new(0, 24)));
    }

    #[test]
    fn test_row_filled() {
        let mut grid = Grid::new(4, 4);
        assert!(!grid.row_filled(1));
        for x in 0..4 {
            fill(&mut grid, Point::new(x, 1));
        }
        assert!(grid.row_filled(1));
    }

    #[test]
    fn test_remove_row_shifts_down() {
        let mut grid = Grid::new(3, 4);
        // Row 1 full, a lone cell on row 2 and another on row 3.
        for x in 0..3 {
            fill(&mut grid, Point::new(x, 1));
        }
        fill(&mut grid, Point::new(0, 2));
        fill(&mut grid, Point::new(2, 3));

        grid.remove_row(1);

        assert!(grid.cell_at(Point::new(0, 1)).filled);
        assert!(grid.cell_at(Point::new(2, 2)).filled);
        for x in 0..3 {
            assert!(!grid.cell_at(Point::new(x, 3)).filled, "top row not cleared");
        }
        assert!(!grid.cell_at(Point::new(0, 2)).filled);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut grid = Grid::new(3, 3);
        fill(&mut grid, Point::new(1, 1));
        grid.reset();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(*grid.cell_at(Point::new(x, y)), Cell::default());
            }
        }
    }

    #[test]
    #[should_panic(expected = "out-of-range point")]
    #[cfg(debug_assertions)]
    fn test_cell_at_out_of_range_panics_in_debug() {
        let grid = Grid::default();
        let _ = grid.cell_at(Point::new(10, 0));
    }
}
