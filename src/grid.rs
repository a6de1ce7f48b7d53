//! Grid container and the doubled-coordinate lattice convention.
//!
//! Generated mazes use a doubled-resolution addressing scheme. Lattice cell `(i, j)` lives at grid
//! coordinate `(2i + 1, 2j + 1)`, so every position with both coordinates odd is a cell that can be
//! visited. Positions with exactly one odd coordinate sit between two lattice cells and act as the
//! connector that is either carved into a passage or left standing as a wall. Positions with both
//! coordinates even are pillars and are never carved.

use std::fmt::{self, Write as _};

use crate::cell::Cell;

/// Column and row of a grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Column, growing to the right.
    pub x: usize,
    /// Row, growing downwards.
    pub y: usize,
}

impl Pos {
    /// Builds a position from a column and a row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position halfway between two positions.
    ///
    /// For two lattice cells one step apart this is the connector between them.
    pub const fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }

    /// Returns the positions `step` units away in the four cardinal directions.
    ///
    /// The order is up, right, down, left. Directions that would leave the non-negative quadrant
    /// are skipped, the upper bounds are left to the caller.
    pub fn cardinal(self, step: usize) -> impl Iterator<Item = Self> {
        [
            self.y.checked_sub(step).map(|y| Self::new(self.x, y)),
            self.x.checked_add(step).map(|x| Self::new(x, self.y)),
            self.y.checked_add(step).map(|y| Self::new(self.x, y)),
            self.x.checked_sub(step).map(|x| Self::new(x, self.y)),
        ]
        .into_iter()
        .flatten()
    }

    /// Returns the two lattice cells a connector separates.
    ///
    /// A connector with an even column separates its left and right neighbours, one with an even
    /// row separates the cells above and below it. Any other position is not a connector and
    /// yields [`None`].
    pub fn connector_sides(self) -> Option<(Self, Self)> {
        match (self.x % 2, self.y % 2) {
            (0, 1) => Some((
                Self::new(self.x.checked_sub(1)?, self.y),
                Self::new(self.x.checked_add(1)?, self.y),
            )),
            (1, 0) => Some((
                Self::new(self.x, self.y.checked_sub(1)?),
                Self::new(self.x, self.y.checked_add(1)?),
            )),
            _ => None,
        }
    }
}

/// Rectangular, row-major grid of cell markers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Markers stored row after row.
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates a grid with every position set to the same marker.
    ///
    /// The dimensions are taken as they are; coercion to odd sizes is the builder's job.
    pub(crate) fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    /// Wraps already-validated row-major markers.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(
            cells.len(),
            width * height,
            "cell count must match the grid dimensions"
        );
        Self {
            width,
            height,
            cells,
        }
    }

    /// Returns the number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Maps a position to its offset in the backing storage, if it lies inside the grid.
    const fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < self.width && pos.y < self.height {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    /// Returns the marker at a position, or [`None`] outside the grid.
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Overwrites the marker at a position. Positions outside the grid are ignored.
    pub(crate) fn set(&mut self, pos: Pos, cell: Cell) {
        if let Some(slot) = self.index(pos).and_then(|idx| self.cells.get_mut(idx)) {
            *slot = cell;
        }
    }

    /// Returns whether a position is inside the grid and off its outer border.
    pub const fn is_interior(&self, pos: Pos) -> bool {
        pos.x > 0 && pos.y > 0 && pos.x + 1 < self.width && pos.y + 1 < self.height
    }

    /// Returns the number of lattice columns the grid can hold.
    pub const fn lattice_columns(&self) -> usize {
        self.width.saturating_sub(1) / 2
    }

    /// Returns the number of lattice rows the grid can hold.
    pub const fn lattice_rows(&self) -> usize {
        self.height.saturating_sub(1) / 2
    }

    /// Maps a lattice index to its grid coordinate.
    pub const fn lattice_to_grid(column: usize, row: usize) -> Pos {
        Pos::new(2 * column + 1, 2 * row + 1)
    }

    /// Returns whether a position is a lattice cell, i.e. both coordinates are odd.
    pub const fn is_lattice(pos: Pos) -> bool {
        pos.x % 2 == 1 && pos.y % 2 == 1
    }

    /// Returns whether a position is a connector between two lattice cells.
    pub const fn is_connector(pos: Pos) -> bool {
        (pos.x % 2 == 1) != (pos.y % 2 == 1)
    }

    /// Iterates over the rows of the grid from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Iterates over every position and its marker in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (Pos::new(idx % width, idx / width), *cell))
    }

    /// Returns every position holding the given marker, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> Vec<Pos> {
        self.iter()
            .filter_map(|(pos, found)| (found == cell).then_some(pos))
            .collect()
    }

    /// Returns the first position in row-major order holding the given marker.
    pub fn find(&self, cell: Cell) -> Option<Pos> {
        self.iter()
            .find_map(|(pos, found)| (found == cell).then_some(pos))
    }

    /// Counts the positions holding the given marker.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|found| **found == cell).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                formatter.write_char('\n')?;
            }
            for cell in row {
                formatter.write_char(cell.glyph())?;
            }
        }

        Ok(())
    }
}
