//! Row-major tile grid shared by seed placement and the spread engine.

use crate::BiomeId;

/// Highest strength a cell can hold. Fresh cells start here.
pub const MAX_STRENGTH: u8 = 100;

/// Orthogonal neighbor offsets in visiting order: up, down, left, right.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A grid position as `(row, column)`.
///
/// Ordering is row-major, so sorting coordinates yields scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shifts by a signed delta. Returns `None` if either axis would go negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

/// One grid tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Biome that claimed this tile, if any.
    pub owner: Option<BiomeId>,
    /// In `[0, 100]`. Openness on unclaimed tiles, spread progress on claimed ones.
    pub strength: u8,
}

impl Cell {
    /// An unclaimed, fully open tile.
    pub const OPEN: Self = Self {
        owner: None,
        strength: MAX_STRENGTH,
    };

    /// A tile owned by `owner` with the given strength (clamped to `MAX_STRENGTH`).
    pub fn owned(owner: BiomeId, strength: u8) -> Self {
        Self {
            owner: Some(owner),
            strength: strength.min(MAX_STRENGTH),
        }
    }

    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }
}

/// Fixed-size `width x height` grid stored as a single row-major buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every tile is [`Cell::OPEN`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::OPEN; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of tiles.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        coord.row * self.width + coord.col
    }

    /// Returns the tile at `coord`, or `None` when out of bounds.
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.contains(coord).then(|| &self.cells[self.index(coord)])
    }

    /// Returns the tile at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    pub fn cell(&self, coord: Coord) -> &Cell {
        assert!(self.contains(coord), "{coord:?} outside {}x{} grid", self.width, self.height);
        &self.cells[self.index(coord)]
    }

    /// Mutable access to the tile at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    pub fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        assert!(self.contains(coord), "{coord:?} outside {}x{} grid", self.width, self.height);
        let index = self.index(coord);
        &mut self.cells[index]
    }

    /// Overwrites the tile at `coord`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        if self.contains(coord) {
            let index = self.index(coord);
            self.cells[index] = Cell {
                strength: cell.strength.min(MAX_STRENGTH),
                ..cell
            };
        }
    }

    /// In-bounds orthogonal neighbors of `coord`: up, down, left, right.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(d_row, d_col)| coord.offset(d_row, d_col))
            .filter(|c| self.contains(*c))
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width;
        (0..self.cells.len()).map(move |i| Coord::new(i / width, i % width))
    }

    /// Row-major view of every tile.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Unclaimed tiles in row-major order.
    pub fn unclaimed(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.coords()
            .zip(self.cells.iter())
            .filter(|(_, cell)| !cell.is_claimed())
    }

    /// Coordinates owned by `id`, in row-major order.
    pub fn owned_by(&self, id: BiomeId) -> impl Iterator<Item = Coord> + '_ {
        self.coords()
            .zip(self.cells.iter())
            .filter(move |(_, cell)| cell.owner == Some(id))
            .map(|(coord, _)| coord)
    }

    /// Number of tiles that have an owner. Rescans the whole buffer.
    pub fn claimed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_claimed()).count()
    }

    pub fn is_fully_claimed(&self) -> bool {
        self.cells.iter().all(Cell::is_claimed)
    }
}
