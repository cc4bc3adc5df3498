use crate::error::{Error, Result};

/// Number of cells in a Moore neighborhood
pub const NEIGHBORHOOD_SIZE: usize = 8;

/// (row, col) offsets of the Moore neighborhood, row-major, centre skipped
#[rustfmt::skip]
const MOORE_OFFSETS: [(isize, isize); NEIGHBORHOOD_SIZE] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Map an index into `[0, len)` treating the axis as a ring.
/// `-1` wraps to `len - 1`, `len` wraps to `0`, in-range indices pass through.
#[inline]
pub fn wrap(index: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    index.rem_euclid(len as isize) as usize
}

/// Empty cell storage with room for `rows * cols` cells.
/// Zero, overflowing or unallocatable sizes are all invalid dimensions.
fn allocate<C>(rows: usize, cols: usize) -> Result<Vec<C>> {
    let invalid = || Error::InvalidDimensions { rows, cols };
    let len = match rows.checked_mul(cols) {
        Some(len) if len > 0 => len,
        _ => return Err(invalid()),
    };
    let mut cells = Vec::new();
    cells.try_reserve_exact(len).map_err(|_| invalid())?;
    Ok(cells)
}

/// Fails unless a gathered neighborhood has exactly `NEIGHBORHOOD_SIZE` cells.
/// Only reachable if `MOORE_OFFSETS` stops matching the window length.
fn ensure_full_neighborhood(gathered: usize) -> Result<()> {
    if gathered != NEIGHBORHOOD_SIZE {
        return Err(Error::NeighborhoodSize {
            expected: NEIGHBORHOOD_SIZE,
            found: gathered,
        });
    }
    Ok(())
}

/// Grid stores one generation of cells in row-major order.
/// Dimensions are fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<C> {
    rows: usize,
    cols: usize,
    cells: Vec<C>,
}

impl<C: Copy> Grid<C> {
    /// Create a new grid with every cell set to `fill`
    pub fn new(rows: usize, cols: usize, fill: C) -> Result<Self> {
        let mut cells = allocate(rows, cols)?;
        cells.resize(rows * cols, fill);
        Ok(Self { rows, cols, cells })
    }

    /// Create a grid whose cell at (row, col) is `f(row, col)`
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> C) -> Result<Self> {
        let mut cells = allocate(rows, cols)?;
        cells.extend(
            (0..rows)
                .flat_map(|r| (0..cols).map(move |c| (r, c)))
                .map(|(r, c)| f(r, c)),
        );
        Ok(Self { rows, cols, cells })
    }

    /// Get grid dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    const fn get_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, row: usize, col: usize) -> Option<C> {
        (row < self.rows && col < self.cols).then(|| self.cells[self.get_index(row, col)])
    }

    /// Set cell at position, ignoring out-of-range coordinates
    pub fn set(&mut self, row: usize, col: usize, cell: C) {
        if row < self.rows && col < self.cols {
            let idx = self.get_index(row, col);
            self.cells[idx] = cell;
        }
    }

    pub fn wrap_row(&self, row: isize) -> usize {
        wrap(row, self.rows)
    }

    pub fn wrap_col(&self, col: isize) -> usize {
        wrap(col, self.cols)
    }

    /// Cell at a possibly out-of-range position, wrapped onto the torus
    #[inline]
    pub fn get_wrapped(&self, row: isize, col: isize) -> C {
        self.cells[self.get_index(self.wrap_row(row), self.wrap_col(col))]
    }

    /// One row of cells
    pub fn row(&self, row: usize) -> Option<&[C]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    pub fn fill(&mut self, cell: C) {
        self.cells.fill(cell);
    }

    /// Gather the 8 wrapped neighbors of (row, col).
    ///
    /// Edges wrap to the opposite edge and corners wrap diagonally, so every
    /// position has a full neighborhood. On grids smaller than 3x3 some
    /// neighbors are the same cell seen from several directions.
    pub fn neighborhood(&self, row: usize, col: usize) -> Result<[C; NEIGHBORHOOD_SIZE]> {
        let (row, col) = (row as isize, col as isize);
        let mut window = [self.get_wrapped(row, col); NEIGHBORHOOD_SIZE];
        let mut gathered = 0;

        for (slot, &(dr, dc)) in window.iter_mut().zip(MOORE_OFFSETS.iter()) {
            *slot = self.get_wrapped(row + dr, col + dc);
            gathered += 1;
        }

        ensure_full_neighborhood(gathered)?;
        Ok(window)
    }

    /// Iterate over all cells with their positions, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, C)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i / cols, i % cols, cell))
    }
}
