//! Grid representation for a bounded Game of Life board

use crate::error::{LifeError, LifeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell count of a `width` x `height` board. Zero or unaddressable sizes
/// are rejected.
pub(crate) fn checked_cell_count(width: usize, height: usize) -> LifeResult<usize> {
    width
        .checked_mul(height)
        .filter(|&count| count > 0 && count <= isize::MAX as usize)
        .ok_or(LifeError::InvalidDimension { width, height })
}

/// A fixed-size board of live/dead cells stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> LifeResult<Self> {
        let cell_count = checked_cell_count(width, height)?;

        Ok(Self {
            width,
            height,
            cells: vec![false; cell_count],
        })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> LifeResult<Self> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimension { width, height });
        }

        // Ragged rows can't describe a rectangular board
        if let Some(row) = cells.iter().find(|row| row.len() != width) {
            return Err(LifeError::InvalidDimension {
                width: row.len(),
                height,
            });
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Wrap an already-flattened row-major buffer
    pub(crate) fn from_raw(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell states
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Check that a coordinate lies on the board and return its index
    pub fn checked_index(&self, row: usize, col: usize) -> LifeResult<usize> {
        if row >= self.height || col >= self.width {
            return Err(LifeError::OutOfBounds {
                row: row as i64,
                col: col as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(row, col))
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> LifeResult<bool> {
        let idx = self.checked_index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> LifeResult<()> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> LifeResult<bool> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Iterate living cell coordinates in row-major order.
    ///
    /// The iterator is computed fresh from the current contents on every call.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(idx, _)| (idx / width, idx % width))
    }

    /// Count total living cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Fraction of the board that is alive
    pub fn density(&self) -> f64 {
        self.population() as f64 / self.cells.len() as f64
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &cell in row {
                write!(f, "{}", if cell { '*' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
