//! Precomputed Moore-neighborhood lists for a bounded board

use super::grid::checked_cell_count;
use super::{GameOfLifeRules, Grid};
use crate::error::{LifeError, LifeResult};

pub(crate) const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Neighbor indices for every cell of a `width` x `height` board.
///
/// Board edges are hard boundaries: edge cells have 5 neighbors and corner
/// cells 3. The table is immutable once built and can be shared between
/// threads for every generation of a board of the same size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    width: usize,
    height: usize,
    // CSR layout: neighbors of cell i are neighbors[starts[i]..starts[i + 1]]
    starts: Vec<usize>,
    neighbors: Vec<usize>,
}

impl Topology {
    /// Build the neighbor table for a board size
    pub fn build(width: usize, height: usize) -> LifeResult<Self> {
        let max_links = checked_cell_count(width, height)?
            .checked_mul(usize::from(GameOfLifeRules::max_neighbor_count()))
            .filter(|&links| links <= isize::MAX as usize / std::mem::size_of::<usize>());
        if max_links.is_none() {
            return Err(LifeError::InvalidDimension { width, height });
        }
        Ok(Self::build_unchecked(width, height))
    }

    /// Build the table matching an existing grid
    pub fn for_grid(grid: &Grid) -> Self {
        Self::build_unchecked(grid.width(), grid.height())
    }

    fn build_unchecked(width: usize, height: usize) -> Self {
        let cell_count = width * height;
        let mut starts = Vec::with_capacity(cell_count + 1);
        let max_neighbors = usize::from(GameOfLifeRules::max_neighbor_count());
        let mut neighbors = Vec::with_capacity(cell_count * max_neighbors);

        for row in 0..height {
            for col in 0..width {
                starts.push(neighbors.len());
                for (dr, dc) in MOORE_OFFSETS {
                    let r = row as isize + dr;
                    let c = col as isize + dc;
                    if r >= 0 && r < height as isize && c >= 0 && c < width as isize {
                        neighbors.push(r as usize * width + c as usize);
                    }
                }
            }
        }
        starts.push(neighbors.len());

        log::debug!(
            "built topology for {}x{} board ({} neighbor links)",
            width,
            height,
            neighbors.len()
        );

        Self {
            width,
            height,
            starts,
            neighbors,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// In-bounds neighbor indices of a cell
    #[inline]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[self.starts[index]..self.starts[index + 1]]
    }

    /// Count live neighbors of a cell in a row-major buffer
    #[inline]
    pub fn count_live(&self, cells: &[bool], index: usize) -> u8 {
        self.neighbors(index)
            .iter()
            .filter(|&&n| cells[n])
            .count() as u8
    }

    /// Count live neighbors of a cell on a grid
    pub fn neighbor_count(&self, grid: &Grid, index: usize) -> LifeResult<u8> {
        self.ensure_matches(grid)?;
        if index >= self.cell_count() {
            return Err(LifeError::OutOfBounds {
                row: (index / self.width) as i64,
                col: (index % self.width) as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.count_live(grid.cells(), index))
    }

    /// Fail with `DimensionMismatch` unless the grid has this table's size
    pub fn ensure_matches(&self, grid: &Grid) -> LifeResult<()> {
        if grid.width() != self.width || grid.height() != self.height {
            return Err(LifeError::DimensionMismatch {
                grid_width: grid.width(),
                grid_height: grid.height(),
                topology_width: self.width,
                topology_height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_list_sizes() {
        let topology = Topology::build(4, 3).unwrap();
        assert_eq!(topology.neighbors(0).len(), 3); // corner
        assert_eq!(topology.neighbors(1).len(), 5); // top edge
        assert_eq!(topology.neighbors(4).len(), 5); // left edge
        assert_eq!(topology.neighbors(5).len(), 8); // interior
        assert_eq!(topology.neighbors(11).len(), 3); // bottom-right corner
    }

    #[test]
    fn test_no_wraparound() {
        let topology = Topology::build(3, 3).unwrap();
        let mut corner: Vec<_> = topology.neighbors(0).to_vec();
        corner.sort_unstable();
        assert_eq!(corner, vec![1, 3, 4]);
    }

    #[test]
    fn test_single_cell_board() {
        let topology = Topology::build(1, 1).unwrap();
        assert!(topology.neighbors(0).is_empty());
    }

    #[test]
    fn test_neighbor_count() {
        let cells = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();
        let topology = Topology::for_grid(&grid);

        assert_eq!(topology.neighbor_count(&grid, 4).unwrap(), 8);
        assert_eq!(topology.neighbor_count(&grid, 0).unwrap(), 2);
        assert!(topology.neighbor_count(&grid, 9).is_err());
    }

    #[test]
    fn test_oversized_board_is_rejected() {
        assert!(matches!(
            Topology::build(usize::MAX, 2),
            Err(LifeError::InvalidDimension { height: 2, .. })
        ));
        assert!(Topology::build(1 << 40, 1 << 20).is_err());
        assert!(Topology::build(0, 5).is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let topology = Topology::build(3, 3).unwrap();
        let grid = Grid::new(4, 3).unwrap();
        assert!(matches!(
            topology.ensure_matches(&grid),
            Err(LifeError::DimensionMismatch { grid_width: 4, topology_width: 3, .. })
        ));
    }
}
