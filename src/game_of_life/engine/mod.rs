//! Generation step engine with interchangeable execution strategies

pub mod bitpacked;
pub mod parallel;
pub mod scalar;
pub mod vectorized;

pub use bitpacked::BitPackedStepper;
pub use parallel::ParallelStepper;
pub use scalar::ScalarStepper;
pub use vectorized::VectorizedStepper;

use super::rules::CellOverride;
use super::{Grid, Topology};
use crate::error::LifeResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which execution strategy computes each generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StepStrategy {
    Scalar,
    #[value(name = "bitpacked")]
    BitPacked,
    Vectorized,
    Parallel,
}

impl StepStrategy {
    pub const ALL: [StepStrategy; 4] = [
        StepStrategy::Scalar,
        StepStrategy::BitPacked,
        StepStrategy::Vectorized,
        StepStrategy::Parallel,
    ];
}

impl fmt::Display for StepStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepStrategy::Scalar => "scalar",
            StepStrategy::BitPacked => "bitpacked",
            StepStrategy::Vectorized => "vectorized",
            StepStrategy::Parallel => "parallel",
        };
        f.write_str(name)
    }
}

/// A resolved override: flat cell index plus the value it is forced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedCell {
    pub index: usize,
    pub value: bool,
}

impl ForcedCell {
    #[inline]
    pub(crate) fn value_at(forced: Option<ForcedCell>, index: usize) -> Option<bool> {
        forced.filter(|f| f.index == index).map(|f| f.value)
    }
}

/// Strategy implementations behind one step interface
#[derive(Debug, Clone)]
pub enum Stepper {
    Scalar(ScalarStepper),
    BitPacked(BitPackedStepper),
    Vectorized(VectorizedStepper),
    Parallel(ParallelStepper),
}

impl Stepper {
    /// Create the stepper for a strategy, precomputing whatever it needs from the topology
    pub fn new(strategy: StepStrategy, topology: &Topology) -> Self {
        match strategy {
            StepStrategy::Scalar => Stepper::Scalar(ScalarStepper),
            StepStrategy::BitPacked => Stepper::BitPacked(BitPackedStepper::new(topology)),
            StepStrategy::Vectorized => Stepper::Vectorized(VectorizedStepper),
            StepStrategy::Parallel => Stepper::Parallel(ParallelStepper),
        }
    }

    /// Write the successor of `current` into `next`.
    ///
    /// `current` and `next` are distinct buffers of `topology.cell_count()` cells.
    pub fn step_into(
        &self,
        topology: &Topology,
        current: &[bool],
        next: &mut [bool],
        forced: Option<ForcedCell>,
    ) {
        match self {
            Stepper::Scalar(stepper) => stepper.step_into(topology, current, next, forced),
            Stepper::BitPacked(stepper) => stepper.step_into(topology, current, next, forced),
            Stepper::Vectorized(stepper) => stepper.step_into(topology, current, next, forced),
            Stepper::Parallel(stepper) => stepper.step_into(topology, current, next, forced),
        }
    }

    pub fn strategy(&self) -> StepStrategy {
        match self {
            Stepper::Scalar(_) => StepStrategy::Scalar,
            Stepper::BitPacked(_) => StepStrategy::BitPacked,
            Stepper::Vectorized(_) => StepStrategy::Vectorized,
            Stepper::Parallel(_) => StepStrategy::Parallel,
        }
    }
}

/// Advances grids of one fixed size using a chosen strategy
#[derive(Debug, Clone)]
pub struct StepEngine {
    topology: Arc<Topology>,
    stepper: Stepper,
}

impl StepEngine {
    /// Build an engine (and its topology) for a board size
    pub fn new(width: usize, height: usize, strategy: StepStrategy) -> LifeResult<Self> {
        let topology = Topology::build(width, height)?;
        Ok(Self::with_topology(Arc::new(topology), strategy))
    }

    /// Build an engine sized for an existing grid
    pub fn for_grid(grid: &Grid, strategy: StepStrategy) -> Self {
        Self::with_topology(Arc::new(Topology::for_grid(grid)), strategy)
    }

    /// Reuse a shared topology table
    pub fn with_topology(topology: Arc<Topology>, strategy: StepStrategy) -> Self {
        let stepper = Stepper::new(strategy, &topology);
        log::debug!(
            "step engine ready: {} strategy on {}x{} board",
            strategy,
            topology.width(),
            topology.height()
        );
        Self { topology, stepper }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn strategy(&self) -> StepStrategy {
        self.stepper.strategy()
    }

    /// Compute the next generation without touching the input grid
    pub fn advance(&self, grid: &Grid) -> LifeResult<Grid> {
        self.advance_with(grid, None)
    }

    /// Compute the next generation, forcing one cell if an override is active
    pub fn advance_with(&self, grid: &Grid, cell_override: Option<CellOverride>) -> LifeResult<Grid> {
        let mut next = Grid::from_raw(grid.width(), grid.height(), vec![false; grid.cells().len()]);
        self.advance_into(grid, &mut next, cell_override)?;
        Ok(next)
    }

    /// Write the next generation of `current` into the back buffer `next`
    pub fn advance_into(
        &self,
        current: &Grid,
        next: &mut Grid,
        cell_override: Option<CellOverride>,
    ) -> LifeResult<()> {
        self.topology.ensure_matches(current)?;
        self.topology.ensure_matches(next)?;

        let forced = self.resolve_override(current, cell_override)?;
        self.stepper
            .step_into(&self.topology, current.cells(), next.cells_mut(), forced);
        Ok(())
    }

    /// Evolve the grid for multiple generations
    pub fn advance_generations(&self, grid: &Grid, generations: usize) -> LifeResult<Grid> {
        let mut current = grid.clone();
        let mut next = grid.clone();
        for _ in 0..generations {
            self.advance_into(&current, &mut next, None)?;
            std::mem::swap(&mut current, &mut next);
        }
        Ok(current)
    }

    /// Translate an override into a flat index, rejecting off-board cells
    pub fn resolve_override(
        &self,
        grid: &Grid,
        cell_override: Option<CellOverride>,
    ) -> LifeResult<Option<ForcedCell>> {
        cell_override
            .map(|o| {
                grid.checked_index(o.row, o.col).map(|index| ForcedCell {
                    index,
                    value: o.value,
                })
            })
            .transpose()
    }
}

/// Advance one generation with the scalar strategy
pub fn advance(grid: &Grid, topology: &Topology) -> LifeResult<Grid> {
    topology.ensure_matches(grid)?;
    let mut next = vec![false; grid.cells().len()];
    ScalarStepper.step_into(topology, grid.cells(), &mut next, None);
    Ok(Grid::from_raw(grid.width(), grid.height(), next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    fn grid_with(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(row, col) in live {
            grid.set(row, col, true).unwrap();
        }
        grid
    }

    fn engines(width: usize, height: usize) -> Vec<StepEngine> {
        let topology = Arc::new(Topology::build(width, height).unwrap());
        StepStrategy::ALL
            .iter()
            .map(|&strategy| StepEngine::with_topology(Arc::clone(&topology), strategy))
            .collect()
    }

    #[test]
    fn test_single_cell_dies() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        for engine in engines(5, 5) {
            let next = engine.advance(&grid).unwrap();
            assert_eq!(next.population(), 0, "{}", engine.strategy());
        }
    }

    #[test]
    fn test_still_life_block() {
        let grid = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        for engine in engines(4, 4) {
            let evolved = engine.advance_generations(&grid, 10).unwrap();
            assert_eq!(evolved, grid, "{}", engine.strategy());
        }
    }

    #[test]
    fn test_oscillator_blinker() {
        let grid = grid_with(3, 3, &[(1, 0), (1, 1), (1, 2)]);
        let vertical = grid_with(3, 3, &[(0, 1), (1, 1), (2, 1)]);

        for engine in engines(3, 3) {
            let once = engine.advance(&grid).unwrap();
            assert_eq!(once, vertical, "{}", engine.strategy());

            let twice = engine.advance(&once).unwrap();
            assert_eq!(twice, grid, "{}", engine.strategy());
        }
    }

    #[test]
    fn test_corner_uses_reduced_neighborhood() {
        // On a torus the corner cell would see all three others wrapped around
        let grid = grid_with(4, 4, &[(0, 0), (0, 3), (3, 0), (3, 3)]);
        for engine in engines(4, 4) {
            let next = engine.advance(&grid).unwrap();
            assert!(next.is_empty(), "{}", engine.strategy());
        }

        // A corner L births the corner cell with exactly 3 in-bounds neighbors
        let grid = grid_with(3, 3, &[(0, 1), (1, 0), (1, 1)]);
        for engine in engines(3, 3) {
            let next = engine.advance(&grid).unwrap();
            assert!(next.get(0, 0).unwrap(), "{}", engine.strategy());
        }
    }

    #[test]
    fn test_advance_does_not_mutate_input() {
        let grid = grid_with(3, 3, &[(1, 0), (1, 1), (1, 2)]);
        let snapshot = grid.clone();
        for engine in engines(3, 3) {
            let next = engine.advance(&grid).unwrap();
            assert_ne!(next, grid);
            assert_eq!(grid, snapshot);
        }
    }

    #[test]
    fn test_override_skips_rule_for_one_cell() {
        let grid = grid_with(5, 5, &[(1, 0), (1, 1), (1, 2)]);
        let birth = Some(CellOverride::new(4, 4, true));
        let kill = Some(CellOverride::new(1, 1, false));

        for engine in engines(5, 5) {
            let next = engine.advance_with(&grid, birth).unwrap();
            assert!(next.get(4, 4).unwrap(), "{}", engine.strategy());
            assert!(next.get(0, 1).unwrap());
            assert!(next.get(2, 1).unwrap());
            assert_eq!(next.population(), 4);

            let next = engine.advance_with(&grid, kill).unwrap();
            assert!(!next.get(1, 1).unwrap(), "{}", engine.strategy());
            assert_eq!(next.population(), 2);
        }
    }

    #[test]
    fn test_override_out_of_bounds() {
        let grid = Grid::new(3, 3).unwrap();
        let engine = StepEngine::for_grid(&grid, StepStrategy::Scalar);
        let result = engine.advance_with(&grid, Some(CellOverride::new(3, 0, true)));
        assert!(matches!(result, Err(LifeError::OutOfBounds { .. })));
    }

    #[test]
    fn test_dimension_mismatch() {
        let grid = Grid::new(4, 4).unwrap();
        for engine in engines(3, 3) {
            assert!(matches!(
                engine.advance(&grid),
                Err(LifeError::DimensionMismatch { .. })
            ));
        }

        let topology = Topology::build(2, 5).unwrap();
        assert!(advance(&grid, &topology).is_err());
    }

    #[test]
    fn test_free_advance_matches_engine() {
        let grid = grid_with(6, 6, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let topology = Topology::for_grid(&grid);
        let engine = StepEngine::for_grid(&grid, StepStrategy::Parallel);
        assert_eq!(advance(&grid, &topology).unwrap(), engine.advance(&grid).unwrap());
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(StepStrategy::BitPacked.to_string(), "bitpacked");
        let parsed: StepStrategy = serde_yaml::from_str("vectorized").unwrap();
        assert_eq!(parsed, StepStrategy::Vectorized);
        let parsed: StepStrategy = serde_yaml::from_str("bitpacked").unwrap();
        assert_eq!(parsed, StepStrategy::BitPacked);
    }
}
