//! Data-parallel stepping with rayon

use super::ForcedCell;
use crate::game_of_life::{GameOfLifeRules, Topology};
use rayon::prelude::*;

/// Splits the output buffer into rows and evaluates them on the rayon pool.
///
/// Every worker reads the shared current generation and writes only its own
/// row of the next one, so no locking is needed. The caller keeps the two
/// buffers distinct and swaps them once `step_into` has returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelStepper;

impl ParallelStepper {
    pub fn step_into(
        &self,
        topology: &Topology,
        current: &[bool],
        next: &mut [bool],
        forced: Option<ForcedCell>,
    ) {
        let width = topology.width();

        next.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                let row_start = row * width;
                for (col, slot) in out.iter_mut().enumerate() {
                    let idx = row_start + col;
                    *slot = ForcedCell::value_at(forced, idx).unwrap_or_else(|| {
                        GameOfLifeRules::should_be_alive(
                            current[idx],
                            topology.count_live(current, idx),
                        )
                    });
                }
            });
    }
}
