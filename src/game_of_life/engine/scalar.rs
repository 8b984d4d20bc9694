//! Cell-at-a-time stepping over the topology table

use super::ForcedCell;
use crate::game_of_life::{GameOfLifeRules, Topology};

/// Visits every cell in turn and counts neighbors through the topology table
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarStepper;

impl ScalarStepper {
    pub fn step_into(
        &self,
        topology: &Topology,
        current: &[bool],
        next: &mut [bool],
        forced: Option<ForcedCell>,
    ) {
        for (idx, slot) in next.iter_mut().enumerate() {
            *slot = ForcedCell::value_at(forced, idx).unwrap_or_else(|| {
                GameOfLifeRules::should_be_alive(current[idx], topology.count_live(current, idx))
            });
        }
    }
}
