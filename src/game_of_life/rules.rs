//! Conway's B3/S23 transition rule

use serde::{Deserialize, Serialize};

/// Game of Life rules
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    #[inline]
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }

    /// Neighbor counts that result in birth (dead -> alive)
    pub fn birth_neighbor_counts() -> Vec<u8> {
        vec![3]
    }

    /// Neighbor counts that result in survival (alive -> alive)
    pub fn survival_neighbor_counts() -> Vec<u8> {
        vec![2, 3]
    }

    /// Rule string written into RLE headers, built from the count tables
    pub fn rule_string() -> String {
        let digits = |counts: Vec<u8>| counts.iter().map(u8::to_string).collect::<String>();
        format!(
            "B{}/S{}",
            digits(Self::birth_neighbor_counts()),
            digits(Self::survival_neighbor_counts())
        )
    }

    /// Maximum neighbor count in a Moore neighborhood
    pub fn max_neighbor_count() -> u8 {
        8
    }
}

/// Forces one cell to a value for the next generation, bypassing the rule.
///
/// Used for interactive editing: while a pointer is held over a cell the
/// cell is drawn (or erased) regardless of what the rule says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOverride {
    pub row: usize,
    pub col: usize,
    pub value: bool,
}

impl CellOverride {
    pub fn new(row: usize, col: usize, value: bool) -> Self {
        Self { row, col, value }
    }
}
