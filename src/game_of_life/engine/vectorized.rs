//! Whole-board stepping by shifted-array sums

use super::ForcedCell;
use crate::game_of_life::topology::MOORE_OFFSETS;
use crate::game_of_life::Topology;

/// Treats the board as a 2-D array of 0/1 bytes. The neighbor-count array
/// is built by adding the board to itself shifted in each of the eight
/// Moore directions, with off-board cells padded as dead, and the rule is
/// applied elementwise over the whole board.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorizedStepper;

impl VectorizedStepper {
    /// Live-neighbor count of every cell
    pub fn neighbor_counts(width: usize, height: usize, cells: &[u8]) -> Vec<u8> {
        let mut counts = vec![0u8; width * height];

        for (dr, dc) in MOORE_OFFSETS {
            // Destination columns whose shifted source column is on the board
            let col_start = dc.min(0).unsigned_abs();
            let col_end = width - dc.max(0) as usize;
            if col_start >= col_end {
                continue;
            }

            for row in 0..height {
                let src_row = row as isize + dr;
                if src_row < 0 || src_row >= height as isize {
                    continue;
                }
                let src_start = src_row as usize * width;
                let dst_start = row * width;

                let src = &cells[(src_start as isize + col_start as isize + dc) as usize
                    ..(src_start as isize + col_end as isize + dc) as usize];
                let dst = &mut counts[dst_start + col_start..dst_start + col_end];
                for (count, &alive) in dst.iter_mut().zip(src) {
                    *count += alive;
                }
            }
        }

        counts
    }

    pub fn step_into(
        &self,
        topology: &Topology,
        current: &[bool],
        next: &mut [bool],
        forced: Option<ForcedCell>,
    ) {
        let cells: Vec<u8> = current.iter().map(|&alive| u8::from(alive)).collect();
        let counts = Self::neighbor_counts(topology.width(), topology.height(), &cells);

        for ((slot, &alive), &count) in next.iter_mut().zip(&cells).zip(&counts) {
            *slot = (count == 3) | ((alive == 1) & (count == 2));
        }

        if let Some(forced) = forced {
            next[forced.index] = forced.value;
        }
    }
}
