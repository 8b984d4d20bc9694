//! Bit-parallel stepping: one bit per cell, neighbor counts by popcount

use super::ForcedCell;
use crate::game_of_life::{GameOfLifeRules, Topology};
use itertools::Itertools;

const WORD_BITS: usize = u64::BITS as usize;

/// The part of one cell's neighborhood that falls inside a single board word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NeighborMask {
    word: usize,
    bits: u64,
}

/// Packs the board into `u64` words and keeps, for every cell, the masks
/// selecting its neighbors. A neighborhood can straddle word boundaries, so
/// each cell carries one mask per word it touches.
#[derive(Debug, Clone)]
pub struct BitPackedStepper {
    word_count: usize,
    masks: Vec<Vec<NeighborMask>>,
}

impl BitPackedStepper {
    pub fn new(topology: &Topology) -> Self {
        let cell_count = topology.cell_count();
        let masks = (0..cell_count)
            .map(|idx| {
                let mut neighbors = topology.neighbors(idx).to_vec();
                neighbors.sort_unstable();
                let by_word = neighbors.into_iter().chunk_by(|n| n / WORD_BITS);
                let cell_masks: Vec<NeighborMask> = by_word
                    .into_iter()
                    .map(|(word, group)| NeighborMask {
                        word,
                        bits: group.fold(0u64, |bits, n| bits | 1 << (n % WORD_BITS)),
                    })
                    .collect();
                cell_masks
            })
            .collect();

        Self {
            word_count: cell_count.div_ceil(WORD_BITS),
            masks,
        }
    }

    /// Number of `u64` words one board occupies
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn pack(&self, cells: &[bool]) -> Vec<u64> {
        let mut board = vec![0u64; self.word_count];
        for (idx, _) in cells.iter().enumerate().filter(|(_, &alive)| alive) {
            board[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
        }
        board
    }

    pub fn unpack(board: &[u64], cells: &mut [bool]) {
        for (idx, slot) in cells.iter_mut().enumerate() {
            *slot = board[idx / WORD_BITS] >> (idx % WORD_BITS) & 1 == 1;
        }
    }

    #[inline]
    fn neighbor_count(&self, board: &[u64], idx: usize) -> u8 {
        self.masks[idx]
            .iter()
            .map(|m| (board[m.word] & m.bits).count_ones())
            .sum::<u32>() as u8
    }

    pub fn step_into(
        &self,
        topology: &Topology,
        current: &[bool],
        next: &mut [bool],
        forced: Option<ForcedCell>,
    ) {
        debug_assert_eq!(self.masks.len(), topology.cell_count());

        let board = self.pack(current);
        let mut next_board = vec![0u64; self.word_count];

        for idx in 0..self.masks.len() {
            let alive = board[idx / WORD_BITS] >> (idx % WORD_BITS) & 1 == 1;
            let becomes_alive = ForcedCell::value_at(forced, idx).unwrap_or_else(|| {
                GameOfLifeRules::should_be_alive(alive, self.neighbor_count(&board, idx))
            });
            if becomes_alive {
                next_board[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
            }
        }

        Self::unpack(&next_board, next);
    }
}
