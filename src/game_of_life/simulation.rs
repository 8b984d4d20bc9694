//! Caller-side simulation driver: generation counter, pause state and
//! interactive edits around the step engine

use super::engine::{StepEngine, StepStrategy};
use super::rules::CellOverride;
use super::Grid;
use crate::error::LifeResult;
use crate::patterns::Pattern;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A board being simulated.
///
/// The session owns a front and a back buffer; each generation is written
/// into the back buffer and the two are swapped afterwards. Scheduling is
/// left to the caller, which decides when to call [`Session::tick`].
#[derive(Debug, Clone)]
pub struct Session {
    engine: StepEngine,
    current: Grid,
    back: Grid,
    generation: u64,
    running: bool,
    cell_override: Option<CellOverride>,
}

impl Session {
    /// Start a paused session on a grid
    pub fn new(grid: Grid, strategy: StepStrategy) -> Self {
        let engine = StepEngine::for_grid(&grid, strategy);
        Self {
            engine,
            back: grid.clone(),
            current: grid,
            generation: 0,
            running: false,
            cell_override: None,
        }
    }

    /// Start a paused session with an existing engine
    pub fn with_engine(engine: StepEngine, grid: Grid) -> LifeResult<Self> {
        engine.topology().ensure_matches(&grid)?;
        Ok(Self {
            engine,
            back: grid.clone(),
            current: grid,
            generation: 0,
            running: false,
            cell_override: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn engine(&self) -> &StepEngine {
        &self.engine
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.current.population()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flip between running and paused, returning the new state
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        log::debug!("simulation {}", if self.running { "resumed" } else { "paused" });
        self.running
    }

    /// Hold a cell at a value until [`Session::release`] is called
    pub fn press(&mut self, row: usize, col: usize, value: bool) -> LifeResult<()> {
        self.current.checked_index(row, col)?;
        self.cell_override = Some(CellOverride::new(row, col, value));
        Ok(())
    }

    pub fn release(&mut self) {
        self.cell_override = None;
    }

    pub fn active_override(&self) -> Option<CellOverride> {
        self.cell_override
    }

    /// Advance one scheduler tick.
    ///
    /// While running this computes the next generation. While paused the
    /// board is held as is, except that a pressed cell still takes its
    /// forced value.
    pub fn tick(&mut self) -> LifeResult<()> {
        if self.running {
            return self.step();
        }

        if let Some(o) = self.cell_override {
            self.current.set(o.row, o.col, o.value)?;
        }
        Ok(())
    }

    /// Compute the next generation whether or not the session is running
    pub fn step(&mut self) -> LifeResult<()> {
        self.engine
            .advance_into(&self.current, &mut self.back, self.cell_override)?;
        std::mem::swap(&mut self.current, &mut self.back);
        self.generation += 1;
        Ok(())
    }

    /// Step `generations` times
    pub fn run(&mut self, generations: usize) -> LifeResult<()> {
        for _ in 0..generations {
            self.step()?;
        }
        log::debug!(
            "advanced to generation {} (population {})",
            self.generation,
            self.population()
        );
        Ok(())
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(&mut self) {
        self.current.clear();
        self.generation = 0;
    }

    /// Fill the board at random; each cell is live with probability `density`
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for cell in self.current.cells_mut() {
            *cell = rng.gen_bool(density);
        }
        self.generation = 0;
    }

    /// Replace the board contents with a pattern
    pub fn load_pattern(&mut self, pattern: &Pattern) -> LifeResult<()> {
        let mut grid = Grid::new(self.current.width(), self.current.height())?;
        pattern.place_on(&mut grid)?;
        self.current = grid;
        self.generation = 0;
        Ok(())
    }

    /// Evolve a copy of the board until it dies, repeats, or `max_generations` pass
    pub fn classify(&self, max_generations: usize) -> LifeResult<Behavior> {
        let mut seen: HashMap<Grid, usize> = HashMap::new();
        let mut current = self.current.clone();
        let mut next = self.current.clone();

        for generation in 0..=max_generations {
            if current.is_empty() {
                return Ok(Behavior::DiesOut { generation });
            }
            if let Some(&first) = seen.get(&current) {
                let period = generation - first;
                return Ok(if period == 1 {
                    Behavior::StillLife { settled_at: first }
                } else {
                    Behavior::Oscillator {
                        period,
                        settled_at: first,
                    }
                });
            }
            seen.insert(current.clone(), generation);

            self.engine.advance_into(&current, &mut next, None)?;
            std::mem::swap(&mut current, &mut next);
        }

        Ok(Behavior::Unsettled {
            generations: max_generations,
        })
    }
}

/// Long-run behaviour of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    DiesOut { generation: usize },
    StillLife { settled_at: usize },
    Oscillator { period: usize, settled_at: usize },
    Unsettled { generations: usize },
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::DiesOut { generation } => write!(f, "dies out at generation {}", generation),
            Behavior::StillLife { settled_at: 0 } => write!(f, "still life"),
            Behavior::StillLife { settled_at } => {
                write!(f, "settles into a still life at generation {}", settled_at)
            }
            Behavior::Oscillator { period, settled_at } => write!(
                f,
                "oscillator with period {} from generation {}",
                period, settled_at
            ),
            Behavior::Unsettled { generations } => {
                write!(f, "still changing after {} generations", generations)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn blinker_session() -> Session {
        let pattern = Pattern::new(vec![(2, 1), (2, 2), (2, 3)]);
        let mut session = Session::new(Grid::new(5, 5).unwrap(), StepStrategy::Scalar);
        session.load_pattern(&pattern).unwrap();
        session
    }

    #[test]
    fn test_paused_tick_holds_board() {
        let mut session = blinker_session();
        let before = session.grid().clone();

        session.tick().unwrap();
        assert_eq!(session.grid(), &before);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_running_tick_advances() {
        let mut session = blinker_session();
        assert!(session.toggle_running());

        session.tick().unwrap();
        assert_eq!(session.generation(), 1);
        assert!(session.grid().get(1, 2).unwrap());
        assert!(session.grid().get(3, 2).unwrap());

        session.tick().unwrap();
        assert_eq!(session.grid(), blinker_session().grid());
    }

    #[test]
    fn test_press_while_paused_draws_cell() {
        let mut session = blinker_session();
        session.press(0, 0, true).unwrap();
        session.tick().unwrap();
        assert!(session.grid().get(0, 0).unwrap());
        assert_eq!(session.population(), 4);

        session.release();
        session.press(2, 2, false).unwrap();
        session.tick().unwrap();
        assert!(!session.grid().get(2, 2).unwrap());
    }

    #[test]
    fn test_press_while_running_overrides_rule() {
        let mut session = blinker_session();
        session.set_running(true);
        session.press(2, 2, false).unwrap();
        session.tick().unwrap();
        // The blinker's center is forced dead, so only the two births remain
        assert_eq!(session.population(), 2);
        assert!(!session.grid().get(2, 2).unwrap());
    }

    #[test]
    fn test_press_out_of_bounds() {
        let mut session = blinker_session();
        assert!(matches!(session.press(5, 0, true), Err(LifeError::OutOfBounds { .. })));
        assert!(session.active_override().is_none());
    }

    #[test]
    fn test_clear_and_randomize() {
        let mut session = blinker_session();
        session.run(3).unwrap();
        assert_eq!(session.generation(), 3);

        session.clear();
        assert_eq!(session.population(), 0);
        assert_eq!(session.generation(), 0);

        let mut rng = StdRng::seed_from_u64(7);
        session.randomize(&mut rng, 1.0);
        assert_eq!(session.population(), 25);
        session.randomize(&mut rng, 0.0);
        assert_eq!(session.population(), 0);
    }

    #[test]
    fn test_load_pattern_too_large() {
        let mut session = blinker_session();
        let pattern = Pattern::new(vec![(0, 0), (9, 9)]);
        assert!(session.load_pattern(&pattern).is_err());
        // The old board survives a failed load
        assert_eq!(session.population(), 3);
    }

    #[test]
    fn test_with_engine_checks_dimensions() {
        let engine = StepEngine::new(4, 4, StepStrategy::BitPacked).unwrap();
        assert!(Session::with_engine(engine.clone(), Grid::new(5, 4).unwrap()).is_err());
        assert!(Session::with_engine(engine, Grid::new(4, 4).unwrap()).is_ok());
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            blinker_session().classify(10).unwrap(),
            Behavior::Oscillator { period: 2, settled_at: 0 }
        );

        let mut session = Session::new(Grid::new(4, 4).unwrap(), StepStrategy::Vectorized);
        session
            .load_pattern(&Pattern::new(vec![(1, 1), (1, 2), (2, 1), (2, 2)]))
            .unwrap();
        assert_eq!(session.classify(10).unwrap(), Behavior::StillLife { settled_at: 0 });

        session.load_pattern(&Pattern::new(vec![(0, 0)])).unwrap();
        assert_eq!(session.classify(10).unwrap(), Behavior::DiesOut { generation: 1 });

        // Three of a block's cells fill in the fourth after one step
        session
            .load_pattern(&Pattern::new(vec![(1, 1), (1, 2), (2, 1)]))
            .unwrap();
        assert_eq!(session.classify(10).unwrap(), Behavior::StillLife { settled_at: 1 });
    }

    #[test]
    fn test_classify_unsettled() {
        // A glider on a large board is still travelling after a few steps
        let mut session = Session::new(Grid::new(20, 20).unwrap(), StepStrategy::Parallel);
        session
            .load_pattern(&Pattern::new(vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]))
            .unwrap();
        assert_eq!(session.classify(8).unwrap(), Behavior::Unsettled { generations: 8 });
    }
}
