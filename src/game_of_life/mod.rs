//! Game of Life core functionality

pub mod engine;
pub mod grid;
pub mod rules;
pub mod simulation;
pub mod topology;

pub use engine::{advance, StepEngine, StepStrategy};
pub use grid::Grid;
pub use rules::{CellOverride, GameOfLifeRules};
pub use simulation::{Behavior, Session};
pub use topology::Topology;
