//! Bounded Game of Life
//!
//! A B3/S23 engine for fixed-size boards with hard edges, offering scalar,
//! bit-packed, vectorized and parallel step strategies, plus codecs for the
//! Life 1.06, Life 1.05 and RLE pattern formats.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod patterns;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, LifeResult};
pub use game_of_life::{advance, Grid, StepEngine, StepStrategy, Topology};
pub use patterns::{load, save, Offset, Pattern, PatternFormat};
