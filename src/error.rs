//! Error type shared by the grid, engine and pattern codec

use thiserror::Error;

/// Errors reported by the Life engine and pattern codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        width: usize,
        height: usize,
    },

    #[error(
        "grid is {grid_width}x{grid_height} but the topology was built for {topology_width}x{topology_height}"
    )]
    DimensionMismatch {
        grid_width: usize,
        grid_height: usize,
        topology_width: usize,
        topology_height: usize,
    },

    #[error("parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("unable to detect pattern format of {source_name}")]
    UnknownFormat { source_name: String },
}

impl LifeError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        LifeError::ParseError {
            line,
            message: message.into(),
        }
    }
}

pub type LifeResult<T> = std::result::Result<T, LifeError>;
