//! Configuration management for the Life simulator

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, InputConfig, OutputConfig, ReportFormat, Settings, SimulationConfig,
};
