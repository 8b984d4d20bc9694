//! Configuration settings for the Life simulator

use crate::game_of_life::StepStrategy;
use crate::patterns::{Offset, PatternFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub strategy: StepStrategy,
    pub generations: usize,
    /// Size of the rayon pool used by the parallel strategy; `None` lets rayon decide
    #[serde(default)]
    pub threads: Option<usize>,
    /// Fill density used when no pattern file is given; `None` starts empty
    #[serde(default)]
    pub random_density: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: Option<PathBuf>,
    /// Put the pattern origin at the middle of the board
    pub center: bool,
    pub offset_row: i64,
    pub offset_col: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: PatternFormat,
    pub output_directory: PathBuf,
    pub report: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                width: 80,
                height: 60,
            },
            simulation: SimulationConfig {
                strategy: StepStrategy::Scalar,
                generations: 100,
                threads: None,
                random_density: None,
            },
            input: InputConfig {
                pattern_file: None,
                center: true,
                offset_row: 0,
                offset_col: 0,
            },
            output: OutputConfig {
                format: PatternFormat::Rle,
                output_directory: PathBuf::from("output/patterns"),
                report: ReportFormat::Text,
            },
        }
    }
}

impl InputConfig {
    /// Offset applied to every loaded coordinate
    pub fn offset(&self, board: &BoardConfig) -> Offset {
        if self.center {
            Offset::centered(board.width, board.height)
        } else {
            Offset::new(self.offset_row, self.offset_col)
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.width == 0 || self.board.height == 0 {
            anyhow::bail!(
                "Board dimensions must be positive, got {}x{}",
                self.board.width,
                self.board.height
            );
        }

        if self.simulation.threads == Some(0) {
            anyhow::bail!("Thread count must be positive");
        }

        if let Some(density) = self.simulation.random_density {
            if !(0.0..=1.0).contains(&density) {
                anyhow::bail!("Random density must be between 0 and 1, got {}", density);
            }
        }

        if let Some(ref pattern_file) = self.input.pattern_file {
            if !pattern_file.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern_file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.board.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.board.height = height;
        }
        if let Some(strategy) = cli_overrides.strategy {
            self.simulation.strategy = strategy;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern_file.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub strategy: Option<StepStrategy>,
    pub generations: Option<usize>,
    pub pattern_file: Option<PathBuf>,
    pub format: Option<PatternFormat>,
    pub output_dir: Option<PathBuf>,
}
