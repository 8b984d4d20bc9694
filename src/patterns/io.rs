//! File I/O operations for pattern files

use super::{Offset, Pattern, PatternFormat};
use crate::game_of_life::Grid;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a pattern file, detecting its format from its contents or extension
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P, offset: Offset) -> Result<Pattern> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern file: {}", path.display()))?;

    let pattern = super::load(offset, &content, Some(path))
        .with_context(|| format!("Failed to parse pattern file: {}", path.display()))?;

    log::info!("Loaded {} live cells from {}", pattern.len(), path.display());
    Ok(pattern)
}

/// Load a pattern file onto a fresh board of the given size
pub fn load_grid_from_file<P: AsRef<Path>>(
    path: P,
    width: usize,
    height: usize,
    offset: Offset,
) -> Result<Grid> {
    let path = path.as_ref();
    let pattern = load_pattern_from_file(path, offset)?;

    let mut grid = Grid::new(width, height)?;
    pattern
        .place_on(&mut grid)
        .with_context(|| format!("Pattern {} does not fit a {}x{} board", path.display(), width, height))?;
    Ok(grid)
}

/// Save a grid to a pattern file. The payload is built in memory first and
/// written in one call.
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P, format: PatternFormat) -> Result<()> {
    let path = path.as_ref();
    let content = super::save(grid, format);

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.display()))?;

    log::info!("Saved {} pattern to {}", format, path.display());
    Ok(())
}

/// Load every `.txt` and `.rle` pattern in a directory, unshifted
pub fn load_patterns_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, Pattern)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut patterns = Vec::new();

    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        let is_pattern_file = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "txt" || ext.eq_ignore_ascii_case("rle"));
        if !is_pattern_file {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_pattern_from_file(&path, Offset::default()) {
            Ok(pattern) => patterns.push((name, pattern)),
            Err(e) => log::warn!("Skipping {}: {:#}", path.display(), e),
        }
    }

    patterns.sort_by(|a, b| a.0.cmp(&b.0)); // Sort by filename
    Ok(patterns)
}

/// Create example pattern files, one per format
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let glider_content = "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";
    std::fs::write(dir.join("glider.rle"), glider_content).context("Failed to write glider.rle")?;

    let blinker_content = "#Life 1.06\n-1 0\n0 0\n1 0\n";
    std::fs::write(dir.join("blinker.txt"), blinker_content).context("Failed to write blinker.txt")?;

    let block_content = "#Life 1.05\n#D Block (still life)\n#N\n**\n**\n";
    std::fs::write(dir.join("block.txt"), block_content).context("Failed to write block.txt")?;

    let beacon_content = "#N Beacon\nx = 4, y = 4, rule = B3/S23\n2o$2o$2b2o$2b2o!\n";
    std::fs::write(dir.join("beacon.rle"), beacon_content).context("Failed to write beacon.rle")?;

    Ok(())
}
