//! Pattern files: Life 1.06, Life 1.05 and RLE
//!
//! Decoders turn text into a [`Pattern`], a list of live `(row, col)`
//! coordinates translated by a load [`Offset`]. Encoders turn a [`Grid`]
//! into one complete text payload. Nothing here touches the filesystem
//! except [`io`].

pub mod io;
pub mod life105;
pub mod life106;
pub mod rle;

pub use io::{
    create_example_patterns, load_grid_from_file, load_pattern_from_file,
    load_patterns_from_directory, save_grid_to_file,
};

use crate::error::{LifeError, LifeResult};
use crate::game_of_life::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported pattern file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PatternFormat {
    Life106,
    Life105,
    Rle,
}

impl PatternFormat {
    /// File extension used when saving
    pub fn extension(self) -> &'static str {
        match self {
            PatternFormat::Life106 | PatternFormat::Life105 => "txt",
            PatternFormat::Rle => "rle",
        }
    }

    /// Marker line identifying the format, if it has one
    pub fn header(self) -> Option<&'static str> {
        match self {
            PatternFormat::Life106 => Some(life106::HEADER),
            PatternFormat::Life105 => Some(life105::HEADER),
            PatternFormat::Rle => None,
        }
    }
}

impl fmt::Display for PatternFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternFormat::Life106 => "Life 1.06",
            PatternFormat::Life105 => "Life 1.05",
            PatternFormat::Rle => "RLE",
        };
        f.write_str(name)
    }
}

/// Translation applied to every decoded coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub row: i64,
    pub col: i64,
}

impl Offset {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Offset that puts a pattern's origin at the middle of a board
    pub fn centered(width: usize, height: usize) -> Self {
        Self {
            row: (height / 2) as i64,
            col: (width / 2) as i64,
        }
    }

    /// Shift a coordinate, or `None` if it leaves the `i64` range
    pub fn checked_apply(self, row: i64, col: i64) -> Option<(i64, i64)> {
        Some((self.row.checked_add(row)?, self.col.checked_add(col)?))
    }

    /// Shift a decoded coordinate; overflow is a parse error on `line_no`
    #[inline]
    pub(crate) fn apply(self, row: i64, col: i64, line_no: usize) -> LifeResult<(i64, i64)> {
        self.checked_apply(row, col).ok_or_else(|| {
            LifeError::parse(
                line_no,
                format!(
                    "coordinate ({}, {}) shifted by ({}, {}) is out of range",
                    row, col, self.row, self.col
                ),
            )
        })
    }
}

/// Cells from `min` to `max` inclusive, saturating when the span exceeds `usize`
fn span(min: i64, max: i64) -> usize {
    usize::try_from(max.abs_diff(min))
        .unwrap_or(usize::MAX)
        .saturating_add(1)
}

/// Smallest rectangle enclosing every live cell, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_row: i64,
    pub min_col: i64,
    pub max_row: i64,
    pub max_col: i64,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        span(self.min_col, self.max_col)
    }

    pub fn height(&self) -> usize {
        span(self.min_row, self.max_row)
    }

    fn of<I: IntoIterator<Item = (i64, i64)>>(cells: I) -> Option<Self> {
        cells.into_iter().fold(None, |bbox, (row, col)| {
            Some(match bbox {
                None => BoundingBox {
                    min_row: row,
                    min_col: col,
                    max_row: row,
                    max_col: col,
                },
                Some(b) => BoundingBox {
                    min_row: b.min_row.min(row),
                    min_col: b.min_col.min(col),
                    max_row: b.max_row.max(row),
                    max_col: b.max_col.max(col),
                },
            })
        })
    }
}

/// Live-cell coordinates decoded from a pattern file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    cells: Vec<(i64, i64)>,
}

impl Pattern {
    pub fn new(cells: Vec<(i64, i64)>) -> Self {
        Self { cells }
    }

    /// Live cells of a grid, row-major
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            cells: grid
                .live_cells()
                .map(|(row, col)| (row as i64, col as i64))
                .collect(),
        }
    }

    /// `(row, col)` coordinates in decode order
    pub fn cells(&self) -> &[(i64, i64)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of(self.cells.iter().copied())
    }

    /// Shift every cell, or `None` if any coordinate leaves the `i64` range
    pub fn translated(&self, offset: Offset) -> Option<Self> {
        let cells = self
            .cells
            .iter()
            .map(|&(row, col)| offset.checked_apply(row, col))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { cells })
    }

    /// Shift the pattern so its bounding box starts at (0, 0). `None` when
    /// the box is wider or taller than `i64` can index.
    pub fn normalized(&self) -> Option<Self> {
        match self.bounding_box() {
            Some(bbox) => self.translated(Offset::new(
                bbox.min_row.checked_neg()?,
                bbox.min_col.checked_neg()?,
            )),
            None => Some(self.clone()),
        }
    }

    /// Grid exactly the size of the bounding box. An empty pattern gives a
    /// single dead cell.
    pub fn to_grid(&self) -> LifeResult<Grid> {
        let Some(bbox) = self.bounding_box() else {
            return Grid::new(1, 1);
        };

        // Grid::new rejects boxes too large to address, so the distances
        // below fit in usize
        let mut grid = Grid::new(bbox.width(), bbox.height())?;
        for &(row, col) in &self.cells {
            grid.set(
                row.abs_diff(bbox.min_row) as usize,
                col.abs_diff(bbox.min_col) as usize,
                true,
            )?;
        }
        Ok(grid)
    }

    /// Set every cell of the pattern live on the grid.
    ///
    /// All coordinates are checked first; if any is off the board the grid
    /// is left untouched.
    pub fn place_on(&self, grid: &mut Grid) -> LifeResult<()> {
        let out_of_bounds = |&(row, col): &(i64, i64)| {
            row < 0 || col < 0 || row >= grid.height() as i64 || col >= grid.width() as i64
        };

        if let Some(&(row, col)) = self.cells.iter().find(|cell| out_of_bounds(cell)) {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                width: grid.width(),
                height: grid.height(),
            });
        }

        for &(row, col) in &self.cells {
            grid.set(row as usize, col as usize, true)?;
        }
        Ok(())
    }
}

/// Work out which codec a payload needs.
///
/// A `#Life 1.06` or `#Life 1.05` marker line anywhere in the text wins;
/// otherwise a `.rle` extension on `source` selects RLE.
pub fn detect_format(text: &str, source: Option<&Path>) -> LifeResult<PatternFormat> {
    let has_marker = |marker: &str| text.lines().any(|line| line.trim() == marker);

    if has_marker(life106::HEADER) {
        return Ok(PatternFormat::Life106);
    }
    if has_marker(life105::HEADER) {
        return Ok(PatternFormat::Life105);
    }

    let is_rle = source
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("rle"));
    if is_rle {
        return Ok(PatternFormat::Rle);
    }

    Err(LifeError::UnknownFormat {
        source_name: source
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<inline text>".to_string()),
    })
}

/// Decode a payload in a known format
pub fn decode(format: PatternFormat, text: &str, offset: Offset) -> LifeResult<Pattern> {
    match format {
        PatternFormat::Life106 => life106::decode(text, offset),
        PatternFormat::Life105 => life105::decode(text, offset),
        PatternFormat::Rle => rle::decode(text, offset),
    }
}

/// Encode a grid's live cells
pub fn encode(format: PatternFormat, grid: &Grid) -> String {
    match format {
        PatternFormat::Life106 => life106::encode(grid),
        PatternFormat::Life105 => life105::encode(grid),
        PatternFormat::Rle => rle::encode(grid),
    }
}

/// Detect the format of a payload and decode it
pub fn load(offset: Offset, text: &str, source: Option<&Path>) -> LifeResult<Pattern> {
    let format = detect_format(text, source)?;
    decode(format, text, offset)
}

/// Serialize a grid in the caller's chosen format
pub fn save(grid: &Grid, format: PatternFormat) -> String {
    encode(format, grid)
}
