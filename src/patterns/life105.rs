//! Life 1.05: a header, `#` metadata lines, then rows of `*` and `.`

use super::{Offset, Pattern};
use crate::error::{LifeError, LifeResult};
use crate::game_of_life::Grid;

pub const HEADER: &str = "#Life 1.05";
const DESCRIPTION: &str = "#D Exported from bounded-life.";
const NORMAL_RULES: &str = "#N";

fn is_metadata(line: &str) -> bool {
    line == HEADER || ["#D", "#R", "#N"].iter().any(|tag| line.starts_with(tag))
}

/// Decode dense rows. Any character other than `*` is a dead cell.
///
/// The first pattern row lands on `offset.row + 1`.
pub fn decode(text: &str, offset: Offset) -> LifeResult<Pattern> {
    let mut cells = Vec::new();
    let mut row: i64 = 0;

    for (line_idx, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if is_metadata(line) {
            continue;
        }

        let line_no = line_idx + 1;
        row = row
            .checked_add(1)
            .ok_or_else(|| LifeError::parse(line_no, "too many rows"))?;
        for (col, ch) in line.chars().enumerate() {
            if ch == '*' {
                cells.push(offset.apply(row, col as i64, line_no)?);
            }
        }
    }

    Ok(Pattern::new(cells))
}

/// Header, description and rule lines, then every board row
pub fn encode(grid: &Grid) -> String {
    let mut data = String::with_capacity(64 + grid.height() * (grid.width() + 1));
    for line in [HEADER, DESCRIPTION, NORMAL_RULES] {
        data.push_str(line);
        data.push('\n');
    }

    for row in grid.cells().chunks(grid.width()) {
        data.extend(row.iter().map(|&alive| if alive { '*' } else { '.' }));
        data.push('\n');
    }
    data
}
