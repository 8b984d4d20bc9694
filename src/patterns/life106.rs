//! Life 1.06: a header line followed by one `x y` pair per live cell

use super::{Offset, Pattern};
use crate::error::{LifeError, LifeResult};
use crate::game_of_life::Grid;

pub const HEADER: &str = "#Life 1.06";

/// Decode `x y` lines (column first) into `(row, col)` cells
pub fn decode(text: &str, offset: Offset) -> LifeResult<Pattern> {
    let mut cells = Vec::new();

    for (line_idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no = line_idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [x, y] = fields.as_slice() else {
            return Err(LifeError::parse(
                line_no,
                format!("expected two coordinates, found {:?}", line),
            ));
        };

        let x = parse_coordinate(x, line_no)?;
        let y = parse_coordinate(y, line_no)?;
        cells.push(offset.apply(y, x, line_no)?);
    }

    Ok(Pattern::new(cells))
}

fn parse_coordinate(field: &str, line_no: usize) -> LifeResult<i64> {
    field
        .parse::<i64>()
        .map_err(|e| LifeError::parse(line_no, format!("invalid coordinate {:?}: {}", field, e)))
}

/// Header, then one `x y` line per live cell in row-major order
pub fn encode(grid: &Grid) -> String {
    let mut data = String::from(HEADER);
    for (row, col) in grid.live_cells() {
        data.push_str(&format!("\n{} {}", col, row));
    }
    data
}
