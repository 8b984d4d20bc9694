//! Run-length encoded patterns
//!
//! The body is a stream of `<count>?<tag>` tokens: `b` dead run, `o` live
//! run, `$` end of row, `!` end of pattern. A missing count means 1.

use super::{BoundingBox, Offset, Pattern};
use crate::error::{LifeError, LifeResult};
use crate::game_of_life::{GameOfLifeRules, Grid};
use itertools::Itertools;

pub const EMPTY_PATTERN: &str = "#C Empty pattern\nx = 0, y = 0, rule = B3/S23\n!";
const COMMENT: &str = "#C Exported from bounded-life.";

/// Upper bound on the live cells one payload may expand to
pub const MAX_LIVE_CELLS: usize = 1 << 24;

/// Cursor over the run stream
struct RunDecoder {
    offset: Offset,
    row: i64,
    col: i64,
    pending: Option<i64>,
    cells: Vec<(i64, i64)>,
}

impl RunDecoder {
    fn new(offset: Offset) -> Self {
        Self {
            offset,
            row: 0,
            col: 0,
            pending: None,
            cells: Vec::new(),
        }
    }

    fn push_digit(&mut self, digit: u32, line_no: usize) -> LifeResult<()> {
        let count = self
            .pending
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|n| n.checked_add(i64::from(digit)))
            .ok_or_else(|| LifeError::parse(line_no, "run count is too large"))?;
        self.pending = Some(count);
        Ok(())
    }

    fn apply(&mut self, tag: Tag, line_no: usize) -> LifeResult<()> {
        let count = self.pending.take().unwrap_or(1);
        match tag {
            Tag::Dead => self.col = advance(self.col, count, line_no)?,
            Tag::Live => {
                let end = advance(self.col, count, line_no)?;
                let within_limit = usize::try_from(count)
                    .ok()
                    .and_then(|n| n.checked_add(self.cells.len()))
                    .is_some_and(|total| total <= MAX_LIVE_CELLS);
                if !within_limit {
                    return Err(LifeError::parse(
                        line_no,
                        format!("pattern expands to more than {} live cells", MAX_LIVE_CELLS),
                    ));
                }

                let (offset, row) = (self.offset, self.row);
                for col in self.col..end {
                    self.cells.push(offset.apply(row, col, line_no)?);
                }
                self.col = end;
            }
            Tag::RowEnd => {
                self.row = advance(self.row, count, line_no)?;
                self.col = 0;
            }
        }
        Ok(())
    }
}

/// Move a cursor forward by a run, failing if it leaves the `i64` range
fn advance(position: i64, count: i64, line_no: usize) -> LifeResult<i64> {
    position
        .checked_add(count)
        .ok_or_else(|| LifeError::parse(line_no, "run extends past the coordinate range"))
}

#[derive(Debug, Clone, Copy)]
enum Tag {
    Dead,
    Live,
    RowEnd,
}

fn is_body_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('#') && !line.starts_with('x')
}

/// Decode the run stream. Comment lines and the `x = ...` header are
/// skipped; the declared size is not checked against the runs.
pub fn decode(text: &str, offset: Offset) -> LifeResult<Pattern> {
    let mut decoder = RunDecoder::new(offset);
    let mut last_line = 0;

    for (line_idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if !is_body_line(line) {
            continue;
        }
        let line_no = line_idx + 1;
        last_line = line_no;

        for ch in line.chars() {
            match ch {
                c if c.is_ascii_digit() => decoder.push_digit(c as u32 - '0' as u32, line_no)?,
                'b' => decoder.apply(Tag::Dead, line_no)?,
                'o' => decoder.apply(Tag::Live, line_no)?,
                '$' => decoder.apply(Tag::RowEnd, line_no)?,
                '!' => return Ok(Pattern::new(decoder.cells)),
                c if c.is_whitespace() => {}
                other => {
                    return Err(LifeError::parse(
                        line_no,
                        format!("unexpected character {:?} in run stream", other),
                    ))
                }
            }
        }
    }

    // Counts may continue onto the next line, but not past the end
    if decoder.pending.is_some() {
        return Err(LifeError::parse(last_line, "run count is not followed by a tag"));
    }
    Ok(Pattern::new(decoder.cells))
}

fn push_run(line: &mut String, length: usize, tag: char) {
    if length > 1 {
        line.push_str(&length.to_string());
    }
    line.push(tag);
}

/// Runs for one row of the bounding box, without a trailing dead run
fn encode_row(grid: &Grid, row: usize, bbox: &BoundingBox) -> String {
    let min_col = bbox.min_col as usize;
    let max_col = bbox.max_col as usize;
    let start = grid.index(row, min_col);
    let span = &grid.cells()[start..=start + (max_col - min_col)];

    let by_state = span.iter().chunk_by(|&&alive| alive);
    let mut runs: Vec<(bool, usize)> = by_state
        .into_iter()
        .map(|(alive, run)| (alive, run.count()))
        .collect();
    if matches!(runs.last(), Some((false, _))) {
        runs.pop();
    }

    let mut line = String::new();
    for (alive, length) in runs {
        push_run(&mut line, length, if alive { 'o' } else { 'b' });
    }
    line
}

/// Encode the live cells' bounding box
pub fn encode(grid: &Grid) -> String {
    let Some(bbox) = Pattern::from_grid(grid).bounding_box() else {
        return EMPTY_PATTERN.to_string();
    };

    let mut data = format!(
        "{}\nx = {}, y = {}, rule = {}\n",
        COMMENT,
        bbox.width(),
        bbox.height(),
        GameOfLifeRules::rule_string()
    );

    let rows: Vec<String> = (bbox.min_row as usize..=bbox.max_row as usize)
        .map(|row| encode_row(grid, row, &bbox))
        .collect();
    data.push_str(&rows.join("$"));
    data.push('!');
    data
}
