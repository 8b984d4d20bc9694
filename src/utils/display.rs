//! Display and output formatting utilities

use crate::game_of_life::{Grid, StepStrategy};
use crate::patterns::Pattern;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Summary of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub strategy: StepStrategy,
    pub width: usize,
    pub height: usize,
    pub generations: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_ms: u128,
    pub saved_to: Option<String>,
}

impl RunReport {
    pub fn generations_per_second(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return f64::INFINITY;
        }
        self.generations as f64 * 1000.0 / self.elapsed_ms as f64
    }
}

/// Format grids and run summaries for display
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() * 3 + 1));
        for row in grid.cells().chunks(grid.width()) {
            output.extend(row.iter().map(|&alive| if alive { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (y, row) in grid.cells().chunks(grid.width()).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &alive in row {
                output.push_str(if alive { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Population, density and bounding box of a board
    pub fn format_statistics(grid: &Grid) -> String {
        let mut output = String::new();
        output.push_str(&format!("Board: {}x{}\n", grid.width(), grid.height()));
        output.push_str(&format!("Living cells: {}\n", grid.population()));
        output.push_str(&format!("Density: {:.1}%\n", grid.density() * 100.0));

        match Pattern::from_grid(grid).bounding_box() {
            Some(bbox) => output.push_str(&format!(
                "Bounding box: rows {}..={}, cols {}..={} ({}x{})\n",
                bbox.min_row,
                bbox.max_row,
                bbox.min_col,
                bbox.max_col,
                bbox.width(),
                bbox.height()
            )),
            None => output.push_str("Bounding box: none (empty board)\n"),
        }
        output
    }

    /// Human-readable run summary
    pub fn format_report(report: &RunReport) -> String {
        let mut output = String::new();
        output.push_str("Run Summary:\n");
        output.push_str(&format!("  Strategy: {}\n", report.strategy));
        output.push_str(&format!("  Board: {}x{}\n", report.width, report.height));
        output.push_str(&format!("  Generations: {}\n", report.generations));
        output.push_str(&format!(
            "  Population: {} → {}\n",
            report.initial_population, report.final_population
        ));
        output.push_str(&format!("  Time: {}ms", report.elapsed_ms));
        if report.elapsed_ms > 0 {
            output.push_str(&format!(" ({:.1} gen/s)", report.generations_per_second()));
        }
        output.push('\n');
        if let Some(ref path) = report.saved_to {
            output.push_str(&format!("  Saved to: {}\n", path));
        }
        output
    }
}

/// Progress indicator for long-running operations
pub struct ProgressIndicator {
    total: usize,
    current: usize,
    last_update: Instant,
    start_time: Instant,
}

impl ProgressIndicator {
    /// Create a new progress indicator
    pub fn new(total: usize) -> Self {
        let now = Instant::now();
        Self {
            total,
            current: 0,
            last_update: now,
            start_time: now,
        }
    }

    /// Update progress and optionally display
    pub fn update(&mut self, current: usize) {
        self.current = current;
        let now = Instant::now();

        // Update display every 100ms
        if now.duration_since(self.last_update) > Duration::from_millis(100) {
            self.display();
            self.last_update = now;
        }
    }

    /// Display current progress
    pub fn display(&self) {
        let percentage = if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };

        let elapsed = self.start_time.elapsed();
        let eta = if self.current > 0 {
            let rate = self.current as f64 / elapsed.as_secs_f64();
            let remaining = self.total.saturating_sub(self.current) as f64 / rate;
            format!("ETA: {:.1}s", remaining)
        } else {
            "ETA: --".to_string()
        };

        print!(
            "\rGeneration {}/{} ({:.1}%) - {}",
            self.current, self.total, percentage, eta
        );
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }

    /// Finish and clear the progress line
    pub fn finish(&self) {
        println!(
            "\rCompleted: {}/{} (100.0%) - Total time: {:.1}s",
            self.total,
            self.total,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
