//! Benchmark comparing the four step strategies on random soups.
//!
//! Every strategy runs the same seeded boards, so the final populations must
//! agree; a mismatch is reported alongside the timings.

use anyhow::{Context, Result};
use bounded_life::game_of_life::{Session, StepEngine, StepStrategy};
use bounded_life::Grid;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct BenchmarkResult {
    strategy: StepStrategy,
    run_times: Vec<Duration>,
    average_time: Duration,
    min_time: Duration,
    max_time: Duration,
    final_population: usize,
}

impl BenchmarkResult {
    fn new(strategy: StepStrategy) -> Self {
        Self {
            strategy,
            run_times: Vec::new(),
            average_time: Duration::ZERO,
            min_time: Duration::MAX,
            max_time: Duration::ZERO,
            final_population: 0,
        }
    }

    fn add_run(&mut self, duration: Duration, final_population: usize) {
        self.run_times.push(duration);
        self.final_population = final_population;
        self.min_time = self.min_time.min(duration);
        self.max_time = self.max_time.max(duration);

        let total: Duration = self.run_times.iter().sum();
        self.average_time = total / self.run_times.len() as u32;
    }

    fn format_time(duration: Duration) -> String {
        format!("{:.3}s", duration.as_secs_f64())
    }

    fn display(&self, generations: usize) -> String {
        let per_second = generations as f64 / self.average_time.as_secs_f64().max(f64::EPSILON);
        format!(
            "  {}:\n    Runs: [{}]\n    Avg: {} | Min: {} | Max: {} | {:.0} gen/s | Population: {}",
            self.strategy,
            self.run_times
                .iter()
                .map(|d| Self::format_time(*d))
                .collect::<Vec<_>>()
                .join(", "),
            Self::format_time(self.average_time),
            Self::format_time(self.min_time),
            Self::format_time(self.max_time),
            per_second,
            self.final_population
        )
    }
}

struct BenchmarkSuite {
    results: Vec<BenchmarkResult>,
    width: usize,
    height: usize,
    generations: usize,
    runs_per_strategy: usize,
    seed: u64,
}

impl BenchmarkSuite {
    fn new(width: usize, height: usize, generations: usize, runs_per_strategy: usize) -> Self {
        Self {
            results: Vec::new(),
            width,
            height,
            generations,
            runs_per_strategy,
            seed: 2024,
        }
    }

    fn run(&mut self) -> Result<()> {
        println!("🚀 Starting step strategy benchmark");
        println!(
            "Board: {}x{} ({} generations, {} runs per strategy)\n",
            self.width, self.height, self.generations, self.runs_per_strategy
        );

        for strategy in StepStrategy::ALL {
            println!("🔄 Testing {}...", strategy);
            let mut result = BenchmarkResult::new(strategy);

            for run in 1..=self.runs_per_strategy {
                let (duration, population) = self
                    .run_single(strategy, self.seed + run as u64)
                    .with_context(|| format!("{} run {} failed", strategy, run))?;
                println!("  Run {}/{}: {}", run, self.runs_per_strategy, BenchmarkResult::format_time(duration));
                result.add_run(duration, population);
            }

            self.results.push(result);
            println!();
        }

        Ok(())
    }

    fn run_single(&self, strategy: StepStrategy, seed: u64) -> Result<(Duration, usize)> {
        let engine = StepEngine::new(self.width, self.height, strategy)?;
        let mut session = Session::with_engine(engine, Grid::new(self.width, self.height)?)?;
        session.randomize(&mut StdRng::seed_from_u64(seed), 0.35);

        let start_time = Instant::now();
        session.run(self.generations)?;
        Ok((start_time.elapsed(), session.population()))
    }

    fn report(&self) {
        println!("═══════════════════════════════════════════════════════════");
        println!("📊 STEP STRATEGY BENCHMARK RESULTS");
        println!("═══════════════════════════════════════════════════════════");
        for result in &self.results {
            println!("{}", result.display(self.generations));
        }
        println!();

        let populations: Vec<usize> = self.results.iter().map(|r| r.final_population).collect();
        if populations.windows(2).any(|pair| pair[0] != pair[1]) {
            println!("❌ Strategies disagree on the final population: {:?}", populations);
        }

        if let (Some(fastest), Some(scalar)) = (
            self.results.iter().min_by_key(|r| r.average_time),
            self.results.iter().find(|r| r.strategy == StepStrategy::Scalar),
        ) {
            let speedup = scalar.average_time.as_secs_f64() / fastest.average_time.as_secs_f64().max(f64::EPSILON);
            println!("🥇 Fastest: {} ({:.2}x scalar)", fastest.strategy, speedup);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut benchmark = BenchmarkSuite::new(512, 512, 200, 3);
    benchmark.run().context("Failed to run benchmark suite")?;
    benchmark.report();

    Ok(())
}
