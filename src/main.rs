//! Command line front end for the bounded Game of Life simulator

use anyhow::{Context, Result};
use bounded_life::{
    config::{CliOverrides, ReportFormat, Settings},
    game_of_life::{Grid, Session, StepStrategy},
    patterns::{
        create_example_patterns, load_grid_from_file, load_pattern_from_file, save_grid_to_file,
        Offset, PatternFormat,
    },
    utils::{ColorOutput, GridFormatter, ProgressIndicator, RunReport},
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "bounded_life")]
#[command(about = "Conway's Game of Life on a bounded board")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a board for a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file to load (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Board width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Board height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Step strategy (overrides config)
        #[arg(short, long, value_enum)]
        strategy: Option<StepStrategy>,

        /// Output format for the saved board (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<PatternFormat>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the final board
        #[arg(long)]
        save: bool,

        /// Print the final board
        #[arg(long)]
        show: bool,
    },

    /// Convert a pattern file to another format
    Convert {
        /// Pattern file to read
        #[arg(short, long)]
        input: PathBuf,

        /// File to write
        #[arg(short, long)]
        output: PathBuf,

        /// Output format; inferred from the output extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<PatternFormat>,
    },

    /// Show a pattern and classify how it evolves
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file
        #[arg(short, long)]
        pattern: PathBuf,

        /// Give up classifying after this many generations
        #[arg(short, long, default_value_t = 500)]
        max_generations: usize,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            pattern,
            width,
            height,
            generations,
            strategy,
            format,
            output,
            save,
            show,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                strategy,
                generations,
                pattern_file: pattern,
                format,
                output_dir: output,
            };
            run_command(config, overrides, save, show)
        }
        Commands::Convert {
            input,
            output,
            format,
        } => convert_command(input, output, format),
        Commands::Analyze {
            config,
            pattern,
            max_generations,
        } => analyze_command(config, pattern, max_generations),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Load the config file if present, otherwise fall back to defaults
fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

/// Starting board: the configured pattern, a random fill, or an empty board
fn initial_grid(settings: &Settings) -> Result<Grid> {
    let board = &settings.board;
    let grid = match settings.input.pattern_file {
        Some(ref path) => load_grid_from_file(path, board.width, board.height, settings.input.offset(board))?,
        None => Grid::new(board.width, board.height)?,
    };
    Ok(grid)
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, save: bool, show: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    if let Some(threads) = settings.simulation.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the rayon thread pool")?;
    }

    let mut session = Session::new(initial_grid(&settings)?, settings.simulation.strategy);
    if settings.input.pattern_file.is_none() {
        if let Some(density) = settings.simulation.random_density {
            session.randomize(&mut rand::thread_rng(), density);
        }
    }

    let generations = settings.simulation.generations;
    let initial_population = session.population();
    log::info!(
        "Running {} generations on a {}x{} board with the {} strategy",
        generations,
        settings.board.width,
        settings.board.height,
        settings.simulation.strategy
    );

    let show_progress = settings.output.report == ReportFormat::Text && generations >= 1000;
    let mut progress = ProgressIndicator::new(generations);
    let start_time = Instant::now();

    session.set_running(true);
    for generation in 1..=generations {
        session.tick()?;
        if show_progress {
            progress.update(generation);
        }
    }
    if show_progress {
        progress.finish();
    }
    let elapsed = start_time.elapsed();

    let saved_to = if save {
        let format = settings.output.format;
        let path = settings
            .output
            .output_directory
            .join(format!("generation_{}.{}", session.generation(), format.extension()));
        save_grid_to_file(session.grid(), &path, format)?;
        Some(path.display().to_string())
    } else {
        None
    };

    let report = RunReport {
        strategy: settings.simulation.strategy,
        width: settings.board.width,
        height: settings.board.height,
        generations: session.generation(),
        initial_population,
        final_population: session.population(),
        elapsed_ms: elapsed.as_millis(),
        saved_to,
    };

    match settings.output.report {
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize report")?);
        }
        ReportFormat::Text => {
            println!("{}", GridFormatter::format_report(&report));
            if show {
                println!("{}", GridFormatter::format_grid_compact(session.grid()));
            }
            println!("{}", ColorOutput::success("✅ Simulation complete"));
        }
    }

    Ok(())
}

/// Pick the output format from the file extension when none is given
fn infer_format(path: &Path) -> Result<PatternFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("rle") => Ok(PatternFormat::Rle),
        Some("txt") | Some("lif") | Some("life") => Ok(PatternFormat::Life106),
        _ => anyhow::bail!(
            "Cannot infer an output format from {}; pass --format",
            path.display()
        ),
    }
}

fn convert_command(input: PathBuf, output: PathBuf, format: Option<PatternFormat>) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => infer_format(&output)?,
    };

    let pattern = load_pattern_from_file(&input, Offset::default())?;
    let grid = pattern
        .to_grid()
        .with_context(|| format!("Failed to build a board from {}", input.display()))?;

    save_grid_to_file(&grid, &output, format)?;
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Converted {} ({} cells) to {} at {}",
            input.display(),
            pattern.len(),
            format,
            output.display()
        ))
    );
    Ok(())
}

fn analyze_command(config_path: PathBuf, pattern_path: PathBuf, max_generations: usize) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing pattern..."));

    let settings = load_settings(&config_path)?;
    let board = &settings.board;
    let grid = load_grid_from_file(&pattern_path, board.width, board.height, settings.input.offset(board))?;

    // Show only the part of the board the pattern occupies
    let pattern = load_pattern_from_file(&pattern_path, Offset::default())?;
    let footprint = pattern.to_grid()?;
    println!("Pattern ({}x{}):", footprint.width(), footprint.height());
    println!("{}", GridFormatter::format_grid_with_coords(&footprint));

    println!("{}", GridFormatter::format_statistics(&grid));

    let session = Session::new(grid, settings.simulation.strategy);
    let behavior = session.classify(max_generations)?;
    println!("Behavior on this board: {}", behavior);

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");
    let output_dir = directory.join("output/patterns");

    for dir in [&config_dir, &patterns_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Small board, glider, bit-packed
    let mut glider_config = Settings::default();
    glider_config.board.width = 32;
    glider_config.board.height = 32;
    glider_config.simulation.strategy = StepStrategy::BitPacked;
    glider_config.simulation.generations = 60;
    glider_config.input.pattern_file = Some(PathBuf::from("patterns/glider.rle"));
    glider_config.input.center = false;
    glider_config.to_file(examples_dir.join("glider.yaml"))?;

    // Large random soup, parallel
    let mut soup_config = Settings::default();
    soup_config.board.width = 512;
    soup_config.board.height = 512;
    soup_config.simulation.strategy = StepStrategy::Parallel;
    soup_config.simulation.generations = 1000;
    soup_config.simulation.random_density = Some(0.3);
    soup_config.to_file(examples_dir.join("soup.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", patterns_dir.display());
    println!("3. Run: cargo run -- run --config config/examples/glider.yaml --show");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "bounded_life",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
            "--strategy",
            "bitpacked",
            "--format",
            "life105",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["bounded_life", "run", "--strategy", "gpu"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.rle").exists());

        let settings = Settings::from_file(temp_dir.path().join("config/default.yaml")).unwrap();
        assert_eq!(settings.board.width, 80);
    }

    #[test]
    fn test_convert_command() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        let output = temp_dir.path().join("glider.txt");
        convert_command(temp_dir.path().join("glider.rle"), output.clone(), None).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "#Life 1.06\n1 0\n2 1\n0 2\n1 2\n2 2");

        let unknown = temp_dir.path().join("glider.png");
        assert!(convert_command(temp_dir.path().join("glider.rle"), unknown, None).is_err());
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(&temp_dir.path().join("missing.yaml")).unwrap();
        assert_eq!(settings.board.width, 80);
        assert_eq!(settings.simulation.strategy, StepStrategy::Scalar);

        let broken = temp_dir.path().join("broken.yaml");
        std::fs::write(&broken, "board: [").unwrap();
        assert!(load_settings(&broken).is_err());
    }

    #[test]
    fn test_infer_format() {
        assert_eq!(infer_format(Path::new("a.RLE")).unwrap(), PatternFormat::Rle);
        assert_eq!(infer_format(Path::new("a.txt")).unwrap(), PatternFormat::Life106);
        assert!(infer_format(Path::new("a")).is_err());
    }
}
