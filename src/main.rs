use anyhow::{Context, Result};
use clap::Parser;
use humus_core::grid::SoilGrid;
use humus_core::metrics::{init_logging, Metrics};
use humus_lib::config::RunConfig;
use humus_lib::render::{cell_table, wetness_map, DaySummary};
use humus_lib::scenario::ScenarioGenerator;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily soil-cell simulation", long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of days to simulate (overrides [scenario].days)
    #[arg(short, long)]
    days: Option<u64>,

    /// Scenario seed (overrides [scenario].seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format for the per-day summaries
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = RunConfig::load(&args.config)?;
    if let Some(days) = args.days {
        config.scenario.days = days;
    }
    if let Some(seed) = args.seed {
        config.scenario.seed = seed;
    }
    config.validate()?;

    let days = config.scenario.days;
    let mut grid = SoilGrid::new(config.engine.clone()).context("Failed to build soil grid")?;
    let mut generator = ScenarioGenerator::new(config.scenario.clone());
    let metrics = Metrics::new();

    tracing::info!(
        days,
        seed = generator.config().seed,
        cells = grid.cell_count(),
        "Starting run"
    );

    for _ in 0..days {
        let forcing = generator.next_day(&mut grid)?;
        let started = Instant::now();
        let report = grid.step(&forcing)?;
        metrics.record_day(started.elapsed(), &report);

        let summary = DaySummary::new(&grid, &forcing.weather, &report);
        match args.format {
            Format::Text => println!("{}", summary.to_text()),
            Format::Json => println!("{}", serde_json::to_string(&summary)?),
        }
    }

    if args.format == Format::Text {
        println!();
        print!("{}", wetness_map(&grid));
        println!();
        print!("{}", cell_table(&grid));
    }

    tracing::info!(
        days = metrics.days(),
        cells_stepped = metrics.cells_stepped(),
        leaching_events = metrics.leaching_events(),
        failed_cells = metrics.failed_cells(),
        elapsed_ms = metrics.elapsed().as_millis() as u64,
        "Run finished"
    );

    Ok(())
}
