use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdvrp_ga::ga::{GaConfig, SearchContext, TrainingOutcome};
use mdvrp_ga::io::{load_problem, SolutionReport};

/// Solve a multi-depot vehicle routing instance with a genetic algorithm.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Instance file
    problem: PathBuf,

    /// JSON file with GA parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations
    #[arg(short, long)]
    generations: Option<usize>,

    /// Population size
    #[arg(short, long)]
    population_size: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GaConfig::from_json_file(path)
            .with_context(|| format!("cannot read config {}", path.display()))?,
        None => GaConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(generations) = args.generations {
        config = config.with_generations(generations);
    }
    if let Some(size) = args.population_size {
        config = config.with_population_size(size);
    }

    let problem = load_problem(&args.problem)
        .with_context(|| format!("cannot load problem {}", args.problem.display()))?;
    let mut ctx = SearchContext::new(problem, config).context("invalid GA configuration")?;

    let best = match ctx.train() {
        TrainingOutcome::Solved(best) => best,
        TrainingOutcome::NoConsistentSolution { .. } => {
            bail!("no consistent solution found for {}", args.problem.display())
        }
    };
    let report = SolutionReport::from_chromosome(ctx.problem(), &best.chromosome);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    if args.json {
        report.write_json(&mut writer)?;
    } else {
        report.write_text(&mut writer)?;
    }
    writer.flush()?;
    Ok(())
}
