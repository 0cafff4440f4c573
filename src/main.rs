use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use pointless::{Report, Search, SearchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Search for pointless curves y^n = f(x) of a given genus over small finite fields.
#[derive(Parser)]
#[command(name = "pointless", version, about)]
struct Cli {
    /// Exponent n in y^n = f(x), at least 2
    n: Option<u64>,

    /// Target genus g, at least 1
    g: Option<u64>,

    /// Smallest field size to examine [default: 2]
    #[arg(long)]
    q_start: Option<u64>,

    /// Random polynomials tried per (degree, field) pair [default: 1000000]
    #[arg(long)]
    max_trials: Option<u64>,

    /// Seed for reproducible runs (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Run the (degree, field) pairs in parallel
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Append the report to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML file with search parameters; command-line values take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // LOG_FORMAT=json for machine-readable logs, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let search = Search::plan(config).context("invalid search parameters")?;

    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    info!(seed, parallel = cli.parallel, "starting search");

    let records = if cli.parallel {
        configure_rayon(cli.threads);
        search.run_parallel(seed)?
    } else {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        search.run(&mut rng)?
    };

    let report = Report::new(&search, &records);
    info!(
        tasks = records.len(),
        found = report.found(),
        "search finished"
    );

    let text = report.to_string();
    print!("{}", text);
    if let Some(path) = &cli.output {
        append_report(path, &text)?;
    }
    Ok(())
}

/// Config file first, then positional arguments and flags on top.
fn resolve_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str::<SearchConfig>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => match (cli.n, cli.g) {
            (Some(n), Some(g)) => SearchConfig::new(n, g),
            _ => bail!("n and g are required unless --config is given"),
        },
    };

    if let Some(n) = cli.n {
        config.exponent = n;
    }
    if let Some(g) = cli.g {
        config.genus = g;
    }
    if let Some(q_start) = cli.q_start {
        config.q_start = q_start;
    }
    if let Some(max_trials) = cli.max_trials {
        config.max_trials = max_trials;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn configure_rayon(threads: Option<usize>) {
    let Some(num_threads) = threads.filter(|&t| t > 0) else {
        return;
    };
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        warn!(error = %e, "Could not configure rayon thread pool");
    }
}

fn append_report(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
