//! Sealed-bid auction equilibrium finder binary.
//!
//! Usage:
//!   cargo run --release --bin auction_nash -- [OPTIONS]
//!
//! Without options, solves the default batch: value profiles (50, 50),
//! (70, 50), (49, 50) in both FPA and SPA on bids 0..=100.

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use auction_nash::scenario::{run_batch_with_callback, NullReporter, Reporter, StdoutReporter};
use auction_nash::{AuctionConfig, ScenarioBatch};

#[derive(Parser)]
#[command(author, version, about = "Pure-strategy Nash equilibria of sealed-bid auctions")]
struct Args {
    /// Configuration JSON file (max_bid, eps, num_threads)
    #[arg(short, long)]
    config: Option<String>,

    /// Scenario batch JSON file (value_profiles, formats)
    #[arg(short, long)]
    batch: Option<String>,

    /// Value profile "v1,v2" (repeatable; overrides the batch file's profiles)
    #[arg(short = 'v', long = "values", value_parser = parse_profile)]
    values: Vec<(f64, f64)>,

    /// Auction format, FPA or SPA (repeatable; overrides the batch file's formats)
    #[arg(short, long = "format")]
    formats: Vec<String>,

    /// Inclusive upper bound of the bid grid
    #[arg(long)]
    max_bid: Option<u32>,

    /// Tie tolerance for best responses
    #[arg(long)]
    eps: Option<f64>,

    /// Number of threads (0 or 1 = sequential)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write results as JSON to this file
    #[arg(short, long)]
    output: Option<String>,

    /// Only print the summary, not one line per equilibrium
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn parse_profile(s: &str) -> Result<(f64, f64), String> {
    let (v1, v2) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"v1,v2\", got \"{}\"", s))?;
    let v1 = v1.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let v2 = v2.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if !v1.is_finite() || !v2.is_finite() {
        return Err(format!("valuations must be finite, got \"{}\"", s));
    }
    Ok((v1, v2))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &args.config {
        Some(path) => AuctionConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path))?,
        None => AuctionConfig::default(),
    };
    if let Some(max_bid) = args.max_bid {
        config = config.with_max_bid(max_bid);
    }
    if let Some(eps) = args.eps {
        config = config.with_eps(eps);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    config.validate().context("invalid configuration")?;

    let mut batch = match &args.batch {
        Some(path) => ScenarioBatch::from_json_file(path)
            .with_context(|| format!("loading scenario batch from {}", path))?,
        None => ScenarioBatch::default(),
    };
    if !args.values.is_empty() {
        batch.value_profiles = args.values.clone();
    }
    if !args.formats.is_empty() {
        batch.formats = args.formats.clone();
    }

    println!("=== Sealed-Bid Auction Equilibria ===");
    println!(
        "Bids: 0..={} | eps: {:e} | Scenarios: {}",
        config.max_bid,
        config.eps,
        batch.len()
    );
    println!();

    let start = Instant::now();

    let progress = ProgressBar::new(batch.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} scenarios")
            .context("progress bar template")?,
    );

    let mut stdout_reporter = StdoutReporter;
    let mut null_reporter = NullReporter;
    let reporter: &mut dyn Reporter = if args.quiet {
        &mut null_reporter
    } else {
        &mut stdout_reporter
    };

    let output = run_batch_with_callback(&batch, &config, reporter, || progress.inc(1));
    progress.finish_and_clear();

    println!();
    output.print_summary();
    log::info!("finished in {:.3}s", start.elapsed().as_secs_f64());

    if let Some(path) = &args.output {
        output
            .save_json(path)
            .with_context(|| format!("saving results to {}", path))?;
        println!("Saved JSON: {}", path);
    }

    if output.num_failed() > 0 {
        anyhow::bail!("{} of {} scenarios failed", output.num_failed(), output.scenarios.len());
    }

    Ok(())
}
