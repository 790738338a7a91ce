use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use u_percolation::{percolate, random::trial_rng, Lattice, ThresholdEstimator};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the estimate.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = cli.estimator_config()?;

    let estimate = ThresholdEstimator::with_config(config.clone())
        .context("failed to run percolation trials")?;

    println!("mean = {}", estimate.mean());
    println!("stddev = {}", estimate.stddev());
    println!(
        "95% confidence interval = {}, {}",
        estimate.confidence_lo(),
        estimate.confidence_hi()
    );

    if cli.show {
        let mut lattice = Lattice::new(config.grid_size)?;
        let mut rng = trial_rng(estimate.seed(), config.trials);
        let opened = percolate(&mut lattice, config.sampling, &mut rng)?;
        eprintln!("percolated after {opened} opens ({}):", lattice.open_fraction());
        eprint!("{lattice}");
    }

    Ok(())
}
