use clap::Parser;
use u_percolation::{EstimatorConfig, Sampling};

#[derive(Parser)]
#[command(name = "u-percolation")]
#[command(
    author,
    version,
    about = "Estimate the site percolation threshold by Monte Carlo simulation"
)]
pub struct Cli {
    /// Grid size N (the lattice is N×N)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub grid_size: u64,

    /// Number of independent trials T
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub trials: u64,

    /// Base seed for reproducible runs
    #[arg(long, env = "U_PERCOLATION_SEED")]
    pub seed: Option<u64>,

    /// How each trial picks the next site to open
    #[arg(long, value_enum, default_value_t = Sampling::Rejection)]
    pub sampling: Sampling,

    /// Run trials on all cores (requires the `parallel` feature)
    #[arg(long)]
    pub parallel: bool,

    /// Print one extra percolated lattice to stderr
    #[arg(long)]
    pub show: bool,
}

impl Cli {
    pub fn estimator_config(&self) -> anyhow::Result<EstimatorConfig> {
        let grid_size = usize::try_from(self.grid_size)?;
        let trials = usize::try_from(self.trials)?;

        let mut config = EstimatorConfig::new(grid_size, trials)
            .with_sampling(self.sampling)
            .with_parallel(self.parallel);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}
