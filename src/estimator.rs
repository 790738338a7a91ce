//! Monte Carlo estimation of the percolation threshold.
//!
//! A [`ThresholdEstimator`] runs `T` independent trials on fresh N×N
//! lattices. Each trial opens random blocked sites until the lattice
//! percolates and records the fraction of sites open at that moment.
//! All trials run inside the constructor; afterwards every query is a
//! pure read over the stored thresholds.
//!
//! # Statistics
//!
//! - `mean()`: sample mean `x̄`
//! - `stddev()`: sample standard deviation `s` (denominator `T − 1`)
//! - `confidence_lo()` / `confidence_hi()`: `x̄ ∓ 1.96·s/√T`
//!
//! With `T = 1` the standard deviation is taken as 0 and the interval
//! collapses to the single observed threshold.

use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::lattice::{slot_count, Lattice};
use crate::random::{entropy_seed, trial_rng};
use crate::sampling::{percolate, Sampling};
use crate::special::two_sided_critical_value;
use crate::stats::{self, normal_interval, Z_95};

/// Parameters for a threshold estimation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Side length N of each lattice.
    pub grid_size: usize,
    /// Number of independent trials T.
    pub trials: usize,
    /// Site-selection strategy used by every trial.
    pub sampling: Sampling,
    /// Base seed; trial `i` is seeded with `seed + i`. `None` draws one
    /// from the entropy source.
    pub seed: Option<u64>,
    /// Run trials on the rayon thread pool. Only honoured when the crate
    /// is built with the `parallel` feature.
    pub parallel: bool,
}

impl EstimatorConfig {
    /// Configuration for `trials` trials on `grid_size`×`grid_size`
    /// lattices with rejection sampling and an entropy seed.
    pub fn new(grid_size: usize, trials: usize) -> Self {
        Self {
            grid_size,
            trials,
            sampling: Sampling::default(),
            seed: None,
            parallel: false,
        }
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the grid size is positive and addressable and that the
    /// trial count is positive.
    pub fn validate(&self) -> Result<()> {
        slot_count(self.grid_size)?;
        if self.trials == 0 {
            return Err(Error::InvalidTrialCount {
                trials: self.trials,
            });
        }
        Ok(())
    }
}

/// Percolation threshold estimate over a completed set of trials.
///
/// # Examples
/// ```
/// use u_percolation::{EstimatorConfig, ThresholdEstimator};
///
/// let config = EstimatorConfig::new(20, 30).with_seed(7);
/// let estimate = ThresholdEstimator::with_config(config).unwrap();
///
/// assert_eq!(estimate.thresholds().len(), 30);
/// assert!(estimate.confidence_lo() <= estimate.mean());
/// assert!(estimate.mean() <= estimate.confidence_hi());
/// ```
#[derive(Debug, Clone)]
pub struct ThresholdEstimator {
    grid_size: usize,
    seed: u64,
    thresholds: Vec<f64>,
}

impl ThresholdEstimator {
    /// Runs `trials` trials on `n`×`n` lattices with default settings.
    ///
    /// # Errors
    /// [`Error::InvalidGridSize`] if `n == 0` or `n² + 2` overflows `usize`,
    /// [`Error::InvalidTrialCount`] if `trials == 0`.
    pub fn new(n: usize, trials: usize) -> Result<Self> {
        Self::with_config(EstimatorConfig::new(n, trials))
    }

    /// Runs every trial described by `config`.
    pub fn with_config(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(entropy_seed);

        let thresholds = run_trials(&config, seed)?;
        let estimator = Self {
            grid_size: config.grid_size,
            seed,
            thresholds,
        };

        info!(
            n = estimator.grid_size,
            trials = estimator.trials(),
            sampling = %config.sampling,
            seed,
            mean = estimator.mean(),
            stddev = estimator.stddev(),
            "threshold estimate complete"
        );
        Ok(estimator)
    }

    /// Runs a single trial on a fresh `n`×`n` lattice and returns the
    /// fraction of sites open when it first percolates, in `(0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use u_percolation::{random::create_rng, Sampling, ThresholdEstimator};
    ///
    /// let mut rng = create_rng(1);
    /// let p = ThresholdEstimator::run_trial(1, Sampling::Rejection, &mut rng).unwrap();
    /// assert_eq!(p, 1.0);
    /// ```
    pub fn run_trial<R: Rng>(n: usize, sampling: Sampling, rng: &mut R) -> Result<f64> {
        let mut lattice = Lattice::new(n)?;
        percolate(&mut lattice, sampling, rng)?;
        Ok(lattice.open_fraction())
    }

    /// Side length of the simulated lattices.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of trials run.
    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// Base seed the trials were derived from. Passing it back through
    /// [`EstimatorConfig::with_seed`] reproduces this run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Per-trial thresholds.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Sample mean of the thresholds.
    pub fn mean(&self) -> f64 {
        stats::mean(&self.thresholds).unwrap_or(f64::NAN)
    }

    /// Sample standard deviation of the thresholds; 0 for a single trial.
    pub fn stddev(&self) -> f64 {
        stats::std_dev(&self.thresholds).unwrap_or(0.0)
    }

    /// Low endpoint of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.interval(Z_95).0
    }

    /// High endpoint of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.interval(Z_95).1
    }

    /// Normal-approximation confidence interval at an arbitrary `level`.
    ///
    /// The critical value comes from a rational approximation of the
    /// normal quantile, so `confidence_interval(0.95)` agrees with
    /// `(confidence_lo(), confidence_hi())` only to about three digits.
    ///
    /// # Errors
    /// [`Error::InvalidConfidenceLevel`] unless `0 < level < 1`.
    pub fn confidence_interval(&self, level: f64) -> Result<(f64, f64)> {
        if !(level > 0.0 && level < 1.0) {
            return Err(Error::InvalidConfidenceLevel { level });
        }
        Ok(self.interval(two_sided_critical_value(level)))
    }

    fn interval(&self, z: f64) -> (f64, f64) {
        normal_interval(self.mean(), self.stddev(), self.trials(), z)
    }
}

#[cfg(feature = "parallel")]
fn run_trials(config: &EstimatorConfig, seed: u64) -> Result<Vec<f64>> {
    use rayon::prelude::*;

    if !config.parallel {
        return run_serial(config, seed);
    }
    (0..config.trials)
        .into_par_iter()
        .map(|index| seeded_trial(config, seed, index))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_trials(config: &EstimatorConfig, seed: u64) -> Result<Vec<f64>> {
    if config.parallel {
        tracing::warn!("built without the `parallel` feature; running trials serially");
    }
    run_serial(config, seed)
}

fn run_serial(config: &EstimatorConfig, seed: u64) -> Result<Vec<f64>> {
    (0..config.trials)
        .map(|index| seeded_trial(config, seed, index))
        .collect()
}

fn seeded_trial(config: &EstimatorConfig, seed: u64, index: usize) -> Result<f64> {
    let mut rng = trial_rng(seed, index);
    let threshold = ThresholdEstimator::run_trial(config.grid_size, config.sampling, &mut rng)?;
    debug!(trial = index, threshold, "trial percolated");
    Ok(threshold)
}

// ============================================================================
// Tests
// ============================================================================
