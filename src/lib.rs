//! # u-percolation
//!
//! Site percolation on square lattices and Monte Carlo estimation of the
//! percolation threshold.
//!
//! ## Modules
//!
//! - [`lattice`] — N×N grid with incremental top/bottom connectivity and a
//!   backwash-free full-site query
//! - [`estimator`] — repeated randomized trials, mean, standard deviation,
//!   and confidence intervals
//! - [`sampling`] — how a trial picks the next site to open
//! - [`collections`] — weighted union-find
//! - [`stats`] — descriptive statistics with numerical stability guarantees
//! - [`special`] — normal quantile for arbitrary confidence levels
//! - [`random`] — seeded generators and shuffling
//!
//! ## Design Philosophy
//!
//! - **Two forests, not flags**: percolation and fullness are answered by
//!   two independent union-find instances, so backwash is ruled out by
//!   construction
//! - **No panics on bad input**: coordinates and configuration are
//!   validated and reported through [`Error`]
//! - **Property-based testing**: lattice queries are checked against a
//!   flood-fill reference via proptest
//!
//! ## Example
//!
//! ```
//! use u_percolation::{EstimatorConfig, Sampling, ThresholdEstimator};
//!
//! let config = EstimatorConfig::new(16, 25)
//!     .with_sampling(Sampling::Permutation)
//!     .with_seed(42);
//! let estimate = ThresholdEstimator::with_config(config).unwrap();
//! assert!(estimate.mean() > 0.0 && estimate.mean() <= 1.0);
//! ```

pub mod collections;
pub mod error;
pub mod estimator;
pub mod lattice;
pub mod random;
pub mod sampling;
pub mod special;
pub mod stats;

pub use error::{Error, Result};
pub use estimator::{EstimatorConfig, ThresholdEstimator};
pub use lattice::Lattice;
pub use sampling::{percolate, Sampling};
