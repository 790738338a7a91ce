//! Site-selection strategies for a single percolation trial.
//!
//! Both strategies open sites uniformly at random among the sites that are
//! still blocked, until the lattice percolates:
//!
//! - [`Sampling::Rejection`] draws `(row, col)` uniformly from the whole
//!   grid with replacement and skips draws that land on an open site.
//!   Expected work grows as the grid fills, with no fixed upper bound.
//! - [`Sampling::Permutation`] shuffles the blocked sites once and opens
//!   them in that order. Each step is uniform over the remaining blocked
//!   sites and a trial performs at most N² opens.
//!
//! The two produce the same threshold distribution.

use std::fmt;

use clap::ValueEnum;
use rand::Rng;

use crate::error::Result;
use crate::lattice::Lattice;
use crate::random::shuffle;

/// How a trial chooses the next site to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Sampling {
    /// Uniform draws with replacement; already-open draws are skipped.
    #[default]
    Rejection,
    /// A single shuffle of the blocked sites, opened in order.
    Permutation,
}

impl fmt::Display for Sampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sampling::Rejection => f.write_str("rejection"),
            Sampling::Permutation => f.write_str("permutation"),
        }
    }
}

/// Opens random blocked sites of `lattice` until it percolates.
///
/// Returns the number of sites opened by this call. A lattice that
/// already percolates is left untouched.
///
/// # Examples
/// ```
/// use u_percolation::{percolate, random::create_rng, Lattice, Sampling};
///
/// let mut lattice = Lattice::new(8).unwrap();
/// let mut rng = create_rng(3);
/// let opened = percolate(&mut lattice, Sampling::Permutation, &mut rng).unwrap();
/// assert!(lattice.percolates());
/// assert_eq!(opened, lattice.open_sites());
/// ```
pub fn percolate<R: Rng>(lattice: &mut Lattice, sampling: Sampling, rng: &mut R) -> Result<usize> {
    let before = lattice.open_sites();
    match sampling {
        Sampling::Rejection => open_by_rejection(lattice, rng)?,
        Sampling::Permutation => open_by_permutation(lattice, rng)?,
    }
    Ok(lattice.open_sites() - before)
}

fn open_by_rejection<R: Rng>(lattice: &mut Lattice, rng: &mut R) -> Result<()> {
    let n = lattice.size();
    while !lattice.percolates() {
        let row = rng.random_range(1..=n);
        let col = rng.random_range(1..=n);
        if !lattice.is_open(row, col)? {
            lattice.open(row, col)?;
        }
    }
    Ok(())
}

fn open_by_permutation<R: Rng>(lattice: &mut Lattice, rng: &mut R) -> Result<()> {
    let n = lattice.size();
    let mut blocked = Vec::with_capacity(n * n - lattice.open_sites());
    for row in 1..=n {
        for col in 1..=n {
            if !lattice.is_open(row, col)? {
                blocked.push((row, col));
            }
        }
    }
    shuffle(&mut blocked, rng);

    for (row, col) in blocked {
        if lattice.percolates() {
            break;
        }
        lattice.open(row, col)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_single_site_opens_once() {
        for sampling in [Sampling::Rejection, Sampling::Permutation] {
            let mut lattice = Lattice::new(1).unwrap();
            let mut rng = create_rng(1);
            assert_eq!(percolate(&mut lattice, sampling, &mut rng).unwrap(), 1);
            assert!(lattice.percolates());
        }
    }

    #[test]
    fn test_stops_at_first_percolation() {
        for sampling in [Sampling::Rejection, Sampling::Permutation] {
            for seed in 0..20 {
                let mut lattice = Lattice::new(6).unwrap();
                let mut rng = create_rng(seed);
                let opened = percolate(&mut lattice, sampling, &mut rng).unwrap();
                assert!(lattice.percolates());
                assert_eq!(opened, lattice.open_sites());
                // Percolation needs at least one site per row.
                assert!(opened >= 6, "{sampling}: opened only {opened}");
            }
        }
    }

    #[test]
    fn test_already_percolating_lattice_is_untouched() {
        let mut lattice = Lattice::new(3).unwrap();
        for row in 1..=3 {
            lattice.open(row, 2).unwrap();
        }
        let mut rng = create_rng(5);
        assert_eq!(percolate(&mut lattice, Sampling::Permutation, &mut rng).unwrap(), 0);
        assert_eq!(percolate(&mut lattice, Sampling::Rejection, &mut rng).unwrap(), 0);
        assert_eq!(lattice.open_sites(), 3);
    }

    #[test]
    fn test_partially_open_lattice_counts_new_sites_only() {
        let mut lattice = Lattice::new(4).unwrap();
        lattice.open(2, 2).unwrap();
        lattice.open(3, 3).unwrap();
        let mut rng = create_rng(11);
        let opened = percolate(&mut lattice, Sampling::Permutation, &mut rng).unwrap();
        assert_eq!(opened + 2, lattice.open_sites());
    }

    #[test]
    fn test_same_seed_same_trial() {
        for sampling in [Sampling::Rejection, Sampling::Permutation] {
            let mut a = Lattice::new(10).unwrap();
            let mut b = Lattice::new(10).unwrap();
            percolate(&mut a, sampling, &mut create_rng(77)).unwrap();
            percolate(&mut b, sampling, &mut create_rng(77)).unwrap();
            assert_eq!(a.to_string(), b.to_string());
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Sampling::Rejection.to_string(), "rejection");
        assert_eq!(Sampling::Permutation.to_string(), "permutation");
        assert_eq!(Sampling::default(), Sampling::Rejection);
    }

    #[test]
    fn test_value_enum_parses_names() {
        assert_eq!(
            Sampling::from_str("permutation", false).unwrap(),
            Sampling::Permutation
        );
        assert!(Sampling::from_str("bogus", false).is_err());
    }
}
