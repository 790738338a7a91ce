//! Descriptive statistics over trial thresholds.
//!
//! All functions in this module handle edge cases explicitly and use
//! numerically stable algorithms to avoid catastrophic cancellation.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier (Kahan) compensated summation.
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Confidence interval**: normal approximation `x̄ ± z·s/√n`.

/// Two-sided 95% critical value of the standard normal distribution, as
/// conventionally rounded.
pub const Z_95: f64 = 1.96;

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_percolation::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Computes the sample variance (denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_percolation::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = WelfordAccumulator::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Returns `(lo, hi) = mean ∓ z·std_dev/√n`.
///
/// With `std_dev == 0` (for instance a single observation) the interval
/// collapses to the point `(mean, mean)`.
///
/// # Examples
/// ```
/// use u_percolation::stats::{normal_interval, Z_95};
/// let (lo, hi) = normal_interval(0.5, 0.1, 4, Z_95);
/// assert!((lo - 0.402).abs() < 1e-12);
/// assert!((hi - 0.598).abs() < 1e-12);
/// ```
pub fn normal_interval(mean: f64, std_dev: f64, n: usize, z: f64) -> (f64, f64) {
    let half_width = z * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Welford running sums behind [`variance`].
#[derive(Debug, Clone, Default)]
struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    fn new() -> Self {
        Self::default()
    }

    fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Sample variance (n − 1 denominator), `None` below 2 samples.
    fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- mean ---

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
    }

    #[test]
    fn test_mean_single() {
        assert_eq!(mean(&[1.0]), Some(1.0));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_non_finite() {
        assert_eq!(mean(&[0.5, f64::NAN]), None);
        assert_eq!(mean(&[0.5, f64::INFINITY]), None);
    }

    // --- variance ---

    #[test]
    fn test_variance_basic() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
    }

    #[test]
    fn test_variance_constant_is_exactly_zero() {
        assert_eq!(variance(&[1.0; 50]), Some(0.0));
        assert_eq!(std_dev(&[0.59; 7]), Some(0.0));
    }

    #[test]
    fn test_variance_needs_two_samples() {
        assert_eq!(variance(&[0.5]), None);
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_variance_large_offset() {
        // Naive E[X²] − E[X]² loses everything here.
        let v = [1e9 + 4.0, 1e9 + 7.0, 1e9 + 13.0, 1e9 + 16.0];
        assert!((variance(&v).unwrap() - 30.0).abs() < 1e-6);
    }

    // --- kahan_sum ---

    #[test]
    fn test_kahan_sum_compensates() {
        let data = vec![0.1; 10];
        assert!((kahan_sum(&data) - 1.0).abs() < 1e-15);
        assert_eq!(kahan_sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
    }

    // --- normal_interval ---

    #[test]
    fn test_normal_interval_zero_width() {
        assert_eq!(normal_interval(0.6, 0.0, 1, Z_95), (0.6, 0.6));
    }

    #[test]
    fn test_normal_interval_symmetric() {
        let (lo, hi) = normal_interval(0.59, 0.02, 100, Z_95);
        assert!((0.59 - lo - (hi - 0.59)).abs() < 1e-15);
        assert!((hi - lo - 2.0 * 1.96 * 0.002).abs() < 1e-12);
    }

    // --- WelfordAccumulator ---

    #[test]
    fn test_welford_needs_two_samples() {
        let mut acc = WelfordAccumulator::new();
        assert_eq!(acc.sample_variance(), None);
        acc.update(0.5);
        assert_eq!(acc.sample_variance(), None);
        acc.update(0.7);
        assert!((acc.sample_variance().unwrap() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_welford_matches_two_pass() {
        let data = [0.55, 0.61, 0.58, 0.63, 0.57, 0.60];
        let mut acc = WelfordAccumulator::new();
        for &x in &data {
            acc.update(x);
        }
        let m = data.iter().sum::<f64>() / data.len() as f64;
        let two_pass = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / 5.0;
        assert!((acc.sample_variance().unwrap() - two_pass).abs() < 1e-15);
    }
}
