//! Robust statistics for latency samples.
//!
//! The headline figure is a percentile-trimmed mean: samples are sorted,
//! a [`PercentileBand`] is mapped to an index window over the sorted order
//! by [`TrimWindow`], and the samples inside that window are averaged.
//!
//! The window clamping is deliberately lenient. For tiny sample counts or
//! very narrow bands it degrades to a single-sample window (the fastest
//! sample) instead of failing, so a run always produces a number.

use std::ops::Range;

use crate::error::Error;

/// A `(lower, upper)` percentile pair selecting part of a sorted sample set.
///
/// Invariants: `0 <= lower < 100`, `0 < upper <= 100`, `lower < upper`.
/// An upper bound of exactly 100 is accepted and clamps to the slowest
/// sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBand {
    lower: f64,
    upper: f64,
}

impl PercentileBand {
    /// Band used when none is configured: fastest 1% dropped, samples kept
    /// up to the 10th percentile.
    pub const DEFAULT: Self = Self {
        lower: 1.0,
        upper: 10.0,
    };

    /// Build a validated band.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPercentile`] if a bound is outside its interval (NaN
    /// included), [`Error::InvertedBand`] if `lower >= upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, Error> {
        if !(upper > 0.0 && upper <= 100.0) {
            return Err(Error::InvalidPercentile {
                which: "upper",
                value: upper,
                range: "(0, 100]",
            });
        }
        if !(lower >= 0.0 && lower < 100.0) {
            return Err(Error::InvalidPercentile {
                which: "lower",
                value: lower,
                range: "[0, 100)",
            });
        }
        if lower >= upper {
            return Err(Error::InvertedBand { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Lower percentile.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper percentile.
    pub fn upper(&self) -> f64 {
        self.upper
    }
}

impl Default for PercentileBand {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Index window over a sorted sample set of a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimWindow {
    /// First included index.
    pub lower: usize,
    /// Upper index after clamping. Equal to `lower` only for the degenerate
    /// single-sample window.
    pub upper: usize,
    /// Number of samples averaged. Never zero.
    pub sample_size: usize,
}

impl TrimWindow {
    /// Map `band` onto `n` sorted samples. Returns `None` when `n == 0`.
    ///
    /// Indices are `floor(n * p / 100)`. The upper index is clamped to
    /// `n - 1`; if the lower index then reaches it, lower moves to
    /// `upper - 1` (or stays at 0). A zero width is widened to one sample.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn compute(n: usize, band: PercentileBand) -> Option<Self> {
        if n == 0 {
            return None;
        }

        let mut lower = (n as f64 * band.lower / 100.0) as usize;
        let mut upper = (n as f64 * band.upper / 100.0) as usize;

        if upper >= n {
            upper = n - 1;
        }
        if lower >= upper {
            lower = upper.saturating_sub(1);
        }

        let sample_size = (upper - lower).max(1);
        Some(Self {
            lower,
            upper,
            sample_size,
        })
    }

    /// The indices actually summed: `sample_size` samples from `lower`.
    pub fn range(&self) -> Range<usize> {
        self.lower..self.lower + self.sample_size
    }
}

/// Sort `samples` in place and return their trimmed mean over `band`.
///
/// Returns `None` only for an empty slice.
pub fn trimmed_mean(samples: &mut [f64], band: PercentileBand) -> Option<f64> {
    samples.sort_unstable_by(f64::total_cmp);
    trimmed_mean_sorted(samples, band)
}

/// Trimmed mean of samples that are already sorted ascending.
#[allow(clippy::cast_precision_loss)]
pub fn trimmed_mean_sorted(sorted: &[f64], band: PercentileBand) -> Option<f64> {
    let window = TrimWindow::compute(sorted.len(), band)?;
    let sum: f64 = sorted[window.range()].iter().sum();
    Some(sum / window.sample_size as f64)
}

/// Summary statistics for a benchmark run, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchStats {
    /// Fastest sample.
    pub min: f64,
    /// Slowest sample.
    pub max: f64,
    /// Median sample.
    pub median: f64,
    /// Arithmetic mean of all samples.
    pub mean: f64,
    /// Sample standard deviation (zero for a single sample).
    pub stddev: f64,
    /// Number of samples.
    pub count: usize,
}

impl BenchStats {
    /// Compute statistics from a mutable slice of samples.
    ///
    /// The slice is sorted in place. Returns `None` if the slice is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(samples: &mut [f64]) -> Option<Self> {
        let n = samples.len();
        if n == 0 {
            return None;
        }

        samples.sort_unstable_by(f64::total_cmp);

        let min = samples[0];
        let max = samples[n - 1];
        let median = if n % 2 == 0 {
            (samples[n / 2 - 1] + samples[n / 2]) / 2.0
        } else {
            samples[n / 2]
        };

        let mean = samples.iter().sum::<f64>() / n as f64;
        let stddev = if n > 1 {
            let var_sum: f64 = samples.iter().map(|&s| (s - mean) * (s - mean)).sum();
            (var_sum / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            min,
            max,
            median,
            mean,
            stddev,
            count: n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(lower: f64, upper: f64) -> PercentileBand {
        PercentileBand::new(lower, upper).unwrap()
    }

    #[test]
    fn central_band_of_ten() {
        let mut samples: Vec<f64> = (1..=10).rev().map(f64::from).collect();
        let w = TrimWindow::compute(10, band(10.0, 90.0)).unwrap();
        assert_eq!((w.lower, w.upper, w.sample_size), (1, 9, 8));
        assert_eq!(trimmed_mean(&mut samples, band(10.0, 90.0)), Some(5.5));
    }

    #[test]
    fn single_sample_returns_it() {
        let mut samples = [0.25];
        let w = TrimWindow::compute(1, band(1.0, 10.0)).unwrap();
        assert_eq!((w.lower, w.upper, w.sample_size), (0, 0, 1));
        assert_eq!(w.range(), 0..1);
        assert_eq!(trimmed_mean(&mut samples, band(1.0, 10.0)), Some(0.25));
    }

    #[test]
    fn narrow_band_degrades_to_fastest() {
        let mut samples = [50.0, 30.0, 10.0, 40.0, 20.0];
        let w = TrimWindow::compute(5, band(1.0, 5.0)).unwrap();
        assert_eq!((w.lower, w.upper, w.sample_size), (0, 0, 1));
        assert_eq!(trimmed_mean(&mut samples, band(1.0, 5.0)), Some(10.0));
    }

    #[test]
    fn upper_hundred_clamps_to_last_index() {
        let w = TrimWindow::compute(4, band(0.0, 100.0)).unwrap();
        assert_eq!((w.lower, w.upper, w.sample_size), (0, 3, 3));
        let mut samples = [4.0, 3.0, 2.0, 1.0];
        // The slowest sample is always excluded by the clamp.
        assert_eq!(trimmed_mean(&mut samples, band(0.0, 100.0)), Some(2.0));
    }

    #[test]
    fn lower_pulled_below_upper() {
        // n=3, band (40, 50): lower=1, upper=1 -> lower becomes 0.
        let w = TrimWindow::compute(3, band(40.0, 50.0)).unwrap();
        assert_eq!((w.lower, w.upper, w.sample_size), (0, 1, 1));
    }

    #[test]
    fn two_samples_default_band() {
        let mut samples = [2.0, 1.0];
        let w = TrimWindow::compute(2, PercentileBand::DEFAULT).unwrap();
        assert_eq!(w.range(), 0..1);
        assert_eq!(trimmed_mean(&mut samples, PercentileBand::default()), Some(1.0));
    }

    #[test]
    fn default_band_thousand_samples() {
        let w = TrimWindow::compute(1000, PercentileBand::DEFAULT).unwrap();
        assert_eq!((w.lower, w.upper, w.sample_size), (10, 100, 90));
    }

    #[test]
    fn empty_samples() {
        assert!(TrimWindow::compute(0, PercentileBand::DEFAULT).is_none());
        assert!(trimmed_mean(&mut [], PercentileBand::DEFAULT).is_none());
    }

    #[test]
    fn band_validation() {
        assert!(PercentileBand::new(0.0, 100.0).is_ok());
        assert!(matches!(
            PercentileBand::new(1.0, 0.0),
            Err(Error::InvalidPercentile { which: "upper", .. })
        ));
        assert!(matches!(
            PercentileBand::new(1.0, 100.5),
            Err(Error::InvalidPercentile { which: "upper", .. })
        ));
        assert!(matches!(
            PercentileBand::new(-1.0, 10.0),
            Err(Error::InvalidPercentile { which: "lower", .. })
        ));
        assert!(matches!(
            PercentileBand::new(f64::NAN, 10.0),
            Err(Error::InvalidPercentile { which: "lower", .. })
        ));
        assert_eq!(
            PercentileBand::new(10.0, 5.0),
            Err(Error::InvertedBand {
                lower: 10.0,
                upper: 5.0
            })
        );
        assert!(matches!(
            PercentileBand::new(5.0, 5.0),
            Err(Error::InvertedBand { .. })
        ));
    }

    #[test]
    fn stats_single_sample() {
        let mut samples = [0.5];
        let stats = BenchStats::compute(&mut samples).unwrap();
        assert_eq!(stats.min, 0.5);
        assert_eq!(stats.max, 0.5);
        assert_eq!(stats.median, 0.5);
        assert_eq!(stats.mean, 0.5);
        assert_eq!(stats.stddev, 0.0);
        assert_eq!(stats.count, 1);
    }

    #[test]
    fn stats_two_samples() {
        let mut samples = [3.0, 1.0];
        let stats = BenchStats::compute(&mut samples).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.median, 2.0);
        assert_eq!(stats.mean, 2.0);
        assert!((stats.stddev - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn stats_odd_count() {
        let mut samples = [5.0, 1.0, 9.0, 3.0, 7.0];
        let stats = BenchStats::compute(&mut samples).unwrap();
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(samples, [1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn stats_empty() {
        assert!(BenchStats::compute(&mut []).is_none());
    }
}
