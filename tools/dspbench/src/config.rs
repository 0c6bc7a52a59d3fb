//! Run configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then command-line arguments. The merged result is validated before any
//! kernel is constructed.

use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use dspbench::{
    DEFAULT_BLOCK_SIZE, DEFAULT_ITERATIONS, DEFAULT_SAMPLE_RATE, Error, KernelKind,
    MAX_SAMPLE_RATE, PercentileBand,
};
use serde::Deserialize;

use crate::cli::Cli;

/// Contents of a configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Built-in kernel name.
    pub kernel: Option<String>,
    /// Frames per kernel call.
    pub block_size: Option<usize>,
    /// Sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Number of timed measurements.
    pub iterations: Option<usize>,
    /// Upper percentile.
    pub upper_percentile: Option<f64>,
    /// Lower percentile.
    pub lower_percentile: Option<f64>,
}

/// Read and parse a TOML configuration file.
pub fn load(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Fully resolved and validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Kernel under test.
    pub kernel: KernelKind,
    /// Frames per kernel call.
    pub block_size: usize,
    /// Sample rate passed to the kernel.
    pub sample_rate: u32,
    /// Number of timed measurements.
    pub iterations: NonZeroUsize,
    /// Percentile band averaged by the estimator.
    pub band: PercentileBand,
}

impl RunConfig {
    /// Merge defaults, `file` and `cli`, and validate the result.
    pub fn resolve(cli: &Cli, file: Option<&FileConfig>) -> Result<Self> {
        let empty = FileConfig::default();
        let file = file.unwrap_or(&empty);

        let kernel = match cli.kernel.as_deref().or(file.kernel.as_deref()) {
            Some(name) => name.parse()?,
            None => KernelKind::default(),
        };

        let block_size = cli
            .block_size
            .or(file.block_size)
            .unwrap_or(DEFAULT_BLOCK_SIZE);
        if block_size == 0 {
            return Err(Error::InvalidBlockSize.into());
        }

        let sample_rate = cli
            .sample_rate
            .or(file.sample_rate)
            .unwrap_or(DEFAULT_SAMPLE_RATE);
        if !(1..=MAX_SAMPLE_RATE).contains(&sample_rate) {
            return Err(Error::InvalidSampleRate(sample_rate).into());
        }

        let iterations = match cli.iterations {
            Some(n) => n,
            None => {
                let n = file.iterations.unwrap_or(DEFAULT_ITERATIONS);
                NonZeroUsize::new(n)
                    .ok_or_else(|| anyhow!("iteration count must be positive, got {n}"))?
            }
        };

        let upper = cli
            .upper_percentile
            .or(file.upper_percentile)
            .unwrap_or(PercentileBand::DEFAULT.upper());
        let lower = cli
            .lower_percentile
            .or(file.lower_percentile)
            .unwrap_or(PercentileBand::DEFAULT.lower());
        let band = PercentileBand::new(lower, upper)?;

        Ok(Self {
            kernel,
            block_size,
            sample_rate,
            iterations,
            band,
        })
    }
}
