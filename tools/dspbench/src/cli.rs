//! Command-line interface definitions for dspbench.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

/// Measure the steady-state latency of an audio block kernel.
///
/// Runs the kernel through a fixed warmup, times N individual calls, and
/// prints the mean of the samples between the lower and upper percentile.
#[derive(Debug, Parser)]
#[command(
    name = "dspbench",
    version,
    about,
    allow_negative_numbers = true,
    after_help = "Example: dspbench 1000 20 5  # average samples from the 5th to the 20th percentile"
)]
pub struct Cli {
    /// Number of timed measurements [default: 1000].
    #[arg(value_parser = parse_iterations)]
    pub iterations: Option<NonZeroUsize>,

    /// Upper bound of the averaged samples, as a percentile in (0, 100] [default: 10].
    pub upper_percentile: Option<f64>,

    /// Lower bound excluding the fastest outliers, as a percentile in [0, 100) [default: 1].
    pub lower_percentile: Option<f64>,

    /// Built-in kernel to benchmark [default: reverb].
    #[arg(long, short = 'k')]
    pub kernel: Option<String>,

    /// Frames processed per kernel call [default: 512].
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Sample rate the kernel is initialized with, in Hz [default: 44100].
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// TOML file providing defaults for any of the settings above.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the names of the built-in kernels and exit.
    #[arg(long)]
    pub list_kernels: bool,

    /// Only log errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log configuration, buffer layout and the full sample summary.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Parse a positive iteration count.
fn parse_iterations(s: &str) -> Result<NonZeroUsize, String> {
    let n: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not an integer"))?;
    usize::try_from(n)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| format!("iteration count must be positive, got {n}"))
}
