//! Latency micro-benchmarking for fixed-size audio block kernels.
//!
//! A run has two phases. The [`Bencher`] drives a kernel through a fixed
//! warmup and then times each of N individual calls with a monotonic clock.
//! The resulting samples go to [`stats::trimmed_mean`], which sorts them and
//! averages the samples that fall inside a [`PercentileBand`], dropping both
//! the unrealistically fast head and the scheduler-jitter tail.
//!
//! ```
//! use std::num::NonZeroUsize;
//! use dspbench::{Bencher, PercentileBand, stats};
//!
//! let mut bencher = Bencher::new(NonZeroUsize::new(100).unwrap());
//! let mut acc = 0u64;
//! bencher.iter(|| {
//!     acc = acc.wrapping_add(1);
//!     acc
//! });
//!
//! let band = PercentileBand::new(1.0, 10.0).unwrap();
//! let secs = stats::trimmed_mean(bencher.samples_mut(), band).unwrap();
//! assert!(secs >= 0.0);
//! ```
//!
//! # Architecture
//!
//! - [`kernel`]: the [`Kernel`] trait every benchmarked unit implements
//! - [`buffers`]: owned channel buffers handed to [`Kernel::compute`]
//! - [`kernels`]: built-in reference kernels
//! - [`bencher`]: warmup and per-call sampling
//! - [`stats`]: percentile band, trim window and summary statistics

/// Warmup and per-call latency sampling.
pub mod bencher;
/// Owned input/output channel buffers.
pub mod buffers;
/// Library error type.
pub mod error;
/// The compute kernel interface.
pub mod kernel;
/// Built-in reference kernels.
pub mod kernels;
/// Robust statistics over latency samples.
pub mod stats;

pub use bencher::{Bencher, WARMUP_ITERATIONS};
pub use buffers::{ChannelBuffers, MAX_CHANNELS};
pub use error::Error;
pub use kernel::{Kernel, Sample};
pub use kernels::KernelKind;
pub use stats::{BenchStats, PercentileBand, TrimWindow};

/// Default number of timed iterations.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default number of frames processed per kernel call.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Default sample rate passed to [`Kernel::init`], in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Highest accepted sample rate, in Hz. Kernel delay lines scale with it.
pub const MAX_SAMPLE_RATE: u32 = 768_000;

/// Run a complete measurement of `kernel` over freshly allocated buffers.
///
/// Allocates an impulse input and silent outputs sized from the kernel's
/// channel counts, samples `iterations` timed calls after warmup, and
/// returns the raw samples in seconds, in measured order. The kernel must
/// already be initialized.
///
/// # Errors
///
/// Returns [`Error::TooManyChannels`] if the kernel reports more than
/// [`MAX_CHANNELS`] inputs or outputs, [`Error::InvalidBlockSize`] if
/// `block_size` is zero, and [`Error::Allocation`] if the buffers or the
/// sample storage cannot be reserved. All are detected before the kernel is
/// first called.
pub fn measure<K: Kernel + ?Sized>(
    kernel: &mut K,
    block_size: usize,
    iterations: std::num::NonZeroUsize,
) -> Result<Vec<f64>, Error> {
    let inputs = ChannelBuffers::impulse(kernel.num_inputs(), block_size)?;
    let mut outputs = ChannelBuffers::silence(kernel.num_outputs(), block_size)?;

    tracing::debug!(
        kernel = kernel.name(),
        inputs = inputs.channels(),
        outputs = outputs.channels(),
        block_size,
        "buffers allocated"
    );

    let ins = inputs.as_slices();
    let mut outs = outputs.as_mut_slices();

    let mut bencher = Bencher::try_new(iterations)?;
    bencher.iter(|| kernel.compute(block_size, &ins, &mut outs));
    Ok(bencher.into_samples())
}
