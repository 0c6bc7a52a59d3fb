//! Error types for benchmark setup.
//!
//! Every variant is raised before the first kernel call. Sampling and
//! estimation themselves cannot fail.

/// Errors that can occur while configuring a benchmark run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A kernel reported more channels than the buffers support.
    #[error("{direction} channel count {count} exceeds the limit of {limit}")]
    TooManyChannels {
        /// `"input"` or `"output"`.
        direction: &'static str,
        /// Channels requested by the kernel.
        count: usize,
        /// Maximum supported channel count.
        limit: usize,
    },
    /// The block size was zero.
    #[error("block size must be at least 1 frame")]
    InvalidBlockSize,
    /// The sample rate was zero or above [`MAX_SAMPLE_RATE`].
    ///
    /// [`MAX_SAMPLE_RATE`]: crate::MAX_SAMPLE_RATE
    #[error("sample rate {0} Hz must be in 1..={max} Hz", max = crate::MAX_SAMPLE_RATE)]
    InvalidSampleRate(u32),
    /// A buffer could not be reserved.
    #[error("failed to allocate {count} {what}")]
    Allocation {
        /// What was being allocated, e.g. `"latency samples"`.
        what: &'static str,
        /// Number of elements requested.
        count: usize,
    },
    /// A percentile bound was outside its permitted interval.
    #[error("{which} percentile {value} must be in {range}")]
    InvalidPercentile {
        /// `"lower"` or `"upper"`.
        which: &'static str,
        /// Offending value.
        value: f64,
        /// Human-readable interval, e.g. `"[0, 100)"`.
        range: &'static str,
    },
    /// The lower percentile was not strictly below the upper one.
    #[error("lower percentile {lower} must be less than upper percentile {upper}")]
    InvertedBand {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// No built-in kernel has this name.
    #[error("unknown kernel '{0}'")]
    UnknownKernel(String),
}
