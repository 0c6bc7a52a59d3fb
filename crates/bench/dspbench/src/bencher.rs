//! Benchmark iteration controller.
//!
//! The [`Bencher`] runs a fixed warmup phase and then a sampling phase in
//! which every single call is bracketed by [`Instant`] reads. Timing each
//! call separately (rather than the whole batch) is what lets the
//! estimator in [`crate::stats`] discard outliers afterwards.

use std::hint::black_box;
use std::num::NonZeroUsize;
use std::time::Instant;

use crate::error::Error;

/// Number of untimed calls made before sampling starts.
pub const WARMUP_ITERATIONS: usize = 50;

/// Controls the measurement of a single unit of work.
///
/// Samples are elapsed wall-clock seconds, one per timed call, stored in
/// invocation order.
#[derive(Debug)]
pub struct Bencher {
    sample_count: NonZeroUsize,
    samples: Vec<f64>,
}

impl Bencher {
    /// Create a bencher that will collect `samples` timed calls.
    ///
    /// # Panics
    ///
    /// If storage for `samples` values cannot be allocated. Use
    /// [`try_new`](Self::try_new) for counts that come from user input.
    pub fn new(samples: NonZeroUsize) -> Self {
        Self {
            sample_count: samples,
            samples: Vec::with_capacity(samples.get()),
        }
    }

    /// Like [`new`](Self::new), but reports a failed reservation.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if storage for `samples` values cannot be
    /// reserved.
    pub fn try_new(samples: NonZeroUsize) -> Result<Self, Error> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(samples.get())
            .map_err(|_| Error::Allocation {
                what: "latency samples",
                count: samples.get(),
            })?;
        Ok(Self {
            sample_count: samples,
            samples: storage,
        })
    }

    /// Run the closure [`WARMUP_ITERATIONS`] times untimed, then time it
    /// once per sample.
    ///
    /// Any samples from a previous call are discarded. Each result passes
    /// through [`black_box`] so the work cannot be optimized out.
    pub fn iter<F, R>(&mut self, mut f: F)
    where
        F: FnMut() -> R,
    {
        tracing::trace!(warmup = WARMUP_ITERATIONS, "warmup start");
        for _ in 0..WARMUP_ITERATIONS {
            black_box(f());
        }

        tracing::trace!(samples = self.sample_count.get(), "sampling start");
        self.samples.clear();
        for _ in 0..self.sample_count.get() {
            let start = Instant::now();
            let result = f();
            let elapsed = start.elapsed();
            black_box(result);
            self.samples.push(elapsed.as_secs_f64());
        }
        tracing::trace!(collected = self.samples.len(), "sampling done");
    }

    /// Returns the collected samples as a mutable slice.
    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Returns the collected samples as a slice.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Returns the number of samples collected.
    pub fn samples_collected(&self) -> usize {
        self.samples.len()
    }

    /// Consume the bencher, returning the collected samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}
