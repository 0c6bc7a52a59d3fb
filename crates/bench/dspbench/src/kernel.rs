//! The interface a benchmarked audio kernel exposes.

/// Audio sample type processed by kernels.
pub type Sample = f32;

/// A block-processing audio kernel.
///
/// The bencher treats `compute` as an opaque unit of work. Output contents
/// are never inspected.
pub trait Kernel {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Prepare internal state for the given sample rate, in Hz.
    fn init(&mut self, sample_rate: u32);

    /// Number of input channels `compute` reads.
    fn num_inputs(&self) -> usize;

    /// Number of output channels `compute` writes.
    fn num_outputs(&self) -> usize;

    /// Process exactly `count` frames.
    ///
    /// `inputs` holds [`num_inputs`](Self::num_inputs) channels and `outputs`
    /// holds [`num_outputs`](Self::num_outputs) channels, each at least
    /// `count` samples long.
    fn compute(&mut self, count: usize, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]]);
}

impl<K: Kernel + ?Sized> Kernel for Box<K> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn init(&mut self, sample_rate: u32) {
        (**self).init(sample_rate);
    }

    fn num_inputs(&self) -> usize {
        (**self).num_inputs()
    }

    fn num_outputs(&self) -> usize {
        (**self).num_outputs()
    }

    fn compute(&mut self, count: usize, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]]) {
        (**self).compute(count, inputs, outputs);
    }
}
