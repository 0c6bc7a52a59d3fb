use crate::kernel::{Kernel, Sample};

/// Mono kernel multiplying its input by a constant.
#[derive(Debug, Clone)]
pub struct Gain {
    gain: Sample,
}

impl Default for Gain {
    fn default() -> Self {
        Self { gain: 0.5 }
    }
}

impl Kernel for Gain {
    fn name(&self) -> &'static str {
        "gain"
    }

    fn init(&mut self, _sample_rate: u32) {}

    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn compute(&mut self, count: usize, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]]) {
        let input = &inputs[0][..count];
        for (out, &x) in outputs[0][..count].iter_mut().zip(input) {
            *out = x * self.gain;
        }
    }
}
