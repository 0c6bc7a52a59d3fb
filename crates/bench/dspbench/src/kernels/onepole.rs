use std::f64::consts::TAU;

use crate::kernel::{Kernel, Sample};

/// Cutoff frequency of the filter, in Hz.
const CUTOFF_HZ: f64 = 1_000.0;

/// Stereo one-pole low-pass filter: `y[n] = (1 - a) x[n] + a y[n-1]`.
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    a: Sample,
    state: [Sample; 2],
}

impl Kernel for OnePole {
    fn name(&self) -> &'static str {
        "onepole"
    }

    #[allow(clippy::cast_possible_truncation)]
    fn init(&mut self, sample_rate: u32) {
        let fc = CUTOFF_HZ.min(f64::from(sample_rate) / 2.0);
        self.a = (-TAU * fc / f64::from(sample_rate)).exp() as Sample;
        self.state = [0.0; 2];
    }

    fn num_inputs(&self) -> usize {
        2
    }

    fn num_outputs(&self) -> usize {
        2
    }

    fn compute(&mut self, count: usize, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]]) {
        let a = self.a;
        let b = 1.0 - a;
        for (ch, state) in self.state.iter_mut().enumerate() {
            let mut y = *state;
            for (out, &x) in outputs[ch][..count].iter_mut().zip(&inputs[ch][..count]) {
                y = b * x + a * y;
                *out = y;
            }
            *state = y;
        }
    }
}
