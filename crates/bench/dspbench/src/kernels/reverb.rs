use crate::kernel::{Kernel, Sample};
use crate::DEFAULT_SAMPLE_RATE;

/// Comb delay lengths in frames at 44.1 kHz.
const COMB_TUNING: [usize; 4] = [1116, 1188, 1277, 1356];
/// All-pass delay lengths in frames at 44.1 kHz.
const ALLPASS_TUNING: [usize; 2] = [556, 441];
/// Extra delay added to every line of the right channel.
const STEREO_SPREAD: usize = 23;

const FEEDBACK: Sample = 0.84;
const DAMP: Sample = 0.2;
const ALLPASS_FEEDBACK: Sample = 0.5;
const INPUT_GAIN: Sample = 0.015;
const WET: Sample = 1.0 / 3.0;

/// Lowpass-feedback comb filter.
#[derive(Debug, Clone)]
struct Comb {
    line: Vec<Sample>,
    pos: usize,
    store: Sample,
}

impl Comb {
    fn new(len: usize) -> Self {
        Self {
            line: vec![0.0; len],
            pos: 0,
            store: 0.0,
        }
    }

    #[inline]
    fn tick(&mut self, x: Sample) -> Sample {
        let y = self.line[self.pos];
        self.store = y * (1.0 - DAMP) + self.store * DAMP;
        self.line[self.pos] = x + self.store * FEEDBACK;
        self.pos = (self.pos + 1) % self.line.len();
        y
    }
}

/// Schroeder all-pass diffuser.
#[derive(Debug, Clone)]
struct AllPass {
    line: Vec<Sample>,
    pos: usize,
}

impl AllPass {
    fn new(len: usize) -> Self {
        Self {
            line: vec![0.0; len],
            pos: 0,
        }
    }

    #[inline]
    fn tick(&mut self, x: Sample) -> Sample {
        let delayed = self.line[self.pos];
        self.line[self.pos] = x + delayed * ALLPASS_FEEDBACK;
        self.pos = (self.pos + 1) % self.line.len();
        delayed - x
    }
}

/// One output channel of the tank: parallel combs into serial all-passes.
#[derive(Debug, Clone)]
struct Tank {
    combs: Vec<Comb>,
    allpasses: Vec<AllPass>,
}

impl Tank {
    fn new(sample_rate: u32, spread: usize) -> Self {
        let scale = |len: usize| {
            let scaled = (len + spread) * sample_rate as usize / DEFAULT_SAMPLE_RATE as usize;
            scaled.max(1)
        };
        Self {
            combs: COMB_TUNING.iter().map(|&l| Comb::new(scale(l))).collect(),
            allpasses: ALLPASS_TUNING.iter().map(|&l| AllPass::new(scale(l))).collect(),
        }
    }

    #[inline]
    fn tick(&mut self, x: Sample) -> Sample {
        let mut acc = 0.0;
        for comb in &mut self.combs {
            acc += comb.tick(x);
        }
        for ap in &mut self.allpasses {
            acc = ap.tick(acc);
        }
        acc
    }
}

/// Mono-in, stereo-out reverb tank.
///
/// Delay lines are sized in [`Kernel::init`], so `init` is comparatively
/// expensive and `compute` allocates nothing.
#[derive(Debug, Clone)]
pub struct ReverbTank {
    left: Tank,
    right: Tank,
}

impl Default for ReverbTank {
    fn default() -> Self {
        Self {
            left: Tank::new(DEFAULT_SAMPLE_RATE, 0),
            right: Tank::new(DEFAULT_SAMPLE_RATE, STEREO_SPREAD),
        }
    }
}

impl Kernel for ReverbTank {
    fn name(&self) -> &'static str {
        "reverb"
    }

    fn init(&mut self, sample_rate: u32) {
        self.left = Tank::new(sample_rate, 0);
        self.right = Tank::new(sample_rate, STEREO_SPREAD);
    }

    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        2
    }

    fn compute(&mut self, count: usize, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]]) {
        let [left, right, ..] = outputs else {
            return;
        };
        for i in 0..count {
            let x = inputs[0][i] * INPUT_GAIN;
            left[i] = self.left.tick(x) * WET;
            right[i] = self.right.tick(x) * WET;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(k: &mut ReverbTank, input: &[Sample]) -> (Vec<Sample>, Vec<Sample>) {
        let n = input.len();
        let (mut l, mut r) = (vec![0.0; n], vec![0.0; n]);
        k.compute(n, &[input], &mut [&mut l[..], &mut r[..]]);
        (l, r)
    }

    #[test]
    fn tail_appears_after_shortest_comb() {
        let mut k = ReverbTank::default();
        k.init(44_100);
        let mut input = vec![0.0; 2048];
        input[0] = 1.0;
        let (l, r) = run(&mut k, &input);
        // Nothing reaches the output before the shortest comb delay has elapsed.
        assert!(l[..COMB_TUNING[0]].iter().all(|&s| s == 0.0));
        assert!(l.iter().any(|&s| s != 0.0));
        assert!(r.iter().any(|&s| s != 0.0));
        assert_ne!(l, r);
    }

    #[test]
    fn tiny_sample_rate_keeps_lines_non_empty() {
        let mut k = ReverbTank::default();
        k.init(1);
        let (l, _) = run(&mut k, &[1.0, 0.0, 0.0]);
        assert!(l.iter().all(|s| s.is_finite()));
    }
}
