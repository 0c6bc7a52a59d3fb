//! Built-in reference kernels.
//!
//! These give the driver something realistic to time out of the box and
//! span a range of per-frame costs: a trivial gain, a recursive filter, and
//! a delay-line reverb tank.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::kernel::Kernel;

mod gain;
mod onepole;
mod reverb;

pub use gain::Gain;
pub use onepole::OnePole;
pub use reverb::ReverbTank;

/// Selector for a built-in kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelKind {
    /// Mono scaling, [`Gain`].
    Gain,
    /// Stereo one-pole low-pass, [`OnePole`].
    OnePole,
    /// Mono-in, stereo-out reverb, [`ReverbTank`].
    #[default]
    Reverb,
}

impl KernelKind {
    /// Every built-in kernel, in listing order.
    pub const ALL: [Self; 3] = [Self::Gain, Self::OnePole, Self::Reverb];

    /// Name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gain => "gain",
            Self::OnePole => "onepole",
            Self::Reverb => "reverb",
        }
    }

    /// Construct an uninitialized kernel of this kind.
    pub fn build(self) -> Box<dyn Kernel> {
        match self {
            Self::Gain => Box::new(Gain::default()),
            Self::OnePole => Box::new(OnePole::default()),
            Self::Reverb => Box::new(ReverbTank::default()),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownKernel(s.to_owned()))
    }
}
