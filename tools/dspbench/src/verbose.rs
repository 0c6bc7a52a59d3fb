//! Diagnostic logging setup.
//!
//! Three levels controlled by CLI flags, all written to stderr so stdout
//! carries only the result line:
//! - **Quiet** (`-q`): errors only
//! - **Default** (no flag): warnings and errors
//! - **Verbose** (`-v`): configuration, buffer layout, phase timings and the
//!   sample summary
//!
//! `RUST_LOG` takes precedence over the flags when it is set.

use std::io::IsTerminal;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Default,
    Verbose,
}

impl Verbosity {
    /// Select a level from the `-q`/`-v` flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Default
        }
    }

    /// Filter directive for this level.
    fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Default => "warn",
            Self::Verbose => "debug",
        }
    }
}

/// Install the global stderr subscriber for the current process.
pub fn init(quiet: bool, verbose: bool) {
    let level = Verbosity::from_flags(quiet, verbose);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// RAII timer that logs the elapsed duration of a phase on drop.
///
/// ```ignore
/// let _t = Timer::start("measurement");
/// // ... work ...
/// // logs "measurement: 42ms" at debug level on drop
/// ```
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Begin timing a labeled phase.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        tracing::debug!("{}: {:.0?}", self.label, self.start.elapsed());
    }
}
