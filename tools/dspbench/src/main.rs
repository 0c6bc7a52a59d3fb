//! Audio kernel latency benchmark.
//!
//! Pipeline: parse arguments → merge configuration → build and initialize
//! the kernel → warm up and sample → trimmed mean → one result line.
//!
//! Every configuration problem is reported before the kernel is first
//! called; once sampling starts the run always ends with a number.

mod cli;
mod config;
mod report;
mod verbose;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dspbench::{BenchStats, KernelKind, stats};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);

    if cli.list_kernels {
        for kind in KernelKind::ALL {
            println!("{kind}");
        }
        return Ok(());
    }

    let file = cli.config.as_deref().map(config::load).transpose()?;
    let run = config::RunConfig::resolve(&cli, file.as_ref())?;
    tracing::debug!(
        kernel = %run.kernel,
        block_size = run.block_size,
        sample_rate = run.sample_rate,
        iterations = run.iterations.get(),
        lower = run.band.lower(),
        upper = run.band.upper(),
        "resolved configuration"
    );

    let mut kernel = run.kernel.build();
    kernel.init(run.sample_rate);

    let mut samples = {
        let _t = verbose::Timer::start("measurement");
        dspbench::measure(&mut kernel, run.block_size, run.iterations)
            .with_context(|| format!("preparing kernel '{}'", run.kernel))?
    };

    let trimmed = stats::trimmed_mean(&mut samples, run.band)
        .ok_or_else(|| anyhow!("no samples were collected"))?;
    if let Some(summary) = BenchStats::compute(&mut samples) {
        report::log_summary(&summary, trimmed);
    }

    let program = std::env::args_os()
        .next()
        .map_or_else(|| "dspbench".to_owned(), |p| p.to_string_lossy().into_owned());
    println!("{}", report::result_line(&program, trimmed));

    Ok(())
}
