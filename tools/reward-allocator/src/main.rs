use anyhow::Context;
use clap::Parser;
use reward_allocator::{run, Args};
use vlcvx_distrib_common::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("info");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out).context("reward allocation failed")?;
    Ok(())
}
