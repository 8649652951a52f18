// src/main.rs
use anyhow::Result;
use clap::Parser;
use vstat::logging::init_tracing;
use vstat::{Args, run};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_level.as_deref())?;
    run(args)
}
