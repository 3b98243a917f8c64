use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use revbot::protocol::ProtocolEngine;
use revbot::EngineConfig;

#[derive(Parser, Debug)]
#[command(name = "revbot", version, about = "Reversi engine speaking a line protocol on stdin/stdout")]
struct Args {
    /// JSON engine config; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for the fork-join search (0 = rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Override the node budget from the config
    #[arg(long)]
    node_budget: Option<u64>,

    /// Seed for tie-breaking between equal moves
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(budget) = args.node_budget { config.node_budget = budget; }
    if let Some(seed) = args.seed { config.seed = Some(seed); }
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads).build()?;
    info!("revbot ready: threads={} node_budget={}", pool.current_num_threads(), config.node_budget);
    let mut engine = ProtocolEngine::new(config);
    pool.install(|| engine.run_stdio())?;
    Ok(())
}
