use clap::Parser;
use revbot::{Engine, EngineConfig, Side, Snapshot};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "revbot-bench", version, about = "Benchmark RevBot move computation")]
struct Args {
    /// 64 cells of `.BW`, or 'startpos'
    #[arg(long, default_value = "startpos")]
    position: String,

    /// Side to move
    #[arg(long, default_value = "black")]
    side: Side,

    /// Threads
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Fixed search depth; the tiles-placed schedule when omitted
    #[arg(long)]
    depth: Option<u32>,

    /// Fork-join depth for a fixed-depth run
    #[arg(long)]
    fan_out: Option<u32>,

    /// Node visits before the depth is capped
    #[arg(long)]
    node_budget: Option<u64>,

    /// JSON engine config
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let snapshot: Snapshot = if args.position == "startpos" { Snapshot::start() } else { args.position.parse()? };

    let mut config = match (&args.config, args.depth) {
        (Some(path), _) => EngineConfig::load(path)?,
        (None, Some(depth)) => EngineConfig::fixed_depth(depth, args.fan_out),
        (None, None) => EngineConfig::default(),
    };
    if let Some(budget) = args.node_budget { config.node_budget = budget; }
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let mut engine = Engine::new(config);
    let t0 = Instant::now();
    let mv = pool.install(|| engine.compute_move(&snapshot, args.side))?;
    let dt = t0.elapsed().as_secs_f64();

    let stats = engine.last_stats().unwrap_or_default();
    let nps = stats.visited as f64 / dt.max(f64::EPSILON);
    let mv = mv.map_or_else(|| "pass".to_string(), |sq| sq.to_string());
    println!(
        "bestmove {} depth {}/{} visited {} retained {} time {:.3}s nps {:.0}",
        mv,
        stats.effective_depth,
        stats.requested_depth,
        stats.visited,
        engine.root().node_count(),
        dt,
        nps
    );
    Ok(())
}
