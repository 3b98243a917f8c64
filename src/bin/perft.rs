use clap::Parser;
use revbot::perft::{perft, perft_parallel};
use revbot::{Side, Snapshot};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for RevBot")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// 64 cells of `.BW`, or "startpos"
    #[arg(value_name = "POSITION", default_value = "startpos")]
    position: String,
    /// Side to move
    #[arg(long, default_value = "black")]
    side: Side,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let snapshot: Snapshot = if args.position == "startpos" { Snapshot::start() } else { args.position.parse()? };
    let board = snapshot.to_board(args.side);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 { perft(&board, args.depth) } else { perft_parallel(&board, args.depth) };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
