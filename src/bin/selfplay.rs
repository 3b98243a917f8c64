use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use revbot::selfplay::{play_game, write_records, Opponent, SelfPlayParams};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpponentArg {
    Engine,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "revbot-selfplay", about = "Play engine games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 20)]
    games: usize,
    #[arg(long, default_value_t = 128)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Fixed depth for every move; the tiles-placed schedule when omitted
    #[arg(long)]
    depth: Option<u32>,
    #[arg(long)]
    fan_out: Option<u32>,
    #[arg(long, default_value_t = revbot::search::schedule::DEFAULT_NODE_BUDGET)]
    node_budget: u64,
    #[arg(long, value_enum, default_value = "random")]
    opponent: OpponentArg,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        opponent: match a.opponent { OpponentArg::Engine => Opponent::Engine, OpponentArg::Random => Opponent::Random },
        depth: a.depth,
        fan_out: a.fan_out,
        node_budget: a.node_budget,
        seed: a.seed,
    };
    eprintln!("Generating {} games (depth={:?}, threads={}, opponent={:?})", a.games, a.depth, a.threads, a.opponent);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build()?;
    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}] {msg}")?);
    let mut games = Vec::with_capacity(a.games);
    let (mut black_wins, mut white_wins) = (0usize, 0usize);
    for gi in 0..a.games {
        let rec = pool.install(|| play_game(&params, gi))?;
        match rec.result.signum() {
            1 => black_wins += 1,
            -1 => white_wins += 1,
            _ => {}
        }
        pb.set_message(format!("black {black_wins} white {white_wins}"));
        pb.inc(1);
        games.push(rec);
    }
    pb.finish();

    eprintln!("Writing {} records to {}", games.len(), a.out.display());
    write_records(&games, &a.out)?;
    Ok(())
}
