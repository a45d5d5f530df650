use std::io;

use battleship_hunter::{init_logging, Session, TargetingEngine};
use clap::Parser;

/// Answers match-driver lines on stdin with one target per line on stdout.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible search orders (e.g., --seed 12345)")]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let engine = match cli.seed {
        Some(s) => TargetingEngine::seeded(s),
        None => TargetingEngine::from_entropy(),
    };
    let mut session = Session::new(engine);
    session.serve(io::stdin().lock(), io::stdout().lock())
}
