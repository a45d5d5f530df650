use battleship_hunter::{
    init_logging, play_match, Board, Bounds, TargetingEngine, DEFAULT_FLEET, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

/// Plays the targeting engine against random fleets and prints a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: i32,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: i32,
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_FLEET)]
    fleet: Vec<usize>,
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Print each match report as a JSON line before the summary")]
    per_game: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let bounds = Bounds::try_new(cli.width, cli.height)
        .ok_or_else(|| anyhow::anyhow!("invalid board size {}x{}", cli.width, cli.height))?;
    let mut rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let mut engine = TargetingEngine::new(SmallRng::from_rng(&mut rng));

    let mut wins = 0;
    let mut total_shots = 0;
    let mut min_shots = usize::MAX;
    let mut max_shots = 0;
    for _ in 0..cli.games {
        let mut board =
            Board::random_fleet(bounds, &cli.fleet, &mut rng).map_err(|e| anyhow::anyhow!(e))?;
        let report = play_match(&mut engine, &mut board, &cli.fleet, bounds.area())?;
        if cli.per_game {
            println!("{}", serde_json::to_string(&report)?);
        }
        if report.won {
            wins += 1;
        }
        total_shots += report.shots;
        min_shots = min_shots.min(report.shots);
        max_shots = max_shots.max(report.shots);
    }

    let mean_shots = if cli.games == 0 {
        0.0
    } else {
        total_shots as f64 / cli.games as f64
    };
    let result = json!({
        "games": cli.games,
        "wins": wins,
        "mean_shots": mean_shots,
        "min_shots": if cli.games == 0 { 0 } else { min_shots },
        "max_shots": max_shots,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
