use battleship_hunter::geometry::{neighbors, DIAGONAL};
use battleship_hunter::{
    play_match, Board, Bounds, CellSet, CellState, Point, ShotOutcome, TargetingEngine,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

const FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

fn random_board(seed: u64, bounds: Bounds, fleet: &[usize]) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    Board::random_fleet(bounds, fleet, &mut rng).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The engine sinks every fleet within one shot per cell.
    #[test]
    fn engine_always_wins(board_seed in any::<u64>(), engine_seed in any::<u64>()) {
        let bounds = Bounds::try_new(10, 10).unwrap();
        let mut board = random_board(board_seed, bounds, &FLEET);
        let mut engine = TargetingEngine::seeded(engine_seed);
        let report = play_match(&mut engine, &mut board, &FLEET, bounds.area()).unwrap();
        prop_assert!(report.won);
        prop_assert!(report.shots <= bounds.area());
        prop_assert_eq!(report.kills, FLEET.len());
        prop_assert_eq!(report.hits, FLEET.iter().sum::<usize>());
        prop_assert!(engine.remaining_lengths().is_empty());
    }

    /// Turn by turn: exclusions only grow, no cell is fired at twice, excluded
    /// cells are never targeted, diagonals of wounds are never targeted, and
    /// every kill removes exactly the sunk ship's length.
    #[test]
    fn engine_turn_invariants(
        board_seed in any::<u64>(),
        engine_seed in any::<u64>(),
        width in 6i32..12,
        height in 6i32..12,
    ) {
        let bounds = Bounds::try_new(width, height).unwrap();
        let fleet = [3, 2, 1, 1];
        let mut board = random_board(board_seed, bounds, &fleet);
        let mut engine = TargetingEngine::seeded(engine_seed);
        engine.reset(bounds, &fleet);

        let mut fired = CellSet::new(bounds);
        let mut wound_diagonals = CellSet::new(bounds);
        while board.has_alive_ships() {
            prop_assert!(fired.len() < bounds.area());
            let target = engine.next_target().unwrap();
            prop_assert!(bounds.contains(target));
            prop_assert!(!engine.excluded().contains(target));
            prop_assert!(!wound_diagonals.contains(target));
            prop_assert!(fired.insert(target));

            let before = engine.excluded().clone();
            let remaining_before = engine.remaining_lengths().len();
            let outcome = board.shoot(target);
            engine.record_outcome(outcome).unwrap();

            prop_assert!(before.is_subset(engine.excluded()));
            prop_assert!(engine.excluded().contains(target));
            match outcome {
                ShotOutcome::Wound => {
                    wound_diagonals.extend(neighbors(target, bounds, &DIAGONAL));
                    prop_assert_eq!(engine.remaining_lengths().len(), remaining_before);
                }
                ShotOutcome::Kill => {
                    prop_assert_eq!(engine.remaining_lengths().len(), remaining_before - 1);
                    let ship = board.ship_at(target).unwrap();
                    for cell in ship.cells() {
                        prop_assert!(engine.excluded().contains(cell));
                        for n in board.neighbors_of8(cell) {
                            prop_assert!(engine.excluded().contains(n));
                        }
                    }
                }
                ShotOutcome::Miss => {
                    prop_assert_eq!(board.cell(target), Some(CellState::Missed));
                }
            }
        }
        prop_assert!(engine.remaining_lengths().is_empty());
    }

    /// Fallback targets always leave room for the smallest remaining ship.
    #[test]
    fn search_targets_are_shippable(seed in any::<u64>(), misses in proptest::collection::vec((0i32..8, 0i32..8), 0..40)) {
        let bounds = Bounds::try_new(8, 8).unwrap();
        let mut engine = TargetingEngine::seeded(seed);
        engine.reset(bounds, &[3, 4]);
        for (x, y) in misses {
            engine.record_outcome_at(Point::new(x, y), ShotOutcome::Miss).unwrap();
        }
        if let Ok(target) = engine.next_target() {
            let open = |p: Point| bounds.contains(p) && !engine.excluded().contains(p);
            let fits = [Point::new(1, 0), Point::new(0, 1)].iter().any(|&dir| {
                (0..3).any(|start| (0..3).all(|i| open(target + dir * (i - start))))
            });
            prop_assert!(fits);
        }
    }
}
