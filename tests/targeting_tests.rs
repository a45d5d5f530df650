use battleship_hunter::geometry::{neighbors, DIAGONAL, FULL};
use battleship_hunter::{
    Bounds, EngineError, Point, SearchMode, ShotOutcome, TargetingEngine,
};

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

fn engine(w: i32, h: i32, fleet: &[usize]) -> TargetingEngine {
    let mut engine = TargetingEngine::seeded(1234);
    engine.reset(Bounds::try_new(w, h).unwrap(), fleet);
    engine
}

#[test]
fn test_requires_reset_and_pending_shot() {
    let mut engine = TargetingEngine::seeded(1);
    assert_eq!(engine.next_target().unwrap_err(), EngineError::NotInitialized);

    engine.reset(Bounds::try_new(4, 4).unwrap(), &[2]);
    assert_eq!(
        engine.record_outcome(ShotOutcome::Miss).unwrap_err(),
        EngineError::NoPendingShot
    );
}

#[test]
fn test_reset_sorts_fleet_and_clears_state() {
    let mut engine = engine(10, 10, &[3, 1, 2, 1]);
    assert_eq!(engine.remaining_lengths(), &[1, 1, 2, 3]);
    assert_eq!(engine.search_remaining(), 100);

    engine.record_outcome_at(p(4, 4), ShotOutcome::Wound).unwrap();
    assert_eq!(engine.mode(), SearchMode::Closing);

    engine.reset(Bounds::try_new(6, 5).unwrap(), &[2]);
    assert!(engine.excluded().is_empty());
    assert!(engine.wounded().is_empty());
    assert!(engine.hotspots().is_empty());
    assert_eq!(engine.last_aim(), None);
    assert_eq!(engine.search_remaining(), 30);
    assert_eq!(engine.mode(), SearchMode::Searching);
}

#[test]
fn test_miss_excludes_only_the_aim() {
    let mut engine = engine(10, 10, &[2, 3]);
    engine.record_outcome_at(p(0, 0), ShotOutcome::Miss).unwrap();
    assert_eq!(engine.excluded().len(), 1);
    assert!(engine.excluded().contains(p(0, 0)));

    let next = engine.next_target().unwrap();
    assert_ne!(next, p(0, 0));
    assert_eq!(engine.last_aim(), Some(next));
    assert_eq!(engine.mode(), SearchMode::Searching);
}

#[test]
fn test_first_search_miss_consumes_two_cells() {
    let mut engine = engine(10, 10, &[2, 3]);
    let first = engine.next_target().unwrap();
    assert_eq!(engine.search_remaining(), 99);

    engine.record_outcome(ShotOutcome::Miss).unwrap();
    let next = engine.next_target().unwrap();

    assert_eq!(engine.search_remaining(), 98);
    assert_eq!(engine.excluded().len(), 1);
    assert!(engine.excluded().contains(first));
    assert_ne!(next, first);
}

#[test]
fn test_outcome_off_the_grid_is_rejected() {
    let mut engine = engine(10, 10, &[2, 3]);
    for cell in [p(i32::MAX, 0), p(-1, 3), p(10, 10)] {
        assert_eq!(
            engine.record_outcome_at(cell, ShotOutcome::Wound).unwrap_err(),
            EngineError::OffGrid
        );
    }
    assert!(engine.excluded().is_empty());
    assert!(engine.wounded().is_empty());
    assert!(engine.hotspots().is_empty());
    assert_eq!(engine.last_aim(), None);
    assert_eq!(engine.mode(), SearchMode::Searching);
}

#[test]
fn test_wound_excludes_diagonals_and_closes_in() {
    let mut engine = engine(10, 10, &[3]);
    engine.record_outcome_at(p(5, 5), ShotOutcome::Wound).unwrap();

    for d in neighbors(p(5, 5), engine.bounds(), &DIAGONAL) {
        assert!(engine.excluded().contains(d));
    }
    assert!(engine.wounded().contains(p(5, 5)));
    assert_eq!(engine.hotspots(), &[p(5, 5)]);
    // first open orthogonal neighbor, in (0,+1), (+1,0), (0,-1), (-1,0) order
    assert_eq!(engine.next_target().unwrap(), p(5, 6));
}

#[test]
fn test_exhausted_hotspot_falls_back_to_search() {
    let mut engine = engine(10, 10, &[2, 3]);
    engine.record_outcome_at(p(5, 5), ShotOutcome::Wound).unwrap();

    for expected in [p(5, 6), p(6, 5), p(5, 4), p(4, 5)] {
        assert_eq!(engine.next_target().unwrap(), expected);
        engine.record_outcome(ShotOutcome::Miss).unwrap();
    }

    let next = engine.next_target().unwrap();
    assert!(engine.hotspots().is_empty());
    assert_eq!(engine.mode(), SearchMode::Searching);
    assert_ne!(next, p(5, 5));
    assert!(neighbors(p(5, 5), engine.bounds(), &FULL).all(|n| n != next));
}

#[test]
fn test_hotspot_stack_is_last_in_first_out() {
    let mut engine = engine(10, 10, &[4]);
    engine.record_outcome_at(p(2, 2), ShotOutcome::Wound).unwrap();
    engine.record_outcome_at(p(2, 3), ShotOutcome::Wound).unwrap();
    assert_eq!(engine.hotspots(), &[p(2, 2), p(2, 3)]);
    assert_eq!(engine.next_target().unwrap(), p(2, 4));
}

#[test]
fn test_kill_seals_both_ends_and_shrinks_fleet() {
    let mut engine = engine(10, 10, &[1, 3, 3]);
    // ship at (2,5)..(4,5), middle cell sunk last
    engine.record_outcome_at(p(2, 5), ShotOutcome::Wound).unwrap();
    engine.record_outcome_at(p(4, 5), ShotOutcome::Wound).unwrap();
    engine.record_outcome_at(p(3, 5), ShotOutcome::Kill).unwrap();

    assert_eq!(engine.remaining_lengths(), &[1, 3]);
    assert!(engine.excluded().contains(p(1, 5)));
    assert!(engine.excluded().contains(p(5, 5)));
    for x in 1..=5 {
        for y in 4..=6 {
            assert!(engine.excluded().contains(p(x, y)), "({}, {}) not excluded", x, y);
        }
    }
    assert!(!engine.excluded().contains(p(6, 5)));
    assert!(!engine.excluded().contains(p(0, 5)));
}

#[test]
fn test_closing_in_sinks_a_ship_and_seals_it() {
    let mut engine = engine(10, 10, &[3]);
    // ship at (2,5)..(4,5)
    engine.record_outcome_at(p(3, 5), ShotOutcome::Wound).unwrap();

    assert_eq!(engine.next_target().unwrap(), p(3, 6));
    engine.record_outcome(ShotOutcome::Miss).unwrap();
    assert_eq!(engine.next_target().unwrap(), p(4, 5));
    engine.record_outcome(ShotOutcome::Wound).unwrap();
    assert_eq!(engine.next_target().unwrap(), p(5, 5));
    engine.record_outcome(ShotOutcome::Miss).unwrap();
    assert_eq!(engine.next_target().unwrap(), p(2, 5));
    engine.record_outcome(ShotOutcome::Kill).unwrap();

    assert!(engine.remaining_lengths().is_empty());
    assert!(engine.excluded().contains(p(1, 5)));
    assert_eq!(engine.wounded().len(), 3);
    // every ship is sunk, so a further request is a driver error
    assert_eq!(engine.next_target().unwrap_err(), EngineError::FleetSunk);
    assert!(engine.hotspots().is_empty());
}

#[test]
fn test_kill_of_single_cell_ship() {
    let mut engine = engine(10, 10, &[1, 2]);
    engine.record_outcome_at(p(0, 0), ShotOutcome::Kill).unwrap();
    assert_eq!(engine.remaining_lengths(), &[2]);
    for c in [p(0, 0), p(0, 1), p(1, 0), p(1, 1)] {
        assert!(engine.excluded().contains(c));
    }
    assert_eq!(engine.excluded().len(), 4);
    assert!(engine.hotspots().is_empty());
}

#[test]
fn test_unknown_sunk_length_leaves_fleet_unchanged() {
    let mut engine = engine(10, 10, &[2, 2]);
    engine.record_outcome_at(p(5, 5), ShotOutcome::Kill).unwrap();
    assert_eq!(engine.remaining_lengths(), &[2, 2]);
}

#[test]
fn test_search_skips_cells_no_ship_fits() {
    let mut engine = engine(5, 1, &[3]);
    engine.record_outcome_at(p(1, 0), ShotOutcome::Miss).unwrap();
    engine.record_outcome_at(p(3, 0), ShotOutcome::Miss).unwrap();
    assert_eq!(engine.next_target().unwrap_err(), EngineError::SearchExhausted);
    assert_eq!(engine.search_remaining(), 0);
}

#[test]
fn test_search_only_returns_shippable_cells() {
    let mut engine = engine(7, 1, &[3]);
    engine.record_outcome_at(p(2, 0), ShotOutcome::Miss).unwrap();
    // only (3,0)..(6,0) can hold a three-cell ship
    let first = engine.next_target().unwrap();
    assert!((3..7).contains(&first.x), "{} cannot hold a ship", first);
    engine.record_outcome(ShotOutcome::Miss).unwrap();
    while let Ok(t) = engine.next_target() {
        assert!((3..7).contains(&t.x), "{} cannot hold a ship", t);
        engine.record_outcome(ShotOutcome::Miss).unwrap();
    }
    assert!(!engine.excluded().contains(p(0, 0)));
    assert!(!engine.excluded().contains(p(1, 0)));
}

#[test]
fn test_same_seed_same_search_order() {
    let mut a = engine(10, 10, &[4, 3]);
    let mut b = engine(10, 10, &[4, 3]);
    for _ in 0..20 {
        let ta = a.next_target().unwrap();
        assert_eq!(ta, b.next_target().unwrap());
        a.record_outcome(ShotOutcome::Miss).unwrap();
        b.record_outcome(ShotOutcome::Miss).unwrap();
    }
}
