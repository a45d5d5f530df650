//! Plays a [`TargetingEngine`] against a [`Board`] until the fleet is sunk.

use log::debug;
use serde::Serialize;

use crate::ai::TargetingEngine;
use crate::board::Board;
use crate::common::{EngineError, ShotOutcome};

/// Summary of one engine-versus-board match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub shots: usize,
    pub hits: usize,
    pub kills: usize,
    /// `true` when every ship was sunk within the shot limit.
    pub won: bool,
}

/// Reset `engine` for `board` and `fleet`, then alternate target selection and
/// shot resolution until no ship is alive or `shot_limit` shots were fired.
pub fn play_match(
    engine: &mut TargetingEngine,
    board: &mut Board,
    fleet: &[usize],
    shot_limit: usize,
) -> Result<MatchReport, EngineError> {
    engine.reset(board.bounds(), fleet);
    let mut report = MatchReport {
        shots: 0,
        hits: 0,
        kills: 0,
        won: !board.has_alive_ships(),
    };
    while !report.won && report.shots < shot_limit {
        let target = engine.next_target()?;
        let outcome = board.shoot(target);
        report.shots += 1;
        match outcome {
            ShotOutcome::Miss => {}
            ShotOutcome::Wound => report.hits += 1,
            ShotOutcome::Kill => {
                report.hits += 1;
                report.kills += 1;
            }
        }
        engine.record_outcome(outcome)?;
        report.won = !board.has_alive_ships();
    }
    debug!("match finished: {:?}", report);
    Ok(report)
}
