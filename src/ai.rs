//! Hunt-one-ship-at-a-time targeting for an unseen enemy board.
//!
//! The engine never sees the real board. It keeps only what it can deduce
//! from the outcomes of its own shots: which cells are not worth shooting,
//! which cells hold wounded segments, which wounds still have unexplored
//! neighbors, and which ship lengths are still afloat. Ships are straight and
//! never touch, even diagonally, and most of the pruning follows from that.

use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::cellset::CellSet;
use crate::common::{EngineError, ShotOutcome};
use crate::geometry::{max_run, neighbors, Bounds, Point, DIAGONAL, FULL, ORTHOGONAL};

/// What the engine is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// No open wound; targets come from the shuffled search order.
    Searching,
    /// At least one hotspot is pending.
    Closing,
}

pub struct TargetingEngine {
    rng: SmallRng,
    bounds: Bounds,
    excluded: CellSet,
    wounded: CellSet,
    hotspots: Vec<Point>,
    remaining: Vec<usize>,
    search_order: Vec<Point>,
    // cells at `search_order[..search_cursor]` have not been popped yet
    search_cursor: usize,
    last_aim: Option<Point>,
}

impl TargetingEngine {
    /// Engine drawing its search orders from `rng`. Call [`reset`] before
    /// asking for targets.
    ///
    /// [`reset`]: TargetingEngine::reset
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            bounds: Bounds::default(),
            excluded: CellSet::default(),
            wounded: CellSet::default(),
            hotspots: Vec::new(),
            remaining: Vec::new(),
            search_order: Vec::new(),
            search_cursor: 0,
            last_aim: None,
        }
    }

    /// Engine with reproducible search orders.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        let mut seed_rng = rand::rng();
        Self::new(SmallRng::from_rng(&mut seed_rng))
    }

    /// Start a new match on `bounds` against ships of `fleet` lengths.
    pub fn reset(&mut self, bounds: Bounds, fleet: &[usize]) {
        self.bounds = bounds;
        self.excluded = CellSet::new(bounds);
        self.wounded = CellSet::new(bounds);
        self.hotspots.clear();
        self.remaining = fleet.to_vec();
        self.remaining.sort_unstable();
        self.search_order = bounds.cells().collect();
        self.search_order.shuffle(&mut self.rng);
        self.search_cursor = self.search_order.len();
        self.last_aim = None;
        debug!("new match on {} against fleet {:?}", bounds, self.remaining);
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Cells that will never be targeted again.
    pub fn excluded(&self) -> &CellSet {
        &self.excluded
    }

    /// Cells known to hold a hit ship segment.
    pub fn wounded(&self) -> &CellSet {
        &self.wounded
    }

    /// Pending hotspots; the last entry is worked first.
    pub fn hotspots(&self) -> &[Point] {
        &self.hotspots
    }

    /// Lengths of ships not yet sunk, ascending.
    pub fn remaining_lengths(&self) -> &[usize] {
        &self.remaining
    }

    /// The most recently emitted target.
    pub fn last_aim(&self) -> Option<Point> {
        self.last_aim
    }

    /// Cells still waiting in the fallback search order.
    pub fn search_remaining(&self) -> usize {
        self.search_cursor
    }

    pub fn mode(&self) -> SearchMode {
        if self.hotspots.is_empty() {
            SearchMode::Searching
        } else {
            SearchMode::Closing
        }
    }

    /// Apply the outcome of the last emitted target.
    pub fn record_outcome(&mut self, outcome: ShotOutcome) -> Result<(), EngineError> {
        let aim = self.last_aim.ok_or(EngineError::NoPendingShot)?;
        self.apply(aim, outcome);
        Ok(())
    }

    /// Apply an outcome observed at `cell`, which becomes the last aim.
    /// A cell outside the grid is rejected and leaves the state unchanged.
    pub fn record_outcome_at(
        &mut self,
        cell: Point,
        outcome: ShotOutcome,
    ) -> Result<(), EngineError> {
        if !self.bounds.contains(cell) {
            return Err(EngineError::OffGrid);
        }
        self.last_aim = Some(cell);
        self.apply(cell, outcome);
        Ok(())
    }

    fn apply(&mut self, aim: Point, outcome: ShotOutcome) {
        trace!("{} at {}", outcome, aim);
        match outcome {
            ShotOutcome::Miss => {
                self.excluded.insert(aim);
            }
            ShotOutcome::Wound => {
                // ships never touch diagonally
                self.excluded.extend(neighbors(aim, self.bounds, &DIAGONAL));
                self.excluded.insert(aim);
                self.wounded.insert(aim);
                self.hotspots.push(aim);
            }
            ShotOutcome::Kill => {
                self.excluded.extend(neighbors(aim, self.bounds, &FULL));
                self.excluded.insert(aim);
                self.wounded.insert(aim);
                self.seal_ends(aim);
                self.strike_sunk_length(aim);
            }
        }
    }

    /// Exclude the first cell past each end of the wounded run through `aim`.
    fn seal_ends(&mut self, aim: Point) {
        let wounded = &self.wounded;
        let bounds = self.bounds;
        let caps: Vec<Point> = neighbors(aim, bounds, &ORTHOGONAL)
            .filter(|&n| wounded.contains(n))
            .map(|n| {
                let dir = n - aim;
                let mut tip = n;
                while bounds.contains(tip) && wounded.contains(tip) {
                    tip = tip + dir;
                }
                tip
            })
            .collect();
        for cap in caps {
            trace!("sealing {}", cap);
            self.excluded.insert(cap);
        }
    }

    fn strike_sunk_length(&mut self, aim: Point) {
        let wounded = &self.wounded;
        let length = max_run(self.bounds, aim, |p| wounded.contains(p));
        match self.remaining.iter().position(|&l| l == length) {
            Some(idx) => {
                self.remaining.remove(idx);
                debug!("sunk a ship of length {} at {}; {:?} left", length, aim, self.remaining);
            }
            None => warn!(
                "sunk a ship of length {} at {} but no such ship remains in {:?}",
                length, aim, self.remaining
            ),
        }
    }

    /// `true` when the smallest remaining ship could still lie across `cell`.
    fn is_shippable(&self, cell: Point, smallest: usize) -> bool {
        let excluded = &self.excluded;
        max_run(self.bounds, cell, |p| !excluded.contains(p)) >= smallest
    }

    /// Choose the next cell to fire at and remember it as the last aim.
    pub fn next_target(&mut self) -> Result<Point, EngineError> {
        if self.bounds.is_empty() {
            return Err(EngineError::NotInitialized);
        }
        let target = match self.close_in() {
            Some(cell) => cell,
            None => self.search()?,
        };
        self.last_aim = Some(target);
        Ok(target)
    }

    /// Follow up on the most recent hotspot, dropping exhausted ones.
    fn close_in(&mut self) -> Option<Point> {
        while let Some(&hotspot) = self.hotspots.last() {
            let excluded = &self.excluded;
            let candidate =
                neighbors(hotspot, self.bounds, &ORTHOGONAL).find(|&c| !excluded.contains(c));
            if let Some(cell) = candidate {
                trace!("closing in on {} via {}", hotspot, cell);
                return Some(cell);
            }
            trace!("hotspot {} exhausted", hotspot);
            self.hotspots.pop();
        }
        None
    }

    /// Pop the search order until a shippable, non-excluded cell turns up.
    fn search(&mut self) -> Result<Point, EngineError> {
        let smallest = *self.remaining.first().ok_or(EngineError::FleetSunk)?;
        while self.search_cursor > 0 {
            self.search_cursor -= 1;
            let cell = self.search_order[self.search_cursor];
            if !self.excluded.contains(cell) && self.is_shippable(cell, smallest) {
                return Ok(cell);
            }
        }
        Err(EngineError::SearchExhausted)
    }
}

impl Default for TargetingEngine {
    fn default() -> Self {
        Self::from_entropy()
    }
}
