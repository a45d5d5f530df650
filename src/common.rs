//! Common types: shot outcomes and the errors raised by the board and engine.

use core::fmt;

/// Result of a shot, as reported by the defending board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotOutcome {
    /// Nothing alive was hit.
    Miss,
    /// A ship segment was hit and the ship still has alive cells.
    Wound,
    /// The last alive segment of a ship was hit.
    Kill,
}

impl ShotOutcome {
    /// Protocol keyword for this outcome.
    pub fn keyword(self) -> &'static str {
        match self {
            ShotOutcome::Miss => "Miss",
            ShotOutcome::Wound => "Wound",
            ShotOutcome::Kill => "Kill",
        }
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Errors returned by ship construction and placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Ships must be at least one cell long.
    ZeroLength,
    /// Some ship cell lies outside the grid.
    OutOfBounds,
    /// Some ship cell is already owned by another ship.
    Overlaps,
    /// Some ship cell is next to (possibly diagonally) another ship.
    Touches,
    /// Random placement gave up after its retry budget.
    UnableToPlaceShip,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ZeroLength => write!(f, "Ship length must be at least 1"),
            BoardError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::Overlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::Touches => write!(f, "Ship placement touches another ship"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Misuse of the targeting engine by its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A target was requested before the first reset.
    NotInitialized,
    /// An outcome was reported before any target was emitted.
    NoPendingShot,
    /// Every ship is already sunk; the driver should have ended the match.
    FleetSunk,
    /// The search order ran dry without a shippable cell.
    SearchExhausted,
    /// An outcome was reported for a cell outside the grid.
    OffGrid,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotInitialized => write!(f, "Engine has not been initialized"),
            EngineError::NoPendingShot => write!(f, "Outcome reported with no shot pending"),
            EngineError::FleetSunk => write!(f, "All ships are sunk; no target to choose"),
            EngineError::SearchExhausted => write!(f, "No shippable cell left to search"),
            EngineError::OffGrid => write!(f, "Outcome reported outside the grid"),
        }
    }
}

impl std::error::Error for EngineError {}
