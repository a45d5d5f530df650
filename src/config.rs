pub const DEFAULT_WIDTH: i32 = 10;
pub const DEFAULT_HEIGHT: i32 = 10;

/// One four-decker, two three-deckers, three two-deckers, four single cells.
pub const DEFAULT_FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Tries per ship in [`Board::random_placement`](crate::Board::random_placement).
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Full-board restarts in [`Board::random_fleet`](crate::Board::random_fleet).
pub const FLEET_ATTEMPTS: usize = 1000;

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "BATTLESHIP_LOG";
