//! The authoritative grid owned by the defending side: ship placement under
//! the no-touching rule and shot resolution.

use core::fmt;

use log::debug;
use rand::Rng;

use crate::common::{BoardError, ShotOutcome};
use crate::config::{FLEET_ATTEMPTS, PLACEMENT_ATTEMPTS};
use crate::geometry::{neighbors, Bounds, Orientation, Point, FULL};
use crate::ship::Ship;

/// State of a single grid cell. `Hit` and `Missed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Occupied,
    Hit,
    Missed,
}

pub struct Board {
    bounds: Bounds,
    cells: Vec<CellState>,
    // index into `ships` of the ship covering each cell
    owners: Vec<Option<usize>>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new(bounds: Bounds) -> Self {
        Board {
            bounds,
            cells: vec![CellState::Empty; bounds.area()],
            owners: vec![None; bounds.area()],
            ships: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// State of the cell at `p`, or `None` when out of bounds.
    pub fn cell(&self, p: Point) -> Option<CellState> {
        self.bounds.index(p).map(|idx| self.cells[idx])
    }

    /// The ship covering `p`, alive or not.
    pub fn ship_at(&self, p: Point) -> Option<&Ship> {
        let idx = self.bounds.index(p)?;
        self.owners[idx].map(|s| &self.ships[s])
    }

    /// Every placed ship, in placement order. Sunk ships stay in the list.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// In-bounds cells of the full 8-neighborhood of `cell`.
    pub fn neighbors_of8(&self, cell: Point) -> impl Iterator<Item = Point> {
        neighbors(cell, self.bounds, &FULL)
    }

    /// Returns `true` while at least one ship has an alive cell.
    pub fn has_alive_ships(&self) -> bool {
        self.ships.iter().any(Ship::is_alive)
    }

    fn is_owned(&self, p: Point) -> bool {
        self.bounds
            .index(p)
            .is_some_and(|idx| self.owners[idx].is_some())
    }

    /// Explain whether `ship` could be placed without mutating the board.
    pub fn check_placement(&self, ship: &Ship) -> Result<(), BoardError> {
        if !ship.cells().all(|c| self.bounds.contains(c)) {
            return Err(BoardError::OutOfBounds);
        }
        if ship.cells().any(|c| self.is_owned(c)) {
            return Err(BoardError::Overlaps);
        }
        if ship
            .cells()
            .any(|c| self.neighbors_of8(c).any(|n| self.is_owned(n)))
        {
            return Err(BoardError::Touches);
        }
        Ok(())
    }

    /// Place `ship` if it fits in bounds without overlapping or touching any
    /// other ship. On failure the board is left untouched.
    pub fn place_ship(&mut self, ship: Ship) -> bool {
        if let Err(e) = self.check_placement(&ship) {
            debug!("rejected {:?}: {}", ship, e);
            return false;
        }
        let id = self.ships.len();
        for c in ship.cells() {
            // bounds were checked above
            if let Some(idx) = self.bounds.index(c) {
                self.cells[idx] = CellState::Occupied;
                self.owners[idx] = Some(id);
            }
        }
        self.ships.push(ship);
        true
    }

    /// Returns a random valid placement for a ship of `length`, or
    /// `UnableToPlaceShip` after `PLACEMENT_ATTEMPTS` tries.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<Ship, BoardError> {
        if length == 0 {
            return Err(BoardError::ZeroLength);
        }
        let len = i32::try_from(length).map_err(|_| BoardError::OutOfBounds)?;
        let orientations: Vec<Orientation> = Orientation::ALL
            .into_iter()
            .filter(|o| match o {
                Orientation::Horizontal => len <= self.bounds.width(),
                Orientation::Vertical => len <= self.bounds.height(),
            })
            .collect();
        if orientations.is_empty() {
            return Err(BoardError::OutOfBounds);
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orient = orientations[rng.random_range(0..orientations.len())];
            let (max_x, max_y) = match orient {
                Orientation::Horizontal => (self.bounds.width() - len, self.bounds.height() - 1),
                Orientation::Vertical => (self.bounds.width() - 1, self.bounds.height() - len),
            };
            let anchor = Point::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            let ship = Ship::new(anchor, length, orient)?;
            if self.check_placement(&ship).is_ok() {
                return Ok(ship);
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Build a board holding one ship per entry of `lengths`, longest first.
    /// A dead end restarts from an empty board, up to `FLEET_ATTEMPTS` times.
    pub fn random_fleet<R: Rng + ?Sized>(
        bounds: Bounds,
        lengths: &[usize],
        rng: &mut R,
    ) -> Result<Board, BoardError> {
        let mut sorted = lengths.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        'attempt: for attempt in 0..FLEET_ATTEMPTS {
            let mut board = Board::new(bounds);
            for &len in &sorted {
                match board.random_placement(rng, len) {
                    Ok(ship) => {
                        board.place_ship(ship);
                    }
                    Err(BoardError::UnableToPlaceShip) => continue 'attempt,
                    Err(e) => return Err(e),
                }
            }
            debug!("placed fleet {:?} on {} after {} restarts", sorted, bounds, attempt);
            return Ok(board);
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Resolve a shot at `target`. Out-of-bounds and repeated shots report
    /// `Miss` and change nothing.
    pub fn shoot(&mut self, target: Point) -> ShotOutcome {
        let Some(idx) = self.bounds.index(target) else {
            return ShotOutcome::Miss;
        };
        match self.cells[idx] {
            CellState::Occupied => {
                self.cells[idx] = CellState::Hit;
                match self.owners[idx] {
                    Some(id) => {
                        let ship = &mut self.ships[id];
                        ship.register_hit(target);
                        if ship.is_alive() {
                            ShotOutcome::Wound
                        } else {
                            ShotOutcome::Kill
                        }
                    }
                    None => ShotOutcome::Miss,
                }
            }
            CellState::Empty => {
                self.cells[idx] = CellState::Missed;
                ShotOutcome::Miss
            }
            CellState::Hit | CellState::Missed => ShotOutcome::Miss,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.bounds.height() {
            for x in 0..self.bounds.width() {
                let mark = match self.cell(Point::new(x, y)).unwrap_or_default() {
                    CellState::Empty => '.',
                    CellState::Occupied => '#',
                    CellState::Hit => 'X',
                    CellState::Missed => 'o',
                };
                write!(f, "{}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  bounds: {},\n  ships: {:?}\n}}",
            self.bounds, self.ships
        )?;
        fmt::Display::fmt(self, f)
    }
}
