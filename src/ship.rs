//! Ships placed on a [`Board`](crate::Board).

use core::fmt;
use std::collections::HashSet;

use crate::common::BoardError;
use crate::geometry::{Orientation, Point};

/// A straight ship. Its occupied cells never change after construction; only
/// the alive subset shrinks as it takes hits.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    anchor: Point,
    length: usize,
    orientation: Orientation,
    alive: HashSet<Point>,
}

impl Ship {
    /// Ship of `length` cells starting at `anchor` and extending right
    /// (horizontal) or down (vertical). A ship whose far end cannot be
    /// represented is rejected as `OutOfBounds`.
    pub fn new(anchor: Point, length: usize, orientation: Orientation) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::ZeroLength);
        }
        let span = i32::try_from(length - 1).map_err(|_| BoardError::OutOfBounds)?;
        let step = orientation.unit();
        let far_x = step.x.checked_mul(span).and_then(|dx| anchor.x.checked_add(dx));
        let far_y = step.y.checked_mul(span).and_then(|dy| anchor.y.checked_add(dy));
        if far_x.is_none() || far_y.is_none() {
            return Err(BoardError::OutOfBounds);
        }
        let mut ship = Ship {
            anchor,
            length,
            orientation,
            alive: HashSet::with_capacity(length),
        };
        ship.alive = ship.cells().collect();
        Ok(ship)
    }

    /// Occupied cells, from the anchor outward.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        // `new` guarantees the far end fits in i32
        let step = self.orientation.unit();
        (0..self.length as i32).map(move |i| self.anchor + step * i)
    }

    /// Cells not yet hit, in no particular order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.alive.iter().copied()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.cells().any(|c| c == p)
    }

    pub fn is_alive(&self) -> bool {
        !self.alive.is_empty()
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Record a hit at `p`. Returns `true` if `p` was an alive cell.
    pub(crate) fn register_hit(&mut self, p: Point) -> bool {
        self.alive.remove(&p)
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ anchor: {}, length: {}, orientation: {:?}, alive: {} }}",
            self.anchor,
            self.length,
            self.orientation,
            self.alive.len(),
        )
    }
}
