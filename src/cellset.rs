//! A set of grid cells packed into a bitset sized to its [`Bounds`].
//!
//! Storage is allocated once per grid; out-of-bounds points are never
//! members, so callers can test and insert raw neighbor offsets without a
//! separate bounds check.

use core::fmt;

use crate::geometry::{Bounds, Point};

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Clone, PartialEq, Eq, Default)]
pub struct CellSet {
    bounds: Bounds,
    words: Vec<u64>,
    len: usize,
}

impl CellSet {
    /// Create an empty set covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        let words = vec![0; bounds.area().div_ceil(WORD_BITS)];
        CellSet {
            bounds,
            words,
            len: 0,
        }
    }

    /// Build a set from an iterator of points; out-of-bounds points are dropped.
    pub fn from_cells<I>(bounds: Bounds, cells: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut set = Self::new(bounds);
        set.extend(cells);
        set
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of member cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, p: Point) -> bool {
        match self.bounds.index(p) {
            Some(idx) => (self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1,
            None => false,
        }
    }

    /// Add `p`. Returns `true` if it was newly inserted; out-of-bounds points
    /// are ignored and return `false`.
    pub fn insert(&mut self, p: Point) -> bool {
        let Some(idx) = self.bounds.index(p) else {
            return false;
        };
        let word = &mut self.words[idx / WORD_BITS];
        let bit = 1u64 << (idx % WORD_BITS);
        if *word & bit != 0 {
            return false;
        }
        *word |= bit;
        self.len += 1;
        true
    }

    /// Remove every member, keeping the bounds.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
        self.len = 0;
    }

    /// Members in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds.cells().filter(move |&p| self.contains(p))
    }

    /// `true` when every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &CellSet) -> bool {
        self.iter().all(|p| other.contains(p))
    }
}

impl Extend<Point> for CellSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellSet<{}> ({} cells):", self.bounds, self.len)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.bounds.height() {
            for x in 0..self.bounds.width() {
                let mark = if self.contains(Point::new(x, y)) { '■' } else { '□' };
                write!(f, "{} ", mark)?;
            }
            if y + 1 < self.bounds.height() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
