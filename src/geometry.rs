//! Grid geometry shared by the board and the targeting engine.
//!
//! Coordinates are signed so that neighbor offsets may step off the grid;
//! [`Bounds::contains`] decides whether a point is a real cell.

use core::fmt;
use core::iter;
use core::ops::{Add, Mul, Neg, Sub};

/// A cell coordinate or an offset between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;
    fn mul(self, k: i32) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// The four edge-sharing offsets. The order decides which follow-up shot the
/// engine tries first around a wound.
pub const ORTHOGONAL: [Point; 4] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
];

/// The four corner-sharing offsets.
pub const DIAGONAL: [Point; 4] = [
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, -1),
    Point::new(-1, 1),
];

/// Orthogonal offsets followed by diagonal ones.
pub const FULL: [Point; 8] = [
    ORTHOGONAL[0],
    ORTHOGONAL[1],
    ORTHOGONAL[2],
    ORTHOGONAL[3],
    DIAGONAL[0],
    DIAGONAL[1],
    DIAGONAL[2],
    DIAGONAL[3],
];

/// Axis a ship lies along, also used as the direction of a run measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Step from one cell to the next along this axis.
    pub fn unit(self) -> Point {
        match self {
            Orientation::Horizontal => Point::new(1, 0),
            Orientation::Vertical => Point::new(0, 1),
        }
    }
}

/// Width and height of a rectangular grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    width: i32,
    height: i32,
}

impl Bounds {
    /// Returns `None` unless both sides are positive.
    pub fn try_new(width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        width.checked_mul(height)?;
        Some(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells on the grid.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` for the 0×0 grid an engine holds before its first reset.
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        0 <= p.x && p.x < self.width && 0 <= p.y && p.y < self.height
    }

    /// Row-major linear index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Every cell of the grid, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Lazily yields `cell + offset` for each offset, in order, skipping points
/// that fall outside `bounds`.
pub fn neighbors(
    cell: Point,
    bounds: Bounds,
    offsets: &'static [Point],
) -> impl Iterator<Item = Point> {
    offsets
        .iter()
        .map(move |&offset| cell + offset)
        .filter(move |&p| bounds.contains(p))
}

/// Length of the contiguous run through `cell` along `axis` of in-bounds
/// cells satisfying `included`. Zero when `cell` itself does not qualify.
pub fn run_length<F>(bounds: Bounds, cell: Point, axis: Orientation, included: F) -> usize
where
    F: Fn(Point) -> bool,
{
    if !bounds.contains(cell) || !included(cell) {
        return 0;
    }
    let step = axis.unit();
    let walk = |dir: Point| {
        iter::successors(Some(cell + dir), move |&p| Some(p + dir))
            .take_while(|&p| bounds.contains(p) && included(p))
            .count()
    };
    1 + walk(step) + walk(-step)
}

/// The longer of the horizontal and vertical runs through `cell`.
pub fn max_run<F>(bounds: Bounds, cell: Point, included: F) -> usize
where
    F: Fn(Point) -> bool,
{
    Orientation::ALL
        .iter()
        .map(|&axis| run_length(bounds, cell, axis, &included))
        .max()
        .unwrap_or(0)
}
