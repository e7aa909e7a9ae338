#![forbid(unsafe_code)]

//! Geometric primitives shared by the grid tracker and layout.
//!
//! Pointer input arrives in a continuous coordinate space (`f64` points),
//! while the grid itself is addressed by integer [`GridPoint`]s. A
//! [`CellBounds`] ties the two together for hit testing.

/// A pointer location in view coordinates (origin top-left, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Width and height of a view, in the same units as [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero, negative, or not a number.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width.is_nan() || self.height.is_nan() || self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle in view coordinates.
///
/// Containment is half-open: the left and top edges belong to the
/// rectangle, the right and bottom edges do not. Adjacent cells of a tiling
/// therefore never both claim a point on their shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a square of side `side` with its top-left corner at `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn square(x: f64, y: f64, side: f64) -> Self {
        Self::new(x, y, side, side)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center of the rectangle.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width.is_nan() || self.height.is_nan() || self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Empty rectangles contain nothing; NaN coordinates are never inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// One cell of the grid: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPoint {
    pub x: u16,
    pub y: u16,
}

impl GridPoint {
    /// Create a grid point from a column and a row.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Column index (alias for `x`).
    #[inline]
    #[must_use]
    pub const fn column(self) -> u16 {
        self.x
    }

    /// Row index (alias for `y`).
    #[inline]
    #[must_use]
    pub const fn row(self) -> u16 {
        self.y
    }
}

impl From<(u16, u16)> for GridPoint {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// The measured rectangle of one grid cell, as reported by layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBounds {
    pub point: GridPoint,
    pub rect: Rect,
}

impl CellBounds {
    /// Associate a grid point with its rectangle.
    #[inline]
    #[must_use]
    pub const fn new(point: GridPoint, rect: Rect) -> Self {
        Self { point, rect }
    }

    /// Whether this cell's rectangle contains `location`.
    #[inline]
    #[must_use]
    pub fn contains(&self, location: Point) -> bool {
        self.rect.contains(location)
    }
}

/// Build the bounds of a uniform `cols × rows` tiling with square cells of
/// side `cell` whose top-left cell starts at `origin`.
///
/// Cell `(col, row)` occupies `(origin.x + col·cell, origin.y + row·cell)`.
#[must_use]
pub fn uniform_tiling(origin: Point, cols: u16, rows: u16, cell: f64) -> Vec<CellBounds> {
    let mut out = Vec::with_capacity(usize::from(cols) * usize::from(rows));
    for row in 0..rows {
        for col in 0..cols {
            let rect = Rect::square(
                origin.x + f64::from(col) * cell,
                origin.y + f64::from(row) * cell,
                cell,
            );
            out.push(CellBounds::new(GridPoint::new(col, row), rect));
        }
    }
    out
}
