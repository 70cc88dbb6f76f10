//! Axis-aligned rectangle primitives.
//!
//! Coordinates are wall-local: the origin is the wall's top-left corner, `x`
//! grows to the right and `y` grows downward. Positions may be negative or
//! exceed the wall extent when overflow is allowed.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing edges for adjacency.
pub const EPSILON: f64 = 1e-9;

/// A top-left position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two positions.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of a block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Returns the rectangle of this size placed at `position`.
    pub fn at(&self, position: Position) -> Rect {
        Rect::new(position.x, position.y, self.width, self.height)
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// X coordinate of the right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns a copy moved to `position`.
    pub fn moved_to(&self, position: Position) -> Self {
        Self::new(position.x, position.y, self.width, self.height)
    }

    /// Checks that the rectangle has a usable size and finite coordinates.
    pub fn validate(&self) -> Result<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(Error::InvalidGeometry(format!(
                "position ({}, {}) is not finite",
                self.x, self.y
            )));
        }
        if !self.size().is_valid() {
            return Err(Error::InvalidGeometry(format!(
                "size {}x{} must be positive",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Returns true if the two rectangles share positive area.
    ///
    /// Rectangles that only touch along an edge or corner do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Returns the intersection rectangle, if the two overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Returns true if the two rectangles share an edge segment of positive length
    /// without overlapping.
    pub fn is_adjacent_to(&self, other: &Rect) -> bool {
        let spans_vertically = self.y < other.bottom() - EPSILON && other.y < self.bottom() - EPSILON;
        let spans_horizontally = self.x < other.right() - EPSILON && other.x < self.right() - EPSILON;

        let touches_x = (self.right() - other.x).abs() < EPSILON
            || (other.right() - self.x).abs() < EPSILON;
        let touches_y = (self.bottom() - other.y).abs() < EPSILON
            || (other.bottom() - self.y).abs() < EPSILON;

        (touches_x && spans_vertically) || (touches_y && spans_horizontally)
    }
}

/// Returns true iff `a` and `b` share positive area.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Percentage (0..=100) of `a`'s area covered by `b`.
///
/// The result is relative to `a`, so `overlap_percentage(a, b)` and
/// `overlap_percentage(b, a)` differ when the areas differ.
pub fn overlap_percentage(a: &Rect, b: &Rect) -> f64 {
    let area = a.area();
    if area <= 0.0 {
        return 0.0;
    }
    match a.intersection(b) {
        Some(common) => (common.area() / area * 100.0).clamp(0.0, 100.0),
        None => 0.0,
    }
}

/// Anything occupying a rectangle on the wall.
///
/// Validators and generators accept slices of `Footprint`s so callers can pass
/// blocks, bare rectangles or layout output without converting.
pub trait Footprint {
    /// The occupied rectangle.
    fn rect(&self) -> Rect;

    /// Identifier used for self-exclusion; `None` for anonymous rectangles.
    fn id(&self) -> Option<&str> {
        None
    }
}

impl Footprint for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

impl<T: Footprint + ?Sized> Footprint for &T {
    fn rect(&self) -> Rect {
        (**self).rect()
    }

    fn id(&self) -> Option<&str> {
        (**self).id()
    }
}
