#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are device-independent units stored as `f64`, matching what a
//! host measure/arrange pass hands to the layout engine.

use serde::{Deserialize, Serialize};

/// The axis along which a panel stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Left to right; the relevant extent is the width.
    #[default]
    Horizontal,
    /// Top to bottom; the relevant extent is the height.
    Vertical,
}

impl Orientation {
    /// The orthogonal orientation.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Select the extent of `size` along this axis.
    #[inline]
    #[must_use]
    pub const fn extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Select the extent of `size` across this axis.
    #[inline]
    #[must_use]
    pub const fn cross_extent(self, size: Size) -> f64 {
        self.cross().extent(size)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build a size from an extent along `orientation` and a cross extent.
    #[inline]
    pub const fn from_extents(orientation: Orientation, along: f64, across: f64) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(along, across),
            Orientation::Vertical => Self::new(across, along),
        }
    }

    /// Check if either dimension is zero, negative, or NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create a rectangle occupying `[offset, offset + length)` along
    /// `orientation`, spanning the full cross extent of `bounds`.
    pub fn from_segment(bounds: Rect, orientation: Orientation, offset: f64, length: f64) -> Self {
        match orientation {
            Orientation::Horizontal => {
                Self::new(bounds.x + offset, bounds.y, length, bounds.height)
            }
            Orientation::Vertical => Self::new(bounds.x, bounds.y + offset, bounds.width, length),
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The rectangle's size.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
