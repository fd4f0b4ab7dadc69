//! Proportion value semantics and orientation-aware lookups.
//!
//! A proportion is a child's fractional share of the available extent. The
//! hosts this engine talks to encode "not yet assigned" as NaN; inside the
//! engine that sentinel is translated to `None` by [`proportion_from_raw`]
//! and nothing else ever tests for NaN.

use dockpanel_core::geometry::{Orientation, Size};
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that active proportions sum to one.
pub const PROPORTION_TOLERANCE: f64 = 1e-10;

/// Check if `p` is a usable proportion: finite and non-negative.
#[inline]
#[must_use]
pub fn is_valid_proportion(p: f64) -> bool {
    p.is_finite() && p >= 0.0
}

/// Translate a raw host value into the engine's representation.
///
/// NaN, infinities, and negative values become `None` ("needs assignment").
#[inline]
#[must_use]
pub fn proportion_from_raw(p: f64) -> Option<f64> {
    is_valid_proportion(p).then_some(p)
}

/// Translate the engine's representation back into the host encoding.
#[inline]
#[must_use]
pub fn proportion_to_raw(p: Option<f64>) -> f64 {
    p.unwrap_or(f64::NAN)
}

/// Convert an absolute dimension into a share of `available`.
///
/// Returns 0 when `available` is not strictly positive so that NaN and
/// infinities never leak into proportion space.
#[inline]
#[must_use]
pub fn dimension_to_proportion(dimension: f64, available: f64) -> f64 {
    if available > 0.0 { dimension / available } else { 0.0 }
}

/// Select the extent of `size` along `orientation`.
#[inline]
#[must_use]
pub fn relevant_extent(size: Size, orientation: Orientation) -> f64 {
    orientation.extent(size)
}

/// Absolute size bounds declared by a child.
///
/// Minimums default to 0 and maximums to `+∞`. Invalid values are tolerated
/// at construction and read back as "unconstrained" through
/// [`SizeConstraints::along`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeConstraints {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl SizeConstraints {
    /// No bounds on either axis.
    pub const UNCONSTRAINED: Self = Self {
        min_width: 0.0,
        max_width: f64::INFINITY,
        min_height: 0.0,
        max_height: f64::INFINITY,
    };

    /// Set the width bounds.
    #[must_use]
    pub fn width(mut self, min: f64, max: f64) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Set the height bounds.
    #[must_use]
    pub fn height(mut self, min: f64, max: f64) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Bounds along `orientation`, with invalid values normalized.
    #[must_use]
    pub fn along(&self, orientation: Orientation) -> AxisConstraints {
        let (min, max) = match orientation {
            Orientation::Horizontal => (self.min_width, self.max_width),
            Orientation::Vertical => (self.min_height, self.max_height),
        };
        AxisConstraints::new(min, max)
    }
}

impl Default for SizeConstraints {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

/// Sanitized min/max pair along a single axis.
///
/// `min` is always finite and `>= 0`; `max` is `>= 0` and may be `+∞`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConstraints {
    pub min: f64,
    pub max: f64,
}

impl AxisConstraints {
    /// Unbounded axis.
    pub const UNCONSTRAINED: Self = Self {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Normalize raw bounds: a NaN, infinite, or negative minimum reads as
    /// 0; a NaN maximum reads as `+∞`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() && min > 0.0 { min } else { 0.0 };
        let max = if max.is_nan() { f64::INFINITY } else { max.max(0.0) };
        Self { min, max }
    }

    /// Whether a finite maximum is declared.
    #[inline]
    #[must_use]
    pub fn has_max(&self) -> bool {
        self.max.is_finite()
    }

    /// The same bounds snapped inward to whole units: `ceil(min)` and
    /// `floor(max)`.
    #[inline]
    #[must_use]
    pub fn whole_units(&self) -> Self {
        Self {
            min: self.min.ceil(),
            max: self.max.floor(),
        }
    }

    /// Clamp a dimension into the bounds. When `min > max` the maximum wins.
    #[inline]
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Min/max lookup for `constraints` along `orientation`.
#[inline]
#[must_use]
pub fn size_constraints(constraints: &SizeConstraints, orientation: Orientation) -> AxisConstraints {
    constraints.along(orientation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_and_negative_are_invalid() {
        assert!(!is_valid_proportion(f64::NAN));
        assert!(!is_valid_proportion(-0.1));
        assert!(!is_valid_proportion(f64::INFINITY));
        assert!(is_valid_proportion(0.0));
        assert!(is_valid_proportion(0.5));
        // Proportions above one are tolerated; normalization brings them back.
        assert!(is_valid_proportion(3.0));
    }

    #[test]
    fn raw_translation_maps_sentinel_to_none() {
        assert_eq!(proportion_from_raw(f64::NAN), None);
        assert_eq!(proportion_from_raw(-2.0), None);
        assert_eq!(proportion_from_raw(0.25), Some(0.25));
        assert!(proportion_to_raw(None).is_nan());
        assert_eq!(proportion_to_raw(Some(0.75)), 0.75);
    }

    #[test]
    fn dimension_to_proportion_guards_zero_available() {
        assert_eq!(dimension_to_proportion(50.0, 200.0), 0.25);
        assert_eq!(dimension_to_proportion(50.0, 0.0), 0.0);
        assert_eq!(dimension_to_proportion(50.0, -10.0), 0.0);
        assert_eq!(dimension_to_proportion(50.0, f64::NAN), 0.0);
    }

    #[test]
    fn relevant_extent_follows_orientation() {
        let size = Size::new(640.0, 480.0);
        assert_eq!(relevant_extent(size, Orientation::Horizontal), 640.0);
        assert_eq!(relevant_extent(size, Orientation::Vertical), 480.0);
    }

    #[test]
    fn size_constraints_select_matching_axis() {
        let constraints = SizeConstraints::UNCONSTRAINED
            .width(10.0, 100.0)
            .height(20.0, 200.0);
        assert_eq!(
            size_constraints(&constraints, Orientation::Horizontal),
            AxisConstraints {
                min: 10.0,
                max: 100.0
            }
        );
        assert_eq!(
            size_constraints(&constraints, Orientation::Vertical),
            AxisConstraints {
                min: 20.0,
                max: 200.0
            }
        );
    }

    #[test]
    fn invalid_bounds_read_as_unconstrained() {
        let constraints = SizeConstraints::UNCONSTRAINED.width(f64::NAN, f64::NAN);
        assert_eq!(
            constraints.along(Orientation::Horizontal),
            AxisConstraints::UNCONSTRAINED
        );
        assert_eq!(AxisConstraints::new(-5.0, 10.0).min, 0.0);
        assert_eq!(AxisConstraints::new(f64::INFINITY, 10.0).min, 0.0);
    }

    #[test]
    fn clamp_prefers_max_on_inverted_bounds() {
        let bounds = AxisConstraints::new(50.0, 30.0);
        assert_eq!(bounds.clamp(10.0), 30.0);
        assert_eq!(bounds.clamp(100.0), 30.0);
        assert!(bounds.has_max());
        assert!(!AxisConstraints::UNCONSTRAINED.has_max());
    }
}
