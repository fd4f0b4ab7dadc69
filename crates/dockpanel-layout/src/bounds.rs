//! Proportion bounds derived from a child's absolute size constraints.

use dockpanel_core::geometry::Orientation;

use crate::proportion::{SizeConstraints, dimension_to_proportion};

/// Allowed proportion range for one child at the current extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionBounds {
    pub min: f64,
    pub max: f64,
}

impl ProportionBounds {
    /// `[0, +∞)`.
    pub const UNBOUNDED: Self = Self {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Clamp `p` into the bounds. When `min > max` the maximum wins, so an
    /// over-constrained child never grows past its declared maximum.
    #[inline]
    #[must_use]
    pub fn clamp(&self, p: f64) -> f64 {
        p.max(self.min).min(self.max)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: f64) -> bool {
        p >= self.min && p <= self.max
    }
}

/// Converts absolute min/max sizes into proportion bounds.
///
/// Built once per layout pass (or drag step) from the container's
/// orientation, its available extent, and the configured proportion floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintCalculator {
    orientation: Orientation,
    available: f64,
    floor: f64,
}

impl ConstraintCalculator {
    /// Create a calculator. A non-finite or negative `floor` reads as 0.
    #[must_use]
    pub fn new(orientation: Orientation, available: f64, floor: f64) -> Self {
        let floor = if floor.is_finite() && floor > 0.0 { floor } else { 0.0 };
        Self {
            orientation,
            available,
            floor,
        }
    }

    #[inline]
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    #[must_use]
    pub const fn available(&self) -> f64 {
        self.available
    }

    #[inline]
    #[must_use]
    pub const fn floor(&self) -> f64 {
        self.floor
    }

    /// Bounds for a child declaring `constraints`.
    ///
    /// With `available <= 0` every conversion yields 0 and the result
    /// degenerates to `[floor, +∞)`.
    #[must_use]
    pub fn bounds_for(&self, constraints: &SizeConstraints) -> ProportionBounds {
        let axis = constraints.along(self.orientation);
        let min = self
            .floor
            .max(dimension_to_proportion(axis.min, self.available));
        let max = if axis.has_max() && self.available > 0.0 {
            dimension_to_proportion(axis.max, self.available)
        } else {
            f64::INFINITY
        };
        ProportionBounds { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(available: f64, floor: f64) -> ConstraintCalculator {
        ConstraintCalculator::new(Orientation::Horizontal, available, floor)
    }

    #[test]
    fn unconstrained_child_gets_floor_and_infinity() {
        let bounds = calc(200.0, 0.05).bounds_for(&SizeConstraints::UNCONSTRAINED);
        assert_eq!(bounds.min, 0.05);
        assert_eq!(bounds.max, f64::INFINITY);
    }

    #[test]
    fn size_minimum_beats_smaller_floor() {
        let constraints = SizeConstraints::UNCONSTRAINED.width(50.0, f64::INFINITY);
        let bounds = calc(200.0, 0.1).bounds_for(&constraints);
        assert_eq!(bounds.min, 0.25);
    }

    #[test]
    fn floor_beats_smaller_size_minimum() {
        let constraints = SizeConstraints::UNCONSTRAINED.width(10.0, f64::INFINITY);
        let bounds = calc(200.0, 0.1).bounds_for(&constraints);
        assert_eq!(bounds.min, 0.1);
    }

    #[test]
    fn finite_maximum_converts_to_proportion() {
        let constraints = SizeConstraints::UNCONSTRAINED.width(0.0, 150.0);
        let bounds = calc(300.0, 0.0).bounds_for(&constraints);
        assert_eq!(bounds.max, 0.5);
    }

    #[test]
    fn orientation_picks_height_bounds() {
        let constraints = SizeConstraints::UNCONSTRAINED
            .width(100.0, 100.0)
            .height(20.0, 40.0);
        let bounds = ConstraintCalculator::new(Orientation::Vertical, 80.0, 0.0)
            .bounds_for(&constraints);
        assert_eq!(bounds, ProportionBounds { min: 0.25, max: 0.5 });
    }

    #[test]
    fn zero_available_degenerates_to_floor_and_infinity() {
        let constraints = SizeConstraints::UNCONSTRAINED.width(50.0, 60.0);
        let bounds = calc(0.0, 0.02).bounds_for(&constraints);
        assert_eq!(bounds.min, 0.02);
        assert_eq!(bounds.max, f64::INFINITY);
    }

    #[test]
    fn invalid_floor_reads_as_zero() {
        assert_eq!(calc(100.0, f64::NAN).floor(), 0.0);
        assert_eq!(calc(100.0, -1.0).floor(), 0.0);
    }

    #[test]
    fn clamp_lets_max_win_over_min() {
        let bounds = ProportionBounds { min: 0.6, max: 0.4 };
        assert_eq!(bounds.clamp(0.1), 0.4);
        assert_eq!(bounds.clamp(0.9), 0.4);
        assert!(ProportionBounds::UNBOUNDED.contains(12.0));
    }
}
