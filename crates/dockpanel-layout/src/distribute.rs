//! Proportion → whole-unit dimension conversion.
//!
//! [`DimensionDistributor`] rasterizes continuous proportions onto an integer
//! grid the way a line rasterizer steps through pixels: each child gets the
//! floor of its exact share, the dropped fractions are accumulated, and the
//! child during which the accumulator crosses a whole unit receives one extra
//! unit. Which child that is depends only on where the running carry crosses,
//! so for some inputs it is the last one (`[1/3; 3]` over 10 gives `3, 3, 4`).
//!
//! # Invariants
//!
//! 1. Emitted dimensions are whole numbers and never negative.
//! 2. For proportions summing to 1 and an integral `available`, the emitted
//!    total never exceeds `available` and falls short by at most one unit
//!    (only through floating-point noise in the input proportions).
//! 3. Output is a pure function of the input sequence.
//!
//! The constrained form clamps each emitted value to the child's own
//! min/max after distribution, with the bounds snapped inward to whole units
//! so invariant 1 still holds. That clamp is allowed to break invariant 2.

use crate::proportion::{AxisConstraints, is_valid_proportion};

/// Round to one decimal place, ties to even.
#[inline]
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Running state for one distribution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionDistributor {
    available: f64,
    sum_of_fractions: f64,
}

impl DimensionDistributor {
    /// Start a pass over `available` units.
    #[must_use]
    pub fn new(available: f64) -> Self {
        Self {
            available,
            sum_of_fractions: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn available(&self) -> f64 {
        self.available
    }

    /// Fractional remainder carried to the next child.
    #[inline]
    #[must_use]
    pub fn carried_fraction(&self) -> f64 {
        self.sum_of_fractions
    }

    /// Emit the dimension for the next child in traversal order.
    pub fn next_dimension(&mut self, proportion: f64) -> f64 {
        if !(self.available > 0.0 && self.available.is_finite()) || !is_valid_proportion(proportion)
        {
            return 0.0;
        }

        let raw = self.available * proportion;
        let floor = raw.floor();
        self.sum_of_fractions += raw - floor;

        let crossed =
            round_to_tenth(self.sum_of_fractions) - self.sum_of_fractions.floor().max(1.0) >= 0.0;
        let dimension = if crossed {
            // Give back exactly the unit that was emitted. Subtracting the
            // nearest whole number instead drops a unit whenever the carry
            // lands in [1.5, 2).
            self.sum_of_fractions -= 1.0;
            floor + 1.0
        } else {
            floor
        };
        dimension.max(0.0)
    }

    /// Emit the next dimension, then clamp it into `bounds` rounded inward
    /// to whole units (`ceil(min)`, `floor(max)`; the maximum still wins).
    pub fn next_constrained(&mut self, proportion: f64, bounds: AxisConstraints) -> f64 {
        bounds.whole_units().clamp(self.next_dimension(proportion))
    }
}

/// Distribute `available` across `proportions` in order.
#[must_use]
pub fn distribute(available: f64, proportions: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut distributor = DimensionDistributor::new(available);
    proportions
        .into_iter()
        .map(|p| distributor.next_dimension(p))
        .collect()
}

/// Distribute `available` across `(proportion, bounds)` pairs, clamping each
/// result to its bounds.
#[must_use]
pub fn distribute_constrained(
    available: f64,
    entries: impl IntoIterator<Item = (f64, AxisConstraints)>,
) -> Vec<f64> {
    let mut distributor = DimensionDistributor::new(available);
    entries
        .into_iter()
        .map(|(p, bounds)| distributor.next_constrained(p, bounds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn total(dims: &[f64]) -> f64 {
        dims.iter().sum()
    }

    #[test]
    fn thirds_of_ten_sum_exactly() {
        let third = 1.0 / 3.0;
        let dims = distribute(10.0, [third, third, third]);
        assert_eq!(total(&dims), 10.0);
        assert!(dims.iter().all(|d| *d == 3.0 || *d == 4.0), "{dims:?}");
        assert_eq!(dims, distribute(10.0, [third, third, third]));
    }

    #[test]
    fn remainder_is_spread_through_traversal() {
        // Six children of 1/6 over 100: exact share 16.67 each.
        let sixth = 1.0 / 6.0;
        let dims = distribute(100.0, [sixth; 6]);
        assert_eq!(total(&dims), 100.0);
        let extra: Vec<usize> = dims
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == 17.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(extra.len(), 4);
        assert!(extra[0] < 5, "remainder must not pile up at the end: {dims:?}");
    }

    #[test]
    fn whole_shares_pass_through() {
        assert_eq!(distribute(200.0, [0.25, 0.5, 0.25]), vec![50.0, 100.0, 50.0]);
    }

    #[test]
    fn zero_or_invalid_available_emits_zeros() {
        assert_eq!(distribute(0.0, [0.5, 0.5]), vec![0.0, 0.0]);
        assert_eq!(distribute(-40.0, [0.5, 0.5]), vec![0.0, 0.0]);
        assert_eq!(distribute(f64::NAN, [1.0]), vec![0.0]);
        assert_eq!(distribute(f64::INFINITY, [1.0]), vec![0.0]);
    }

    #[test]
    fn invalid_proportion_emits_zero_without_disturbing_carry() {
        let mut distributor = DimensionDistributor::new(10.0);
        assert_eq!(distributor.next_dimension(0.35), 3.0);
        let carried = distributor.carried_fraction();
        assert_eq!(distributor.next_dimension(f64::NAN), 0.0);
        assert_eq!(distributor.carried_fraction(), carried);
    }

    #[test]
    fn collapsed_child_never_receives_carry() {
        let dims = distribute(10.0, [0.45, 0.0, 0.55]);
        assert_eq!(dims[1], 0.0);
        assert_eq!(total(&dims), 10.0);
    }

    #[test]
    fn constrained_variant_clamps_after_distribution() {
        let dims = distribute_constrained(
            100.0,
            [
                (0.1, AxisConstraints::new(25.0, f64::INFINITY)),
                (0.9, AxisConstraints::new(0.0, 60.0)),
            ],
        );
        assert_eq!(dims, vec![25.0, 60.0]);
    }

    #[test]
    fn fractional_bounds_still_emit_whole_units() {
        let dims = distribute_constrained(
            100.0,
            [
                (0.1, AxisConstraints::new(51.37, f64::INFINITY)),
                (0.9, AxisConstraints::new(0.0, 40.6)),
            ],
        );
        assert_eq!(dims, vec![52.0, 40.0]);

        // Inverted fractional bounds: the floored maximum wins.
        let dims = distribute_constrained(100.0, [(1.0, AxisConstraints::new(30.2, 20.8))]);
        assert_eq!(dims, vec![20.0]);
    }

    proptest! {
        #[test]
        fn conservation_never_exceeds_available(
            weights in prop::collection::vec(0.0f64..10.0, 1..24),
            available in 0u32..4000,
        ) {
            let sum: f64 = weights.iter().sum();
            prop_assume!(sum > 1e-6);
            let available = f64::from(available);
            let dims = distribute(available, weights.iter().map(|w| w / sum));
            let emitted = total(&dims);
            prop_assert!(emitted <= available, "emitted {} > {}", emitted, available);
            prop_assert!(emitted >= available - 1.0, "emitted {} < {} - 1", emitted, available);
            prop_assert!(dims.iter().all(|d| *d >= 0.0 && d.fract() == 0.0));
        }

        #[test]
        fn distribution_is_deterministic(
            weights in prop::collection::vec(0.0f64..10.0, 1..12),
            available in 1u32..2000,
        ) {
            let sum: f64 = weights.iter().sum();
            prop_assume!(sum > 1e-6);
            let proportions: Vec<f64> = weights.iter().map(|w| w / sum).collect();
            let first = distribute(f64::from(available), proportions.iter().copied());
            let second = distribute(f64::from(available), proportions.iter().copied());
            prop_assert_eq!(first, second);
        }
    }
}
