//! Interactive splitter resize.
//!
//! A drag on a splitter moves proportion between exactly two children: the
//! *target* receives the signed delta and the *neighbor* gives it up. The
//! correction order matters at the margins and is fixed:
//!
//! 1. Clamp the delta so neither side goes negative.
//! 2. Enforce the target's bounds, pushing any deficit or excess onto the
//!    neighbor within the neighbor's bounds.
//! 3. Enforce the neighbor's bounds, pushing any deficit or excess back onto
//!    the target within the target's bounds.
//!
//! Nothing else is touched; the next layout pass re-derives pixel geometry.

use serde::{Deserialize, Serialize};

use crate::bounds::{ConstraintCalculator, ProportionBounds};
use crate::child::{Child, ChildId, SplitterId};
use crate::proportion::dimension_to_proportion;

/// Result of one resize step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeOutcome {
    /// Proportion delta derived from the pixel delta.
    pub requested: f64,
    /// Committed target proportion.
    pub target: f64,
    /// Committed neighbor proportion.
    pub neighbor: f64,
    /// Whether a bound or the non-negativity clamp altered the request.
    pub limited: bool,
}

impl ResizeOutcome {
    /// Proportion actually moved onto the target.
    #[must_use]
    pub fn applied(&self, previous_target: f64) -> f64 {
        self.target - previous_target
    }
}

/// Move `delta` of proportion from `neighbor` to `target` (negative `delta`
/// moves it the other way), honoring both children's bounds.
///
/// Returns the committed `(target, neighbor)` pair, each floored at 0.
#[must_use]
pub fn resize_proportions(
    target: f64,
    neighbor: f64,
    delta: f64,
    target_bounds: ProportionBounds,
    neighbor_bounds: ProportionBounds,
) -> (f64, f64) {
    let mut delta = if delta.is_finite() { delta } else { 0.0 };
    if target + delta < 0.0 {
        delta = -target;
    }
    if neighbor - delta < 0.0 {
        delta = neighbor;
    }

    let mut t = target + delta;
    let mut n = neighbor - delta;

    // Target first.
    if t < target_bounds.min {
        let deficit = target_bounds.min - t;
        t = target_bounds.min;
        n = (n - deficit).max(neighbor_bounds.min);
    } else if t > target_bounds.max {
        let excess = t - target_bounds.max;
        t = target_bounds.max;
        n = (n + excess).min(neighbor_bounds.max);
    }

    // Then the neighbor.
    if n < neighbor_bounds.min {
        let deficit = neighbor_bounds.min - n;
        n = neighbor_bounds.min;
        t = (t - deficit).max(target_bounds.min);
    } else if n > neighbor_bounds.max {
        let excess = n - neighbor_bounds.max;
        n = neighbor_bounds.max;
        t = (t + excess).min(target_bounds.max);
    }

    (t.max(0.0), n.max(0.0))
}

/// Apply a pixel delta along the panel axis to a pair of children.
///
/// Both the committed proportion and the restore cache are written so the
/// next assignment pass keeps the dragged sizes. While a sibling is collapsed
/// the two caches are on the pre-collapse scale, so the new split is written
/// into the pair's existing cached share instead of overwriting it; the other
/// children's share of the next pass is unchanged.
pub fn resize_pair(
    target: &mut Child,
    neighbor: &mut Child,
    pixel_delta: f64,
    calculator: &ConstraintCalculator,
) -> ResizeOutcome {
    let requested = dimension_to_proportion(pixel_delta, calculator.available());
    let before = (target.effective_proportion(), neighbor.effective_proportion());
    let (t, n) = resize_proportions(
        before.0,
        before.1,
        requested,
        calculator.bounds_for(&target.constraints),
        calculator.bounds_for(&neighbor.constraints),
    );

    let (cache_t, cache_n) = match (target.collapsed_proportion, neighbor.collapsed_proportion) {
        (Some(ct), Some(cn)) if t + n > 0.0 => {
            let share = ct + cn;
            (share * t / (t + n), share * n / (t + n))
        }
        _ => (t, n),
    };
    target.proportion = Some(t);
    target.collapsed_proportion = Some(cache_t);
    neighbor.proportion = Some(n);
    neighbor.collapsed_proportion = Some(cache_n);

    let unlimited = (before.0 + requested, before.1 - requested);
    ResizeOutcome {
        requested,
        target: t,
        neighbor: n,
        limited: (t - unlimited.0).abs() > f64::EPSILON || (n - unlimited.1).abs() > f64::EPSILON,
    }
}

/// Snapshot of one child's proportion state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ProportionSnapshot {
    pub(crate) proportion: Option<f64>,
    pub(crate) collapsed_proportion: Option<f64>,
}

impl ProportionSnapshot {
    pub(crate) fn capture(child: &Child) -> Self {
        Self {
            proportion: child.proportion,
            collapsed_proportion: child.collapsed_proportion,
        }
    }

    pub(crate) fn restore(self, child: &mut Child) {
        child.proportion = self.proportion;
        child.collapsed_proportion = self.collapsed_proportion;
    }
}

/// An in-progress splitter drag.
///
/// Updates carry the cumulative pointer delta since the drag began. Each
/// update recomputes from the snapshot taken at `begin`, so a pointer that
/// wanders past a bound and back does not leave the children stuck at the
/// bound, and many small moves do not accumulate rounding drift.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitterDrag {
    pub(crate) splitter: SplitterId,
    pub(crate) target: ChildId,
    pub(crate) neighbor: ChildId,
    pub(crate) target_origin: ProportionSnapshot,
    pub(crate) neighbor_origin: ProportionSnapshot,
    pub(crate) cumulative: f64,
    pub(crate) last: Option<ResizeOutcome>,
}

impl SplitterDrag {
    /// The splitter being dragged.
    #[must_use]
    pub const fn splitter(&self) -> SplitterId {
        self.splitter
    }

    /// Child before the splitter; a positive delta grows it.
    #[must_use]
    pub const fn target(&self) -> ChildId {
        self.target
    }

    /// Child after the splitter.
    #[must_use]
    pub const fn neighbor(&self) -> ChildId {
        self.neighbor
    }

    /// Cumulative pixel delta of the latest update.
    #[must_use]
    pub const fn cumulative_delta(&self) -> f64 {
        self.cumulative
    }

    /// Outcome of the latest update, if any.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<ResizeOutcome> {
        self.last
    }
}
