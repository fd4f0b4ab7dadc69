//! Per-pass proportion assignment and normalization.
//!
//! Run once per layout pass over the children of one panel, in order:
//!
//! 1. **Collapse**: a collapsed child caches its live proportion (when
//!    positive) and targets 0. An active child targets its restore cache if
//!    present, otherwise its committed proportion.
//! 2. **Unassigned**: active children with no target split whatever is left
//!    of 1.0 equally (possibly nothing).
//! 3. **Normalize**: active targets are scaled to sum to 1.0 unless they
//!    already do within [`PROPORTION_TOLERANCE`] or sum to exactly zero.
//! 4. **Commit**: active targets are clamped to their proportion bounds, any
//!    residual left by clamping is settled across children with slack, and
//!    the result is written back. With nothing collapsed the restore cache is
//!    refreshed to the committed value.
//!
//! The pass never fails. Running it twice with unchanged inputs is a no-op
//! the second time.

use crate::bounds::{ConstraintCalculator, ProportionBounds};
use crate::child::Child;
use crate::proportion::PROPORTION_TOLERANCE;

/// Summary of one assignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssignOutcome {
    /// Non-collapsed children.
    pub active: usize,
    /// Collapsed children.
    pub collapsed: usize,
    /// Active children that had no target and received an equal share.
    pub unassigned: usize,
    /// Scale factor applied during normalization, if any.
    pub normalization: Option<f64>,
    /// Active children whose normalized target was moved by their bounds.
    pub clamped: usize,
    /// Sum of committed active proportions.
    pub committed_sum: f64,
}

impl AssignOutcome {
    /// Whether the committed active proportions sum to 1 within tolerance.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        (self.committed_sum - 1.0).abs() <= PROPORTION_TOLERANCE
    }
}

/// Assign, normalize, and commit proportions for one panel's children.
pub fn assign_proportions<'a>(
    children: impl IntoIterator<Item = &'a mut Child>,
    calculator: &ConstraintCalculator,
) -> AssignOutcome {
    let mut children: Vec<&mut Child> = children.into_iter().collect();
    let mut outcome = AssignOutcome::default();

    // 1. Collapse handling.
    let mut targets: Vec<Option<f64>> = Vec::with_capacity(children.len());
    for child in children.iter_mut() {
        if child.collapsed {
            outcome.collapsed += 1;
            if let Some(p) = child.proportion
                && p > 0.0
            {
                child.collapsed_proportion = Some(p);
            }
            targets.push(Some(0.0));
        } else {
            outcome.active += 1;
            targets.push(child.collapsed_proportion.or(child.proportion));
        }
    }

    // 2. Unassigned distribution.
    let assigned_sum = active_target_sum(&children, &targets);
    outcome.unassigned = children
        .iter()
        .zip(&targets)
        .filter(|(child, target)| !child.collapsed && target.is_none())
        .count();
    if outcome.unassigned > 0 {
        let share = (1.0 - assigned_sum).max(0.0) / outcome.unassigned as f64;
        for (child, target) in children.iter().zip(targets.iter_mut()) {
            if !child.collapsed && target.is_none() {
                *target = Some(share);
            }
        }
    }

    // 3. Normalization.
    let sum = active_target_sum(&children, &targets);
    if sum > 0.0 && (sum - 1.0).abs() > PROPORTION_TOLERANCE {
        let scale = 1.0 / sum;
        for (child, target) in children.iter().zip(targets.iter_mut()) {
            if !child.collapsed
                && let Some(p) = target
            {
                *p *= scale;
            }
        }
        outcome.normalization = Some(scale);
    }

    // 4. Commit.
    let bounds: Vec<ProportionBounds> = children
        .iter()
        .map(|child| calculator.bounds_for(&child.constraints))
        .collect();
    let mut committed: Vec<f64> = Vec::with_capacity(children.len());
    for ((child, target), bounds) in children.iter().zip(&targets).zip(&bounds) {
        let target = target.unwrap_or(0.0);
        if child.collapsed {
            committed.push(0.0);
        } else {
            let clamped = bounds.clamp(target);
            if clamped != target {
                outcome.clamped += 1;
            }
            committed.push(clamped);
        }
    }
    if outcome.clamped > 0 && sum > 0.0 {
        let active: Vec<bool> = children.iter().map(|child| !child.collapsed).collect();
        settle_residual(&mut committed, &bounds, &active);
    }

    let any_collapsed = outcome.collapsed > 0;
    for (child, p) in children.iter_mut().zip(&committed) {
        let p = p.max(0.0);
        child.proportion = Some(p);
        if !any_collapsed {
            child.collapsed_proportion = Some(p);
        }
        if !child.collapsed {
            outcome.committed_sum += p;
        }
    }

    outcome
}

fn active_target_sum(children: &[&mut Child], targets: &[Option<f64>]) -> f64 {
    children
        .iter()
        .zip(targets)
        .filter(|(child, _)| !child.collapsed)
        .filter_map(|(_, target)| *target)
        .sum()
}

/// Move the gap between `sum(active)` and 1.0 onto active entries that still
/// have room inside their bounds, splitting it equally and saturating
/// entries as they hit a bound. Stops when the gap closes or nobody has room
/// left; infeasible bounds therefore keep their clamped values.
fn settle_residual(proportions: &mut [f64], bounds: &[ProportionBounds], active: &[bool]) {
    let slots = proportions.len();
    for _ in 0..=slots {
        let sum: f64 = proportions
            .iter()
            .zip(active)
            .filter(|(_, active)| **active)
            .map(|(p, _)| *p)
            .sum();
        let residual = 1.0 - sum;
        if residual.abs() <= PROPORTION_TOLERANCE {
            return;
        }

        let room = |i: usize, p: f64| -> f64 {
            if residual > 0.0 {
                (bounds[i].max - p).max(0.0)
            } else {
                (p - bounds[i].min).max(0.0)
            }
        };
        let open: Vec<usize> = (0..slots)
            .filter(|&i| active[i] && room(i, proportions[i]) > PROPORTION_TOLERANCE)
            .collect();
        if open.is_empty() {
            return;
        }

        let share = residual.abs() / open.len() as f64;
        for i in open {
            let step = share.min(room(i, proportions[i]));
            proportions[i] += step.copysign(residual);
        }
    }
}
