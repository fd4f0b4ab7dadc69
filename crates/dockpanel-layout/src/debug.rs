#![forbid(unsafe_code)]

//! Layout pass debugging utilities.
//!
//! Provides introspection into stack panel layout passes:
//! - Recording of the proportions and dimensions each pass produced
//! - Detection of overflow/underflow conditions
//! - Plain-text reports
//!
//! # Usage
//!
//! ```ignore
//! use dockpanel_layout::debug::LayoutDebugger;
//!
//! let debugger = LayoutDebugger::new();
//! debugger.set_enabled(true);
//! panel.attach_debugger(debugger.clone());
//!
//! // ... perform layout ...
//!
//! for record in debugger.snapshot() {
//!     if record.has_overflow() {
//!         eprintln!("{}", record.summary());
//!     }
//! }
//! ```

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dockpanel_core::geometry::{Orientation, Size};

use crate::assign::AssignOutcome;

/// A record of a single stack panel layout pass.
#[derive(Debug, Clone)]
pub struct PassRecord {
    /// User-provided name for identification.
    pub name: String,
    /// Stacking axis.
    pub orientation: Orientation,
    /// Size handed to the pass.
    pub size: Size,
    /// Space reserved for splitters.
    pub reserved_thickness: f64,
    /// Extent left for children.
    pub available: f64,
    /// Effective proportion per child, in item order.
    pub proportions: Vec<f64>,
    /// Emitted dimension per child, in item order.
    pub dimensions: Vec<f64>,
    /// Assignment summary.
    pub outcome: AssignOutcome,
    /// Time taken by the pass (if measured).
    pub solve_time: Option<Duration>,
}

impl PassRecord {
    /// Create a new, empty record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orientation: Orientation::default(),
            size: Size::ZERO,
            reserved_thickness: 0.0,
            available: 0.0,
            proportions: Vec::new(),
            dimensions: Vec::new(),
            outcome: AssignOutcome::default(),
            solve_time: None,
        }
    }

    /// Sum of emitted child dimensions.
    pub fn total_dimension(&self) -> f64 {
        self.dimensions.iter().sum()
    }

    /// Check if children were given more than the available extent.
    pub fn has_overflow(&self) -> bool {
        self.total_dimension() > self.available.max(0.0).ceil()
    }

    /// Check if more space is unused than rounding can explain.
    ///
    /// Passes where every child is collapsed never count as underflow.
    pub fn has_underflow(&self) -> bool {
        let any_active = self.proportions.iter().any(|p| *p > 0.0);
        any_active && self.available.floor() - self.total_dimension() > 1.0
    }

    /// Percentage of available extent handed to children.
    pub fn utilization(&self) -> f64 {
        if self.available <= 0.0 {
            return 0.0;
        }
        (self.total_dimension() / self.available).min(1.0) * 100.0
    }

    /// Generate a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "{} ({:?}):", self.name, self.orientation);
        let _ = writeln!(s, "  Input: {}x{}", self.size.width, self.size.height);
        let _ = writeln!(
            s,
            "  Available: {} (splitters reserve {})",
            self.available, self.reserved_thickness
        );

        for (i, (p, dim)) in self
            .proportions
            .iter()
            .zip(self.dimensions.iter())
            .enumerate()
        {
            let _ = writeln!(s, "  [{i}] {p:.4} -> {dim}");
        }

        let _ = writeln!(s, "  Utilization: {:.1}%", self.utilization());
        if let Some(scale) = self.outcome.normalization {
            let _ = writeln!(s, "  Normalized by {scale:.4}");
        }
        if self.outcome.clamped > 0 {
            let _ = writeln!(s, "  {} child(ren) clamped to bounds", self.outcome.clamped);
        }
        if self.has_overflow() {
            let _ = writeln!(s, "  ⚠ OVERFLOW");
        }
        if self.has_underflow() {
            let _ = writeln!(s, "  ⚠ UNDERFLOW");
        }
        if let Some(t) = self.solve_time {
            let _ = writeln!(s, "  Solve time: {:?}", t);
        }
        s
    }
}

/// Layout pass debugger.
///
/// Collects pass records for introspection. Thread-safe via internal
/// synchronization; can be shared by every panel in an application.
#[derive(Debug)]
pub struct LayoutDebugger {
    enabled: AtomicBool,
    records: Mutex<Vec<PassRecord>>,
}

impl LayoutDebugger {
    /// Create a new debugger wrapped in Arc (disabled by default).
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            enabled: AtomicBool::new(false),
            records: Mutex::new(Vec::new()),
        })
    }

    /// Check if debugging is enabled.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable debugging.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Toggle debugging on/off.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    /// Clear all recorded data.
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    /// Record a layout pass.
    pub fn record(&self, record: PassRecord) {
        if !self.enabled() {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    /// Get a snapshot of all records.
    pub fn snapshot(&self) -> Vec<PassRecord> {
        self.records
            .lock()
            .ok()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Get records with overflow conditions.
    pub fn overflows(&self) -> Vec<PassRecord> {
        self.snapshot()
            .into_iter()
            .filter(|r| r.has_overflow())
            .collect()
    }

    /// Get records with underflow conditions.
    pub fn underflows(&self) -> Vec<PassRecord> {
        self.snapshot()
            .into_iter()
            .filter(|r| r.has_underflow())
            .collect()
    }

    /// Generate a summary report of all recorded passes.
    pub fn report(&self) -> String {
        let records = self.snapshot();

        let mut s = String::new();
        let _ = writeln!(s, "=== Layout Debug Report ({} passes) ===", records.len());

        let overflows: Vec<_> = records.iter().filter(|r| r.has_overflow()).collect();
        let underflows: Vec<_> = records.iter().filter(|r| r.has_underflow()).collect();

        if !overflows.is_empty() {
            let _ = writeln!(s, "\n⚠ {} passes have OVERFLOW:", overflows.len());
            for r in &overflows {
                let _ = writeln!(s, "  - {}", r.name);
            }
        }

        if !underflows.is_empty() {
            let _ = writeln!(s, "\n⚠ {} passes have UNDERFLOW:", underflows.len());
            for r in &underflows {
                let _ = writeln!(s, "  - {} ({:.1}% utilization)", r.name, r.utilization());
            }
        }

        let _ = writeln!(s, "\n--- Passes ---");
        for record in &records {
            let _ = write!(s, "\n{}", record.summary());
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(available: f64, proportions: &[f64], dimensions: &[f64]) -> PassRecord {
        let mut record = PassRecord::new("test");
        record.available = available;
        record.proportions = proportions.to_vec();
        record.dimensions = dimensions.to_vec();
        record
    }

    #[test]
    fn pass_record_overflow_detection() {
        assert!(record(100.0, &[0.5, 0.5], &[60.0, 60.0]).has_overflow());
        assert!(!record(100.0, &[0.5, 0.5], &[50.0, 50.0]).has_overflow());
    }

    #[test]
    fn fractional_available_allows_rounding_up() {
        assert!(!record(99.6, &[1.0], &[100.0]).has_overflow());
    }

    #[test]
    fn pass_record_underflow_detection() {
        assert!(record(100.0, &[0.5, 0.5], &[30.0, 40.0]).has_underflow());
        assert!(!record(100.0, &[0.5, 0.5], &[49.0, 50.0]).has_underflow());
    }

    #[test]
    fn all_collapsed_is_not_underflow() {
        assert!(!record(100.0, &[0.0, 0.0], &[0.0, 0.0]).has_underflow());
    }

    #[test]
    fn pass_record_utilization() {
        let r = record(200.0, &[0.5, 0.5], &[50.0, 50.0]);
        assert!((r.utilization() - 50.0).abs() < 0.1);
        let clamped = record(100.0, &[1.0], &[150.0]);
        assert!((clamped.utilization() - 100.0).abs() < 0.1);
        assert_eq!(record(0.0, &[], &[]).utilization(), 0.0);
    }

    #[test]
    fn summary_lists_children() {
        let summary = record(100.0, &[0.25, 0.75], &[25.0, 75.0]).summary();
        assert!(summary.contains("[0] 0.2500 -> 25"));
        assert!(summary.contains("[1] 0.7500 -> 75"));
        assert!(!summary.contains("OVERFLOW"));
    }

    #[test]
    fn debugger_disabled_by_default() {
        let debugger = LayoutDebugger::new();
        assert!(!debugger.enabled());
        debugger.record(PassRecord::new("ignored"));
        assert!(debugger.snapshot().is_empty());
    }

    #[test]
    fn debugger_records_when_enabled() {
        let debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        debugger.record(record(100.0, &[1.0], &[120.0]));
        debugger.record(record(100.0, &[1.0], &[100.0]));
        assert_eq!(debugger.snapshot().len(), 2);
        assert_eq!(debugger.overflows().len(), 1);
        assert!(debugger.underflows().is_empty());

        let report = debugger.report();
        assert!(report.contains("2 passes"));
        assert!(report.contains("1 passes have OVERFLOW"));

        debugger.clear();
        assert!(debugger.snapshot().is_empty());
    }

    #[test]
    fn debugger_toggle() {
        let debugger = LayoutDebugger::new();
        assert!(debugger.toggle());
        assert!(debugger.enabled());
        assert!(!debugger.toggle());
        assert!(!debugger.enabled());
    }
}
