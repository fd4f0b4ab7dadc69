#![forbid(unsafe_code)]

//! Proportional stack-panel layout and interactive splitter resize.
//!
//! # Role in dockpanel
//! A dock host arranges panels in runs separated by splitters. This crate
//! decides how much of the run each panel gets: it keeps every panel's
//! proportion normalized, converts proportions to whole-unit sizes without
//! drift, reserves space only for splitters that separate visible panels,
//! and moves proportion between two panels while a splitter is dragged.
//!
//! # Pieces
//! - [`proportion`]: value semantics and size constraints.
//! - [`bounds`]: absolute min/max sizes to proportion bounds.
//! - [`distribute`]: proportions to whole-unit dimensions.
//! - [`splitter`]: reserved splitter thickness.
//! - [`assign`]: per-pass assignment, collapse handling, normalization.
//! - [`resize`]: splitter drag arithmetic and drag sessions.
//! - [`panel`]: the [`StackPanel`] container tying the above together.
//! - [`debug`]: optional per-pass recording.
//!
//! ```ignore
//! use dockpanel_layout::{Child, Orientation, Size, StackPanel};
//!
//! let mut panel = StackPanel::new(Orientation::Horizontal);
//! let left = panel.add_child(Child::new())?;
//! let split = panel.add_splitter()?;
//! let right = panel.add_child(Child::new())?;
//!
//! let layout = panel.layout(Size::new(404.0, 300.0));
//! assert_eq!(layout.child_dimensions(), vec![200.0, 200.0]);
//!
//! panel.drag_splitter(split, 40.0)?;
//! let layout = panel.layout(Size::new(404.0, 300.0));
//! assert_eq!(layout.length(left), Some(240.0));
//! assert_eq!(layout.length(right), Some(160.0));
//! ```

pub mod assign;
pub mod bounds;
pub mod child;
pub mod config;
pub mod debug;
pub mod distribute;
pub mod panel;
pub mod proportion;
pub mod resize;
pub mod splitter;

pub use assign::{AssignOutcome, assign_proportions};
pub use bounds::{ConstraintCalculator, ProportionBounds};
pub use child::{Child, ChildId, ItemId, PanelItem, Splitter, SplitterId};
pub use config::{ConfigError, StackPanelConfig};
pub use debug::{LayoutDebugger, PassRecord};
pub use distribute::{DimensionDistributor, distribute, distribute_constrained};
pub use dockpanel_core::geometry::{Orientation, Rect, Size};
pub use panel::{ArrangedItem, PanelLayout, StackPanel, StackPanelError};
pub use proportion::{
    AxisConstraints, PROPORTION_TOLERANCE, SizeConstraints, dimension_to_proportion,
    is_valid_proportion, proportion_from_raw, proportion_to_raw,
};
pub use resize::{ResizeOutcome, SplitterDrag, resize_pair, resize_proportions};
pub use splitter::{reserved_splitters, reserved_thickness};
