//! Per-item records held by a stack panel.
//!
//! A [`Child`] carries the proportion bookkeeping the engines mutate; a
//! [`Splitter`] only carries a thickness. Both are addressed by stable,
//! non-zero identifiers so hosts can keep handles across insertions and
//! removals.

use serde::{Deserialize, Serialize};

use crate::StackPanelError;
use crate::proportion::{SizeConstraints, proportion_from_raw};

macro_rules! item_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Lowest valid id.
            pub const MIN: Self = Self(1);

            /// Create a new id, rejecting 0.
            pub fn new(raw: u64) -> Result<Self, StackPanelError> {
                if raw == 0 {
                    return Err(StackPanelError::ZeroId);
                }
                Ok(Self(raw))
            }

            /// Get the raw numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }
    };
}

item_id!(
    /// Stable identifier for a proportion-bearing child.
    ///
    /// `0` is reserved/invalid so IDs are always non-zero.
    ChildId
);

item_id!(
    /// Stable identifier for a splitter.
    SplitterId
);

/// Identifier of either kind of panel item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    Child(ChildId),
    Splitter(SplitterId),
}

impl From<ChildId> for ItemId {
    fn from(id: ChildId) -> Self {
        Self::Child(id)
    }
}

impl From<SplitterId> for ItemId {
    fn from(id: SplitterId) -> Self {
        Self::Splitter(id)
    }
}

/// A panel participating in proportional layout.
///
/// `proportion` is `None` until the first layout pass assigns one.
/// `collapsed_proportion` holds the value to restore when the child stops
/// being collapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub(crate) proportion: Option<f64>,
    pub(crate) collapsed_proportion: Option<f64>,
    pub(crate) collapsed: bool,
    pub constraints: SizeConstraints,
}

impl Child {
    /// A fresh, unassigned, unconstrained child.
    #[must_use]
    pub fn new() -> Self {
        Self {
            proportion: None,
            collapsed_proportion: None,
            collapsed: false,
            constraints: SizeConstraints::UNCONSTRAINED,
        }
    }

    /// Builder: start with a specific proportion (invalid values stay unset).
    #[must_use]
    pub fn with_proportion(mut self, proportion: f64) -> Self {
        self.set_proportion(proportion);
        self
    }

    /// Builder: set size bounds.
    #[must_use]
    pub fn with_constraints(mut self, constraints: SizeConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Builder: start collapsed.
    ///
    /// Without a proportion there is nothing to restore: the child commits
    /// 0 while collapsed and comes back at 0 when restored, until it is
    /// given one through [`with_proportion`](Self::with_proportion),
    /// `set_proportion`, or `StackPanel::reset_proportions`.
    #[must_use]
    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }

    /// The committed proportion, or `None` if not yet assigned.
    #[inline]
    #[must_use]
    pub fn proportion(&self) -> Option<f64> {
        self.proportion
    }

    /// The proportion this child contributes to layout: 0 while collapsed.
    #[inline]
    #[must_use]
    pub fn effective_proportion(&self) -> f64 {
        if self.collapsed {
            0.0
        } else {
            self.proportion.unwrap_or(0.0)
        }
    }

    /// The cached pre-collapse proportion.
    #[inline]
    #[must_use]
    pub fn collapsed_proportion(&self) -> Option<f64> {
        self.collapsed_proportion
    }

    #[inline]
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Collapse or restore. Takes effect on the next layout pass.
    #[inline]
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Write a proportion from outside the engines (host or persistence).
    ///
    /// The restore cache is written too so the next pass does not revert the
    /// value. An invalid input unsets both.
    pub fn set_proportion(&mut self, proportion: f64) {
        let value = proportion_from_raw(proportion);
        self.proportion = value;
        self.collapsed_proportion = value;
    }

    /// Forget the committed proportion and restore cache.
    pub fn clear_proportion(&mut self) {
        self.proportion = None;
        self.collapsed_proportion = None;
    }
}

impl Default for Child {
    fn default() -> Self {
        Self::new()
    }
}

/// A separator between two children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    pub thickness: f64,
}

impl Splitter {
    /// Create a splitter with the given thickness.
    #[must_use]
    pub const fn new(thickness: f64) -> Self {
        Self { thickness }
    }

    /// Thickness with NaN, infinite, and negative values read as 0.
    #[inline]
    #[must_use]
    pub fn effective_thickness(&self) -> f64 {
        if self.thickness.is_finite() && self.thickness > 0.0 {
            self.thickness
        } else {
            0.0
        }
    }
}

/// One entry in a panel's ordered item sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelItem {
    Child(Child),
    Splitter(Splitter),
}

impl PanelItem {
    #[inline]
    #[must_use]
    pub fn as_child(&self) -> Option<&Child> {
        match self {
            Self::Child(child) => Some(child),
            Self::Splitter(_) => None,
        }
    }

    #[inline]
    pub fn as_child_mut(&mut self) -> Option<&mut Child> {
        match self {
            Self::Child(child) => Some(child),
            Self::Splitter(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_splitter(&self) -> Option<&Splitter> {
        match self {
            Self::Splitter(splitter) => Some(splitter),
            Self::Child(_) => None,
        }
    }

    /// True for a child that is not collapsed.
    #[inline]
    #[must_use]
    pub fn is_active_child(&self) -> bool {
        matches!(self, Self::Child(child) if !child.collapsed)
    }
}

impl From<Child> for PanelItem {
    fn from(child: Child) -> Self {
        Self::Child(child)
    }
}

impl From<Splitter> for PanelItem {
    fn from(splitter: Splitter) -> Self {
        Self::Splitter(splitter)
    }
}
