//! The stack panel container.
//!
//! [`StackPanel`] owns an ordered sequence of children and splitters and
//! runs the full pipeline on each [`layout`](StackPanel::layout) call:
//!
//! ```text
//! reserve splitters -> available extent -> assign proportions
//!     -> distribute dimensions -> arrange rects
//! ```
//!
//! Splitter drags go through [`StackPanel::begin_drag`] /
//! [`StackPanel::update_drag`] / [`StackPanel::commit_drag`] (or the one-shot
//! [`StackPanel::drag_splitter`]) and only touch the two flanking children.
//! Pixel geometry is re-derived by the next layout pass.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use dockpanel_core::geometry::{Orientation, Rect, Size};
use dockpanel_core::{debug, debug_span, trace};
use rustc_hash::FxHashMap;

use crate::assign::{AssignOutcome, assign_proportions};
use crate::bounds::ConstraintCalculator;
use crate::child::{Child, ChildId, ItemId, PanelItem, Splitter, SplitterId};
use crate::config::StackPanelConfig;
use crate::debug::{LayoutDebugger, PassRecord};
use crate::distribute::distribute_constrained;
use crate::proportion::{AxisConstraints, SizeConstraints, relevant_extent, size_constraints};
use crate::resize::{ProportionSnapshot, ResizeOutcome, SplitterDrag, resize_pair};
use crate::splitter::reserved_splitters;

/// Errors reported by the [`StackPanel`] API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackPanelError {
    /// An id of 0 was supplied.
    ZeroId,
    UnknownChild { id: ChildId },
    UnknownSplitter { id: SplitterId },
    /// The splitter has no non-collapsed child on one of its sides.
    NoActiveNeighbor { splitter: SplitterId },
    /// Every id has been handed out.
    IdOverflow,
}

impl fmt::Display for StackPanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroId => write!(f, "item id must be non-zero"),
            Self::UnknownChild { id } => write!(f, "child {} not found", id.get()),
            Self::UnknownSplitter { id } => write!(f, "splitter {} not found", id.get()),
            Self::NoActiveNeighbor { splitter } => write!(
                f,
                "splitter {} has no active child on one side",
                splitter.get()
            ),
            Self::IdOverflow => write!(f, "item id space exhausted"),
        }
    }
}

impl std::error::Error for StackPanelError {}

/// One item placed by a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrangedItem {
    pub id: ItemId,
    /// Start along the panel axis, relative to the panel bounds.
    pub offset: f64,
    /// Length along the panel axis.
    pub length: f64,
    pub rect: Rect,
}

/// Result of one [`StackPanel::layout`] pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub bounds: Rect,
    pub orientation: Orientation,
    /// Extent handed to children: axis extent minus reserved splitters.
    pub available: f64,
    pub reserved_thickness: f64,
    pub outcome: AssignOutcome,
    items: Vec<ArrangedItem>,
}

impl PanelLayout {
    /// Rectangle assigned to `id`, if it took part in the pass.
    #[must_use]
    pub fn rect(&self, id: impl Into<ItemId>) -> Option<Rect> {
        self.get(id).map(|item| item.rect)
    }

    /// Axis length assigned to `id`.
    #[must_use]
    pub fn length(&self, id: impl Into<ItemId>) -> Option<f64> {
        self.get(id).map(|item| item.length)
    }

    #[must_use]
    pub fn get(&self, id: impl Into<ItemId>) -> Option<&ArrangedItem> {
        let id = id.into();
        self.items.iter().find(|item| item.id == id)
    }

    /// Child lengths in item order.
    #[must_use]
    pub fn child_dimensions(&self) -> Vec<f64> {
        self.items
            .iter()
            .filter(|item| matches!(item.id, ItemId::Child(_)))
            .map(|item| item.length)
            .collect()
    }

    /// Axis extent covered by every item, splitters included.
    #[must_use]
    pub fn total_extent(&self) -> f64 {
        self.items.iter().map(|item| item.length).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArrangedItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a PanelLayout {
    type Item = &'a ArrangedItem;
    type IntoIter = std::slice::Iter<'a, ArrangedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An ordered run of children separated by splitters, sized proportionally
/// along one axis.
#[derive(Debug, Clone)]
pub struct StackPanel {
    orientation: Orientation,
    config: StackPanelConfig,
    label: String,
    ids: Vec<ItemId>,
    items: Vec<PanelItem>,
    index: FxHashMap<ItemId, usize>,
    /// Next raw id to hand out; 0 once the id space is exhausted.
    next_id: u64,
    last_size: Option<Size>,
    debugger: Option<Arc<LayoutDebugger>>,
}

impl Default for StackPanel {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl StackPanel {
    /// Create an empty panel with the default configuration.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self::with_config(orientation, StackPanelConfig::default())
    }

    /// Create an empty panel. Out-of-range config fields fall back to their
    /// defaults (see [`StackPanelConfig::validated`]).
    #[must_use]
    pub fn with_config(orientation: Orientation, config: StackPanelConfig) -> Self {
        Self {
            orientation,
            config: config.validated(),
            label: String::from("stack_panel"),
            ids: Vec::new(),
            items: Vec::new(),
            index: FxHashMap::default(),
            next_id: 1,
            last_size: None,
            debugger: None,
        }
    }

    /// Name used in debugger records.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &StackPanelConfig {
        &self.config
    }

    /// Replace the configuration, resetting out-of-range fields to defaults.
    pub fn set_config(&mut self, config: StackPanelConfig) {
        self.config = config.validated();
    }

    /// Record every layout pass into `debugger` (when it is enabled).
    pub fn attach_debugger(&mut self, debugger: Arc<LayoutDebugger>) {
        self.debugger = Some(debugger);
    }

    pub fn detach_debugger(&mut self) -> Option<Arc<LayoutDebugger>> {
        self.debugger.take()
    }

    /// Size handed to the most recent layout pass.
    #[inline]
    #[must_use]
    pub fn last_size(&self) -> Option<Size> {
        self.last_size
    }

    /// Number of items, splitters included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.items.iter().filter(|item| item.as_child().is_some()).count()
    }

    #[must_use]
    pub fn contains(&self, id: impl Into<ItemId>) -> bool {
        self.index.contains_key(&id.into())
    }

    /// Item ids in order.
    #[must_use]
    pub fn item_ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &PanelItem)> {
        self.ids.iter().copied().zip(self.items.iter())
    }

    pub fn children(&self) -> impl Iterator<Item = (ChildId, &Child)> {
        self.items().filter_map(|(id, item)| match (id, item) {
            (ItemId::Child(id), PanelItem::Child(child)) => Some((id, child)),
            _ => None,
        })
    }

    // ------------------------------------------------------------------
    // Sequence edits
    // ------------------------------------------------------------------

    /// Append a child.
    pub fn add_child(&mut self, child: Child) -> Result<ChildId, StackPanelError> {
        self.insert_child(self.items.len(), child)
    }

    /// Insert a child before position `index` (clamped to the item count).
    pub fn insert_child(&mut self, index: usize, child: Child) -> Result<ChildId, StackPanelError> {
        let id = ChildId::new(self.allocate_id()?)?;
        self.insert_item(index, id.into(), child.into());
        Ok(id)
    }

    /// Append a splitter with the configured default thickness.
    pub fn add_splitter(&mut self) -> Result<SplitterId, StackPanelError> {
        let splitter = Splitter::new(self.config.default_splitter_thickness);
        self.insert_splitter(self.items.len(), splitter)
    }

    /// Insert a splitter before position `index` (clamped to the item count).
    pub fn insert_splitter(
        &mut self,
        index: usize,
        splitter: Splitter,
    ) -> Result<SplitterId, StackPanelError> {
        let id = SplitterId::new(self.allocate_id()?)?;
        self.insert_item(index, id.into(), splitter.into());
        Ok(id)
    }

    /// Remove a child or splitter, returning it.
    ///
    /// Siblings keep their proportions; the next layout pass renormalizes.
    pub fn remove(&mut self, id: impl Into<ItemId>) -> Result<PanelItem, StackPanelError> {
        let id = id.into();
        let slot = self.index.remove(&id).ok_or_else(|| unknown(id))?;
        self.ids.remove(slot);
        let item = self.items.remove(slot);
        self.reindex_from(slot);
        Ok(item)
    }

    fn allocate_id(&mut self) -> Result<u64, StackPanelError> {
        let raw = self.next_id;
        if raw == 0 {
            return Err(StackPanelError::IdOverflow);
        }
        self.next_id = raw.wrapping_add(1);
        Ok(raw)
    }

    fn insert_item(&mut self, index: usize, id: ItemId, item: PanelItem) {
        let slot = index.min(self.items.len());
        self.ids.insert(slot, id);
        self.items.insert(slot, item);
        self.reindex_from(slot);
    }

    fn reindex_from(&mut self, slot: usize) {
        for (i, id) in self.ids.iter().enumerate().skip(slot) {
            self.index.insert(*id, i);
        }
    }

    // ------------------------------------------------------------------
    // Child access
    // ------------------------------------------------------------------

    #[must_use]
    pub fn child(&self, id: ChildId) -> Option<&Child> {
        let slot = *self.index.get(&ItemId::Child(id))?;
        self.items.get(slot)?.as_child()
    }

    pub fn child_mut(&mut self, id: ChildId) -> Option<&mut Child> {
        let slot = *self.index.get(&ItemId::Child(id))?;
        self.items.get_mut(slot)?.as_child_mut()
    }

    fn require_child(&mut self, id: ChildId) -> Result<&mut Child, StackPanelError> {
        self.child_mut(id)
            .ok_or(StackPanelError::UnknownChild { id })
    }

    #[must_use]
    pub fn splitter(&self, id: SplitterId) -> Option<&Splitter> {
        let slot = *self.index.get(&ItemId::Splitter(id))?;
        self.items.get(slot)?.as_splitter()
    }

    pub fn set_splitter_thickness(
        &mut self,
        id: SplitterId,
        thickness: f64,
    ) -> Result<(), StackPanelError> {
        let slot = self.splitter_slot(id)?;
        self.items[slot] = Splitter::new(thickness).into();
        Ok(())
    }

    /// Collapse or restore a child. Takes effect on the next layout pass.
    pub fn set_collapsed(&mut self, id: ChildId, collapsed: bool) -> Result<(), StackPanelError> {
        self.require_child(id)?.set_collapsed(collapsed);
        Ok(())
    }

    /// Flip a child's collapsed state, returning the new state.
    pub fn toggle_collapsed(&mut self, id: ChildId) -> Result<bool, StackPanelError> {
        let child = self.require_child(id)?;
        let collapsed = !child.is_collapsed();
        child.set_collapsed(collapsed);
        Ok(collapsed)
    }

    /// Write a proportion from the host (for example a restored layout).
    ///
    /// NaN or negative values unset the child so the next pass assigns it.
    pub fn set_proportion(&mut self, id: ChildId, proportion: f64) -> Result<(), StackPanelError> {
        self.require_child(id)?.set_proportion(proportion);
        Ok(())
    }

    /// Committed proportion of a child; `None` until the first pass.
    pub fn proportion(&self, id: ChildId) -> Result<Option<f64>, StackPanelError> {
        self.child(id)
            .map(Child::proportion)
            .ok_or(StackPanelError::UnknownChild { id })
    }

    /// Unset every proportion so the next pass divides space equally.
    pub fn reset_proportions(&mut self) {
        for child in self.items.iter_mut().filter_map(PanelItem::as_child_mut) {
            child.clear_proportion();
        }
    }

    pub fn set_size_constraints(
        &mut self,
        id: ChildId,
        constraints: SizeConstraints,
    ) -> Result<(), StackPanelError> {
        self.require_child(id)?.constraints = constraints;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Space currently reserved for splitters.
    #[must_use]
    pub fn reserved_thickness(&self) -> f64 {
        crate::splitter::reserved_thickness(&self.items)
    }

    /// Child extent for `size`: the axis extent minus reserved splitters,
    /// never negative.
    #[must_use]
    pub fn available_extent(&self, size: Size) -> f64 {
        let extent = relevant_extent(size, self.orientation);
        (extent - self.reserved_thickness()).max(0.0)
    }

    /// Lay the panel out at the origin.
    pub fn layout(&mut self, size: Size) -> PanelLayout {
        self.layout_in(Rect::from_size(size))
    }

    /// Assign proportions and place every item inside `bounds`.
    pub fn layout_in(&mut self, bounds: Rect) -> PanelLayout {
        let _span = debug_span!(
            "stack_panel_layout",
            orientation = ?self.orientation,
            items = self.items.len()
        )
        .entered();
        let started = self
            .debugger
            .as_ref()
            .filter(|d| d.enabled())
            .map(|_| Instant::now());

        let size = bounds.size();
        self.last_size = Some(size);

        let reserved = reserved_splitters(&self.items);
        let reserved_thickness: f64 = self
            .items
            .iter()
            .zip(&reserved)
            .filter(|(_, reserved)| **reserved)
            .filter_map(|(item, _)| item.as_splitter())
            .map(Splitter::effective_thickness)
            .sum();
        let available =
            (relevant_extent(size, self.orientation) - reserved_thickness).max(0.0);

        let calculator = ConstraintCalculator::new(
            self.orientation,
            available,
            self.config.min_proportion_floor,
        );
        let outcome = assign_proportions(
            self.items.iter_mut().filter_map(PanelItem::as_child_mut),
            &calculator,
        );
        trace!(
            active = outcome.active,
            collapsed = outcome.collapsed,
            unassigned = outcome.unassigned,
            normalization = ?outcome.normalization,
            clamped = outcome.clamped,
            "proportions assigned"
        );
        if outcome.active > 0 && !outcome.is_normalized() {
            debug!(
                committed_sum = outcome.committed_sum,
                "size constraints cannot all be met"
            );
        }

        let orientation = self.orientation;
        let dimensions = distribute_constrained(
            available,
            self.items.iter().filter_map(PanelItem::as_child).map(|child| {
                let axis = if child.is_collapsed() {
                    AxisConstraints::UNCONSTRAINED
                } else {
                    size_constraints(&child.constraints, orientation)
                };
                (child.effective_proportion(), axis)
            }),
        );

        let mut arranged = Vec::with_capacity(self.items.len());
        let mut offset = 0.0;
        let mut child_dims = dimensions.iter().copied();
        for ((id, item), reserved) in self.ids.iter().zip(&self.items).zip(&reserved) {
            let length = match item {
                PanelItem::Child(_) => child_dims.next().unwrap_or(0.0),
                PanelItem::Splitter(splitter) if *reserved => splitter.effective_thickness(),
                PanelItem::Splitter(_) => 0.0,
            };
            arranged.push(ArrangedItem {
                id: *id,
                offset,
                length,
                rect: Rect::from_segment(bounds, orientation, offset, length),
            });
            offset += length;
        }

        if let Some(debugger) = self.debugger.as_ref().filter(|d| d.enabled()) {
            debugger.record(PassRecord {
                name: self.label.clone(),
                orientation,
                size,
                reserved_thickness,
                available,
                proportions: self
                    .items
                    .iter()
                    .filter_map(PanelItem::as_child)
                    .map(Child::effective_proportion)
                    .collect(),
                dimensions,
                outcome,
                solve_time: started.map(|t| t.elapsed()),
            });
        }

        PanelLayout {
            bounds,
            orientation,
            available,
            reserved_thickness,
            outcome,
            items: arranged,
        }
    }

    // ------------------------------------------------------------------
    // Splitter drag
    // ------------------------------------------------------------------

    /// Start dragging `id`. The drag acts on the nearest non-collapsed child
    /// on each side of the splitter.
    pub fn begin_drag(&self, id: SplitterId) -> Result<SplitterDrag, StackPanelError> {
        let slot = self.splitter_slot(id)?;
        let no_neighbor = StackPanelError::NoActiveNeighbor { splitter: id };

        let before = (0..slot)
            .rev()
            .find(|&i| self.items[i].is_active_child())
            .ok_or(no_neighbor)?;
        let after = (slot + 1..self.items.len())
            .find(|&i| self.items[i].is_active_child())
            .ok_or(no_neighbor)?;

        let (ItemId::Child(target), ItemId::Child(neighbor)) = (self.ids[before], self.ids[after])
        else {
            return Err(no_neighbor);
        };
        let (Some(target_child), Some(neighbor_child)) =
            (self.items[before].as_child(), self.items[after].as_child())
        else {
            return Err(no_neighbor);
        };

        Ok(SplitterDrag {
            splitter: id,
            target,
            neighbor,
            target_origin: ProportionSnapshot::capture(target_child),
            neighbor_origin: ProportionSnapshot::capture(neighbor_child),
            cumulative: 0.0,
            last: None,
        })
    }

    /// Apply the total pointer movement since `begin_drag`.
    ///
    /// Positive deltas grow the child before the splitter. Pixel deltas are
    /// converted against the extent of the most recent layout pass; before
    /// any pass the drag cannot move anything.
    pub fn update_drag(
        &mut self,
        drag: &mut SplitterDrag,
        cumulative_delta: f64,
    ) -> Result<ResizeOutcome, StackPanelError> {
        let calculator = ConstraintCalculator::new(
            self.orientation,
            self.last_size
                .map_or(0.0, |size| self.available_extent(size)),
            self.config.min_proportion_floor,
        );
        let (target, neighbor) = self.child_pair_mut(drag.target, drag.neighbor)?;
        drag.target_origin.restore(target);
        drag.neighbor_origin.restore(neighbor);

        let outcome = resize_pair(target, neighbor, cumulative_delta, &calculator);
        drag.cumulative = cumulative_delta;
        drag.last = Some(outcome);
        Ok(outcome)
    }

    /// Abandon a drag, restoring both children to their state at `begin_drag`.
    pub fn cancel_drag(&mut self, drag: SplitterDrag) -> Result<(), StackPanelError> {
        let (target, neighbor) = self.child_pair_mut(drag.target, drag.neighbor)?;
        drag.target_origin.restore(target);
        drag.neighbor_origin.restore(neighbor);
        Ok(())
    }

    /// Finish a drag, keeping the latest update.
    pub fn commit_drag(&self, drag: SplitterDrag) -> Option<ResizeOutcome> {
        if let Some(outcome) = drag.last {
            debug!(
                splitter = drag.splitter.get(),
                delta = drag.cumulative,
                target = outcome.target,
                neighbor = outcome.neighbor,
                limited = outcome.limited,
                "splitter drag committed"
            );
        }
        drag.last
    }

    /// Drag `id` by `delta` along the panel axis in one step.
    pub fn drag_splitter(
        &mut self,
        id: SplitterId,
        delta: f64,
    ) -> Result<ResizeOutcome, StackPanelError> {
        let mut drag = self.begin_drag(id)?;
        let outcome = self.update_drag(&mut drag, delta)?;
        self.commit_drag(drag);
        Ok(outcome)
    }

    fn splitter_slot(&self, id: SplitterId) -> Result<usize, StackPanelError> {
        self.index
            .get(&ItemId::Splitter(id))
            .copied()
            .ok_or(StackPanelError::UnknownSplitter { id })
    }

    fn child_pair_mut(
        &mut self,
        a: ChildId,
        b: ChildId,
    ) -> Result<(&mut Child, &mut Child), StackPanelError> {
        let slot = |id: ChildId| {
            self.index
                .get(&ItemId::Child(id))
                .copied()
                .ok_or(StackPanelError::UnknownChild { id })
        };
        let (ia, ib) = (slot(a)?, slot(b)?);
        if ia == ib {
            return Err(StackPanelError::UnknownChild { id: b });
        }

        let (low, high) = (ia.min(ib), ia.max(ib));
        let (head, tail) = self.items.split_at_mut(high);
        match (head[low].as_child_mut(), tail[0].as_child_mut()) {
            (Some(first), Some(second)) if ia < ib => Ok((first, second)),
            (Some(first), Some(second)) => Ok((second, first)),
            _ => Err(StackPanelError::UnknownChild { id: a }),
        }
    }
}

fn unknown(id: ItemId) -> StackPanelError {
    match id {
        ItemId::Child(id) => StackPanelError::UnknownChild { id },
        ItemId::Splitter(id) => StackPanelError::UnknownSplitter { id },
    }
}
