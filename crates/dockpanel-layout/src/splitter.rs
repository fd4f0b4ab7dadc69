//! Space reserved for visible splitters.
//!
//! A splitter only takes space when it actually separates two active
//! children: at least one non-collapsed child since the previous splitter,
//! and a non-collapsed child as the next non-splitter item. Splitters left
//! orphaned by collapsed neighbours, or stacked back to back, reserve
//! nothing.

use crate::child::PanelItem;

/// Which items are splitters that reserve their thickness.
///
/// The returned vector is parallel to `items`; non-splitter slots are
/// always `false`.
#[must_use]
pub fn reserved_splitters(items: &[PanelItem]) -> Vec<bool> {
    let mut reserved = vec![false; items.len()];
    let mut needs_next_splitter = false;

    for (index, item) in items.iter().enumerate() {
        match item {
            PanelItem::Splitter(_) => {
                let next_is_active = items[index + 1..]
                    .iter()
                    .find(|next| !matches!(next, PanelItem::Splitter(_)))
                    .is_some_and(PanelItem::is_active_child);
                reserved[index] = needs_next_splitter && next_is_active;
                needs_next_splitter = false;
            }
            PanelItem::Child(child) => {
                if !child.is_collapsed() {
                    needs_next_splitter = true;
                }
            }
        }
    }

    reserved
}

/// Total thickness reserved by splitters in `items`. Never NaN.
#[must_use]
pub fn reserved_thickness(items: &[PanelItem]) -> f64 {
    items
        .iter()
        .zip(reserved_splitters(items))
        .filter(|(_, reserved)| *reserved)
        .filter_map(|(item, _)| item.as_splitter())
        .map(|splitter| splitter.effective_thickness())
        .sum()
}
