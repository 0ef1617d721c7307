//! Derived values: the sorted inventory view and the totals computed from it.
//!
//! Nothing here is stored. Everything is recomputed from the current
//! inventory snapshot and selection on each render.

use std::cmp::Ordering;

use super::selection::Selection;
use crate::item::InventoryItem;

/// An inventory item paired with its position in the unsorted list
#[derive(Debug, Clone, Copy)]
pub struct RankedItem<'a> {
    pub item: &'a InventoryItem,
    pub original_index: usize,
}

/// Price descending, ties kept in original order. Does not touch `items`.
pub fn sorted_inventory(items: &[InventoryItem]) -> Vec<RankedItem<'_>> {
    let mut ranked: Vec<RankedItem<'_>> = items
        .iter()
        .enumerate()
        .map(|(original_index, item)| RankedItem {
            item,
            original_index,
        })
        .collect();

    ranked.sort_by(|a, b| match b.item.price.total_cmp(&a.item.price) {
        Ordering::Equal => a.original_index.cmp(&b.original_index),
        other => other,
    });
    ranked
}

/// Resolve selected indices against the sorted view, in pick order.
/// Indices past the end are skipped.
pub fn selected_items<'a>(
    sorted: &[RankedItem<'a>],
    selection: &Selection,
) -> Vec<&'a InventoryItem> {
    selection
        .indices()
        .iter()
        .filter_map(|&index| sorted.get(index).map(|ranked| ranked.item))
        .collect()
}

pub fn selected_total(sorted: &[RankedItem<'_>], selection: &Selection) -> f64 {
    selected_items(sorted, selection)
        .iter()
        .map(|item| item.price)
        .sum()
}

pub fn inventory_total(items: &[InventoryItem]) -> f64 {
    items.iter().map(|item| item.price).sum()
}

/// Share of the combined pot the selection would represent, in percent.
/// An empty pot with nothing selected counts as 0%.
pub fn percentage(selected_total: f64, pot_total: f64) -> f64 {
    let combined = selected_total + pot_total;
    if combined <= 0.0 {
        return 0.0;
    }
    round2(selected_total / combined * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Dollar amount with two decimals, e.g. `$30.00`
pub fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}
