//! In-memory inventory provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use super::{InventoryProvider, InventorySnapshot, InventoryStatus};
use crate::item::InventoryItem;

/// Inventory held in memory; loads complete immediately.
pub struct StaticInventory {
    snapshot: RwLock<InventorySnapshot>,
    load_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
}

impl StaticInventory {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self::from_snapshot(InventorySnapshot::ready(items))
    }

    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            load_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    /// Replace the items and mark the inventory ready
    pub fn set_items(&self, items: Vec<InventoryItem>) {
        let mut snapshot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *snapshot = InventorySnapshot::ready(items);
    }

    pub fn set_status(&self, status: InventoryStatus) {
        let mut snapshot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        snapshot.status = status;
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::Relaxed)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::Relaxed)
    }
}

impl InventoryProvider for StaticInventory {
    fn snapshot(&self) -> InventorySnapshot {
        self.snapshot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn load(&self) {
        self.load_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn force_refresh(&self) {
        self.refresh_calls.fetch_add(1, Ordering::Relaxed);
    }
}
