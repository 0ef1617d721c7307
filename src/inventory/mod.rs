//! Inventory Providers
//!
//! The dialog never loads inventory itself. It asks a provider to load or
//! refresh and reads back an immutable snapshot on every render pass.

pub mod file;
pub mod memory;

pub use file::FileInventoryProvider;
pub use memory::StaticInventory;

use std::sync::Arc;

use crate::item::InventoryItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryStatus {
    Loading,
    Error,
    Ready,
}

impl InventoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::Loading => "loading",
            InventoryStatus::Error => "error",
            InventoryStatus::Ready => "ready",
        }
    }
}

/// Point-in-time view of a provider's items
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    pub items: Arc<[InventoryItem]>,
    pub status: InventoryStatus,
}

impl InventorySnapshot {
    pub fn ready(items: Vec<InventoryItem>) -> Self {
        Self {
            items: items.into(),
            status: InventoryStatus::Ready,
        }
    }

    pub fn loading() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            status: InventoryStatus::Loading,
        }
    }

    pub fn error() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            status: InventoryStatus::Error,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == InventoryStatus::Ready
    }
}

/// Source of the user's tradeable items
pub trait InventoryProvider {
    fn snapshot(&self) -> InventorySnapshot;

    /// Load the inventory if it hasn't been loaded yet
    fn load(&self);

    /// Reload even if a copy is already cached
    fn force_refresh(&self);
}
