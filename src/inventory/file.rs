//! JSON-file backed inventory provider.
//!
//! Loads run on the tokio runtime; the dialog only ever observes the
//! published snapshot.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{error, info};

use super::{InventoryProvider, InventorySnapshot, InventoryStatus};
use crate::error::InventoryLoadError;
use crate::item::InventoryItem;

/// Read and parse an inventory file (a JSON array of items)
pub async fn load_items(path: &Path) -> Result<Vec<InventoryItem>, InventoryLoadError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| InventoryLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| InventoryLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub struct FileInventoryProvider {
    path: PathBuf,
    runtime: Handle,
    state: Arc<watch::Sender<InventorySnapshot>>,
    /// Bumped per request so an older load can't overwrite a newer one
    generation: Arc<AtomicU64>,
    /// Cleared again when a load fails so the next `load` retries
    requested: Arc<AtomicBool>,
}

impl FileInventoryProvider {
    pub fn new(path: impl Into<PathBuf>, runtime: Handle) -> Self {
        let (tx, _rx) = watch::channel(InventorySnapshot::loading());
        Self {
            path: path.into(),
            runtime,
            state: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Wait until the most recent load has finished, successfully or not.
    /// Returns the current snapshot right away if no load was ever requested.
    pub async fn settled(&self) -> InventorySnapshot {
        if self.generation.load(Ordering::SeqCst) == 0 {
            return self.snapshot();
        }

        let mut rx = self.state.subscribe();
        match rx
            .wait_for(|snapshot| snapshot.status != InventoryStatus::Loading)
            .await
        {
            Ok(snapshot) => snapshot.clone(),
            // Sender lives as long as self, so this only happens on teardown
            Err(_) => self.snapshot(),
        }
    }

    fn spawn_load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .send_modify(|snapshot| snapshot.status = InventoryStatus::Loading);

        let path = self.path.clone();
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let requested = Arc::clone(&self.requested);

        self.runtime.spawn(async move {
            let result = load_items(&path).await;

            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            match result {
                Ok(items) => {
                    info!("Loaded {} inventory items from {:?}", items.len(), path);
                    state.send_replace(InventorySnapshot::ready(items));
                }
                Err(e) => {
                    error!("Inventory load failed: {}", e);
                    requested.store(false, Ordering::SeqCst);
                    state.send_replace(InventorySnapshot::error());
                }
            }
        });
    }
}

impl InventoryProvider for FileInventoryProvider {
    fn snapshot(&self) -> InventorySnapshot {
        self.state.borrow().clone()
    }

    fn load(&self) {
        if self.requested.swap(true, Ordering::SeqCst) {
            return;
        }
        self.spawn_load();
    }

    fn force_refresh(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.spawn_load();
    }
}
