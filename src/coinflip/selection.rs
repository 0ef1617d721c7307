//! The user's in-progress choice of items.
//!
//! Indices point into the price-sorted inventory view and are kept in the
//! order they were picked. The set is small (bounded by the max item count),
//! so a plain `Vec` with linear lookups is enough.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an index. Returns false if it was already selected.
    pub fn select(&mut self, index: usize) -> bool {
        if self.is_selected(index) {
            return false;
        }
        self.indices.push(index);
        true
    }

    /// Remove an index. Returns false if it wasn't selected.
    pub fn unselect(&mut self, index: usize) -> bool {
        let before = self.indices.len();
        self.indices.retain(|&i| i != index);
        self.indices.len() != before
    }

    /// Flip membership; returns the new state
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.unselect(index) {
            false
        } else {
            self.select(index)
        }
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn selected_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices in pick order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Drop indices that no longer fit an inventory of `len` items.
    /// Returns how many were dropped.
    pub fn prune(&mut self, len: usize) -> usize {
        let before = self.indices.len();
        self.indices.retain(|&i| i < len);
        before - self.indices.len()
    }
}
