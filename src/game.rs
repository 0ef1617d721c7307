use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

// ============================================================================
// Game
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

/// A coinflip round as seen by a prospective joiner. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub creator: Participant,
    /// Empty until someone joins
    #[serde(default)]
    pub joiner: Option<Participant>,
    /// Items the creator put up
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

impl Game {
    /// Value already committed by the creator
    pub fn pot_total(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn is_open(&self) -> bool {
        self.joiner.is_none()
    }
}

/// Supplies the game the dialog is joining
pub trait GameProvider {
    fn game(&self) -> &Game;
}

impl GameProvider for Game {
    fn game(&self) -> &Game {
        self
    }
}
