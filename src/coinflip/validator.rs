//! Join validation.
//!
//! Checks run in a fixed order and the first failure wins:
//! bet too low, item count, bet too high, game already taken.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::range::BetRange;
use crate::config::CoinflipConfig;
use crate::game::Game;
use crate::item::InventoryItem;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Bet must be at least ${min:.2}")]
    BetTooLow { min: f64 },

    #[error("You must select between {min} and {max} items")]
    ItemCountOutOfRange { min: usize, max: usize },

    #[error("Bet must be less than ${max:.2}")]
    BetTooHigh { max: f64 },

    #[error("Game is not open")]
    GameNotOpen,
}

/// Handed to the join action once a selection passes validation
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequest {
    pub id: Uuid,
    pub game: Game,
    pub items: Vec<InventoryItem>,
    pub total: f64,
    pub requested_at: DateTime<Utc>,
}

/// Validate a resolved selection against the game and limits.
///
/// `items` are the selected inventory items in pick order; totals are
/// compared unrounded.
pub fn attempt_join(
    game: &Game,
    items: &[&InventoryItem],
    range: BetRange,
    config: &CoinflipConfig,
) -> Result<JoinRequest, ValidationError> {
    let total: f64 = items.iter().map(|item| item.price).sum();
    let count = items.len();

    if total < range.low {
        return Err(ValidationError::BetTooLow { min: range.low });
    }
    if count < config.min_items || count > config.max_items {
        return Err(ValidationError::ItemCountOutOfRange {
            min: config.min_items,
            max: config.max_items,
        });
    }
    if total > range.high {
        return Err(ValidationError::BetTooHigh { max: range.high });
    }
    if !game.is_open() {
        return Err(ValidationError::GameNotOpen);
    }

    Ok(JoinRequest {
        id: Uuid::new_v4(),
        game: game.clone(),
        items: items.iter().map(|&item| item.clone()).collect(),
        total,
        requested_at: Utc::now(),
    })
}
