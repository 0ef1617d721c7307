//! Item selection and wager validation for joining a coinflip game.
//!
//! A joiner picks items from their inventory; the selection's total must fall
//! inside the bet range the game allows and its size inside the configured
//! item limits. [`dialog::JoinDialog`] ties the pieces together.

pub mod coinflip;
pub mod config;
pub mod dialog;
pub mod error;
pub mod game;
pub mod inventory;
pub mod item;
pub mod notify;

pub use config::AppConfig;
pub use dialog::{DialogView, JoinDialog, JoinError};
pub use game::{Game, GameProvider, Participant};
pub use inventory::{InventoryProvider, InventorySnapshot, InventoryStatus};
pub use item::InventoryItem;
