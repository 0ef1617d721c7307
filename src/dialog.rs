//! Join Dialog
//!
//! Session state for one "join game" dialog. The dialog owns the user's
//! selection; inventory and game are borrowed snapshots passed in on each
//! call. Collaborators (range policy, notifications, the join action) are
//! injected at construction.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::coinflip::{
    attempt_join, format_usd, inventory_total, percentage, selected_items, selected_total,
    sorted_inventory, BetRange, JoinRequest, RangePolicy, Selection, ValidationError,
};
use crate::config::AppConfig;
use crate::game::GameProvider;
use crate::inventory::{InventoryProvider, InventorySnapshot, InventoryStatus};
use crate::notify::{JoinAction, NotificationSink};

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("dialog is closed")]
    Closed,

    #[error("inventory is {}", .0.as_str())]
    Unavailable(InventoryStatus),

    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

// ============================================================================
// View Model
// ============================================================================

/// One inventory tile, in sorted order
#[derive(Debug, Clone, Serialize)]
pub struct ItemTile {
    /// Position in the sorted view; what selection operations take
    pub index: usize,
    pub name: String,
    pub image_url: String,
    pub price: f64,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ItemsView {
    Loading,
    Error { message: String },
    Ready { tiles: Vec<ItemTile> },
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueSummary {
    pub bet_value: f64,
    pub items_selected: usize,
    pub max_items: usize,
    pub inventory_value: f64,
    pub range: BetRange,
    pub percentage: f64,
    pub bet_in_range: bool,
    pub items_in_range: bool,
}

impl ValueSummary {
    pub fn bet_value_display(&self) -> String {
        format_usd(self.bet_value)
    }

    pub fn items_display(&self) -> String {
        format!("{}/{}", self.items_selected, self.max_items)
    }

    pub fn inventory_value_display(&self) -> String {
        format_usd(self.inventory_value)
    }

    pub fn range_display(&self) -> String {
        format!("{} - {}", format_usd(self.range.low), format_usd(self.range.high))
    }

    pub fn percentage_display(&self) -> String {
        format!("{:.2}%", self.percentage)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DialogView {
    pub items: ItemsView,
    pub summary: ValueSummary,
}

// ============================================================================
// Dialog
// ============================================================================

pub struct JoinDialog<'a> {
    config: &'a AppConfig,
    range: &'a dyn RangePolicy,
    notifier: &'a dyn NotificationSink,
    join_action: &'a dyn JoinAction,
    selection: Selection,
    open: bool,
}

impl<'a> JoinDialog<'a> {
    pub fn new(
        config: &'a AppConfig,
        range: &'a dyn RangePolicy,
        notifier: &'a dyn NotificationSink,
        join_action: &'a dyn JoinAction,
    ) -> Self {
        Self {
            config,
            range,
            notifier,
            join_action,
            selection: Selection::new(),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Open with an empty selection and ask the provider to load
    pub fn open(&mut self, inventory: &dyn InventoryProvider) {
        self.selection.clear();
        self.open = true;
        inventory.load();
        debug!("Join dialog opened");
    }

    /// Close and discard the selection
    pub fn close(&mut self) {
        self.selection.clear();
        self.open = false;
        debug!("Join dialog closed");
    }

    /// Select the item at `index` of the sorted view.
    ///
    /// Ignored while closed, while the inventory isn't ready, for indices
    /// past the end, and for items under the price threshold.
    pub fn select(&mut self, inventory: &InventorySnapshot, index: usize) -> bool {
        if !self.open || !inventory.is_ready() {
            return false;
        }

        let sorted = sorted_inventory(&inventory.items);
        let Some(ranked) = sorted.get(index) else {
            warn!("Ignoring selection of index {} (inventory has {} items)", index, sorted.len());
            return false;
        };
        if !ranked.item.is_eligible(self.config.coinflip.item_threshold) {
            debug!("Item '{}' is below the item threshold", ranked.item.name);
            return false;
        }

        let added = self.selection.select(index);
        if added {
            debug!("Selected '{}' (${:.2})", ranked.item.name, ranked.item.price);
        }
        added
    }

    /// Allowed while a refresh is in flight; ignored once closed.
    pub fn unselect(&mut self, index: usize) -> bool {
        self.open && self.selection.unselect(index)
    }

    pub fn toggle(&mut self, inventory: &InventorySnapshot, index: usize) -> bool {
        if self.selection.is_selected(index) {
            self.unselect(index);
            false
        } else {
            self.select(inventory, index)
        }
    }

    /// Always empties the selection.
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn force_refresh(&self, inventory: &dyn InventoryProvider) {
        info!("Forcing inventory refresh");
        inventory.force_refresh();
    }

    /// Called once a refresh has completed. Indices that no longer fit the
    /// new inventory are dropped.
    pub fn inventory_refreshed(&mut self, inventory: &InventorySnapshot) {
        if !inventory.is_ready() {
            return;
        }
        let dropped = self.selection.prune(inventory.items.len());
        if dropped > 0 {
            debug!("Dropped {} stale selections after refresh", dropped);
        }
    }

    /// Compute everything the dialog displays. Performs no validation.
    pub fn view(&self, inventory: &InventorySnapshot, games: &dyn GameProvider) -> DialogView {
        let game = games.game();
        let coinflip = &self.config.coinflip;
        let range = self.range.resolve(game);

        let sorted = sorted_inventory(&inventory.items);
        // Stale indices count as unselected, same as in `join`
        let items_selected = selected_items(&sorted, &self.selection).len();
        let bet_value = selected_total(&sorted, &self.selection);

        let items = match inventory.status {
            InventoryStatus::Loading => ItemsView::Loading,
            InventoryStatus::Error => ItemsView::Error {
                message: format!(
                    "An error occurred loading your inventory. You may not have any tradeable {} items or Steam is offline.",
                    self.config.metadata.game_name
                ),
            },
            InventoryStatus::Ready => ItemsView::Ready {
                tiles: sorted
                    .iter()
                    .enumerate()
                    .map(|(index, ranked)| ItemTile {
                        index,
                        name: ranked.item.name.clone(),
                        image_url: ranked.item.image_url(&self.config.assets.image_base_url),
                        price: ranked.item.price,
                        selected: self.selection.is_selected(index),
                        disabled: !ranked.item.is_eligible(coinflip.item_threshold),
                    })
                    .collect(),
            },
        };

        DialogView {
            items,
            summary: ValueSummary {
                bet_value,
                items_selected,
                max_items: coinflip.max_items,
                inventory_value: inventory_total(&inventory.items),
                range,
                percentage: percentage(bet_value, game.pot_total()),
                bet_in_range: range.contains(bet_value),
                items_in_range: items_selected >= coinflip.min_items
                    && items_selected <= coinflip.max_items,
            },
        }
    }

    /// Validate the selection and submit it.
    ///
    /// Validation failures go to the notification sink and keep the
    /// selection. On success the join action is invoked, the selection is
    /// cleared and the dialog closes.
    pub fn join(
        &mut self,
        inventory: &InventorySnapshot,
        games: &dyn GameProvider,
    ) -> Result<JoinRequest, JoinError> {
        if !self.open {
            return Err(JoinError::Closed);
        }
        if !inventory.is_ready() {
            return Err(JoinError::Unavailable(inventory.status));
        }

        let game = games.game();
        let range = self.range.resolve(game);
        let sorted = sorted_inventory(&inventory.items);
        let items = selected_items(&sorted, &self.selection);

        let request = match attempt_join(game, &items, range, &self.config.coinflip) {
            Ok(request) => request,
            Err(e) => {
                warn!("Join of game {} rejected: {}", game.id, e);
                self.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        info!(
            "Joining game {} with {} items (${:.2})",
            game.id,
            request.items.len(),
            request.total
        );
        self.close();
        self.join_action.join(request.clone());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coinflip::ThresholdRange;
    use crate::config::CoinflipConfig;
    use crate::game::{Game, Participant};
    use crate::inventory::StaticInventory;
    use crate::item::InventoryItem;
    use crate::notify::{MockJoinAction, MockNotificationSink};

    fn config() -> AppConfig {
        AppConfig {
            coinflip: CoinflipConfig {
                min_items: 1,
                max_items: 2,
                min_amount: 5.0,
                item_threshold: 0.5,
                ..CoinflipConfig::default()
            },
            ..AppConfig::default()
        }
    }

    fn game(pot: f64) -> Game {
        Game {
            id: "g1".to_string(),
            creator: Participant {
                id: "c".to_string(),
                name: "creator".to_string(),
            },
            joiner: None,
            items: vec![InventoryItem::new("pot", "pot", pot)],
        }
    }

    fn wide_range(_: &Game) -> BetRange {
        BetRange { low: 5.0, high: 100.0 }
    }

    fn items() -> Vec<InventoryItem> {
        vec![
            InventoryItem::new("ten", "ten", 10.0),
            InventoryItem::new("twenty", "twenty", 20.0),
            InventoryItem::new("thirty", "thirty", 30.0),
            InventoryItem::new("penny", "penny", 0.01),
        ]
    }

    #[test]
    fn test_rejected_join_notifies_and_keeps_selection() {
        let config = config();
        let mut notifier = MockNotificationSink::new();
        notifier
            .expect_error()
            .withf(|message| message == "You must select between 1 and 2 items")
            .times(1)
            .return_const(());
        let mut join_action = MockJoinAction::new();
        join_action.expect_join().never();

        let snapshot = InventorySnapshot::ready(items());
        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&StaticInventory::new(items()));
        for i in 0..3 {
            assert!(dialog.select(&snapshot, i));
        }

        let err = dialog.join(&snapshot, &game(50.0)).unwrap_err();
        assert!(matches!(
            err,
            JoinError::Rejected(ValidationError::ItemCountOutOfRange { .. })
        ));
        assert!(dialog.is_open());
        assert_eq!(dialog.selection().selected_count(), 3);
    }

    #[test]
    fn test_successful_join_submits_and_closes() {
        let config = config();
        let mut notifier = MockNotificationSink::new();
        notifier.expect_error().never();
        let mut join_action = MockJoinAction::new();
        join_action
            .expect_join()
            .withf(|request| {
                request.game.id == "g1"
                    && request.items.len() == 2
                    && request.items[0].name == "ten"
                    && request.items[1].name == "thirty"
            })
            .times(1)
            .return_const(());

        let snapshot = InventorySnapshot::ready(items());
        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&StaticInventory::new(items()));
        // Sorted view: thirty, twenty, ten, penny
        dialog.select(&snapshot, 2);
        dialog.select(&snapshot, 0);

        let request = dialog.join(&snapshot, &game(50.0)).unwrap();
        assert_eq!(request.total, 40.0);
        assert!(!dialog.is_open());
        assert!(dialog.selection().is_empty());
    }

    #[test]
    fn test_no_validation_while_loading() {
        let config = config();
        let mut notifier = MockNotificationSink::new();
        notifier.expect_error().never();
        let mut join_action = MockJoinAction::new();
        join_action.expect_join().never();

        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&StaticInventory::from_snapshot(InventorySnapshot::loading()));

        let loading = InventorySnapshot::loading();
        assert!(!dialog.select(&loading, 0));
        assert!(matches!(
            dialog.join(&loading, &game(50.0)),
            Err(JoinError::Unavailable(InventoryStatus::Loading))
        ));
        assert!(matches!(
            dialog.join(&InventorySnapshot::error(), &game(50.0)),
            Err(JoinError::Unavailable(InventoryStatus::Error))
        ));
    }

    #[test]
    fn test_join_while_closed() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let join_action = MockJoinAction::new();
        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);

        let snapshot = InventorySnapshot::ready(items());
        assert!(!dialog.select(&snapshot, 0));
        assert!(matches!(dialog.join(&snapshot, &game(50.0)), Err(JoinError::Closed)));
    }

    #[test]
    fn test_open_requests_load() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let join_action = MockJoinAction::new();
        let inventory = StaticInventory::new(items());

        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&inventory);
        dialog.force_refresh(&inventory);

        assert_eq!(inventory.load_calls(), 1);
        assert_eq!(inventory.refresh_calls(), 1);
    }

    #[test]
    fn test_ineligible_and_out_of_range_selections_ignored() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let join_action = MockJoinAction::new();
        let snapshot = InventorySnapshot::ready(items());

        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&StaticInventory::new(items()));

        // penny sorts last and is under the 0.5 threshold
        assert!(!dialog.select(&snapshot, 3));
        assert!(!dialog.select(&snapshot, 42));
        assert!(dialog.selection().is_empty());
    }

    #[test]
    fn test_toggle_and_clear() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let join_action = MockJoinAction::new();
        let snapshot = InventorySnapshot::ready(items());

        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&StaticInventory::new(items()));

        assert!(dialog.toggle(&snapshot, 1));
        assert!(!dialog.toggle(&snapshot, 1));
        dialog.select(&snapshot, 0);
        dialog.select(&snapshot, 1);
        dialog.clear();
        assert_eq!(dialog.selection().selected_count(), 0);
        assert!(dialog.is_open());
    }

    #[test]
    fn test_refresh_prunes_stale_indices() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let join_action = MockJoinAction::new();
        let snapshot = InventorySnapshot::ready(items());

        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&StaticInventory::new(items()));
        dialog.select(&snapshot, 0);
        dialog.select(&snapshot, 2);

        // Still loading: nothing pruned yet, stale index excluded from totals
        let shorter = InventorySnapshot::ready(vec![InventoryItem::new("only", "only", 7.0)]);
        let view = dialog.view(&shorter, &game(50.0));
        assert_eq!(view.summary.bet_value, 7.0);
        dialog.inventory_refreshed(&InventorySnapshot::loading());
        assert_eq!(dialog.selection().selected_count(), 2);

        dialog.inventory_refreshed(&shorter);
        assert_eq!(dialog.selection().indices(), &[0]);
    }

    #[test]
    fn test_item_count_ignores_stale_indices() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let mut join_action = MockJoinAction::new();
        join_action
            .expect_join()
            .withf(|request| request.items.len() == 1)
            .times(1)
            .return_const(());
        let snapshot = InventorySnapshot::ready(items());

        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&StaticInventory::new(items()));
        for i in 0..3 {
            dialog.select(&snapshot, i);
        }

        let full = dialog.view(&snapshot, &game(50.0)).summary;
        assert_eq!(full.items_display(), "3/2");
        assert!(!full.items_in_range);

        // Inventory shrinks before the refresh is observed
        let shorter = InventorySnapshot::ready(vec![InventoryItem::new("only", "only", 7.0)]);
        let summary = dialog.view(&shorter, &game(50.0)).summary;
        assert_eq!(summary.items_selected, 1);
        assert_eq!(summary.items_display(), "1/2");
        assert!(summary.items_in_range);
        assert_eq!(summary.bet_value, 7.0);

        // The indicator and the join agree
        assert!(dialog.join(&shorter, &game(50.0)).is_ok());
    }

    #[test]
    fn test_unselect_and_clear_while_loading() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let join_action = MockJoinAction::new();
        let snapshot = InventorySnapshot::ready(items());

        let mut dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);
        dialog.open(&StaticInventory::new(items()));
        dialog.select(&snapshot, 0);
        dialog.select(&snapshot, 1);

        // A refresh is in flight: no new picks, but picks can still be dropped
        let loading = InventorySnapshot::loading();
        assert!(!dialog.select(&loading, 2));
        assert!(dialog.unselect(0));
        assert_eq!(dialog.selection().indices(), &[1]);
        dialog.clear();
        assert!(dialog.selection().is_empty());

        dialog.select(&snapshot, 1);
        dialog.close();
        assert!(!dialog.unselect(1));
    }

    #[test]
    fn test_view_ready() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let join_action = MockJoinAction::new();
        let snapshot = InventorySnapshot::ready(items());
        let policy = ThresholdRange::from_config(&config.coinflip);

        let mut dialog = JoinDialog::new(&config, &policy, &notifier, &join_action);
        dialog.open(&StaticInventory::new(items()));
        dialog.select(&snapshot, 1);
        dialog.select(&snapshot, 2);

        let view = dialog.view(&snapshot, &game(50.0));
        let ItemsView::Ready { tiles } = &view.items else {
            panic!("expected ready view");
        };
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].name, "thirty");
        assert!(tiles[1].selected && tiles[2].selected);
        assert!(tiles[3].disabled);
        assert!(tiles[0].image_url.ends_with("thirty"));

        let summary = &view.summary;
        assert_eq!(summary.bet_value_display(), "$30.00");
        assert_eq!(summary.items_display(), "2/2");
        assert_eq!(summary.inventory_value_display(), "$60.01");
        assert_eq!(summary.percentage_display(), "37.50%");
        assert_eq!(summary.range_display(), "$45.00 - $55.00");
        assert!(!summary.bet_in_range);
        assert!(summary.items_in_range);
    }

    #[test]
    fn test_view_error_mentions_game_name() {
        let config = config();
        let notifier = MockNotificationSink::new();
        let join_action = MockJoinAction::new();
        let dialog = JoinDialog::new(&config, &wide_range, &notifier, &join_action);

        let view = dialog.view(&InventorySnapshot::error(), &game(50.0));
        match view.items {
            ItemsView::Error { message } => assert!(message.contains("CS:GO")),
            other => panic!("unexpected view: {:?}", other),
        }
        assert_eq!(view.summary.bet_value, 0.0);
    }
}
