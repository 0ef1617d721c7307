//! Outbound collaborators of the join dialog.

use tracing::{info, warn};

use crate::coinflip::JoinRequest;

/// Where user-facing validation errors go
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    fn error(&self, message: &str);
}

/// Submits a validated join. The outcome is not reported back.
#[cfg_attr(test, mockall::automock)]
pub trait JoinAction {
    fn join(&self, request: JoinRequest);
}

/// Logs notifications instead of displaying them
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn error(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Logs join requests
#[derive(Debug, Default)]
pub struct TracingJoinAction;

impl JoinAction for TracingJoinAction {
    fn join(&self, request: JoinRequest) {
        info!(
            request_id = %request.id,
            game_id = %request.game.id,
            items = request.items.len(),
            "Join submitted for ${:.2}",
            request.total
        );
    }
}
