//! Bet range resolution.
//!
//! A joiner's total must land inside `[low, high]`. How the bounds scale
//! with the pot is a policy decision, so it sits behind [`RangePolicy`].

use serde::Serialize;

use crate::config::CoinflipConfig;
use crate::game::Game;

/// Inclusive bet bounds in dollars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetRange {
    pub low: f64,
    pub high: f64,
}

impl BetRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

pub trait RangePolicy {
    fn resolve(&self, game: &Game) -> BetRange;
}

/// Flat minimum for small pots, proportional bounds once the pot grows.
#[derive(Debug, Clone)]
pub struct ThresholdRange {
    pub min_amount: f64,
    pub scale_above: f64,
    pub lower_ratio: f64,
    pub upper_ratio: f64,
}

impl ThresholdRange {
    pub fn from_config(config: &CoinflipConfig) -> Self {
        Self {
            min_amount: config.min_amount,
            scale_above: config.range.scale_above,
            lower_ratio: config.range.lower_ratio,
            upper_ratio: config.range.upper_ratio,
        }
    }
}

impl RangePolicy for ThresholdRange {
    fn resolve(&self, game: &Game) -> BetRange {
        let pot = game.pot_total();

        let low = if pot > self.scale_above {
            self.min_amount.max(pot * self.lower_ratio)
        } else {
            self.min_amount
        };
        let high = (pot * self.upper_ratio).max(low);

        BetRange { low, high }
    }
}

impl<F> RangePolicy for F
where
    F: Fn(&Game) -> BetRange,
{
    fn resolve(&self, game: &Game) -> BetRange {
        self(game)
    }
}

pub fn resolve_range(policy: &dyn RangePolicy, game: &Game) -> BetRange {
    policy.resolve(game)
}
