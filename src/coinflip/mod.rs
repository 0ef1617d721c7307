pub mod range;
pub mod selection;
pub mod validator;
pub mod valuation;

pub use range::{resolve_range, BetRange, RangePolicy, ThresholdRange};
pub use selection::Selection;
pub use validator::{attempt_join, JoinRequest, ValidationError};
pub use valuation::{
    format_usd, inventory_total, percentage, round2, selected_items, selected_total,
    sorted_inventory, RankedItem,
};
