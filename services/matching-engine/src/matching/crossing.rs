//! Crossing detection logic
//!
//! Determines when a bid and an ask can trade based on price alone.

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and an ask cross at the given prices
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order's limit reaches a resting price
///
/// A buy reaches any resting price at or below its limit; a sell reaches any
/// resting price at or above its limit.
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Buy => incoming_price >= resting_price,
        Side::Sell => incoming_price <= resting_price,
    }
}
