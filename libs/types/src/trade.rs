//! Trade execution types

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// One leg of a trade
///
/// The recorded price is the leg's own limit price, so a caller can read
/// price improvement off a crossed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

impl TradeInfo {
    pub fn new(order_id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            price,
            quantity,
        }
    }
}

/// A single match between a bid and an ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub bid: TradeInfo,
    pub ask: TradeInfo,
}

impl Trade {
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        Self { bid, ask }
    }

    /// Executed quantity; identical on both legs.
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

/// Trades produced by one submission
pub type Trades = Vec<Trade>;
