//! Twin-sided order book and lifecycle operations
//!
//! `Book` is the single-writer core: both side books, the order index and
//! the lifecycle operations. It is not synchronized; `MatchingEngine` wraps
//! it behind the engine mutex.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;

use std::collections::HashMap;

use serde::Serialize;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderModify, OrderType, Side};
use types::trade::Trades;

use crate::matching::crossing;

/// Locator for a resting order
///
/// `(side, price)` names the carrier level; the id itself is the handle into
/// that level's queue. The order type is mirrored here so the day-order
/// reaper and modify can read it without touching the queues.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderEntry {
    pub side: Side,
    pub price: Price,
    pub order_type: OrderType,
}

/// Full-depth aggregated view of both sides, best price first
#[derive(Debug, Clone, Serialize)]
pub struct BookSnapshot {
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

/// Single-instrument limit order book
#[derive(Debug, Default)]
pub struct Book {
    pub(crate) bids: BidBook,
    pub(crate) asks: AskBook,
    pub(crate) orders: HashMap<OrderId, OrderEntry>,
}

impl Book {
    pub fn new() -> Self {
        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
            orders: HashMap::new(),
        }
    }

    /// Submit an order and run the matcher.
    ///
    /// Rejections are silent (empty trade list): a duplicate id, a
    /// FillAndKill with nothing to cross, a FillOrKill the opposing book
    /// cannot satisfy in full, or a market order against an empty book.
    pub fn add_order(&mut self, mut order: Order) -> Trades {
        if self.orders.contains_key(&order.order_id) {
            return Trades::new();
        }
        if order.order_type == OrderType::Market {
            // Price it through the whole opposing book; it can never rest,
            // so an empty opposing side means there is nothing to do.
            let worst = match order.side {
                Side::Buy => self.asks.worst_price(),
                Side::Sell => self.bids.worst_price(),
            };
            match worst {
                Some(price) => order.price = price,
                None => return Trades::new(),
            }
        }
        if order.order_type == OrderType::FillAndKill
            && !self.can_match(order.side, order.price)
        {
            return Trades::new();
        }
        if order.order_type == OrderType::FillOrKill
            && !self.can_fully_fill(order.side, order.price, order.initial_quantity)
        {
            return Trades::new();
        }

        let taker = order.order_id;
        let order_type = order.order_type;
        self.orders.insert(
            taker,
            OrderEntry {
                side: order.side,
                price: order.price,
                order_type,
            },
        );
        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }

        let trades = self.match_orders(taker);
        if order_type == OrderType::Market {
            // Residual market quantity is cancelled in the same critical
            // section; a market order is never observable resting.
            self.cancel_internal(taker);
        }
        self.debug_check_invariants();
        trades
    }

    /// Cancel a resting order. Unknown ids are a no-op; cancel is idempotent.
    pub fn cancel(&mut self, order_id: OrderId) {
        self.cancel_internal(order_id);
        self.debug_check_invariants();
    }

    pub(crate) fn cancel_internal(&mut self, order_id: OrderId) {
        let Some(entry) = self.orders.remove(&order_id) else {
            return;
        };
        let removed = match entry.side {
            Side::Buy => self.bids.remove(order_id, entry.price),
            Side::Sell => self.asks.remove(order_id, entry.price),
        };
        debug_assert!(
            removed.is_some(),
            "index entry for order {order_id} has no queued order"
        );
    }

    /// Cancel-then-new: the replacement keeps the original's order type and
    /// joins the back of its level queue. Unknown ids yield no trades.
    pub fn modify(&mut self, modify: OrderModify) -> Trades {
        let Some(entry) = self.orders.get(&modify.order_id) else {
            return Trades::new();
        };
        let order_type = entry.order_type;
        self.cancel_internal(modify.order_id);
        self.add_order(modify.to_order(order_type))
    }

    /// Number of resting orders across both sides
    pub fn size(&self) -> usize {
        self.orders.len()
    }

    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.bids.level_snapshot(),
            asks: self.asks.level_snapshot(),
        }
    }

    /// True iff the opposing book is non-empty and `price` crosses its best
    pub(crate) fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self
                .asks
                .best_price()
                .map_or(false, |best_ask| crossing::can_match(price, best_ask)),
            Side::Sell => self
                .bids
                .best_price()
                .map_or(false, |best_bid| crossing::can_match(best_bid, price)),
        }
    }

    /// FillOrKill admission: walk the opposing book from its best price and
    /// stop at the first level outside the taker's limit. Uses the per-level
    /// aggregates, so the check is O(depth) without touching any queue.
    pub(crate) fn can_fully_fill(&self, side: Side, price: Price, quantity: Quantity) -> bool {
        if !self.can_match(side, price) {
            return false;
        }
        let mut needed = quantity;
        match side {
            Side::Buy => {
                for (level_price, available) in self.asks.levels() {
                    if !crossing::incoming_can_match(side, price, level_price) {
                        break;
                    }
                    if needed <= available {
                        return true;
                    }
                    needed -= available;
                }
            }
            Side::Sell => {
                for (level_price, available) in self.bids.levels() {
                    if !crossing::incoming_can_match(side, price, level_price) {
                        break;
                    }
                    if needed <= available {
                        return true;
                    }
                    needed -= available;
                }
            }
        }
        false
    }

    /// Ids of resting GoodForDay orders, for the session-close sweep
    pub(crate) fn day_order_ids(&self) -> Vec<OrderId> {
        self.orders
            .iter()
            .filter(|(_, entry)| entry.order_type == OrderType::GoodForDay)
            .map(|(order_id, _)| *order_id)
            .collect()
    }

    /// Full structural walk, debug builds only: index and queues agree,
    /// aggregates match queue contents, no empty level, no filled order
    /// left behind, and the book is uncrossed.
    pub(crate) fn debug_check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        for (order_id, entry) in &self.orders {
            let order = match entry.side {
                Side::Buy => self.bids.get(*order_id, entry.price),
                Side::Sell => self.asks.get(*order_id, entry.price),
            };
            let order = order.unwrap_or_else(|| {
                panic!("order {order_id} indexed but not queued at {}", entry.price)
            });
            assert_eq!(order.side, entry.side);
            assert_eq!(order.price, entry.price);
            assert!(!order.remaining_quantity.is_zero());
        }

        let mut queued = 0;
        for (price, level) in self
            .bids
            .iter_levels()
            .chain(self.asks.iter_levels())
        {
            assert!(!level.is_empty(), "empty level left in book at {price}");
            let total: Quantity = level.iter().map(|o| o.remaining_quantity).sum();
            assert_eq!(level.total_quantity(), total);
            for order in level.iter() {
                assert!(self.orders.contains_key(&order.order_id));
            }
            queued += level.order_count();
        }
        assert_eq!(queued, self.orders.len());

        if let (Some(best_bid), Some(best_ask)) = (self.bids.best_price(), self.asks.best_price())
        {
            assert!(best_bid < best_ask, "book left crossed after operation");
        }
    }
}
