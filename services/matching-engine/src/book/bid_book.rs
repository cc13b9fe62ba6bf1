//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! BTreeMap keys ascend, so the best bid is the last entry.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Bid (buy) side order book
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Append an order to its price level, creating the level if absent
    pub fn insert(&mut self, order: Order) {
        self.levels
            .entry(order.price)
            .or_default()
            .insert_back(order);
    }

    /// Remove an order; drops the level if it empties
    pub fn remove(&mut self, order_id: OrderId, price: Price) -> Option<Order> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(order_id);
        if removed.is_some() && level.is_empty() {
            self.levels.remove(&price);
        }
        removed
    }

    /// Highest bid price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Lowest bid price
    pub fn worst_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    pub(crate) fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next_back()
            .map(|(price, level)| (*price, level))
    }

    /// Order with time priority at the best bid
    pub(crate) fn best_front(&self) -> Option<&Order> {
        self.levels
            .values()
            .next_back()
            .and_then(|level| level.front())
    }

    /// Drop a level wholesale once the matcher has emptied it
    pub(crate) fn remove_level(&mut self, price: Price) {
        self.levels.remove(&price);
    }

    pub(crate) fn get(&self, order_id: OrderId, price: Price) -> Option<&Order> {
        self.levels
            .get(&price)?
            .iter()
            .find(|order| order.order_id == order_id)
    }

    /// Levels best-first as (price, aggregate remaining quantity)
    pub fn levels(&self) -> impl Iterator<Item = (Price, Quantity)> + '_ {
        self.levels
            .iter()
            .rev()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    pub fn level_snapshot(&self) -> Vec<(Price, Quantity)> {
        self.levels().collect()
    }

    pub(crate) fn iter_levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
