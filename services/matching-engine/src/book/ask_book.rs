//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Ask (sell) side order book
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
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

    /// Lowest ask price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Highest ask price
    pub fn worst_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    pub(crate) fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next()
            .map(|(price, level)| (*price, level))
    }

    /// Order with time priority at the best ask
    pub(crate) fn best_front(&self) -> Option<&Order> {
        self.levels.values().next().and_then(|level| level.front())
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

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::{OrderType, Side};

    fn ask(id: u64, price: i32, qty: u32) -> Order {
        Order::new(
            OrderType::GoodTillCancel,
            OrderId::new(id),
            Side::Sell,
            Price::new(price),
            Quantity::new(qty),
        )
    }

    #[test]
    fn test_best_is_lowest() {
        let mut book = AskBook::new();
        book.insert(ask(1, 100, 1));
        book.insert(ask(2, 98, 2));
        book.insert(ask(3, 103, 3));

        assert_eq!(book.best_price(), Some(Price::new(98)));
        assert_eq!(book.worst_price(), Some(Price::new(103)));
        assert_eq!(book.best_front().unwrap().order_id, OrderId::new(2));
    }

    #[test]
    fn test_levels_best_first() {
        let mut book = AskBook::new();
        book.insert(ask(1, 100, 3));
        book.insert(ask(2, 101, 4));

        let snapshot = book.level_snapshot();
        assert_eq!(
            snapshot,
            vec![
                (Price::new(100), Quantity::new(3)),
                (Price::new(101), Quantity::new(4)),
            ]
        );
    }

    #[test]
    fn test_remove_drops_empty_level() {
        let mut book = AskBook::new();
        book.insert(ask(1, 100, 1));
        book.insert(ask(2, 100, 2));

        assert!(book.remove(OrderId::new(1), Price::new(100)).is_some());
        assert_eq!(book.level_count(), 1);
        assert!(book.remove(OrderId::new(2), Price::new(100)).is_some());
        assert!(book.is_empty());
    }
}
