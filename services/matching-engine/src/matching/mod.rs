//! The cross-matching loop
//!
//! Runs after every accepted submission: while the best bid reaches the best
//! ask, the two front orders trade at min remaining quantity, in time order.
//! Each trade carries both legs' own limit prices, so callers can read price
//! improvement off a crossed pair.

pub mod crossing;

use types::ids::OrderId;
use types::numeric::Price;
use types::order::{OrderType, Side};
use types::trade::{Trade, TradeInfo, Trades};

use crate::book::Book;

impl Book {
    /// Consume crossing top-of-book level pairs until the book uncrosses or
    /// one side empties. `taker` is the order just admitted.
    pub(crate) fn match_orders(&mut self, taker: OrderId) -> Trades {
        let mut trades = Trades::new();
        loop {
            let (Some(bid_price), Some(ask_price)) =
                (self.bids.best_price(), self.asks.best_price())
            else {
                break;
            };
            if bid_price < ask_price {
                break;
            }
            self.consume_level_pair(bid_price, ask_price, &mut trades);
            // A FillAndKill taker left at the front of a best level has
            // taken what the pair had to give; the remainder dies here.
            self.sweep_front_fill_and_kill(Side::Buy, taker);
            self.sweep_front_fill_and_kill(Side::Sell, taker);
        }
        trades
    }

    /// Trade the two front queues against each other until one of the two
    /// levels empties (the levels stay crossed throughout, their prices are
    /// fixed).
    fn consume_level_pair(&mut self, bid_price: Price, ask_price: Price, trades: &mut Trades) {
        loop {
            let Book { bids, asks, orders } = self;
            let Some((_, bid_level)) = bids.best_level_mut() else {
                break;
            };
            let Some((_, ask_level)) = asks.best_level_mut() else {
                break;
            };
            let (Some(bid), Some(ask)) = (bid_level.front(), ask_level.front()) else {
                break;
            };

            let quantity = bid.remaining_quantity.min(ask.remaining_quantity);
            let bid_info = TradeInfo::new(bid.order_id, bid.price, quantity);
            let ask_info = TradeInfo::new(ask.order_id, ask.price, quantity);

            if let Some(filled) = bid_level.fill_front(quantity) {
                orders.remove(&filled.order_id);
            }
            if let Some(filled) = ask_level.fill_front(quantity) {
                orders.remove(&filled.order_id);
            }
            trades.push(Trade::new(bid_info, ask_info));

            let bid_level_done = bid_level.is_empty();
            let ask_level_done = ask_level.is_empty();
            if bid_level_done {
                bids.remove_level(bid_price);
            }
            if ask_level_done {
                asks.remove_level(ask_price);
            }
            if bid_level_done || ask_level_done {
                break;
            }
        }
    }

    fn sweep_front_fill_and_kill(&mut self, side: Side, taker: OrderId) {
        let front = match side {
            Side::Buy => self.bids.best_front(),
            Side::Sell => self.asks.best_front(),
        };
        let Some(front) = front else {
            return;
        };
        if front.order_type != OrderType::FillAndKill {
            return;
        }
        let order_id = front.order_id;
        debug_assert!(
            order_id == taker,
            "a FillAndKill order can only sit at a front as the just-admitted taker"
        );
        self.cancel_internal(order_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::numeric::Quantity;
    use types::order::Order;

    fn order(id: u64, side: Side, order_type: OrderType, price: i32, qty: u32) -> Order {
        Order::new(
            order_type,
            OrderId::new(id),
            side,
            Price::new(price),
            Quantity::new(qty),
        )
    }

    #[test]
    fn test_full_fill_at_one_price() {
        let mut book = Book::new();
        book.add_order(order(1, Side::Buy, OrderType::GoodTillCancel, 100, 10));
        let trades = book.add_order(order(2, Side::Sell, OrderType::GoodTillCancel, 100, 10));

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].bid.order_id, OrderId::new(1));
        assert_eq!(trades[0].ask.order_id, OrderId::new(2));
        assert_eq!(trades[0].quantity(), Quantity::new(10));
        assert_eq!(book.size(), 0);
    }

    #[test]
    fn test_time_priority_within_level() {
        let mut book = Book::new();
        book.add_order(order(1, Side::Buy, OrderType::GoodTillCancel, 100, 5));
        book.add_order(order(2, Side::Buy, OrderType::GoodTillCancel, 100, 5));
        let trades = book.add_order(order(3, Side::Sell, OrderType::GoodTillCancel, 100, 5));

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].bid.order_id, OrderId::new(1));
        assert_eq!(book.size(), 1);
    }

    #[test]
    fn test_taker_walks_levels_best_first() {
        let mut book = Book::new();
        book.add_order(order(1, Side::Sell, OrderType::GoodTillCancel, 100, 3));
        book.add_order(order(2, Side::Sell, OrderType::GoodTillCancel, 101, 4));
        let trades = book.add_order(order(3, Side::Buy, OrderType::GoodTillCancel, 101, 10));

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].ask.price, Price::new(100));
        assert_eq!(trades[0].quantity(), Quantity::new(3));
        assert_eq!(trades[1].ask.price, Price::new(101));
        assert_eq!(trades[1].quantity(), Quantity::new(4));
        // taker rests with the remainder
        assert_eq!(
            book.snapshot().bids,
            vec![(Price::new(101), Quantity::new(3))]
        );
    }

    #[test]
    fn test_per_leg_prices_show_improvement() {
        let mut book = Book::new();
        book.add_order(order(1, Side::Buy, OrderType::GoodTillCancel, 102, 5));
        let trades = book.add_order(order(2, Side::Sell, OrderType::GoodTillCancel, 100, 5));

        assert_eq!(trades[0].bid.price, Price::new(102));
        assert_eq!(trades[0].ask.price, Price::new(100));
    }

    #[test]
    fn test_resting_orders_never_cross() {
        let mut book = Book::new();
        book.add_order(order(1, Side::Buy, OrderType::GoodTillCancel, 99, 5));
        book.add_order(order(2, Side::Sell, OrderType::GoodTillCancel, 100, 5));

        assert_eq!(book.size(), 2);
        let snapshot = book.snapshot();
        assert_eq!(snapshot.bids, vec![(Price::new(99), Quantity::new(5))]);
        assert_eq!(snapshot.asks, vec![(Price::new(100), Quantity::new(5))]);
    }

    #[test]
    fn test_fill_and_kill_residual_cancelled_after_first_level() {
        let mut book = Book::new();
        book.add_order(order(1, Side::Sell, OrderType::GoodTillCancel, 100, 3));
        book.add_order(order(2, Side::Sell, OrderType::GoodTillCancel, 101, 4));
        let trades = book.add_order(order(3, Side::Buy, OrderType::FillAndKill, 101, 10));

        // the sweep cancels the remainder once the first opposing level is
        // consumed, even though level 101 was still within the limit
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity(), Quantity::new(3));
        assert_eq!(book.size(), 1);
        assert_eq!(
            book.snapshot().asks,
            vec![(Price::new(101), Quantity::new(4))]
        );
        assert!(book.snapshot().bids.is_empty());
    }

    #[test]
    fn test_market_order_crosses_every_level() {
        let mut book = Book::new();
        book.add_order(order(1, Side::Sell, OrderType::GoodTillCancel, 100, 3));
        book.add_order(order(2, Side::Sell, OrderType::GoodTillCancel, 101, 4));
        let trades = book.add_order(Order::market(
            OrderId::new(3),
            Side::Buy,
            Quantity::new(10),
        ));

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].quantity(), Quantity::new(3));
        assert_eq!(trades[1].quantity(), Quantity::new(4));
        // residual 3 lots cancelled, never rest
        assert_eq!(book.size(), 0);
        assert!(book.snapshot().bids.is_empty());
        assert!(book.snapshot().asks.is_empty());
    }

    #[test]
    fn test_market_order_empty_book_rejected() {
        let mut book = Book::new();
        let trades = book.add_order(Order::market(
            OrderId::new(1),
            Side::Sell,
            Quantity::new(5),
        ));

        assert!(trades.is_empty());
        assert_eq!(book.size(), 0);
    }
}
