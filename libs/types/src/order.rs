//! Order lifecycle types

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Time-in-force / execution kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Rests until explicitly cancelled
    GoodTillCancel,
    /// Rests until session close (16:00 local)
    GoodForDay,
    /// Immediate-or-cancel: execute what crosses, cancel the remainder
    FillAndKill,
    /// Execute the entire quantity immediately or reject
    FillOrKill,
    /// No limit price; crosses whatever liquidity exists, residual cancelled
    Market,
}

impl OrderType {
    /// Whether an order of this kind may remain in the book after its
    /// entry operation completes.
    pub fn rests(&self) -> bool {
        matches!(self, OrderType::GoodTillCancel | OrderType::GoodForDay)
    }
}

/// A single order
///
/// `remaining_quantity <= initial_quantity` always holds; the remaining
/// quantity only ever decreases after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_type: OrderType,
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub initial_quantity: Quantity,
    pub remaining_quantity: Quantity,
}

impl Order {
    pub fn new(
        order_type: OrderType,
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_type,
            order_id,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// A market order: the price is assigned by the engine at admission.
    pub fn market(order_id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self::new(OrderType::Market, order_id, side, Price::new(0), quantity)
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Execute `quantity` against this order.
    ///
    /// # Panics
    /// Panics if `quantity` exceeds the remaining quantity. That can only be
    /// caused by a matcher bug, never by external input.
    pub fn fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.remaining_quantity,
            "order {} cannot fill for more than the remaining quantity",
            self.order_id
        );
        self.remaining_quantity -= quantity;
    }
}

/// Cancel-then-new carrier for `ModifyOrder`
///
/// Carries the caller-supplied side, price and quantity; the replacement
/// order keeps the original's order type. Time priority is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModify {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderModify {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    /// Build the replacement order, preserving the original's kind.
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(
            order_type,
            self.order_id,
            self.side,
            self.price,
            self.quantity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gtc_buy(id: u64, price: i32, qty: u32) -> Order {
        Order::new(
            OrderType::GoodTillCancel,
            OrderId::new(id),
            Side::Buy,
            Price::new(price),
            Quantity::new(qty),
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_type_rests() {
        assert!(OrderType::GoodTillCancel.rests());
        assert!(OrderType::GoodForDay.rests());
        assert!(!OrderType::FillAndKill.rests());
        assert!(!OrderType::FillOrKill.rests());
        assert!(!OrderType::Market.rests());
    }

    #[test]
    fn test_order_creation() {
        let order = gtc_buy(1, 100, 10);
        assert_eq!(order.remaining_quantity, Quantity::new(10));
        assert_eq!(order.filled_quantity(), Quantity::zero());
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill() {
        let mut order = gtc_buy(1, 100, 10);

        order.fill(Quantity::new(4));
        assert_eq!(order.remaining_quantity, Quantity::new(6));
        assert_eq!(order.filled_quantity(), Quantity::new(4));
        assert!(!order.is_filled());

        order.fill(Quantity::new(6));
        assert!(order.is_filled());
        assert_eq!(order.filled_quantity(), order.initial_quantity);
    }

    #[test]
    #[should_panic(expected = "cannot fill for more than the remaining quantity")]
    fn test_order_overfill_panics() {
        let mut order = gtc_buy(1, 100, 10);
        order.fill(Quantity::new(11));
    }

    #[test]
    fn test_modify_preserves_order_type() {
        let modify = OrderModify::new(
            OrderId::new(1),
            Side::Sell,
            Price::new(105),
            Quantity::new(3),
        );
        let replacement = modify.to_order(OrderType::GoodForDay);

        assert_eq!(replacement.order_type, OrderType::GoodForDay);
        assert_eq!(replacement.side, Side::Sell);
        assert_eq!(replacement.price, Price::new(105));
        assert_eq!(replacement.initial_quantity, Quantity::new(3));
    }

    #[test]
    fn test_order_serialization() {
        let order = gtc_buy(9, 101, 5);
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, deserialized);
    }
}
