//! Order value object: immutable descriptor plus mutable fill state.
//!
//! Orders are created by the caller and handed to the book by value; after a
//! partial fill the book owns the resting copy inside its price level.

use crate::error::BookError;
use crate::types::{OrderId, OrderStatus, OrderType, Price, Quantity, Side, TimestampNs};

/// A single order.
///
/// Invariants: `remaining_quantity <= quantity`, and `remaining_quantity == 0`
/// exactly when the status is terminal (Filled, Canceled, Expired).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub price: Price,
    pub quantity: Quantity,
    pub remaining_quantity: Quantity,
    pub side: Side,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub timestamp: TimestampNs,
}

impl Order {
    /// Creates a new order with full remaining quantity and status New.
    pub fn new(
        id: OrderId,
        symbol: impl Into<String>,
        price: Price,
        quantity: Quantity,
        side: Side,
        order_type: OrderType,
        timestamp: TimestampNs,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            price,
            quantity,
            remaining_quantity: quantity,
            side,
            order_type,
            status: OrderStatus::New,
            timestamp,
        }
    }

    pub fn is_limit(&self) -> bool {
        matches!(self.order_type, OrderType::Limit)
    }

    pub fn is_market(&self) -> bool {
        matches!(self.order_type, OrderType::Market)
    }

    /// True for the order types the matcher runs against the opposite side.
    pub fn is_marketable(&self) -> bool {
        matches!(
            self.order_type,
            OrderType::Limit | OrderType::Market | OrderType::Ioc | OrderType::Fok
        )
    }

    /// Decrements remaining quantity and advances the status to
    /// PartiallyFilled or Filled.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), BookError> {
        if quantity > self.remaining_quantity {
            return Err(BookError::Overfill {
                fill: quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        self.status = if self.remaining_quantity == 0 {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
        Ok(())
    }

    /// Cancels the order, zeroing its remaining quantity. Canceling an
    /// already-filled order is a no-op.
    pub fn cancel(&mut self) {
        if self.status != OrderStatus::Filled {
            self.status = OrderStatus::Canceled;
            self.remaining_quantity = 0;
        }
    }

    /// Price-time priority: whether this order outranks `other` on the same
    /// side. Buys rank by higher price, sells by lower; ties go to the
    /// earlier timestamp.
    pub fn outranks(&self, other: &Order) -> bool {
        debug_assert_eq!(self.side, other.side);
        if self.price != other.price {
            return match self.side {
                Side::Buy => self.price > other.price,
                Side::Sell => self.price < other.price,
            };
        }
        self.timestamp < other.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(price: Price, side: Side, timestamp: TimestampNs) -> Order {
        Order::new(OrderId(1), "AAPL", price, 100, side, OrderType::Limit, timestamp)
    }

    #[test]
    fn new_order_has_full_remaining_and_status_new() {
        let o = Order::new(OrderId(7), "AAPL", 15_000, 100, Side::Buy, OrderType::Limit, 1_000);
        assert_eq!(o.quantity, 100);
        assert_eq!(o.remaining_quantity, 100);
        assert_eq!(o.status, OrderStatus::New);
    }

    #[test]
    fn fill_partial_then_full() {
        let mut o = order(15_000, Side::Buy, 1);
        o.fill(50).unwrap();
        assert_eq!(o.remaining_quantity, 50);
        assert_eq!(o.status, OrderStatus::PartiallyFilled);
        o.fill(50).unwrap();
        assert_eq!(o.remaining_quantity, 0);
        assert_eq!(o.status, OrderStatus::Filled);
    }

    #[test]
    fn fill_beyond_remaining_is_rejected() {
        let mut o = order(15_000, Side::Buy, 1);
        o.fill(100).unwrap();
        let err = o.fill(1).unwrap_err();
        assert_eq!(err, BookError::Overfill { fill: 1, remaining: 0 });
    }

    #[test]
    fn cancel_zeroes_remaining() {
        let mut o = order(15_000, Side::Buy, 1);
        o.cancel();
        assert_eq!(o.status, OrderStatus::Canceled);
        assert_eq!(o.remaining_quantity, 0);
    }

    #[test]
    fn cancel_of_filled_order_is_noop() {
        let mut o = order(15_000, Side::Buy, 1);
        o.fill(100).unwrap();
        o.cancel();
        assert_eq!(o.status, OrderStatus::Filled);
    }

    #[test]
    fn buy_priority_prefers_higher_price_then_earlier_time() {
        let aggressive = order(15_010, Side::Buy, 2);
        let passive = order(15_000, Side::Buy, 1);
        assert!(aggressive.outranks(&passive));
        assert!(!passive.outranks(&aggressive));

        let early = order(15_000, Side::Buy, 1);
        let late = order(15_000, Side::Buy, 2);
        assert!(early.outranks(&late));
    }

    #[test]
    fn sell_priority_prefers_lower_price() {
        let aggressive = order(14_990, Side::Sell, 2);
        let passive = order(15_000, Side::Sell, 1);
        assert!(aggressive.outranks(&passive));
        assert!(!passive.outranks(&aggressive));
    }
}
