//! Trade execution records emitted by the matcher.

use crate::types::{OrderId, Price, Quantity, TimestampNs, TradeId};

/// An immutable execution record.
///
/// `price` is always the resting (maker) price, which is how price
/// improvement is granted to the taker. `timestamp` is the taker's
/// timestamp. The book retains no copy after handing a trade to the
/// callback.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub symbol: String,
    pub price: Price,
    pub quantity: Quantity,
    /// The passive/resting order that provided liquidity.
    pub maker_order_id: OrderId,
    /// The aggressive/incoming order that took liquidity.
    pub taker_order_id: OrderId,
    pub timestamp: TimestampNs,
}

impl Trade {
    /// Traded value, `price * quantity`, widened so large books cannot
    /// overflow.
    pub fn notional(&self) -> i128 {
        self.price as i128 * self.quantity as i128
    }
}
