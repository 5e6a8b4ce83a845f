//! Core identifiers, units, and enumerations (charter data models).
//!
//! Prices are signed integers in ticks; quantities are unsigned whole units.
//! No floating-point arithmetic ever touches a price.

use std::fmt;
use std::sync::OnceLock;
use std::time::Instant;

/// Unique order identifier, assigned by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trade identifier. Dense and strictly increasing within the life of a book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct TradeId(pub u64);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Price in ticks. Zero denotes "no price" in top-of-book reporting when a
/// side is empty.
pub type Price = i64;

/// Quantity in whole units.
pub type Quantity = u64;

/// Nanoseconds since an implementation-defined monotonic epoch. Used for
/// time priority only; not required to be wall-clock.
pub type TimestampNs = u64;

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order takes liquidity from.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type.
///
/// `Limit` and `Market` are matched. `Ioc` and `Fok` are limit-priced orders
/// with immediate-or-cancel / fill-or-kill semantics. `Stop` and `StopLimit`
/// are accepted but neither matched nor rested; triggering is out of scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OrderType {
    Limit,
    Market,
    Stop,
    StopLimit,
    Ioc,
    Fok,
}

/// Order lifecycle status.
///
/// Transitions: New -> PartiallyFilled -> Filled, and New/PartiallyFilled ->
/// Canceled. Filled is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
}

/// Nanoseconds on the process-local monotonic clock.
///
/// The epoch is the first call in the process. The matching core never reads
/// a clock; only top-of-book snapshots and feed-side order construction
/// sample this.
pub fn monotonic_now() -> TimestampNs {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = *EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as TimestampNs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_side() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn monotonic_now_is_nondecreasing() {
        let a = monotonic_now();
        let b = monotonic_now();
        assert!(b >= a);
    }
}
