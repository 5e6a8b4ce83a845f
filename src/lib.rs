//! # tickbook
//!
//! Per-symbol limit order book: a price-indexed two-sided ladder with
//! price-time priority matching, an order index for sub-linear cancel and
//! modify, and top-of-book / depth / order-flow-imbalance snapshots under a
//! readers-writer discipline.
//!
//! ## Entry point
//!
//! Use [`Book`] as the single entry point: create with [`Book::new`], then
//! [`Book::add`], [`Book::cancel`], and [`Book::modify`]. Register
//! callbacks with [`Book::register_trade_callback`] and
//! [`Book::register_update_callback`]; they fire after the write lock is
//! released.
//!
//! ## Example
//!
//! ```rust
//! use tickbook::{Book, Order, OrderId, OrderType, Side};
//!
//! let book = Book::new("AAPL");
//! book.add(Order::new(OrderId(1), "AAPL", 15_000, 100, Side::Sell, OrderType::Limit, 1)).unwrap();
//! let trades = book.add(Order::new(OrderId(2), "AAPL", 15_000, 50, Side::Buy, OrderType::Limit, 2)).unwrap();
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].price, 15_000);
//! assert_eq!(trades[0].maker_order_id, OrderId(1));
//!
//! let top = book.top_of_book();
//! assert_eq!((top.ask_price, top.ask_size), (15_000, 50));
//! ```
//!
//! ## Lower-level API
//!
//! [`OrderBook`] and [`match_order`] are the unsynchronized core; use them
//! directly only if you manage locking and trade ids yourself.

pub mod api;
pub mod book;
pub mod error;
pub mod execution;
pub mod feed;
pub mod market_data_gen;
pub mod matching;
pub mod order;
pub mod order_book;
pub mod types;

pub use book::{Book, BookUpdateCallback, TradeCallback};
pub use error::BookError;
pub use execution::Trade;
pub use feed::{MarketDataHandler, MarketDataMessage};
pub use matching::match_order;
pub use order::Order;
pub use order_book::{DepthLevel, Fill, OrderBook, PriceLevel, TopOfBook};
pub use types::{
    monotonic_now, OrderId, OrderStatus, OrderType, Price, Quantity, Side, TimestampNs, TradeId,
};
