//! Market-data message union and the handler registry.
//!
//! Upstream feeds parse their wire format into [`MarketDataMessage`] values;
//! the [`MarketDataHandler`] routes each message to the correct book by
//! symbol. The transport itself (websocket, FIX, multicast) is a
//! collaborator and lives outside this crate.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::book::Book;
use crate::order::Order;
use crate::types::{monotonic_now, OrderId, OrderType, Price, Quantity, Side, TradeId};

/// One parsed upstream message. Every variant carries the symbol it applies
/// to. `Trade`, `Heartbeat`, and `Snapshot` are accepted but reserved.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketDataMessage {
    OrderAdd {
        symbol: String,
        id: OrderId,
        price: Price,
        quantity: Quantity,
        side: Side,
        order_type: OrderType,
    },
    OrderModify {
        symbol: String,
        id: OrderId,
        new_price: Price,
        new_quantity: Quantity,
    },
    OrderCancel {
        symbol: String,
        id: OrderId,
    },
    Trade {
        symbol: String,
        id: TradeId,
        price: Price,
        quantity: Quantity,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
    },
    Heartbeat {
        symbol: String,
    },
    Snapshot {
        symbol: String,
    },
}

impl MarketDataMessage {
    /// The symbol this message applies to.
    pub fn symbol(&self) -> &str {
        match self {
            MarketDataMessage::OrderAdd { symbol, .. }
            | MarketDataMessage::OrderModify { symbol, .. }
            | MarketDataMessage::OrderCancel { symbol, .. }
            | MarketDataMessage::Trade { symbol, .. }
            | MarketDataMessage::Heartbeat { symbol }
            | MarketDataMessage::Snapshot { symbol } => symbol,
        }
    }
}

/// Routes market-data messages to registered books, one book per symbol.
///
/// Unroutable or rejected messages are logged and dropped; the feed never
/// sees an error.
#[derive(Default)]
pub struct MarketDataHandler {
    books: RwLock<HashMap<String, Arc<Book>>>,
}

impl MarketDataHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a book under its own symbol, replacing any previous
    /// registration for that symbol.
    pub fn register_book(&self, book: Arc<Book>) {
        self.books
            .write()
            .expect("registry lock")
            .insert(book.symbol().to_owned(), book);
    }

    pub fn unregister_book(&self, symbol: &str) {
        self.books.write().expect("registry lock").remove(symbol);
    }

    /// The book registered for a symbol, if any.
    pub fn book(&self, symbol: &str) -> Option<Arc<Book>> {
        self.books.read().expect("registry lock").get(symbol).cloned()
    }

    /// Dispatches one message to its book.
    pub fn handle_message(&self, message: &MarketDataMessage) {
        let Some(book) = self.book(message.symbol()) else {
            log::warn!("no book registered for symbol {}", message.symbol());
            return;
        };
        match message {
            MarketDataMessage::OrderAdd {
                symbol,
                id,
                price,
                quantity,
                side,
                order_type,
            } => {
                let order = Order::new(
                    *id,
                    symbol.clone(),
                    *price,
                    *quantity,
                    *side,
                    *order_type,
                    monotonic_now(),
                );
                if let Err(err) = book.add(order) {
                    log::warn!("{symbol}: add of order {id} rejected: {err}");
                }
            }
            MarketDataMessage::OrderModify {
                symbol,
                id,
                new_price,
                new_quantity,
            } => {
                if !book.modify(*id, *new_price, *new_quantity) {
                    log::warn!("{symbol}: modify of unknown order {id}");
                }
            }
            MarketDataMessage::OrderCancel { symbol, id } => {
                if !book.cancel(*id) {
                    log::warn!("{symbol}: cancel of unknown order {id}");
                }
            }
            // Reserved for future use; the matcher does not act on these.
            MarketDataMessage::Trade { .. }
            | MarketDataMessage::Heartbeat { .. }
            | MarketDataMessage::Snapshot { .. } => {}
        }
    }
}
