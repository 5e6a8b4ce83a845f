//! Thread-safe book façade.
//!
//! Writers (`add`, `cancel`, `modify`, `clear`) take the exclusive side of a
//! readers-writer lock; queries take the shared side and only ever observe
//! consistent states. Callbacks fire after the write lock is released, so a
//! callback may re-enter the book for reads without deadlocking; event data
//! is captured at the moment of emission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BookError;
use crate::execution::Trade;
use crate::matching::match_order;
use crate::order::Order;
use crate::order_book::{DepthLevel, OrderBook, TopOfBook};
use crate::types::{OrderId, Price, Quantity};

/// Callback invoked for every trade, in emission order.
pub type TradeCallback = Arc<dyn Fn(&Trade) + Send + Sync>;

/// Callback invoked with a top-of-book snapshot after each book mutation.
pub type BookUpdateCallback = Arc<dyn Fn(&TopOfBook) + Send + Sync>;

/// A limit order book for one symbol.
///
/// The single entry point for normal use: submit with [`Book::add`], change
/// resting orders with [`Book::cancel`] and [`Book::modify`], and query with
/// [`Book::top_of_book`], [`Book::depth`], and
/// [`Book::order_flow_imbalance`]. Trade ids are dense and strictly
/// increasing for the life of the book.
///
/// Callbacks must be non-blocking and must not re-enter this book's write
/// path; read re-entry is safe.
pub struct Book {
    symbol: String,
    core: RwLock<OrderBook>,
    next_trade_id: AtomicU64,
    trade_callback: Mutex<Option<TradeCallback>>,
    update_callback: Mutex<Option<BookUpdateCallback>>,
}

impl Book {
    /// Creates an empty book for the given symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            core: RwLock::new(OrderBook::new(symbol.clone())),
            symbol,
            next_trade_id: AtomicU64::new(1),
            trade_callback: Mutex::new(None),
            update_callback: Mutex::new(None),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Adds an order: runs matching and rests any limit residue.
    ///
    /// Returns the trades produced, in price-time order. Rejects a symbol
    /// mismatch, a zero quantity, or an id that is already resting. Trade
    /// callbacks fire once per trade and the book-update callback fires
    /// exactly once if the book changed, all after the write lock is
    /// released.
    pub fn add(&self, order: Order) -> Result<Vec<Trade>, BookError> {
        if order.symbol != self.symbol {
            return Err(BookError::SymbolMismatch {
                order: order.symbol,
                book: self.symbol.clone(),
            });
        }
        if order.quantity == 0 {
            return Err(BookError::ZeroQuantity);
        }

        let mut taker = order;
        let (trades, snapshot) = {
            let mut core = self.write();
            if core.contains(taker.id) {
                return Err(BookError::DuplicateOrderId(taker.id));
            }
            let trades = match_order(&mut core, &mut taker, &self.next_trade_id);
            let rested = taker.is_limit() && taker.remaining_quantity > 0;
            let mutated = !trades.is_empty() || rested;
            (trades, mutated.then(|| core.top_of_book()))
        };

        for trade in &trades {
            self.notify_trade(trade);
        }
        if let Some(top) = snapshot {
            self.notify_update(&top);
        }
        Ok(trades)
    }

    /// Cancels a resting order. Returns `false` if the id is unknown (which
    /// includes orders that already filled).
    pub fn cancel(&self, id: OrderId) -> bool {
        let snapshot = {
            let mut core = self.write();
            core.remove(id).map(|_| core.top_of_book())
        };
        match snapshot {
            Some(top) => {
                self.notify_update(&top);
                true
            }
            None => false,
        }
    }

    /// Replaces a resting order's price and quantity as cancel-then-add
    /// under one exclusive section.
    ///
    /// The replacement is re-submitted through the matcher and always loses
    /// time priority, even when the price is unchanged. Returns `false` only
    /// when the id is unknown; a replacement that immediately matches still
    /// returns `true`.
    pub fn modify(&self, id: OrderId, new_price: Price, new_quantity: Quantity) -> bool {
        let (trades, snapshot) = {
            let mut core = self.write();
            let Some(old) = core.remove(id) else {
                return false;
            };
            let mut replacement = Order::new(
                old.id,
                old.symbol,
                new_price,
                new_quantity,
                old.side,
                old.order_type,
                old.timestamp,
            );
            let trades = match_order(&mut core, &mut replacement, &self.next_trade_id);
            (trades, core.top_of_book())
        };

        for trade in &trades {
            self.notify_trade(trade);
        }
        self.notify_update(&snapshot);
        true
    }

    /// Empties both ladders and the order index, then fires one book-update
    /// callback.
    pub fn clear(&self) {
        let snapshot = {
            let mut core = self.write();
            core.clear();
            core.top_of_book()
        };
        self.notify_update(&snapshot);
    }

    /// Best bid and ask with aggregated sizes. Empty sides report price 0,
    /// size 0.
    pub fn top_of_book(&self) -> TopOfBook {
        self.read().top_of_book()
    }

    /// The first `levels` aggregated levels per side: bids descending, asks
    /// ascending.
    pub fn depth(&self, levels: usize) -> (Vec<DepthLevel>, Vec<DepthLevel>) {
        self.read().depth(levels)
    }

    /// Order-flow imbalance over the top `depth` levels, in [-1, +1].
    pub fn order_flow_imbalance(&self, depth: usize) -> f64 {
        self.read().order_flow_imbalance(depth)
    }

    /// Every resting order, bids then asks. Diagnostics, not hot path.
    pub fn all_orders(&self) -> Vec<Order> {
        self.read().all_orders()
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.read().order_count()
    }

    /// Registers the trade callback. A later registration replaces the
    /// earlier one.
    pub fn register_trade_callback(&self, callback: impl Fn(&Trade) + Send + Sync + 'static) {
        *self.trade_callback.lock().expect("callback lock") = Some(Arc::new(callback));
    }

    /// Registers the book-update callback. A later registration replaces the
    /// earlier one.
    pub fn register_update_callback(&self, callback: impl Fn(&TopOfBook) + Send + Sync + 'static) {
        *self.update_callback.lock().expect("callback lock") = Some(Arc::new(callback));
    }

    fn write(&self) -> RwLockWriteGuard<'_, OrderBook> {
        self.core.write().expect("book lock")
    }

    fn read(&self) -> RwLockReadGuard<'_, OrderBook> {
        self.core.read().expect("book lock")
    }

    fn notify_trade(&self, trade: &Trade) {
        let callback = self.trade_callback.lock().expect("callback lock").clone();
        if let Some(callback) = callback {
            callback(trade);
        }
    }

    fn notify_update(&self, top: &TopOfBook) {
        let callback = self.update_callback.lock().expect("callback lock").clone();
        if let Some(callback) = callback {
            callback(top);
        }
    }
}
