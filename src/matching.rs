//! Price-time priority matching.
//!
//! [`match_order`] runs one incoming order against the book: walks the
//! opposite ladder best price first, FIFO within each level, emits trades at
//! the resting (maker) price, and rests any limit residue.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::execution::Trade;
use crate::order::Order;
use crate::order_book::OrderBook;
use crate::types::{OrderType, Side, TradeId};

/// Matches `taker` against the book, mutating its remaining quantity and
/// status in place.
///
/// Limit residue is rested at the tail of its own price level. Market and
/// immediate-or-cancel residue is dropped; fill-or-kill orders match fully
/// or not at all. Stop orders are not matched. Trade ids are drawn from
/// `trade_ids`. The matcher itself has no failure path: an empty opposite
/// side simply produces no trades.
pub fn match_order(book: &mut OrderBook, taker: &mut Order, trade_ids: &AtomicU64) -> Vec<Trade> {
    if taker.remaining_quantity == 0 || !taker.is_marketable() {
        return Vec::new();
    }

    // Market orders cross at any price; limit-style orders carry a bound.
    let price_limit = match taker.order_type {
        OrderType::Market => None,
        _ => Some(taker.price),
    };

    // Fill-or-kill: match fully or not at all.
    if taker.order_type == OrderType::Fok {
        let available = match taker.side {
            Side::Buy => book.available_ask_qty_at_or_below(price_limit),
            Side::Sell => book.available_bid_qty_at_or_above(price_limit),
        };
        if available < taker.remaining_quantity {
            taker.cancel();
            return Vec::new();
        }
    }

    let fills = match taker.side {
        Side::Buy => book.take_from_asks(price_limit, taker.remaining_quantity),
        Side::Sell => book.take_from_bids(price_limit, taker.remaining_quantity),
    };

    let mut trades = Vec::with_capacity(fills.len());
    for fill in fills {
        taker.fill(fill.quantity).expect("fill is within remaining");
        trades.push(Trade {
            id: TradeId(trade_ids.fetch_add(1, Ordering::Relaxed)),
            symbol: book.symbol().to_owned(),
            price: fill.price,
            quantity: fill.quantity,
            maker_order_id: fill.maker_order_id,
            taker_order_id: taker.id,
            timestamp: taker.timestamp,
        });
    }
    if !trades.is_empty() {
        log::debug!(
            "{}: order {} took {} fills, {} remaining",
            book.symbol(),
            taker.id,
            trades.len(),
            taker.remaining_quantity
        );
    }

    match taker.order_type {
        OrderType::Limit if taker.remaining_quantity > 0 => {
            let _ = book.insert(taker.clone());
        }
        OrderType::Ioc if taker.remaining_quantity > 0 => {
            taker.cancel();
        }
        _ => {}
    }

    trades
}
