//! Synthetic market data generator.
//!
//! Deterministic, configurable order stream for replay tests, demos, and
//! load tests. Same seed, same sequence of orders.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::book::Book;
use crate::error::BookError;
use crate::order::Order;
use crate::types::{OrderId, OrderType, Price, Quantity, Side};

/// Configuration for the synthetic order generator.
/// All ranges are inclusive. Same config + seed produces the same stream.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed, same order stream.
    pub seed: u64,
    /// Symbol stamped on every generated order.
    pub symbol: String,
    /// Number of orders produced by [`Generator::all_orders`].
    pub num_orders: usize,
    /// Probability of Buy (0.0..=1.0). Sell otherwise.
    pub buy_ratio: f64,
    /// Probability of a priced (limit-style) order. Market otherwise.
    pub limit_ratio: f64,
    /// Of the priced orders: probability of Ioc, then Fok. Remainder Limit.
    pub ioc_ratio: f64,
    pub fok_ratio: f64,
    /// Price range (inclusive, ticks) for priced orders.
    pub price_min: Price,
    pub price_max: Price,
    /// Quantity range (inclusive, whole units).
    pub quantity_min: Quantity,
    pub quantity_max: Quantity,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            symbol: "TEST".to_string(),
            num_orders: 1000,
            buy_ratio: 0.5,
            limit_ratio: 0.9,
            ioc_ratio: 0.0,
            fok_ratio: 0.0,
            price_min: 14_950,
            price_max: 15_050,
            quantity_min: 1,
            quantity_max: 100,
        }
    }
}

/// Deterministic order stream. Create with [`Generator::new`], then pull
/// orders with [`Generator::next_order`] or collect with
/// [`Generator::all_orders`].
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    next_order_id: u64,
    next_timestamp: u64,
}

impl Generator {
    /// Builds a generator. Same config (including seed), same stream.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            rng,
            config,
            next_order_id: 1,
            next_timestamp: 1,
        }
    }

    /// Generates the next order. Advances the order id, timestamp, and RNG.
    pub fn next_order(&mut self) -> Order {
        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;
        let timestamp = self.next_timestamp;
        self.next_timestamp += 1;

        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let is_priced = self.rng.gen::<f64>() < self.config.limit_ratio;
        let (order_type, price) = if is_priced {
            let r = self.rng.gen::<f64>();
            let order_type = if r < self.config.ioc_ratio {
                OrderType::Ioc
            } else if r < self.config.ioc_ratio + self.config.fok_ratio {
                OrderType::Fok
            } else {
                OrderType::Limit
            };
            let price = self.rng.gen_range(self.config.price_min..=self.config.price_max);
            (order_type, price)
        } else {
            (OrderType::Market, 0)
        };
        let quantity = self
            .rng
            .gen_range(self.config.quantity_min..=self.config.quantity_max);

        Order::new(id, self.config.symbol.clone(), price, quantity, side, order_type, timestamp)
    }

    /// Returns exactly `n` orders, advancing the generator state.
    pub fn take_orders(&mut self, n: usize) -> Vec<Order> {
        (0..n).map(|_| self.next_order()).collect()
    }

    /// Returns the full stream as defined by `config.num_orders`.
    pub fn all_orders(&mut self) -> Vec<Order> {
        self.take_orders(self.config.num_orders)
    }
}

/// Replays a sequence of orders into a book. Returns the total number of
/// trades produced, or the first rejection.
pub fn replay_into_book(book: &Book, orders: impl IntoIterator<Item = Order>) -> Result<usize, BookError> {
    let mut total_trades = 0usize;
    for order in orders {
        total_trades += book.add(order)?.len();
    }
    Ok(total_trades)
}
