//! Error taxonomy for book operations.
//!
//! Only invalid-argument conditions surface as errors. A cancel or modify of
//! an unknown order id is a `bool` return, and canceling an already-filled
//! order is a silent no-op.

use crate::types::{OrderId, Quantity};
use thiserror::Error;

/// Invalid-argument conditions reported synchronously by book operations.
/// The book state is unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("order symbol {order} does not match book symbol {book}")]
    SymbolMismatch { order: String, book: String },

    #[error("order id {0} is already resting on the book")]
    DuplicateOrderId(OrderId),

    #[error("fill quantity {fill} exceeds remaining quantity {remaining}")]
    Overfill { fill: Quantity, remaining: Quantity },

    #[error("order quantity must be positive")]
    ZeroQuantity,
}
