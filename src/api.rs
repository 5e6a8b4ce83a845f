//! REST and WebSocket surface over a single book.
//!
//! Used by the binary and by integration tests. Create with
//! [`create_router`]. Uses Extension for state so the router is `Router<()>`
//! and works with `into_make_service()`. The book-update callback feeds a
//! broadcast channel that fans out to all WebSocket market-data clients.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Extension, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::book::Book;
use crate::execution::Trade;
use crate::order::Order;
use crate::order_book::{DepthLevel, TopOfBook};
use crate::types::{monotonic_now, OrderId, OrderType, Price, Quantity, Side};

/// Shared app state: one book per process; broadcast channel for
/// market-data updates.
#[derive(Clone)]
pub struct AppState {
    pub book: Arc<Book>,
    broadcast_tx: broadcast::Sender<TopOfBook>,
}

/// Builds shared app state and wires the book-update callback into the
/// market-data broadcast.
pub fn create_app_state(symbol: &str) -> AppState {
    let book = Arc::new(Book::new(symbol));
    let (broadcast_tx, _) = broadcast::channel(64);
    let tx = broadcast_tx.clone();
    book.register_update_callback(move |top| {
        // Nobody listening is fine; the send result is irrelevant.
        let _ = tx.send(*top);
    });
    AppState { book, broadcast_tx }
}

/// Builds the REST/WebSocket router with the given state.
pub fn create_router_with_state(state: AppState) -> Router<()> {
    Router::new()
        .route("/health", get(health))
        .route("/orders", post(submit_order))
        .route("/orders/cancel", post(cancel_order))
        .route("/orders/modify", post(modify_order))
        .route("/book/top", get(top_of_book))
        .route("/book/depth", get(depth))
        .route("/book/imbalance", get(imbalance))
        .route("/ws/market-data", get(ws_market_data))
        .layer(Extension(state))
}

/// Builds the router with a fresh state (convenience for the binary and
/// tests). Returns `Router<()>` for `axum::serve`.
pub fn create_router(symbol: &str) -> Router<()> {
    create_router_with_state(create_app_state(symbol))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[derive(serde::Deserialize)]
struct SubmitOrderRequest {
    id: u64,
    price: Price,
    quantity: Quantity,
    side: Side,
    order_type: OrderType,
}

#[derive(serde::Serialize)]
struct SubmitOrderResponse {
    trades: Vec<Trade>,
}

async fn submit_order(
    Extension(state): Extension<AppState>,
    Json(req): Json<SubmitOrderRequest>,
) -> Response {
    let order = Order::new(
        OrderId(req.id),
        state.book.symbol(),
        req.price,
        req.quantity,
        req.side,
        req.order_type,
        monotonic_now(),
    );
    match state.book.add(order) {
        Ok(trades) => (StatusCode::OK, Json(SubmitOrderResponse { trades })).into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

#[derive(serde::Deserialize)]
struct CancelOrderRequest {
    id: u64,
}

async fn cancel_order(
    Extension(state): Extension<AppState>,
    Json(req): Json<CancelOrderRequest>,
) -> Response {
    let canceled = state.book.cancel(OrderId(req.id));
    let status = if canceled { StatusCode::OK } else { StatusCode::NOT_FOUND };
    (status, Json(serde_json::json!({ "canceled": canceled }))).into_response()
}

#[derive(serde::Deserialize)]
struct ModifyOrderRequest {
    id: u64,
    new_price: Price,
    new_quantity: Quantity,
}

async fn modify_order(
    Extension(state): Extension<AppState>,
    Json(req): Json<ModifyOrderRequest>,
) -> Response {
    let modified = state.book.modify(OrderId(req.id), req.new_price, req.new_quantity);
    let status = if modified { StatusCode::OK } else { StatusCode::NOT_FOUND };
    (status, Json(serde_json::json!({ "modified": modified }))).into_response()
}

async fn top_of_book(Extension(state): Extension<AppState>) -> Json<TopOfBook> {
    Json(state.book.top_of_book())
}

#[derive(serde::Deserialize)]
struct DepthParams {
    levels: Option<usize>,
}

#[derive(serde::Serialize)]
struct DepthResponse {
    bids: Vec<DepthLevel>,
    asks: Vec<DepthLevel>,
}

async fn depth(
    Extension(state): Extension<AppState>,
    Query(params): Query<DepthParams>,
) -> Json<DepthResponse> {
    let (bids, asks) = state.book.depth(params.levels.unwrap_or(10));
    Json(DepthResponse { bids, asks })
}

#[derive(serde::Deserialize)]
struct ImbalanceParams {
    depth: Option<usize>,
}

async fn imbalance(
    Extension(state): Extension<AppState>,
    Query(params): Query<ImbalanceParams>,
) -> Json<serde_json::Value> {
    let depth = params.depth.unwrap_or(10);
    let imbalance = state.book.order_flow_imbalance(depth);
    Json(serde_json::json!({ "depth": depth, "imbalance": imbalance }))
}

/// Payload sent to WebSocket market-data clients: one on connect, then one
/// per book update.
#[derive(serde::Serialize)]
struct WsTopOfBook {
    #[serde(rename = "type")]
    msg_type: &'static str,
    symbol: String,
    #[serde(flatten)]
    top: TopOfBook,
}

async fn ws_market_data(
    Extension(state): Extension<AppState>,
    upgrade: WebSocketUpgrade,
) -> Response {
    upgrade.on_upgrade(move |socket| handle_market_data_socket(state, socket))
}

async fn handle_market_data_socket(state: AppState, mut socket: WebSocket) {
    let snapshot = WsTopOfBook {
        msg_type: "top_of_book",
        symbol: state.book.symbol().to_owned(),
        top: state.book.top_of_book(),
    };
    let json = match serde_json::to_string(&snapshot) {
        Ok(json) => json,
        Err(_) => return,
    };
    if socket.send(Message::Text(json.into())).await.is_err() {
        return;
    }

    let mut rx = state.broadcast_tx.subscribe();
    loop {
        tokio::select! {
            update = rx.recv() => {
                match update {
                    Ok(top) => {
                        let msg = WsTopOfBook {
                            msg_type: "top_of_book",
                            symbol: state.book.symbol().to_owned(),
                            top,
                        };
                        if let Ok(json) = serde_json::to_string(&msg) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        log::warn!("market-data client lagged, skipped {skipped} updates");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}
