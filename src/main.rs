//! Binary: one order book per process, served over HTTP/WebSocket.
//!
//! `SYMBOL` selects the book's symbol (default AAPL); `PORT` the listen port
//! (default 8080). `RUST_LOG` controls log verbosity.

use tickbook::api;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    env_logger::init();

    let symbol = std::env::var("SYMBOL").unwrap_or_else(|_| "AAPL".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let app = api::create_router(&symbol);
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.expect("bind");
    log::info!("serving order book for {} on http://{}", symbol, addr);
    axum::serve(listener, app.into_make_service()).await.expect("serve");
}
