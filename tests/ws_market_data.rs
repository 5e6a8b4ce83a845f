//! WebSocket market-data integration tests. Connect to /ws/market-data,
//! assert the connect snapshot, then drive the book and assert the update.

use std::net::SocketAddr;

use futures_util::StreamExt;
use tickbook::api;

async fn spawn_app() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = api::create_router("AAPL");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (addr, handle)
}

#[tokio::test]
async fn ws_sends_snapshot_on_connect() {
    let (addr, _handle) = spawn_app().await;
    let url = format!("ws://{}/ws/market-data", addr);
    let (mut ws, _) = tokio_tungstenite::connect_async(&url).await.expect("connect");

    let raw = ws.next().await.expect("one message").expect("ws recv");
    let msg = raw.into_text().expect("text frame");
    let snapshot: serde_json::Value = serde_json::from_str(&msg).expect("json");
    assert_eq!(snapshot["type"], "top_of_book");
    assert_eq!(snapshot["symbol"], "AAPL");
    // Empty book at start.
    assert_eq!(snapshot["bid_price"], 0);
    assert_eq!(snapshot["ask_price"], 0);
}

#[tokio::test]
async fn ws_streams_updates_after_book_mutations() {
    let (addr, _handle) = spawn_app().await;
    let url = format!("ws://{}/ws/market-data", addr);
    let (mut ws, _) = tokio_tungstenite::connect_async(&url).await.expect("connect");

    // Consume the connect snapshot.
    let _ = ws.next().await.expect("snapshot").expect("ws recv");

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/orders", addr))
        .json(&serde_json::json!({
            "id": 1,
            "price": 15_000,
            "quantity": 75,
            "side": "Buy",
            "order_type": "Limit",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let raw = tokio::time::timeout(std::time::Duration::from_secs(2), ws.next())
        .await
        .expect("update within timeout")
        .expect("one message")
        .expect("ws recv");
    let update: serde_json::Value = serde_json::from_str(&raw.into_text().expect("text")).expect("json");
    assert_eq!(update["type"], "top_of_book");
    assert_eq!(update["bid_price"], 15_000);
    assert_eq!(update["bid_size"], 75);
}
