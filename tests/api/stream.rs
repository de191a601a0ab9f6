use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use futures_util::{SinkExt, StreamExt};
use mempool_dashboard::{
    display_state::Tracking,
    mempool_manager::{track_channel, MempoolManager, StreamError},
    startup::spawn_mempool_stream,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message, WebSocketStream};

use crate::helpers::{local_listener, spawn_stream};

async fn accept(listener: &TcpListener) -> WebSocketStream<tokio::net::TcpStream> {
    let (socket, _) = listener.accept().await.expect("Failed to accept");
    accept_async(socket).await.expect("Failed websocket handshake")
}

async fn next_json(ws: &mut WebSocketStream<tokio::net::TcpStream>) -> Value {
    loop {
        let msg = ws
            .next()
            .await
            .expect("Client hung up")
            .expect("Failed to read from client");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).expect("Client sent invalid json");
        }
    }
}

async fn expect_subscription(ws: &mut WebSocketStream<tokio::net::TcpStream>) {
    assert_eq!(next_json(ws).await, json!({"action": "init"}));
    assert_eq!(
        next_json(ws).await,
        json!({
            "action": "want",
            "data": ["stats", "blocks", "projected-blocks", "mempool-blocks"]
        })
    );
}

/// A block as `/api/v1/ws` sends it.
fn block(height: u64) -> Value {
    json!({
        "id": format!("{:064x}", height),
        "height": height,
        "version": 536_870_912,
        "timestamp": 1_700_000_000,
        "tx_count": 2500,
        "size": 1_500_000,
        "weight": 3_990_000,
        "previousblockhash": format!("{:064x}", height - 1),
        "extras": {
            "medianFee": 12.4,
            "feeRange": [1.0, 8.0, 300.0],
            "totalFees": 9_000_000,
        },
    })
}

#[tokio::test]
async fn updates_are_merged_into_the_display_state() {
    let (listener, addr) = local_listener().await;
    let test = spawn_stream(addr, 3);
    let (_tracker, track_requests) = track_channel();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        expect_subscription(&mut ws).await;
        let update = json!({
            "mempoolInfo": {"size": 1000, "bytes": 2_500_000},
            "txPerSecond": 4.3,
            "vBytesPerSecond": 1520.2,
            "blocks": [block(100), block(102), block(101), block(99)],
            "mempool-blocks": [
                {"blockSize": 1_600_000, "blockVSize": 999_000.0, "nTx": 3000,
                 "totalFees": 20_000_000, "medianFee": 10.2, "feeRange": [8.0, 12.0, 400.0]},
            ],
        });
        ws.send(Message::Text(update.to_string()))
            .await
            .expect("Failed to send update");
        ws.close(None).await.expect("Failed to close");
    });

    let result = test.manager.run(track_requests).await;
    server.await.expect("Server task failed");

    assert!(matches!(result, Err(StreamError::Closed)));
    test.display_state.with_snapshot(|snapshot| {
        let heights: Vec<u64> = snapshot.confirmed_blocks.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![102, 101, 100]);
        assert_eq!(snapshot.confirmed_blocks[0].n_tx, 2500);
        assert_eq!(snapshot.confirmed_blocks[0].max_fee, 300.0);
        assert_eq!(snapshot.projected_blocks.len(), 1);
        assert_eq!(snapshot.projected_blocks[0].block_weight, 3_996_000);
        let stats = snapshot.stats.expect("Stats were not applied");
        assert_eq!(stats.size, 1000);
        assert_eq!(stats.bytes, 2_500_000);
        assert_eq!(stats.tx_per_second, Some(4.3));
        assert!(snapshot.loaded);
        assert_eq!(snapshot.tracking, Tracking::Unknown);
    });
    assert!(test.redraw.drain() > 0);
}

#[tokio::test]
async fn malformed_update_ends_the_stream() {
    let (listener, addr) = local_listener().await;
    let test = spawn_stream(addr, 3);
    let (_tracker, track_requests) = track_channel();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        expect_subscription(&mut ws).await;
        ws.send(Message::Text("{\"blocks\": 12".into()))
            .await
            .expect("Failed to send update");
        // keep the socket open until the client gives up
        while let Some(Ok(_)) = ws.next().await {}
    });

    let result = test.manager.run(track_requests).await;

    assert!(matches!(result, Err(StreamError::Decode(_))));
    test.display_state
        .with_snapshot(|snapshot| assert!(!snapshot.loaded));
    server.abort();
}

#[tokio::test]
async fn track_requests_are_forwarded_to_the_server() {
    let (listener, addr) = local_listener().await;
    let test = spawn_stream(addr, 3);
    let (tracker, track_requests) = track_channel();
    let tx_id = "a".repeat(64);
    tracker.track(tx_id.clone());

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        expect_subscription(&mut ws).await;
        let request = next_json(&mut ws).await;
        let update = json!({
            "track-tx": {"tracking": true, "blockHeight": 101},
            "txConfirmed": false,
        });
        ws.send(Message::Text(update.to_string()))
            .await
            .expect("Failed to send update");
        ws.close(None).await.expect("Failed to close");
        request
    });

    let result = test.manager.run(track_requests).await;
    let request = server.await.expect("Server task failed");

    assert!(matches!(result, Err(StreamError::Closed)));
    assert_eq!(request, json!({"action": "track-tx", "txId": tx_id}));
    test.display_state.with_snapshot(|snapshot| {
        let status = snapshot.tracking.status().expect("Tracking was not applied");
        assert!(status.tracking);
        assert_eq!(status.block_height, Some(101));
        assert!(!status.confirmed);
        assert!(!snapshot.holds_tracked_tx(101));
    });
}

#[tokio::test]
async fn stream_task_that_panics_still_raises_the_kill_signal() {
    let (listener, addr) = local_listener().await;
    let test = spawn_stream(addr, 3);
    let kill_signal = Arc::new(AtomicBool::new(false));
    // a zero ping period makes the timer panic right after subscribing
    let manager = MempoolManager::new(
        format!("ws://{}", addr),
        Duration::ZERO,
        test.display_state.clone(),
        kill_signal.clone(),
    );
    let (_tracker, track_requests) = track_channel();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        expect_subscription(&mut ws).await;
        while let Some(Ok(_)) = ws.next().await {}
    });

    let joined = spawn_mempool_stream(manager, track_requests, kill_signal.clone()).await;

    assert!(matches!(joined, Err(e) if e.is_panic()));
    assert!(kill_signal.load(Ordering::Relaxed));
    server.abort();
}

#[tokio::test]
async fn failing_stream_raises_the_kill_signal() {
    let (listener, addr) = local_listener().await;
    let test = spawn_stream(addr, 3);
    let kill_signal = Arc::new(AtomicBool::new(false));
    let manager = MempoolManager::new(
        format!("ws://{}", addr),
        Duration::from_secs(60),
        test.display_state.clone(),
        kill_signal.clone(),
    );
    let (_tracker, track_requests) = track_channel();

    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        expect_subscription(&mut ws).await;
        ws.close(None).await.expect("Failed to close");
    });

    let joined = spawn_mempool_stream(manager, track_requests, kill_signal.clone()).await;
    server.await.expect("Server task failed");

    assert!(matches!(joined, Ok(Err(StreamError::Closed))));
    assert!(kill_signal.load(Ordering::Relaxed));
}
