//! End-to-end session tests over a real WebSocket connection.
//!
//! Each test binds the server on an ephemeral port, connects a real
//! tokio-tungstenite client, and drives the full open → message → close
//! lifecycle: handshake path capture, route dispatch, registry bookkeeping,
//! and (for the TUIO route) the UDP bundles leaving the process.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use touch_core::protocol::FrameCounter;
use touch_repeater::application::dispatcher::{standard_routes, SinkContext};
use touch_repeater::application::ForwarderRegistry;
use touch_repeater::infrastructure::hid_device::{MockDeviceState, MockReportDevice};
use touch_repeater::infrastructure::pointer_device::MockPointerDevice;
use touch_repeater::infrastructure::screen_info::MockScreenEnumerator;
use touch_repeater::infrastructure::touch_inject::MockTouchInjector;
use touch_repeater::infrastructure::{serve, ServerState};

/// A context wired entirely to mocks.
fn mock_context() -> Arc<SinkContext> {
    Arc::new(SinkContext {
        frames: Arc::new(FrameCounter::new()),
        screens: Arc::new(MockScreenEnumerator::dual_1080p()),
        hid_pool: Arc::new(MockReportDevice::pool(Arc::new(MockDeviceState::default()))),
        pointer_devices: Arc::new(|| Ok(Box::new(MockPointerDevice::new()) as _)),
        injectors: Arc::new(|| Ok(Box::new(MockTouchInjector::new()) as _)),
    })
}

/// Starts the server on an ephemeral port and returns its address, the
/// shared state for assertions, and the shutdown flag.
async fn start_server(context: Arc<SinkContext>) -> (String, Arc<ServerState>, Arc<AtomicBool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = Arc::new(ServerState {
        dispatcher: standard_routes(context),
        registry: ForwarderRegistry::new(),
    });
    let running = Arc::new(AtomicBool::new(true));
    tokio::spawn(serve(
        listener,
        Arc::clone(&state),
        Arc::clone(&running),
    ));
    (format!("127.0.0.1:{}", addr.port()), state, running)
}

/// Polls until the registry holds `expected` connections.
async fn wait_for_connections(state: &ServerState, expected: usize) {
    for _ in 0..100 {
        if state.registry.len().await == expected {
            return;
        }
        sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "registry never reached {expected} connection(s); has {}",
        state.registry.len().await
    );
}

// ── TUIO end to end ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn tuio_session_forwards_bundles_over_udp() {
    // Arrange: a UDP receiver standing in for a TUIO consumer.
    let receiver = UdpSocket::bind("127.0.0.1:0").await.expect("bind receiver");
    let udp_port = receiver.local_addr().expect("addr").port();
    let (addr, state, _running) = start_server(mock_context()).await;

    // Act: connect and send two events.
    let url = format!("ws://{addr}/tuio?host=127.0.0.1&port={udp_port}");
    let (mut client, _) = connect_async(url).await.expect("connect");
    wait_for_connections(&state, 1).await;
    client
        .send(Message::Text("#d|1|0.5|0.25|0.0".to_string()))
        .await
        .expect("send");
    client
        .send(Message::Text("#m|1|0.6|0.25|0.0".to_string()))
        .await
        .expect("send");

    // Assert: two bundles arrive with increasing fseq values.
    let mut buf = [0u8; 512];
    let mut frames = Vec::new();
    for _ in 0..2 {
        let received = timeout(Duration::from_secs(5), receiver.recv(&mut buf))
            .await
            .expect("bundle within 5s")
            .expect("recv");
        assert_eq!(received, 148);
        assert_eq!(&buf[..8], b"#bundle\0");
        frames.push(i32::from_be_bytes([buf[44], buf[45], buf[46], buf[47]]));
    }
    assert!(frames[1] > frames[0], "fseq must strictly increase");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_messages_are_dropped_and_the_session_survives() {
    // Arrange
    let receiver = UdpSocket::bind("127.0.0.1:0").await.expect("bind receiver");
    let udp_port = receiver.local_addr().expect("addr").port();
    let (addr, state, _running) = start_server(mock_context()).await;
    let url = format!("ws://{addr}/tuio?host=127.0.0.1&port={udp_port}");
    let (mut client, _) = connect_async(url).await.expect("connect");
    wait_for_connections(&state, 1).await;

    // Act: garbage, a wrong field count, an unknown type, then one valid
    // event.
    for bad in ["garbage", "#d|1|0.5|0.25", "#x|1|0|0|0"] {
        client
            .send(Message::Text(bad.to_string()))
            .await
            .expect("send");
    }
    client
        .send(Message::Text("#d|1|0.5|0.25|0.0".to_string()))
        .await
        .expect("send");

    // Assert: the session is intact and only the valid event produced a
    // bundle, carrying frame 1, proving the drops consumed nothing.
    let mut buf = [0u8; 512];
    let received = timeout(Duration::from_secs(5), receiver.recv(&mut buf))
        .await
        .expect("bundle within 5s")
        .expect("recv");
    assert_eq!(received, 148);
    let fseq = i32::from_be_bytes([buf[44], buf[45], buf[46], buf[47]]);
    assert_eq!(fseq, 1, "invalid messages must not consume frame numbers");
    assert_eq!(state.registry.len().await, 1);
}

// ── Rejection and cleanup ─────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn unknown_route_is_closed_without_a_registry_entry() {
    // Arrange
    let (addr, state, _running) = start_server(mock_context()).await;

    // Act: the handshake succeeds, then the server closes the session.
    let (mut client, _) = connect_async(format!("ws://{addr}/unknown"))
        .await
        .expect("connect");

    // Assert: the next frame is the server's Close (or the stream ends).
    let outcome = timeout(Duration::from_secs(5), client.next())
        .await
        .expect("server must close promptly");
    match outcome {
        Some(Ok(Message::Close(_))) | None => {}
        other => panic!("expected a close, got {other:?}"),
    }
    assert_eq!(state.registry.len().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_screen_closes_the_connection() {
    let (addr, state, _running) = start_server(mock_context()).await;

    // Two mock displays exist; screen 99 must be rejected.
    let (mut client, _) = connect_async(format!("ws://{addr}/mouse?screen=99"))
        .await
        .expect("connect");

    let outcome = timeout(Duration::from_secs(5), client.next())
        .await
        .expect("server must close promptly");
    assert!(matches!(outcome, Some(Ok(Message::Close(_))) | None));
    assert_eq!(state.registry.len().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn closing_a_connection_removes_its_registry_entry() {
    // Arrange
    let (addr, state, _running) = start_server(mock_context()).await;
    let (mut client, _) = connect_async(format!("ws://{addr}/console"))
        .await
        .expect("connect");
    wait_for_connections(&state, 1).await;

    // Act
    client.close(None).await.expect("close");

    // Assert: the forwarder is removed (and thereby disposed) exactly once.
    wait_for_connections(&state, 0).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn independent_connections_have_independent_sinks() {
    // Arrange: one accepted and one rejected connection.
    let (addr, state, _running) = start_server(mock_context()).await;
    let (_console, _) = connect_async(format!("ws://{addr}/console"))
        .await
        .expect("connect console");
    wait_for_connections(&state, 1).await;

    // Act: a rejected open on another connection.
    let (mut rejected, _) = connect_async(format!("ws://{addr}/nope"))
        .await
        .expect("connect nope");
    let _ = timeout(Duration::from_secs(5), rejected.next()).await;

    // Assert: the rejection did not disturb the live connection.
    assert_eq!(state.registry.len().await, 1);
}
