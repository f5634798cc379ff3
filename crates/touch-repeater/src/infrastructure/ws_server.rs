//! WebSocket server: accept loop and per-connection session lifecycle.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming client connections.
//! 3. Upgrading each connection to a WebSocket session, capturing the
//!    request path during the handshake.
//! 4. Opening the session through the dispatcher (route match + forwarder
//!    construction) and registering the result, or closing the connection
//!    when the open fails.
//! 5. Feeding each text frame through the parser and the registry.
//! 6. Removing the registry entry exactly once when the session ends, for
//!    any reason.
//!
//! Each session runs in its own Tokio task, so one slow sink never blocks
//! other connections; the accept loop itself never blocks on a session.
//! Shutdown is triggered by a shared `AtomicBool` set by the Ctrl+C handler
//! in `main.rs`, checked between accepts via a short timeout.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex as StdMutex,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_hdr_async,
    tungstenite::handshake::server::{ErrorResponse, Request, Response},
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use touch_core::event::TouchEvent;

use crate::application::{Dispatcher, ForwarderRegistry};
use crate::domain::config::RepeaterConfig;

/// Shared server state: the route table and the live-connection registry.
pub struct ServerState {
    pub dispatcher: Dispatcher,
    pub registry: ForwarderRegistry,
}

/// Binds the configured listener and runs the accept loop until `running`
/// is cleared.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot be bound (port in use,
/// missing permission).
pub async fn run_server(
    config: RepeaterConfig,
    state: Arc<ServerState>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind listener on {}", config.listen_addr))?;

    info!("touch repeater listening on {}", config.listen_addr);
    serve(listener, state, running).await
}

/// Runs the accept loop on an already-bound listener.
///
/// Split from [`run_server`] so integration tests can bind an ephemeral
/// port first and learn its address.
pub async fn serve(
    listener: TcpListener,
    state: Arc<ServerState>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        // A short timeout on accept() lets the loop re-check the shutdown
        // flag even when no clients are connecting.
        match timeout(Duration::from_millis(200), listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    handle_connection(stream, peer_addr, state).await;
                });
            }
            Ok(Err(e)) => {
                // Transient accept error; keep the server alive.
                warn!("accept error: {e}");
            }
            Err(_) => {
                // Timeout: loop back to check the running flag.
            }
        }
    }

    Ok(())
}

/// Entry point of each per-connection task; logs the session outcome.
async fn handle_connection(raw_stream: TcpStream, peer_addr: SocketAddr, state: Arc<ServerState>) {
    match run_session(raw_stream, peer_addr, state).await {
        Ok(()) => info!("connection {peer_addr} closed"),
        Err(e) => warn!("connection {peer_addr} ended with error: {e:#}"),
    }
}

/// Runs the complete lifecycle of one client connection.
///
/// The registry entry, when one was created, is removed on the single
/// exit path after the message loop, so the forwarder is disposed exactly
/// once no matter how the session ends.
async fn run_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    // Capture the request path during the handshake.  The callback runs
    // synchronously inside accept_hdr_async, before the first frame.
    let request_path = Arc::new(StdMutex::new(String::new()));
    let capture = Arc::clone(&request_path);
    let mut ws_stream = accept_hdr_async(
        raw_stream,
        move |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            let path = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| request.uri().path().to_string());
            if let Ok(mut slot) = capture.lock() {
                *slot = path;
            }
            Ok(response)
        },
    )
    .await
    .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    let path = request_path
        .lock()
        .map(|slot| slot.clone())
        .unwrap_or_default();

    let connection_id = Uuid::new_v4();
    info!("connection open: {peer_addr}{path} ({connection_id})");

    // Route match + forwarder construction.  Any failure here closes the
    // connection before a registry entry exists.
    match state.dispatcher.open(&path) {
        Ok(forwarder) => {
            debug!("connection {connection_id}: routed to '{}' sink", forwarder.kind());
            state.registry.insert(connection_id, forwarder).await;
        }
        Err(e) => {
            warn!("rejecting connection {peer_addr}{path}: {e}");
            let _ = ws_stream.close(None).await;
            return Ok(());
        }
    }

    // Message loop: one task per connection keeps per-connection ordering.
    while let Some(frame) = ws_stream.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => {
                let event = TouchEvent::parse(&text);
                if !event.valid {
                    // Malformed messages are dropped silently; the
                    // connection stays open.
                    debug!("connection {connection_id}: dropping invalid message: {}", event.raw);
                    continue;
                }
                if let Some(Err(e)) = state.registry.forward(&connection_id, &event).await {
                    warn!("connection {connection_id}: forward failed: {e}");
                }
            }
            Ok(WsMessage::Binary(_)) => {
                warn!("connection {connection_id}: unexpected binary frame (ignored)");
            }
            Ok(WsMessage::Ping(_)) | Ok(WsMessage::Pong(_)) | Ok(WsMessage::Frame(_)) => {
                // Protocol-level frames; tungstenite answers pings itself.
            }
            Ok(WsMessage::Close(_)) => {
                debug!("connection {connection_id}: close frame received");
                break;
            }
            Err(WsError::ConnectionClosed | WsError::Protocol(_)) => {
                debug!("connection {connection_id}: closed by peer");
                break;
            }
            Err(e) => {
                warn!("connection {connection_id}: websocket error: {e}");
                break;
            }
        }
    }

    if state.registry.remove(&connection_id).await {
        debug!("connection {connection_id}: forwarder disposed");
    }

    Ok(())
}
