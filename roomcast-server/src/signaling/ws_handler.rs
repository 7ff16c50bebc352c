use crate::error::RelayError;
use crate::http::AppState;
use crate::signaling::Reader;
use crate::transport::{Connection, WsSink};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use roomcast_core::{Handshake, SessionId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    let Some(handshake) = read_handshake(&mut receiver).await else {
        return;
    };

    let session = SessionId::new();
    info!(
        "New WebSocket connection: {} ({}) for room {}",
        handshake.username, session, handshake.room
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let connection = Connection::new(
        session,
        handshake.username,
        handshake.room,
        Arc::new(WsSink::new(session, tx)),
    );

    let reader = match Reader::attach(connection, state.coordinator.clone()) {
        Ok(reader) => reader,
        Err(e) => {
            error!("Failed to register {}: {}", session, e);
            return;
        }
    };

    // The only task that writes to this socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    // Owns the reader: however this task ends, dropping it unregisters the session.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            let keep_open = match msg {
                Message::Text(text) => handle_frame(&reader, &text),
                // Same JSON envelopes, just carried in a binary frame.
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => handle_frame(&reader, text),
                    Err(e) => {
                        warn!("Dropping non-UTF-8 binary frame from {}: {}", reader.session(), e);
                        true
                    }
                },
                Message::Close(_) => false,
                Message::Ping(_) | Message::Pong(_) => true,
            };
            if !keep_open {
                break;
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    info!("WebSocket disconnected: {}", session);
}

/// Hand one frame to the reader. Returns false when the connection should close.
fn handle_frame(reader: &Reader, text: &str) -> bool {
    match reader.handle_text(text) {
        Ok(()) => true,
        Err(e @ RelayError::CoordinatorUnavailable(_)) => {
            error!("Closing {}: {}", reader.session(), e);
            false
        }
        Err(e) => {
            warn!("Dropping frame from {}: {}", reader.session(), e);
            true
        }
    }
}

/// Wait for the identifying first text frame. `None` closes the connection unregistered.
async fn read_handshake(receiver: &mut SplitStream<WebSocket>) -> Option<Handshake> {
    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                return match Handshake::decode(&text) {
                    Ok(handshake) => Some(handshake),
                    Err(e) => {
                        warn!("Rejecting connection with bad handshake: {}", e);
                        None
                    }
                };
            }
            Ok(Message::Close(_)) => return None,
            Ok(_) => continue,
            Err(e) => {
                warn!("WebSocket error before handshake: {}", e);
                return None;
            }
        }
    }
    None
}
