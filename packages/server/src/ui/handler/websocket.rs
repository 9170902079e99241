//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, header},
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle, time::Instant};

use crate::{
    domain::ClientDescriptor, infrastructure::dto::conversion::decode_client_frame,
    ui::state::AppState, usecase::RelaySession,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let client_descriptor = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .and_then(ClientDescriptor::parse);

    ws.on_upgrade(move |socket| handle_socket(socket, state, client_descriptor))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink and pings the peer every `heartbeat_interval`.
///
/// The task ends when the channel closes (the connection was unregistered
/// from the pusher) or when a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    heartbeat_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut heartbeat =
            tokio::time::interval_at(Instant::now() + heartbeat_interval, heartbeat_interval);

        loop {
            tokio::select! {
                frame = rx.recv() => {
                    let Some(frame) = frame else { break };
                    if sender.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                _ = heartbeat.tick() => {
                    if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }

        let _ = sender.close().await;
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    client_descriptor: Option<ClientDescriptor>,
) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let mut session = RelaySession::open(state.relay.clone(), client_descriptor, tx).await;
    let connection_id = session.connection_id().clone();

    let mut send_task = pusher_loop(rx, sender, state.config.heartbeat_interval);
    let heartbeat_timeout = state.config.heartbeat_timeout;

    // Inbound events of one connection are handled strictly in order
    loop {
        tokio::select! {
            _ = &mut send_task => {
                tracing::debug!("Outbound side of '{}' ended", connection_id);
                break;
            }
            received = tokio::time::timeout(heartbeat_timeout, receiver.next()) => {
                let msg = match received {
                    Err(_) => {
                        tracing::info!(
                            "Connection '{}' silent for {:?}, closing",
                            connection_id,
                            heartbeat_timeout
                        );
                        break;
                    }
                    Ok(None) => break,
                    Ok(Some(Err(e))) => {
                        tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                        break;
                    }
                    Ok(Some(Ok(msg))) => msg,
                };

                match msg {
                    Message::Text(text) => match decode_client_frame(&text) {
                        Ok(event) => {
                            session.handle(event).await;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Dropping unparseable frame from '{}': {}",
                                connection_id,
                                e
                            );
                        }
                    },
                    Message::Binary(_) => {
                        tracing::debug!("Ignoring binary frame from '{}'", connection_id);
                    }
                    Message::Ping(_) | Message::Pong(_) => {
                        // Pong replies are sent by axum; either frame counts as liveness
                    }
                    Message::Close(_) => {
                        tracing::info!("Client '{}' requested close", connection_id);
                        break;
                    }
                }
            }
        }
    }

    session.close().await;
    send_task.abort();
}
