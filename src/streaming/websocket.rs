// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! WebSocket subscriber connections

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, error, info, warn};

use crate::core::BroadcastHub;

/// Serve one upgraded socket for its whole lifetime.
///
/// The socket is registered with the hub on entry and removed exactly once
/// on exit, whichever side ended the connection.
pub async fn handle_connection(socket: WebSocket, addr: SocketAddr, hub: Arc<BroadcastHub>) {
    let mut subscription = hub.subscribe(Some(addr));
    let client_id = subscription.id;

    info!("New WebSocket connection from {} (id: {})", addr, client_id);

    let (mut ws_sender, mut ws_receiver) = socket.split();

    loop {
        tokio::select! {
            // Inbound traffic only matters for detecting disconnects
            msg = ws_receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) => {
                        info!("WebSocket closed by client {}", addr);
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if ws_sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("WebSocket error from {}: {}", addr, e);
                        break;
                    }
                    None => break,
                }
            }

            delivery = subscription.recv() => {
                match delivery {
                    Some(snapshot) => {
                        let json = match serde_json::to_string(snapshot.as_ref()) {
                            Ok(json) => json,
                            Err(e) => {
                                error!("Failed to encode snapshot: {}", e);
                                continue;
                            }
                        };
                        if let Err(e) = ws_sender.send(Message::Text(json)).await {
                            warn!("Failed to send to {}: {}", addr, e);
                            break;
                        }
                    }
                    None => {
                        debug!("Hub released {}, closing socket", addr);
                        let _ = ws_sender.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        }
    }

    hub.unsubscribe(&client_id);

    info!("WebSocket client {} disconnected", addr);
}
