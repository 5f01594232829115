// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! HTTP server - dashboard page, pull endpoint and WebSocket upgrade

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use super::page::INDEX_HTML;
use super::websocket::handle_connection;
use crate::config::WebConfig;
use crate::core::{BroadcastHub, Monitor, Sampler};
use crate::sensors::SnapshotBuilder;

/// State shared by every request handler
#[derive(Clone)]
pub struct WebState {
    monitor: Monitor,
    hub: Arc<BroadcastHub>,
    max_clients: usize,
}

/// Web dashboard: owns the hub and the sampler that feeds it
pub struct WebServer {
    config: WebConfig,
    builder: Arc<SnapshotBuilder>,
    hub: Arc<BroadcastHub>,
}

impl WebServer {
    pub fn new(config: WebConfig, builder: Arc<SnapshotBuilder>) -> Self {
        let hub = Arc::new(BroadcastHub::new(config.subscriber_buffer));
        Self { config, builder, hub }
    }

    pub fn hub(&self) -> Arc<BroadcastHub> {
        Arc::clone(&self.hub)
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.socket_addr();
        TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))
    }

    pub fn router(&self) -> Router {
        router(WebState {
            monitor: Monitor::new(Arc::clone(&self.builder)),
            hub: Arc::clone(&self.hub),
            max_clients: self.config.max_clients,
        })
    }

    /// Serve on `listener` until `shutdown` fires.
    ///
    /// The sampler runs for exactly as long as the server does.
    pub async fn serve(self, listener: TcpListener, shutdown: broadcast::Sender<()>) -> Result<()> {
        let local = listener.local_addr()?;
        info!("Web interface listening on http://{}", local);

        let sampler = Sampler::new(
            Arc::clone(&self.builder),
            Arc::clone(&self.hub),
            self.config.broadcast_interval(),
        )
        .spawn(shutdown.subscribe());

        let mut server_shutdown = shutdown.subscribe();
        let app = self.router();

        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(async move {
                let _ = server_shutdown.recv().await;
            })
            .await
            .context("HTTP server failed")?;

        sampler.join().await;
        info!("Web interface stopped");
        Ok(())
    }
}

fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/stats", get(stats))
        .route("/ws", get(ws_upgrade))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn stats(State(state): State<WebState>) -> Response {
    match state.monitor.snapshot().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            error!("Failed to get system stats: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<WebState>,
) -> Response {
    if state.hub.len() >= state.max_clients {
        warn!("Max clients reached, rejecting connection from {}", addr);
        return (StatusCode::SERVICE_UNAVAILABLE, "too many clients").into_response();
    }

    let hub = Arc::clone(&state.hub);
    ws.on_upgrade(move |socket| handle_connection(socket, addr, hub))
}
