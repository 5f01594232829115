//! Streaming module - HTTP dashboard and WebSocket push

mod page;
mod server;
mod websocket;

pub use page::INDEX_HTML;
pub use server::{WebServer, WebState};
pub use websocket::handle_connection;
