use axum::extract::ws::Message;
use beacon_core::SignalError;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("session is not connected")]
    NotConnected,

    #[error("session transport is closed")]
    Closed,

    #[error("failed to encode message: {0}")]
    Encode(#[from] SignalError),

    #[error("transport write failed: {0}")]
    Transport(String),
}

/// Writable end of one client connection, as seen by the signaling core.
///
/// `send_text` must not wait on the peer: implementations enqueue or fail.
pub trait SessionHandle: Send + Sync {
    fn is_open(&self) -> bool;

    fn send_text(&self, text: String) -> Result<(), DeliveryError>;
}

/// Handle backed by the outbound queue of an axum WebSocket.
///
/// The queue is drained by the connection's writer task; once that task is
/// gone the receiver is dropped and the handle reports itself closed.
pub struct WsSessionHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl WsSessionHandle {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }
}

impl SessionHandle for WsSessionHandle {
    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send_text(&self, text: String) -> Result<(), DeliveryError> {
        self.tx
            .send(Message::Text(text.into()))
            .map_err(|_| DeliveryError::Closed)
    }
}
