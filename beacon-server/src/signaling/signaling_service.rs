use crate::room::{Departure, RoomTable};
use crate::session::{SessionHandle, SessionRegistry};
use crate::signaling::Delivery;
use beacon_core::{InboundSignal, RoomId, SessionId, SignalKind, SignalMessage};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dispatches client frames against the session registry and room table.
///
/// Holds no per-connection state; every call is independent and can run
/// concurrently with calls for other sessions. Cloning is cheap and shares
/// both tables.
#[derive(Clone)]
pub struct SignalingService {
    sessions: SessionRegistry,
    rooms: RoomTable,
    delivery: Delivery,
}

impl SignalingService {
    pub fn new() -> Self {
        let sessions = SessionRegistry::new();
        Self {
            delivery: Delivery::new(sessions.clone()),
            sessions,
            rooms: RoomTable::new(),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn rooms(&self) -> &RoomTable {
        &self.rooms
    }

    pub fn on_connect(&self, session_id: SessionId, handle: Arc<dyn SessionHandle>) {
        info!("Session connected: {}", session_id);
        self.sessions.register(session_id, handle);
    }

    /// Entry point for one raw text frame. Frames that do not decode are
    /// dropped; the session stays up and gets no reply.
    pub fn on_text(&self, session_id: &SessionId, text: &str) {
        debug!("Received frame from {}: {}", session_id, text);

        match SignalMessage::from_json(text) {
            Ok(message) => self.on_message(session_id, message),
            Err(e) => warn!("Invalid SignalMessage from {}: {}", session_id, e),
        }
    }

    pub fn on_message(&self, session_id: &SessionId, message: SignalMessage) {
        // Whatever senderId the client wrote is replaced by the connection's own id.
        let message = message.with_sender(session_id.clone());

        match InboundSignal::try_from(message) {
            Ok(InboundSignal::Join { room_id }) => self.handle_join(session_id, room_id),
            Ok(InboundSignal::Leave { room_id }) => self.handle_leave(session_id, room_id),
            Ok(InboundSignal::Relay { target_id, message }) => {
                self.handle_relay(session_id, &target_id, &message)
            }
            Ok(InboundSignal::Inert {
                kind: SignalKind::Unknown,
            }) => warn!("Unknown message type from {}", session_id),
            Ok(InboundSignal::Inert { kind }) => {
                debug!("Ignoring {} message from {}", kind, session_id)
            }
            Err(e) => warn!("Rejected message from {}: {}", session_id, e),
        }
    }

    /// Connection closed. Safe to call more than once for the same session.
    pub fn on_disconnect(&self, session_id: &SessionId) {
        self.sessions.unregister(session_id);

        for Departure { room_id, remaining } in self.rooms.remove_everywhere(session_id) {
            info!("Session {} removed from room {}", session_id, room_id);
            let notice = SignalMessage::user_left(room_id, session_id.clone());
            self.delivery.fan_out(remaining.iter(), &notice);
        }

        info!("Session disconnected: {}", session_id);
    }

    fn handle_join(&self, session_id: &SessionId, room_id: RoomId) {
        let members = self.rooms.join(&room_id, session_id);

        // A disconnect that ran between dispatch and here has already swept
        // the rooms, so undo the add instead of leaving a member nobody owns.
        if !self.sessions.contains(session_id) {
            warn!(
                "Session {} disconnected while joining room {}",
                session_id, room_id
            );
            self.rooms.leave(&room_id, session_id);
            return;
        }

        info!(
            "Session {} joined room {}. Room size: {}",
            session_id,
            room_id,
            members.len()
        );

        let notice = SignalMessage::user_joined(room_id, session_id.clone());
        self.delivery
            .fan_out(members.iter().filter(|member| *member != session_id), &notice);
    }

    fn handle_leave(&self, session_id: &SessionId, room_id: RoomId) {
        let Some(remaining) = self.rooms.leave(&room_id, session_id) else {
            debug!("Session {} is not in room {}", session_id, room_id);
            return;
        };
        info!("Session {} left room {}", session_id, room_id);

        let notice = SignalMessage::user_left(room_id, session_id.clone());
        self.delivery.fan_out(remaining.iter(), &notice);
    }

    fn handle_relay(&self, session_id: &SessionId, target_id: &SessionId, message: &SignalMessage) {
        self.delivery.deliver(target_id, message);
        debug!("{} sent from {} to {}", message.kind, session_id, target_id);
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}
