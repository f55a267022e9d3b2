use crate::model::room::RoomId;
use crate::model::session::SessionId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use std::fmt;
use thiserror::Error;

/// Value of the `type` field of a signaling frame.
///
/// Unrecognized strings decode to [`SignalKind::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    Join,
    Leave,
    Offer,
    Answer,
    IceCandidate,
    UserJoined,
    UserLeft,
    /// Reserved participant-list message. Nothing produces or consumes it yet.
    RoomInfo,
    #[serde(other)]
    Unknown,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Join => "join",
            SignalKind::Leave => "leave",
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::IceCandidate => "ice-candidate",
            SignalKind::UserJoined => "user-joined",
            SignalKind::UserLeft => "user-left",
            SignalKind::RoomInfo => "room-info",
            SignalKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("signal codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("`{0}` message without roomId")]
    MissingRoomId(SignalKind),

    #[error("`{0}` message without targetId")]
    MissingTargetId(SignalKind),
}

/// One JSON text frame exchanged over the signaling socket.
///
/// `payload` is kept as raw JSON and written back exactly as received, so SDP
/// and ICE blobs pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMessage {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<SessionId>,
    #[serde(
        default,
        deserialize_with = "present_payload",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<Box<RawValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<SessionId>>,
}

impl SignalMessage {
    pub fn new(kind: SignalKind) -> Self {
        Self {
            kind,
            room_id: None,
            sender_id: None,
            target_id: None,
            payload: None,
            participants: None,
        }
    }

    /// Notification sent to existing members when `sender_id` enters `room_id`.
    pub fn user_joined(room_id: RoomId, sender_id: SessionId) -> Self {
        Self {
            room_id: Some(room_id),
            sender_id: Some(sender_id),
            ..Self::new(SignalKind::UserJoined)
        }
    }

    /// Notification sent to remaining members when `sender_id` leaves `room_id`.
    pub fn user_left(room_id: RoomId, sender_id: SessionId) -> Self {
        Self {
            room_id: Some(room_id),
            sender_id: Some(sender_id),
            ..Self::new(SignalKind::UserLeft)
        }
    }

    pub fn with_sender(mut self, sender_id: SessionId) -> Self {
        self.sender_id = Some(sender_id);
        self
    }

    pub fn from_json(text: &str) -> Result<Self, SignalError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, SignalError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Raw payload text, if any.
    pub fn payload_str(&self) -> Option<&str> {
        self.payload.as_deref().map(RawValue::get)
    }
}

/// A `payload` key that is present, even as `null`, is kept verbatim.
fn present_payload<'de, D>(deserializer: D) -> Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

/// A client frame after validation, one variant per handling contract.
#[derive(Debug)]
pub enum InboundSignal {
    /// Enter a room. Existing members get `user-joined`.
    Join { room_id: RoomId },
    /// Leave a room. Remaining members get `user-left`.
    Leave { room_id: RoomId },
    /// offer / answer / ice-candidate, forwarded verbatim to `target_id` only.
    Relay {
        target_id: SessionId,
        message: SignalMessage,
    },
    /// Accepted but without effect: `room-info`, server-only notification
    /// types sent by a client, and unrecognized types.
    Inert { kind: SignalKind },
}

impl TryFrom<SignalMessage> for InboundSignal {
    type Error = SignalError;

    fn try_from(message: SignalMessage) -> Result<Self, Self::Error> {
        let kind = message.kind;
        match kind {
            SignalKind::Join | SignalKind::Leave => {
                let room_id = message
                    .room_id
                    .filter(|room_id| !room_id.is_empty())
                    .ok_or(SignalError::MissingRoomId(kind))?;

                if kind == SignalKind::Join {
                    Ok(InboundSignal::Join { room_id })
                } else {
                    Ok(InboundSignal::Leave { room_id })
                }
            }
            SignalKind::Offer | SignalKind::Answer | SignalKind::IceCandidate => {
                let target_id = message
                    .target_id
                    .clone()
                    .filter(|target_id| !target_id.is_empty())
                    .ok_or(SignalError::MissingTargetId(kind))?;

                Ok(InboundSignal::Relay { target_id, message })
            }
            SignalKind::UserJoined
            | SignalKind::UserLeft
            | SignalKind::RoomInfo
            | SignalKind::Unknown => Ok(InboundSignal::Inert { kind }),
        }
    }
}
