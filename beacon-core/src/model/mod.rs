mod room;
mod session;
mod signaling;

pub use room::RoomId;
pub use session::SessionId;
pub use signaling::{InboundSignal, SignalError, SignalKind, SignalMessage};
