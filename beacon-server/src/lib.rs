pub mod api;
mod app;
pub mod config;
pub mod room;
pub mod session;
pub mod signaling;

pub use app::{router, serve, serve_on};
pub use config::{ConfigError, ServerConfig};
pub use room::{Departure, MemberSnapshot, RoomSummary, RoomTable};
pub use session::{DeliveryError, SessionHandle, SessionRegistry, WsSessionHandle};
pub use signaling::{Delivery, SignalingService, ws_handler};
