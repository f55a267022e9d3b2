mod delivery;
mod signaling_service;
mod ws_handler;

pub use delivery::*;
pub use signaling_service::*;
pub use ws_handler::*;
