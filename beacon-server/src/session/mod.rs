mod session_handle;
mod session_registry;

pub use session_handle::*;
pub use session_registry::*;
