mod room_routes;

pub use room_routes::*;
