pub mod model;
pub mod timer;
pub mod view;

pub use model::{OrbitInit, OrbitModel, OrbitMsg, OrbitScene};
pub use view::draw;

pub const HUB_RADIUS: f64 = 64.0;
pub const ORBIT_HEIGHT: i32 = 352;
pub const LOGO_SIZE: i32 = 40;
pub const RING_WIDTH: f64 = 2.0;
pub const SPOKE_WIDTH: f64 = 3.0;
