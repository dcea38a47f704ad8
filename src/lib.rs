pub mod auto_close;
pub mod camera;
pub mod components;
pub mod config;
pub mod game;
pub mod motion;
pub mod overlay;
pub mod room;
pub mod spawn;

// Curated re-exports
pub use components::{AxisBounces, Ball, BounceDirection};
pub use config::{ConfigReport, GameConfig};
pub use game::GamePlugin;
pub use motion::{step_axis, step_ball, RoomBounds};
