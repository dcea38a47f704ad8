// Per-frame bounce simulation: every ball advances a fixed step along each
// axis independently and reflects off the room bounds, counting each contact.

use bevy::prelude::*;

use crate::components::{AxisBounces, Ball, BounceDirection};
use crate::config::{GameConfig, RoomConfig};

/// Closed per-axis intervals the balls ricochet between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl RoomBounds {
    pub fn new(half_extent: f32, height: f32) -> Self {
        Self {
            min: Vec3::new(-half_extent, 0.0, -half_extent),
            max: Vec3::new(half_extent, height, half_extent),
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

impl From<&RoomConfig> for RoomBounds {
    fn from(room: &RoomConfig) -> Self {
        Self::new(room.half_extent, room.height)
    }
}

/// Single-axis state transition. Reflect at either bound (counting the
/// contact and flipping direction), otherwise keep moving the current way.
/// A coordinate past a bound walks back one step per frame until interior.
pub fn step_axis(pos: f32, dir: f32, contacts: u32, lo: f32, hi: f32, step: f32) -> (f32, f32, u32) {
    if pos >= hi {
        (pos - step, -1.0, contacts + 1)
    } else if pos <= lo {
        (pos + step, 1.0, contacts + 1)
    } else {
        (pos + dir * step, dir, contacts)
    }
}

/// One frame of motion for one ball, all three axes independently. A corner
/// contact reflects up to all three in the same frame.
pub fn step_ball(
    mut pos: Vec3,
    mut dir: Vec3,
    mut contacts: UVec3,
    bounds: &RoomBounds,
    step: f32,
) -> (Vec3, Vec3, UVec3) {
    for axis in 0..3 {
        let (p, d, n) = step_axis(
            pos[axis],
            dir[axis],
            contacts[axis],
            bounds.min[axis],
            bounds.max[axis],
            step,
        );
        pos[axis] = p;
        dir[axis] = d;
        contacts[axis] = n;
    }
    (pos, dir, contacts)
}

pub struct BounceMotionPlugin;

impl Plugin for BounceMotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, move_balls);
    }
}

/// Runs once per rendered frame. The step is a fixed per-frame distance,
/// not time-scaled.
fn move_balls(
    cfg: Res<GameConfig>,
    mut q: Query<(&mut Transform, &mut BounceDirection, &mut AxisBounces), With<Ball>>,
) {
    let bounds = RoomBounds::from(&cfg.room);
    let step = cfg.balls.step;
    for (mut tf, mut dir, mut contacts) in &mut q {
        let (p, d, n) = step_ball(tf.translation, dir.0, contacts.0, &bounds, step);
        tf.translation = p;
        dir.0 = d;
        contacts.0 = n;
    }
}
