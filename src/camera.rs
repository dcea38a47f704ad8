use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::config::GameConfig;

/// Keep pitch just shy of the poles so look_at never degenerates.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, orbit_camera);
    }
}

/// Spherical-coordinate state for the drag-orbit / scroll-zoom camera.
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitController {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitController {
    pub fn transform(&self) -> Transform {
        let rot = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        let eye = self.target + rot * (Vec3::Z * self.distance);
        Transform::from_translation(eye).looking_at(self.target, Vec3::Y)
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<GameConfig>) {
    let cam = &cfg.camera;
    let controller = OrbitController {
        target: Vec3::new(0.0, cam.target_height, 0.0),
        distance: cam.distance,
        yaw: 0.0,
        pitch: 0.0,
    };
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: cam.fov_degrees.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        controller.transform(),
        controller,
    ));
}

fn orbit_camera(
    cfg: Res<GameConfig>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut q: Query<(&mut Transform, &mut OrbitController), With<Camera3d>>,
) {
    let Ok((mut tf, mut ctl)) = q.single_mut() else {
        return;
    };
    let cam = &cfg.camera;
    let mut changed = false;

    if buttons.pressed(MouseButton::Left) {
        for ev in motion.read() {
            ctl.yaw -= ev.delta.x * cam.orbit_sensitivity;
            ctl.pitch =
                (ctl.pitch - ev.delta.y * cam.orbit_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            changed = true;
        }
    } else {
        motion.clear();
    }

    for ev in wheel.read() {
        let lines = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 16.0,
        };
        ctl.distance =
            (ctl.distance - lines * cam.zoom_sensitivity).clamp(cam.min_distance, cam.max_distance);
        changed = true;
    }

    if changed {
        *tf = ctl.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_looks_at_target_from_configured_distance() {
        let ctl = OrbitController {
            target: Vec3::new(0.0, 1.6, 0.0),
            distance: 15.0,
            yaw: 0.0,
            pitch: 0.0,
        };
        let tf = ctl.transform();
        assert!((tf.translation - Vec3::new(0.0, 1.6, 15.0)).length() < 1e-4);
        let forward = tf.forward();
        assert!((forward.as_vec3() - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut ctl = OrbitController {
            target: Vec3::new(0.0, 1.6, 0.0),
            distance: 8.0,
            yaw: 0.0,
            pitch: 0.0,
        };
        for i in 0..32 {
            ctl.yaw = i as f32 * 0.3;
            ctl.pitch = ((i as f32 * 0.17).sin() * PITCH_LIMIT).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            let tf = ctl.transform();
            let d = (tf.translation - ctl.target).length();
            assert!((d - 8.0).abs() < 1e-3, "distance drifted to {d}");
        }
    }
}
