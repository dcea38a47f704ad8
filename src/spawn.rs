use bevy::prelude::*;
use rand::Rng;

use crate::components::{AxisBounces, Ball, BounceDirection};
use crate::config::GameConfig;
use crate::motion::RoomBounds;

pub struct BallSpawnPlugin;

impl Plugin for BallSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_balls);
    }
}

fn spawn_balls(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<GameConfig>,
) {
    let bounds = RoomBounds::from(&cfg.room);
    let sphere = Sphere::new(cfg.balls.radius)
        .mesh()
        .ico(cfg.balls.subdivisions)
        .expect("icosphere subdivision count");
    let sphere_handle = meshes.add(sphere);
    let mut rng = rand::thread_rng();

    // Running counters stagger the starting parity (and so the initial
    // heading) across consecutive balls.
    let (mut ctr_x, mut ctr_y, mut ctr_z) = (0u32, 1u32, 2u32);

    for _ in 0..cfg.balls.count {
        let x = rng.gen_range(bounds.min.x..bounds.max.x);
        let y = rng.gen_range(bounds.min.y..bounds.max.y);
        let z = rng.gen_range(bounds.min.z..bounds.max.z);
        let color = Color::srgb(rng.gen(), rng.gen(), rng.gen());
        let material = materials.add(StandardMaterial {
            base_color: color,
            ..default()
        });

        let contacts = AxisBounces(UVec3::new(ctr_x % 2, ctr_y % 2, ctr_z % 2));
        ctr_x += 1;
        ctr_y += 1;
        ctr_z += 1;

        commands.spawn((
            Mesh3d(sphere_handle.clone()),
            MeshMaterial3d(material),
            Transform::from_xyz(x, y, z),
            Ball,
            BounceDirection::from_parity(contacts),
            contacts,
        ));
    }
    info!("Spawned {} balls", cfg.balls.count);
}
