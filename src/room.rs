// Static scene: the wireframe room the balls live in, plus lighting.

use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

use crate::config::GameConfig;

pub struct RoomPlugin;

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(0x50, 0x50, 0x50)))
            .insert_resource(AmbientLight {
                color: Color::srgb_u8(0x60, 0x60, 0x60),
                brightness: 400.0,
                ..default()
            })
            .add_systems(Startup, setup_room);
    }
}

fn setup_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<GameConfig>,
) {
    let room = &cfg.room;
    let mesh = grid_box_lines(
        room.half_extent * 2.0,
        room.height,
        room.half_extent * 2.0,
        room.grid_segments,
    );
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0xaa, 0xaa, 0xaa),
            unlit: true,
            ..default()
        })),
        // Box is centered on the origin; lift it so the floor sits at y = 0.
        Transform::from_xyz(0.0, room.height * 0.5, 0.0),
    ));

    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Line-list mesh of a box wireframe with `segments` grid subdivisions per
/// face edge, centered on the origin.
fn grid_box_lines(width: f32, height: f32, depth: f32, segments: u32) -> Mesh {
    let half = Vec3::new(width, height, depth) * 0.5;
    let steps = segments.max(1);
    let mut positions: Vec<[f32; 3]> = Vec::new();

    // Lines run parallel to one axis, placed on the grid of the other two.
    // Only pairs touching a face edge lie on the surface; the rest would
    // cross the interior.
    for axis in 0..3 {
        let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
        for j in 0..=steps {
            for k in 0..=steps {
                if j != 0 && j != steps && k != 0 && k != steps {
                    continue;
                }
                let mut a = Vec3::ZERO;
                a[u] = -half[u] + 2.0 * half[u] * j as f32 / steps as f32;
                a[v] = -half[v] + 2.0 * half[v] * k as f32 / steps as f32;
                let mut b = a;
                a[axis] = -half[axis];
                b[axis] = half[axis];
                positions.push(a.to_array());
                positions.push(b.to_array());
            }
        }
    }

    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}
