//! Rocket rendering: lathed hull mesh, tier-tinted engine rings, mining laser.
//!
//! The rocket always sits at the render origin (see [`crate::graphics`]); only
//! its orientation changes, following the thrust heading.
//!
//! | Part         | Mesh                          | Driven by                         |
//! |--------------|-------------------------------|-----------------------------------|
//! | Hull         | custom lathe (`bevy_mesh`)    | heading                           |
//! | Engine rings | `Torus`                       | `FlightTelemetry::tier`           |
//! | Laser beam   | `Cylinder`                    | `FlightTelemetry::laser_active`   |

use super::state::{FlightState, Player};
use crate::economy::TechTier;
use crate::menu::GameState;
use crate::telemetry::FlightTelemetry;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Engine ring child of the rocket; its material is recoloured per tier.
#[derive(Component)]
pub struct EngineRing;

/// Mining beam child of the rocket.
#[derive(Component)]
pub struct LaserBeam;

/// Length of the mining beam in render units.
const LASER_LENGTH: f32 = 120.0;

pub struct RocketRenderPlugin;

impl Plugin for RocketRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_rocket)
            .add_systems(
                Update,
                (
                    rocket_orientation_system,
                    engine_tint_system,
                    laser_visibility_system,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Side profile of the hull as `(radius, height)` pairs from tail to nose.
fn hull_profile() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, -6.0),
        Vec2::new(1.6, -6.0),
        Vec2::new(1.8, -4.0),
        Vec2::new(1.8, 3.0),
        Vec2::new(1.2, 5.5),
        Vec2::new(0.0, 8.0),
    ]
}

/// Revolve a `(radius, height)` profile around local +Y.
///
/// Produces `segments` columns of quads between consecutive profile points.
/// Normals are the per-ring outward direction tilted by the profile slope.
pub fn lathe_mesh(profile: &[Vec2], segments: u32) -> Mesh {
    let rings = profile.len() as u32;
    debug_assert!(rings >= 2 && segments >= 3);

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity((rings * (segments + 1)) as usize);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(positions.capacity());
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(positions.capacity());

    for (i, point) in profile.iter().enumerate() {
        let prev = profile[i.saturating_sub(1)];
        let next = profile[(i + 1).min(profile.len() - 1)];
        let slope = next - prev;
        // Outward normal of the profile curve in the (radius, height) plane.
        let profile_normal = Vec2::new(slope.y, -slope.x).normalize_or(Vec2::X);

        for s in 0..=segments {
            let theta = s as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = theta.sin_cos();
            positions.push([point.x * cos, point.y, point.x * sin]);
            normals.push([profile_normal.x * cos, profile_normal.y, profile_normal.x * sin]);
            uvs.push([s as f32 / segments as f32, i as f32 / (rings - 1) as f32]);
        }
    }

    let stride = segments + 1;
    let mut indices: Vec<u32> = Vec::with_capacity(((rings - 1) * segments * 6) as usize);
    for ring in 0..rings - 1 {
        for s in 0..segments {
            let a = ring * stride + s;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

fn engine_material(tier: TechTier) -> StandardMaterial {
    StandardMaterial {
        base_color: tier.engine_color(),
        emissive: tier.engine_color().to_linear() * 4.0,
        ..default()
    }
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Spawn the rocket with its engine rings and (hidden) laser.
pub fn spawn_rocket(
    mut commands: Commands,
    existing: Query<(), With<Player>>,
    telemetry: Res<FlightTelemetry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !existing.is_empty() {
        return;
    }

    let hull = meshes.add(lathe_mesh(&hull_profile(), 24));
    let hull_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.85, 0.9),
        metallic: 0.6,
        perceptual_roughness: 0.4,
        ..default()
    });
    let ring = meshes.add(Torus::new(1.1, 1.7));
    let ring_material = materials.add(engine_material(telemetry.tier));
    let beam = meshes.add(Cylinder::new(0.3, LASER_LENGTH));
    let beam_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.2, 0.2),
        emissive: LinearRgba::rgb(6.0, 0.5, 0.5),
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            Player,
            Mesh3d(hull),
            MeshMaterial3d(hull_material),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|rocket| {
            for y in [-5.5, -4.5] {
                rocket.spawn((
                    Mesh3d(ring.clone()),
                    MeshMaterial3d(ring_material.clone()),
                    Transform::from_xyz(0.0, y, 0.0),
                    EngineRing,
                ));
            }
            rocket.spawn((
                Mesh3d(beam),
                MeshMaterial3d(beam_material),
                Transform::from_xyz(0.0, 8.0 + LASER_LENGTH / 2.0, 0.0),
                Visibility::Hidden,
                LaserBeam,
            ));
        });
    info!("Rocket spawned");
}

// ── Per-frame ─────────────────────────────────────────────────────────────────

/// Point the rocket's nose (local +Y) along the thrust heading.
pub fn rocket_orientation_system(
    flight: Res<FlightState>,
    mut rocket: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = rocket.single_mut() else {
        return;
    };
    let heading = flight.heading.as_vec3().normalize_or(Vec3::NEG_Z);
    let rotation = Quat::from_rotation_arc(Vec3::Y, heading);
    if transform.rotation != rotation {
        transform.rotation = rotation;
    }
}

/// Recolour the shared engine-ring material when the tier changes.
pub fn engine_tint_system(
    telemetry: Res<FlightTelemetry>,
    rings: Query<&MeshMaterial3d<StandardMaterial>, With<EngineRing>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut shown: Local<Option<TechTier>>,
) {
    if *shown == Some(telemetry.tier) {
        return;
    }
    for handle in rings.iter() {
        if let Some(material) = materials.get_mut(&handle.0) {
            *material = engine_material(telemetry.tier);
        }
    }
    if !rings.is_empty() {
        *shown = Some(telemetry.tier);
    }
}

/// Show the beam exactly while the laser is active.
pub fn laser_visibility_system(
    telemetry: Res<FlightTelemetry>,
    mut beams: Query<&mut Visibility, With<LaserBeam>>,
) {
    let wanted = if telemetry.laser_active {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in beams.iter_mut() {
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}
