//! Scene setup: camera rig, sunlight, and body meshes on a floating origin.
//!
//! Simulation positions are `DVec3` and span tens of millions of units.  The
//! rocket is always drawn at the render origin and every body is placed at
//! `body.position - rocket.position`, converted to `f32` only after the
//! subtraction.

use crate::constants::{CAMERA_FAR, CAMERA_NEAR};
use crate::gravity::{BodyId, BodyKind, BodyRegistry};
use crate::menu::GameState;
use crate::player::input::resolve_input_system;
use crate::player::state::FlightState;
use crate::telemetry::telemetry_system;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::math::DVec3;
use bevy::prelude::*;

/// Links a rendered body to its registry entry.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyVisual(pub BodyId);

/// The directional light standing in for Sol.
#[derive(Component)]
pub struct SunLight;

/// Third-person camera orbiting the rocket.
///
/// The camera's forward vector is the rocket's thrust heading.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: -0.15,
            distance: 30.0,
        }
    }
}

impl OrbitCamera {
    const MIN_DISTANCE: f32 = 8.0;
    const MAX_DISTANCE: f32 = 400.0;
    const PITCH_LIMIT: f32 = 1.45;

    /// Camera rotation for the current yaw and pitch.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Camera translation relative to the rocket at the origin.
    pub fn translation(&self) -> Vec3 {
        self.rotation() * Vec3::new(0.0, 0.0, self.distance)
    }

    /// Apply a mouse drag (radians) and scroll (zoom steps).
    pub fn apply(&mut self, drag: Vec2, scroll: f32) {
        self.yaw -= drag.x;
        self.pitch = (self.pitch - drag.y).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.distance =
            (self.distance * (1.0 - scroll * 0.1)).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }

    /// World-space forward direction (where the camera looks).
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Playing), spawn_body_visuals)
            .add_systems(
                Update,
                (
                    orbit_camera_system.before(resolve_input_system),
                    (floating_origin_system, sun_light_system).after(telemetry_system),
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Spawn the orbit camera and the sun light.
pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(orbit.translation()).with_rotation(orbit.rotation()),
        orbit,
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            ..default()
        },
        Transform::default(),
        SunLight,
    ));
    info!("Camera and sunlight spawned");
}

/// Spawn one mesh per registered body.
pub fn spawn_body_visuals(
    mut commands: Commands,
    registry: Res<BodyRegistry>,
    existing: Query<(), With<BodyVisual>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !existing.is_empty() {
        return;
    }
    for (id, body) in registry.iter() {
        let radius = body.radius as f32;
        let (mesh, material) = match body.kind {
            BodyKind::Star => (
                meshes.add(Sphere::new(radius).mesh().uv(48, 24)),
                StandardMaterial {
                    base_color: Color::srgb(1.0, 0.85, 0.4),
                    emissive: LinearRgba::rgb(8.0, 6.0, 2.0),
                    unlit: true,
                    ..default()
                },
            ),
            BodyKind::Planet => (
                meshes.add(Sphere::new(radius).mesh().uv(32, 18)),
                StandardMaterial {
                    base_color: planet_color(id.0),
                    perceptual_roughness: 0.9,
                    ..default()
                },
            ),
            BodyKind::Base => (
                meshes.add(Cuboid::from_length(radius * 2.0)),
                StandardMaterial {
                    base_color: Color::srgb(0.6, 0.6, 0.65),
                    metallic: 0.7,
                    ..default()
                },
            ),
        };
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(material)),
            Transform::default(),
            BodyVisual(id),
            Name::new(body.name.clone()),
        ));
    }
    info!("Spawned {} body visuals", registry.len());
}

/// Deterministic muted tone per body index.
fn planet_color(seed: usize) -> Color {
    let h = (seed as u32).wrapping_mul(2_654_435_761);
    let hue = (h % 360) as f32;
    Color::hsl(hue, 0.35, 0.45)
}

/// Rotate the camera from mouse drag/scroll and publish its heading.
pub fn orbit_camera_system(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut camera: Query<(&mut OrbitCamera, &mut Transform)>,
    mut flight: ResMut<FlightState>,
) {
    let Ok((mut orbit, mut transform)) = camera.single_mut() else {
        return;
    };
    let drag = if buttons.pressed(MouseButton::Left) || buttons.pressed(MouseButton::Right) {
        motion.delta * 0.005
    } else {
        Vec2::ZERO
    };
    if drag != Vec2::ZERO || scroll.delta.y != 0.0 {
        orbit.apply(drag, scroll.delta.y);
    }
    transform.translation = orbit.translation();
    transform.rotation = orbit.rotation();

    let heading = orbit.forward().as_dvec3();
    if flight.heading != heading {
        flight.heading = heading;
    }
}

/// Place every body relative to the rocket.
pub fn floating_origin_system(
    flight: Res<FlightState>,
    registry: Res<BodyRegistry>,
    mut bodies: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in bodies.iter_mut() {
        if let Some(body) = registry.get(visual.0) {
            transform.translation = relative_translation(body.position, flight.position);
        }
    }
}

/// `target - origin` in f64, then narrowed to render space.
#[inline]
pub fn relative_translation(target: DVec3, origin: DVec3) -> Vec3 {
    (target - origin).as_vec3()
}

/// Point the sunlight from the star toward the rocket.
pub fn sun_light_system(
    flight: Res<FlightState>,
    registry: Res<BodyRegistry>,
    mut light: Query<&mut Transform, With<SunLight>>,
) {
    let Some((_, star)) = registry.iter().find(|(_, b)| b.kind == BodyKind::Star) else {
        return;
    };
    let direction = relative_translation(flight.position, star.position);
    if let Ok(mut transform) = light.single_mut() {
        *transform = Transform::default().looking_to(direction.normalize_or(Vec3::NEG_Z), Vec3::Y);
    }
}
