//! World setup: body specs, the built-in solar system, and registry building.
//!
//! Bodies are described by [`BodySpec`] (TOML-friendly) and converted into
//! [`Body`] values once at startup.  Planet mass is derived from radius and
//! surface gravity (`m = g·r²/G`) unless given explicitly; bases use a fixed
//! radius and mass.
//!
//! The built-in system is Sol, its eight planets, Luna, and a home base parked
//! beside the spawn point so that respawning lands inside the base's dock zone.

use crate::catalog::ResourceCatalog;
use crate::config::GameConfig;
use crate::constants::{BASE_MASS, BASE_RADIUS, SOL_DISTANCE, SOL_RADIUS, SPAWN_POINT};
use crate::error::{GameError, GameResult};
use crate::gravity::{Body, BodyKind, BodyRegistry};
use bevy::math::DVec3;
use bevy::prelude::*;
use serde::Deserialize;

/// Name of the built-in home base.
pub const HOME_BASE: &str = "home base";

/// Declarative description of a body, as written in `assets/game.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodySpec {
    pub name: String,
    #[serde(default)]
    pub kind: BodyKind,
    pub position: [f64; 3],
    /// Defaults to [`BASE_RADIUS`] for bases.
    #[serde(default)]
    pub radius: Option<f64>,
    /// Surface gravity (m/s²) used to derive mass when `mass` is absent.
    #[serde(default)]
    pub surface_gravity: Option<f64>,
    #[serde(default)]
    pub mass: Option<f64>,
}

impl BodySpec {
    fn planet(name: &str, kind: BodyKind, position: DVec3, radius: f64, surface_gravity: f64) -> Self {
        Self {
            name: name.to_string(),
            kind,
            position: position.to_array(),
            radius: Some(radius),
            surface_gravity: Some(surface_gravity),
            mass: None,
        }
    }

    fn base(name: &str, position: DVec3) -> Self {
        Self {
            name: name.to_string(),
            kind: BodyKind::Base,
            position: position.to_array(),
            radius: None,
            surface_gravity: None,
            mass: None,
        }
    }

    /// Resolve radius and mass into a concrete [`Body`].
    pub fn to_body(&self, gravity_const: f64) -> GameResult<Body> {
        let radius = match (self.radius, self.kind) {
            (Some(r), _) => r,
            (None, BodyKind::Base) => BASE_RADIUS,
            (None, _) => {
                return Err(GameError::InvalidBody {
                    name: self.name.clone(),
                    reason: "radius is required for stars and planets",
                })
            }
        };
        let mass = match (self.mass, self.surface_gravity, self.kind) {
            (Some(m), _, _) => m,
            (None, Some(g), _) => Body::mass_from_surface_gravity(radius, g, gravity_const),
            (None, None, BodyKind::Base) => BASE_MASS,
            (None, None, _) => {
                return Err(GameError::InvalidBody {
                    name: self.name.clone(),
                    reason: "either mass or surface_gravity is required",
                })
            }
        };
        Ok(Body {
            name: self.name.clone(),
            kind: self.kind,
            position: DVec3::from_array(self.position),
            mass,
            radius,
        })
    }
}

/// The built-in solar system.
///
/// Sol sits at the origin.  Distances are compressed so that one astronomical
/// unit is Earth's distance from Sol, and radii are roughly 1/12 scale.
pub fn default_system() -> Vec<BodySpec> {
    let spawn = DVec3::from_array(SPAWN_POINT);
    let earth = DVec3::new(SOL_DISTANCE + 299_200.0, 0.0, SOL_DISTANCE);
    let au = earth.length();
    let orbit = |fraction_of_au: f64, angle_deg: f64| {
        let angle = angle_deg.to_radians();
        DVec3::new(angle.cos(), 0.0, angle.sin()) * au * fraction_of_au
    };

    vec![
        BodySpec::planet("sol", BodyKind::Star, DVec3::ZERO, SOL_RADIUS, 274.0),
        BodySpec::planet("mercury", BodyKind::Planet, orbit(0.39, 160.0), 203.0, 3.7),
        BodySpec::planet("venus", BodyKind::Planet, orbit(0.72, 95.0), 504.0, 8.87),
        BodySpec::planet("earth", BodyKind::Planet, earth, 531.0, 9.81),
        BodySpec::planet("luna", BodyKind::Planet, earth + DVec3::new(0.0, 0.0, -32_000.0), 145.0, 1.62),
        BodySpec::planet("mars", BodyKind::Planet, orbit(1.52, 20.0), 283.0, 3.71),
        BodySpec::planet("jupiter", BodyKind::Planet, orbit(5.2, 300.0), 5_825.0, 24.79),
        BodySpec::planet("saturn", BodyKind::Planet, orbit(9.5, 210.0), 4_853.0, 10.44),
        BodySpec::planet("uranus", BodyKind::Planet, orbit(19.2, 130.0), 2_113.0, 8.69),
        BodySpec::planet("neptune", BodyKind::Planet, orbit(30.1, 250.0), 2_052.0, 11.15),
        BodySpec::base(HOME_BASE, spawn + DVec3::new(0.0, 0.0, 180.0)),
    ]
}

/// Build the registry and catalog described by `config`.
pub fn build_world(config: &GameConfig) -> GameResult<(BodyRegistry, ResourceCatalog)> {
    let specs = config.bodies.clone().unwrap_or_else(default_system);
    let bodies = specs
        .iter()
        .map(|spec| spec.to_body(config.gravity_const))
        .collect::<GameResult<Vec<_>>>()?;
    let registry = BodyRegistry::build(bodies)?;

    let mut catalog = ResourceCatalog::default();
    for (planet, resources) in &config.resources {
        catalog.insert(planet.clone(), resources.clone());
    }
    Ok((registry, catalog))
}

/// Startup system: build the world from the loaded [`GameConfig`].
///
/// A broken configured world falls back to the built-in system.
pub fn setup_world(mut commands: Commands, config: Res<GameConfig>) {
    let (registry, catalog) = match build_world(&config) {
        Ok(world) => world,
        Err(e) => {
            warn!("Configured world is invalid ({e}); using the built-in system");
            let fallback = GameConfig {
                bodies: None,
                ..config.clone()
            };
            match build_world(&fallback) {
                Ok(world) => world,
                Err(e) => {
                    error!("Built-in world failed to build: {e}");
                    return;
                }
            }
        }
    };
    info!("World built with {} bodies", registry.len());
    commands.insert_resource(registry);
    commands.insert_resource(catalog);
}
