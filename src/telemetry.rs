//! Per-tick telemetry snapshot consumed by the HUD, buttons and renderers.
//!
//! [`telemetry_system`] is the last step of the tick.  It copies everything
//! the presentation layer needs into one [`FlightTelemetry`] resource so that
//! HUD and rendering systems never read simulation state directly.

use crate::catalog::ResourceCatalog;
use crate::config::GameConfig;
use crate::constants::DOCK_APPROACH_FACTOR;
use crate::economy::{RocketEconomy, TechTier, TradeReport};
use crate::gravity::{BodyRegistry, GravityField};
use crate::mining::{MiningLaser, OreBatch};
use crate::player::input::{InputFrame, InputToken};
use crate::player::state::{FlightState, PlayerStatus};
use bevy::math::DVec3;
use bevy::prelude::*;

// ── Acceleration meter ────────────────────────────────────────────────────────

/// Accumulates per-tick velocity changes and publishes their magnitude once
/// per wall-clock second.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccelerationMeter {
    accumulated: DVec3,
    elapsed: f64,
    reading: f64,
}

impl AccelerationMeter {
    /// Record one tick's velocity change.  Returns the new reading when the
    /// one-second window closes.
    pub fn record(&mut self, dt: f64, dv: DVec3, acceleration_factor: f64) -> Option<f64> {
        self.accumulated += dv;
        self.elapsed += dt;
        if self.elapsed < 1.0 {
            return None;
        }
        self.reading = self.accumulated.length() * acceleration_factor;
        self.accumulated = DVec3::ZERO;
        self.elapsed = 0.0;
        Some(self.reading)
    }

    /// Last published acceleration (m/s²).
    #[inline]
    pub fn reading(&self) -> f64 {
        self.reading
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Everything the presentation layer shows, refreshed once per tick.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlightTelemetry {
    pub position: DVec3,
    pub speed: f64,
    pub acceleration: f64,
    pub delta_v: f64,
    pub nearest_body: String,
    /// Signed distance to the nearest body's surface.
    pub surface_distance: f64,
    pub resources: String,
    pub ore_mass_kg: f64,
    pub ore_value: f64,
    pub currency: f64,
    pub tier: TechTier,
    pub laser_active: bool,
    /// Within the approach band of the nearest body's dock zone.
    pub near_dock: bool,
    pub status: PlayerStatus,
    pub input: InputToken,
    pub notice: Option<String>,
    pub meter: AccelerationMeter,
}

impl Default for FlightTelemetry {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            speed: 0.0,
            acceleration: 0.0,
            delta_v: 0.0,
            nearest_body: String::new(),
            surface_distance: f64::INFINITY,
            resources: String::new(),
            ore_mass_kg: 0.0,
            ore_value: 0.0,
            currency: 0.0,
            tier: TechTier::Chemical,
            laser_active: false,
            near_dock: false,
            status: PlayerStatus::Flying,
            input: InputToken::None,
            notice: None,
            meter: AccelerationMeter::default(),
        }
    }
}

impl FlightTelemetry {
    /// HUD lines in display order.
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Speed: {:.2} m/s", self.speed),
            format!("Acceleration: {:.2} m/s²", self.acceleration),
            format!("Delta-V: {:.2} m/s", self.delta_v),
            format!("Distance: {:.2} m", self.surface_distance),
            format!("Planet: {}", self.nearest_body),
            format!("Resources: {}", self.resources),
            format!("Ore mass: {:.0} kg", self.ore_mass_kg),
            format!("Ore value: {:.2}", self.ore_value),
            format!("Money: {:.2}", self.currency),
            format!("Tier: {}", self.tier.label()),
        ];
        match self.status {
            PlayerStatus::Docked => lines.push("DOCKED: press L to launch".to_string()),
            PlayerStatus::Dead => lines.push("DESTROYED: press L to respawn".to_string()),
            PlayerStatus::Flying if self.near_dock => {
                lines.push(format!("Approaching {}", self.nearest_body))
            }
            PlayerStatus::Flying => {}
        }
        if let Some(notice) = &self.notice {
            lines.push(notice.clone());
        }
        lines
    }
}

// ── System ────────────────────────────────────────────────────────────────────

/// Final tick step: publish the snapshot and roll `previous_velocity`.
#[allow(clippy::too_many_arguments)]
pub fn telemetry_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    field: Res<GravityField>,
    registry: Res<BodyRegistry>,
    catalog: Res<ResourceCatalog>,
    economy: Res<RocketEconomy>,
    batch: Res<OreBatch>,
    laser: Res<MiningLaser>,
    frame: Res<InputFrame>,
    report: Res<TradeReport>,
    mut flight: ResMut<FlightState>,
    mut telemetry: ResMut<FlightTelemetry>,
) {
    let dv = flight.velocity - flight.previous_velocity;
    if let Some(reading) = telemetry
        .meter
        .record(time.delta_secs_f64(), dv, config.acceleration_factor)
    {
        telemetry.acceleration = reading;
    }
    flight.previous_velocity = flight.velocity;

    let nearest = field.nearest.and_then(|id| registry.get(id));
    let (name, clearance) = nearest.map_or((String::new(), f64::INFINITY), |body| {
        (body.name.clone(), body.clearance(flight.position))
    });

    telemetry.position = flight.position;
    telemetry.speed = flight.display_speed(config.acceleration_factor);
    telemetry.delta_v = economy.delta_v;
    telemetry.resources = ResourceCatalog::display_list(catalog.resources_for(&name));
    telemetry.nearest_body = name;
    telemetry.surface_distance = clearance;
    telemetry.ore_mass_kg = batch.mass_kg;
    telemetry.ore_value = batch.value;
    telemetry.currency = economy.currency;
    telemetry.tier = economy.tier;
    telemetry.laser_active = laser.active;
    telemetry.near_dock = clearance < config.dock_threshold * DOCK_APPROACH_FACTOR;
    telemetry.status = flight.status;
    telemetry.input = frame.token;
    telemetry.notice.clone_from(&report.0);
}
