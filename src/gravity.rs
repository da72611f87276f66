//! Single-source gravity: each tick the nearest massive body pulls the rocket.
//!
//! This is deliberately not N-body gravity.  [`GravityField::update`] scans the
//! [`BodyRegistry`] for the closest body centre (ties go to the body registered
//! first) and caches it as a [`BodyId`].  [`GravityField::acceleration_vector`]
//! then points at that body with magnitude
//!
//! ```text
//! g = G · m / d²  /  (frame_rate × 10)
//! ```
//!
//! The frame-rate divisor keeps the per-tick velocity increment roughly
//! independent of tick rate.  In the default `Sampled` mode the rate is a
//! coarse sensor ([`FrameRateSampler`]) that counts ticks per wall-clock
//! second, so pull strength varies with client performance.  `Fixed` mode
//! pins the divisor instead.

use crate::constants::{FRAME_RATE_DAMPING, GRAVITY_CONST};
use crate::error::{GameError, GameResult};
use bevy::math::DVec3;
use bevy::prelude::*;
use serde::Deserialize;

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Index of a body in the [`BodyRegistry`] (registration order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// What a body is; affects only presentation and default mass rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    #[default]
    Planet,
    Base,
}

/// A massive body in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    pub position: DVec3,
    pub mass: f64,
    pub radius: f64,
}

impl Body {
    /// Mass of a body with the given radius and surface gravity: `g·r²/G`.
    pub fn mass_from_surface_gravity(radius: f64, surface_gravity: f64, gravity_const: f64) -> f64 {
        surface_gravity * radius * radius / gravity_const
    }

    /// Signed distance from `point` to the body surface (negative inside).
    #[inline]
    pub fn clearance(&self, point: DVec3) -> f64 {
        point.distance(self.position) - self.radius
    }
}

/// Every massive body, in registration order.
///
/// Built once at world setup.  Only positions may change afterwards (bases can
/// be repositioned); anything holding a [`BodyId`] must re-resolve it each tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    /// Validate and register `bodies` in order.
    pub fn build(bodies: Vec<Body>) -> GameResult<Self> {
        if bodies.is_empty() {
            return Err(GameError::EmptyBodyRegistry);
        }
        for body in &bodies {
            let reason = if !body.position.is_finite() {
                Some("position is not finite")
            } else if !(body.radius.is_finite() && body.radius > 0.0) {
                Some("radius must be positive")
            } else if !(body.mass.is_finite() && body.mass >= 0.0) {
                Some("mass must be non-negative")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(GameError::InvalidBody {
                    name: body.name.clone(),
                    reason,
                });
            }
        }
        Ok(Self { bodies })
    }

    #[inline]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Look a body up by name (first match).
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    /// Move a body.  Returns `false` if `id` is unknown.
    pub fn reposition(&mut self, id: BodyId, position: DVec3) -> bool {
        match self.bodies.get_mut(id.0) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }

    /// Nearest body centre to `point`; the first registered body wins ties.
    pub fn nearest(&self, point: DVec3) -> Option<(BodyId, f64)> {
        let mut best: Option<(BodyId, f64)> = None;
        for (id, body) in self.iter() {
            let distance = point.distance(body.position);
            match best {
                Some((_, closest)) if distance >= closest => {}
                _ => best = Some((id, distance)),
            }
        }
        best
    }
}

// ── Frame-rate sensor ─────────────────────────────────────────────────────────

/// How the gravity divisor's frame rate is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameRateMode {
    /// Count ticks over each wall-clock second.
    #[default]
    Sampled,
    /// Use `GameConfig::fixed_frame_rate`.
    Fixed,
}

/// Counts ticks and publishes a frame-rate estimate once per wall-clock second.
///
/// Not a smoothed average: the estimate is simply the tick count of the last
/// completed one-second window.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRateSampler {
    estimate: f64,
    frames: u32,
    elapsed: f64,
}

impl FrameRateSampler {
    pub fn new(initial_estimate: f64) -> Self {
        Self {
            estimate: initial_estimate,
            frames: 0,
            elapsed: 0.0,
        }
    }

    /// Record one tick that took `dt` seconds of wall-clock time.
    ///
    /// Returns `true` when a new estimate was published this tick.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= 1.0 {
            self.estimate = f64::from(self.frames);
            self.frames = 0;
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }
}

// ── Gravity field ─────────────────────────────────────────────────────────────

/// Per-tick gravity state for the player.
///
/// `nearest` is a derived index into the [`BodyRegistry`], recomputed every
/// tick and never owned.
#[derive(Resource, Debug, Clone)]
pub struct GravityField {
    pub gravity_const: f64,
    pub mode: FrameRateMode,
    pub fixed_frame_rate: f64,
    pub sampler: FrameRateSampler,
    pub nearest: Option<BodyId>,
    pub distance_to_nearest: f64,
    pub acceleration_magnitude: f64,
    /// Last vector returned by [`Self::acceleration_vector`].
    pub acceleration: DVec3,
}

impl Default for GravityField {
    fn default() -> Self {
        Self::new(
            GRAVITY_CONST,
            FrameRateMode::Sampled,
            crate::constants::INITIAL_FRAME_RATE,
            crate::constants::FIXED_FRAME_RATE,
        )
    }
}

impl GravityField {
    pub fn new(
        gravity_const: f64,
        mode: FrameRateMode,
        initial_frame_rate: f64,
        fixed_frame_rate: f64,
    ) -> Self {
        Self {
            gravity_const,
            mode,
            fixed_frame_rate,
            sampler: FrameRateSampler::new(initial_frame_rate),
            nearest: None,
            distance_to_nearest: f64::INFINITY,
            acceleration_magnitude: 0.0,
            acceleration: DVec3::ZERO,
        }
    }

    /// Frame rate currently fed into [`Self::gravity_magnitude`].
    pub fn estimated_frame_rate(&self) -> f64 {
        match self.mode {
            FrameRateMode::Sampled => self.sampler.estimate(),
            FrameRateMode::Fixed => self.fixed_frame_rate,
        }
    }

    /// Feed one tick's wall-clock duration to the frame-rate sensor.
    pub fn sample_frame(&mut self, dt: f64) {
        self.sampler.tick(dt);
    }

    /// Select the nearest body to `player_position`.
    pub fn update(&mut self, bodies: &BodyRegistry, player_position: DVec3) {
        match bodies.nearest(player_position) {
            Some((id, distance)) => {
                self.nearest = Some(id);
                self.distance_to_nearest = distance;
            }
            None => {
                self.nearest = None;
                self.distance_to_nearest = f64::INFINITY;
            }
        }
    }

    /// Damped inverse-square magnitude: `G·m/d² / (frame_rate × 10)`.
    ///
    /// Returns 0 for `distance <= 0` (the body's centre).
    pub fn gravity_magnitude(&self, distance: f64, mass: f64) -> f64 {
        if distance <= 0.0 {
            return 0.0;
        }
        let frame_rate = self.estimated_frame_rate();
        if frame_rate <= 0.0 {
            return 0.0;
        }
        (self.gravity_const * mass / (distance * distance)) / (frame_rate * FRAME_RATE_DAMPING)
    }

    /// Acceleration toward the cached nearest body.
    ///
    /// Also records the magnitude for telemetry.  Zero when no body is
    /// selected or the player sits exactly at its centre.
    pub fn acceleration_vector(&mut self, bodies: &BodyRegistry, player_position: DVec3) -> DVec3 {
        let Some(body) = self.nearest.and_then(|id| bodies.get(id)) else {
            self.acceleration_magnitude = 0.0;
            self.acceleration = DVec3::ZERO;
            return DVec3::ZERO;
        };
        let direction = (body.position - player_position).normalize_or_zero();
        let magnitude = self.gravity_magnitude(self.distance_to_nearest, body.mass);
        self.acceleration_magnitude = magnitude;
        self.acceleration = direction * magnitude;
        self.acceleration
    }
}
