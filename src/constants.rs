//! Centralised flight, gravity and economy constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::GameConfig::default`] mirrors this
//! file; `assets/game.toml` can override any subset at startup.
//!
//! ## Units
//!
//! Distances are world units (treated as metres).  Velocities are world units
//! per tick: the integrator is a per-tick explicit Euler step, not a
//! continuous-time one, so "speed" on the HUD is `|v| × ACCELERATION_FACTOR`.

// ── Gravity ───────────────────────────────────────────────────────────────────

/// Gravitational constant used by both the field and planet-mass derivation.
pub const GRAVITY_CONST: f64 = 0.000_000_000_067;

/// Frame-rate estimate used before the first one-second sample completes.
pub const INITIAL_FRAME_RATE: f64 = 20.0;

/// Extra divisor applied alongside the sampled frame rate.
///
/// `g = G·m / d² / (frame_rate × FRAME_RATE_DAMPING)`.
pub const FRAME_RATE_DAMPING: f64 = 10.0;

/// Frame rate used when `frame_rate_mode = "fixed"`.
pub const FIXED_FRAME_RATE: f64 = 60.0;

// ── Flight ────────────────────────────────────────────────────────────────────

/// Velocity added per tick by a held thrust input.
pub const BASE_ACCELERATION: f64 = 0.196;

/// Acceleration rate while boosting.
pub const BOOST_ACCELERATION: f64 = 200.0;

/// Scale between per-tick velocity units and displayed m/s.
///
/// Also multiplies thrust to give the delta-V drawn per thrust tick
/// (`0.196 × 10 = 1.96`).
pub const ACCELERATION_FACTOR: f64 = 10.0;

/// Velocity multiplier applied once when boost is activated.
pub const BOOST_VELOCITY_MULTIPLIER: f64 = 100.0;

/// Maximum discrete key presses accepted per rolling one-second window.
pub const KEY_PRESS_RATE_CAP: u32 = 10;

// ── Docking ───────────────────────────────────────────────────────────────────

/// Surface clearance below which the rocket docks with the nearest body.
pub const DOCK_THRESHOLD: f64 = 100.0;

/// Multiple of the dock threshold inside which the HUD shows the approach hint.
pub const DOCK_APPROACH_FACTOR: f64 = 5.0;

// ── Economy ───────────────────────────────────────────────────────────────────

/// Delta-V of a fresh chemical-tier rocket.
pub const INITIAL_DELTA_V: f64 = 676.0;

/// Maximum ore the rocket can carry (kg).
pub const ORE_CAPACITY_KG: f64 = 10_000.0;

/// Resource draws performed by one mining action.
pub const DRAWS_PER_MINING_ACTION: u32 = 100;

// ── World ─────────────────────────────────────────────────────────────────────

/// Radius of Sol in the default system.
pub const SOL_RADIUS: f64 = 58_178.0;

/// Offset of the Earth neighbourhood from Sol (at the origin) along X and Z.
pub const SOL_DISTANCE: f64 = 21_040_000.0 + SOL_RADIUS;

/// Default rocket spawn point (beside the home base near Earth).
pub const SPAWN_POINT: [f64; 3] = [
    SOL_DISTANCE + 299_200.0 - 4_500.0,
    -15.0,
    SOL_DISTANCE + 13_000.0,
];

/// Radius of a space base.
pub const BASE_RADIUS: f64 = 100.0;

/// Mass of a space base.
pub const BASE_MASS: f64 = 1_000.0;

// ── Presentation ──────────────────────────────────────────────────────────────

/// Font size for HUD text lines.
pub const HUD_FONT_SIZE: f32 = 16.0;

/// Camera far clip plane; the default system is tens of millions of units wide.
pub const CAMERA_FAR: f32 = 1.2e12;

/// Camera near clip plane; large enough to avoid depth fighting on planets.
pub const CAMERA_NEAR: f32 = 5.0;
