//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! ## Example
//!
//! ```toml
//! frame_rate_mode = "fixed"
//! fixed_frame_rate = 60.0
//! dock_threshold = 150.0
//! rng_seed = 7
//!
//! [resources]
//! home = ["water", "gold"]
//!
//! [[bodies]]
//! name = "home"
//! kind = "planet"
//! position = [0.0, 0.0, 0.0]
//! radius = 5000.0
//! surface_gravity = 9.8
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::catalog::ResourceKind;
use crate::constants::*;
use crate::error::{validate_non_negative, validate_positive, GameError, GameResult};
use crate::gravity::FrameRateMode;
use crate::world::BodySpec;
use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

/// Path of the optional configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable flight, gravity and economy configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Gravity ───────────────────────────────────────────────────────────────
    pub gravity_const: f64,
    pub initial_frame_rate: f64,
    pub frame_rate_mode: FrameRateMode,
    pub fixed_frame_rate: f64,

    // ── Flight ────────────────────────────────────────────────────────────────
    pub base_acceleration: f64,
    pub boost_acceleration: f64,
    pub acceleration_factor: f64,
    pub boost_velocity_multiplier: f64,
    pub key_press_rate_cap: u32,

    // ── Docking ───────────────────────────────────────────────────────────────
    pub dock_threshold: f64,
    pub spawn_point: [f64; 3],

    // ── Economy ───────────────────────────────────────────────────────────────
    pub initial_delta_v: f64,
    pub ore_capacity_kg: f64,
    pub draws_per_mining_action: u32,
    /// Fixed seed for mining draws; `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,

    // ── World ─────────────────────────────────────────────────────────────────
    /// Replaces the built-in solar system when present.
    pub bodies: Option<Vec<BodySpec>>,
    /// Extra or replacement planet → resource listings.
    pub resources: HashMap<String, Vec<ResourceKind>>,

    // ── Presentation ──────────────────────────────────────────────────────────
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Gravity
            gravity_const: GRAVITY_CONST,
            initial_frame_rate: INITIAL_FRAME_RATE,
            frame_rate_mode: FrameRateMode::Sampled,
            fixed_frame_rate: FIXED_FRAME_RATE,
            // Flight
            base_acceleration: BASE_ACCELERATION,
            boost_acceleration: BOOST_ACCELERATION,
            acceleration_factor: ACCELERATION_FACTOR,
            boost_velocity_multiplier: BOOST_VELOCITY_MULTIPLIER,
            key_press_rate_cap: KEY_PRESS_RATE_CAP,
            // Docking
            dock_threshold: DOCK_THRESHOLD,
            spawn_point: SPAWN_POINT,
            // Economy
            initial_delta_v: INITIAL_DELTA_V,
            ore_capacity_kg: ORE_CAPACITY_KG,
            draws_per_mining_action: DRAWS_PER_MINING_ACTION,
            rng_seed: None,
            // World
            bodies: None,
            resources: HashMap::new(),
            // Presentation
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reject values that would break the simulation invariants.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("gravity_const", self.gravity_const)?;
        validate_positive("initial_frame_rate", self.initial_frame_rate)?;
        validate_positive("fixed_frame_rate", self.fixed_frame_rate)?;
        validate_non_negative("base_acceleration", self.base_acceleration)?;
        validate_non_negative("boost_acceleration", self.boost_acceleration)?;
        validate_positive("acceleration_factor", self.acceleration_factor)?;
        validate_positive("boost_velocity_multiplier", self.boost_velocity_multiplier)?;
        validate_non_negative("dock_threshold", self.dock_threshold)?;
        validate_non_negative("initial_delta_v", self.initial_delta_v)?;
        validate_positive("ore_capacity_kg", self.ore_capacity_kg)?;
        if self.key_press_rate_cap == 0 {
            return Err(GameError::UnsafeConstant {
                name: "key_press_rate_cap",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        if self.draws_per_mining_action == 0 {
            return Err(GameError::UnsafeConstant {
                name: "draws_per_mining_action",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        if self.spawn_point.iter().any(|c| !c.is_finite()) {
            return Err(GameError::UnsafeConstant {
                name: "spawn_point",
                value: f64::NAN,
                safe_range: "finite coordinates",
            });
        }
        Ok(())
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with the values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged but do not abort the game.  A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml(&contents) {
            Ok(loaded) => match loaded.validate() {
                Ok(()) => {
                    *config = loaded;
                    info!("Loaded game config from {CONFIG_PATH}");
                }
                Err(e) => warn!("Rejected {CONFIG_PATH}: {e}; using defaults"),
            },
            Err(e) => warn!("Failed to parse {CONFIG_PATH}: {e}; using defaults"),
        },
        Err(_) => info!("No {CONFIG_PATH} found; using compiled defaults"),
    }
}
