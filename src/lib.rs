//! Prospector: a 3D space-flight and planetary mining game.
//!
//! The core is a per-tick simulation: single-source gravity from the nearest
//! body, thrust and boost with a delta-V budget, weighted-random mining draws,
//! and a tier ladder bought with ore sales.  Presentation (HUD, buttons,
//! meshes, camera) reads a telemetry snapshot written at the end of each tick.

pub mod buttons;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod economy;
pub mod error;
pub mod graphics;
pub mod gravity;
pub mod hud;
pub mod menu;
pub mod mining;
pub mod player;
pub mod simulation;
pub mod telemetry;
pub mod world;
