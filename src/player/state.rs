//! Player components and resources.
//!
//! Flight state is a single [`FlightState`] resource mutated once per tick by
//! the systems in [`super::control`].  All of its behaviour is expressed as
//! plain methods so it can be tested without an `App`.

use crate::economy::RocketEconomy;
use bevy::math::DVec3;
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for the rocket entity.
#[derive(Component)]
pub struct Player;

// ── Status and movement classification ────────────────────────────────────────

/// Persistent player state.
///
/// `Docked` and `Dead` are entered by proximity/collision and only left by an
/// explicit launch action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerStatus {
    #[default]
    Flying,
    Docked,
    Dead,
}

impl PlayerStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Flying => "flying",
            Self::Docked => "docked",
            Self::Dead => "dead",
        }
    }
}

/// One of the six thrust axes, relative to the camera heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrustDirection {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl ThrustDirection {
    pub const ALL: [ThrustDirection; 6] = [
        Self::Forward,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
    ];

    /// Unit world-space vector for this direction given a forward `heading`.
    ///
    /// Up/down are always world ±Y.  Left/right are perpendicular to both the
    /// heading and world up; a heading parallel to Y has no horizontal frame
    /// and yields a zero vector for left/right.
    pub fn vector(self, heading: DVec3) -> DVec3 {
        let forward = heading.normalize_or_zero();
        let right = forward.cross(DVec3::Y).normalize_or_zero();
        match self {
            Self::Forward => forward,
            Self::Back => -forward,
            Self::Left => -right,
            Self::Right => right,
            Self::Up => DVec3::Y,
            Self::Down => DVec3::NEG_Y,
        }
    }
}

/// Transient per-tick classification of the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementClass {
    #[default]
    Idle,
    Thrusting(ThrustDirection),
    Boosting,
    Mining,
}

// ── Flight state ──────────────────────────────────────────────────────────────

/// Integrator state of the rocket.
///
/// `velocity` is a per-tick displacement: `position += velocity` every tick.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlightState {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Velocity at the end of the previous tick (acceleration telemetry).
    pub previous_velocity: DVec3,
    /// Velocity captured when boost was activated; restored on release.
    pub pre_boost_velocity: DVec3,
    pub is_boosting: bool,
    pub base_acceleration: f64,
    pub boost_acceleration: f64,
    /// Current per-tick thrust increment: base or boost acceleration.
    pub acceleration_rate: f64,
    /// Forward direction supplied by the camera rig.
    pub heading: DVec3,
    pub status: PlayerStatus,
    pub movement: MovementClass,
    /// Set on launch; suppresses re-docking until the dock zone is left.
    pub dock_grace: bool,
    pub spawn_point: DVec3,
}

impl Default for FlightState {
    fn default() -> Self {
        Self::new(
            DVec3::from_array(crate::constants::SPAWN_POINT),
            crate::constants::BASE_ACCELERATION,
            crate::constants::BOOST_ACCELERATION,
        )
    }
}

impl FlightState {
    /// A stationary rocket at `spawn_point`, facing world −Z.
    pub fn new(spawn_point: DVec3, base_acceleration: f64, boost_acceleration: f64) -> Self {
        Self {
            position: spawn_point,
            velocity: DVec3::ZERO,
            previous_velocity: DVec3::ZERO,
            pre_boost_velocity: DVec3::ZERO,
            is_boosting: false,
            base_acceleration,
            boost_acceleration,
            acceleration_rate: base_acceleration,
            heading: DVec3::NEG_Z,
            status: PlayerStatus::Flying,
            movement: MovementClass::Idle,
            dock_grace: false,
            spawn_point,
        }
    }

    /// Thrust increment actually available: zero once delta-V is exhausted.
    #[inline]
    pub fn effective_rate(&self, economy: &RocketEconomy) -> f64 {
        if economy.has_fuel() {
            self.acceleration_rate
        } else {
            0.0
        }
    }

    /// Apply one tick of thrust along `direction`, drawing delta-V.
    ///
    /// Returns the velocity change that was applied.
    pub fn apply_thrust(
        &mut self,
        direction: ThrustDirection,
        economy: &mut RocketEconomy,
        acceleration_factor: f64,
    ) -> DVec3 {
        let rate = self.effective_rate(economy);
        let dv = direction.vector(self.heading) * rate;
        self.velocity += dv;
        economy.consume_delta_v(rate * acceleration_factor);
        dv
    }

    /// Capture the current velocity, multiply it, and raise the thrust rate.
    ///
    /// No-op when already boosting.  Boost does not draw delta-V.
    pub fn start_boost(&mut self, multiplier: f64) {
        if self.is_boosting {
            return;
        }
        self.is_boosting = true;
        self.pre_boost_velocity = self.velocity;
        self.velocity *= multiplier;
        self.acceleration_rate = self.boost_acceleration;
    }

    /// Restore the exact pre-boost velocity and the base thrust rate.
    pub fn end_boost(&mut self) {
        if !self.is_boosting {
            return;
        }
        self.is_boosting = false;
        self.velocity = self.pre_boost_velocity;
        self.acceleration_rate = self.base_acceleration;
    }

    /// Semi-implicit Euler step: `velocity += gravity; position += velocity`.
    pub fn integrate(&mut self, gravity: DVec3) {
        self.velocity += gravity;
        self.position += self.velocity;
    }

    /// Move to the spawn point at rest, cancelling any boost.
    pub fn respawn(&mut self) {
        self.is_boosting = false;
        self.acceleration_rate = self.base_acceleration;
        self.position = self.spawn_point;
        self.velocity = DVec3::ZERO;
        self.pre_boost_velocity = DVec3::ZERO;
    }

    /// Leave `Docked` or `Dead` and resume flying.
    ///
    /// Returns `false` if the rocket was already flying.
    pub fn launch(&mut self) -> bool {
        if self.status == PlayerStatus::Flying {
            return false;
        }
        self.status = PlayerStatus::Flying;
        self.dock_grace = true;
        true
    }

    /// Resolve docking and collision against the nearest body's surface.
    ///
    /// `clearance` is the signed distance from the nearest surface.  A
    /// negative clearance kills the rocket; a clearance under
    /// `dock_threshold` docks it unless `dock_grace` is set.  Returns the new
    /// status when it changed this tick.
    pub fn resolve_proximity(&mut self, clearance: f64, dock_threshold: f64) -> Option<PlayerStatus> {
        match self.status {
            PlayerStatus::Docked => {
                self.velocity = DVec3::ZERO;
                return None;
            }
            PlayerStatus::Dead => return None,
            PlayerStatus::Flying => {}
        }

        if clearance < 0.0 {
            self.respawn();
            self.status = PlayerStatus::Dead;
            self.dock_grace = false;
            return Some(PlayerStatus::Dead);
        }

        if clearance < dock_threshold {
            if self.dock_grace {
                return None;
            }
            self.respawn();
            self.status = PlayerStatus::Docked;
            return Some(PlayerStatus::Docked);
        }

        self.dock_grace = false;
        None
    }

    /// Speed as displayed on the HUD.
    #[inline]
    pub fn display_speed(&self, acceleration_factor: f64) -> f64 {
        self.velocity.length() * acceleration_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flying() -> FlightState {
        FlightState::new(DVec3::new(10.0, 0.0, 10.0), 0.196, 200.0)
    }

    #[test]
    fn thrust_adds_rate_and_draws_delta_v() {
        let mut state = flying();
        let mut economy = RocketEconomy::default();
        state.apply_thrust(ThrustDirection::Forward, &mut economy, 10.0);
        assert!((state.velocity - DVec3::new(0.0, 0.0, -0.196)).length() < 1e-12);
        assert!((economy.delta_v - (676.0 - 1.96)).abs() < 1e-9);
    }

    #[test]
    fn thrust_is_gated_without_delta_v() {
        let mut state = flying();
        let mut economy = RocketEconomy {
            delta_v: 0.0,
            ..RocketEconomy::default()
        };
        let dv = state.apply_thrust(ThrustDirection::Up, &mut economy, 10.0);
        assert_eq!(dv, DVec3::ZERO);
        assert_eq!(state.velocity, DVec3::ZERO);
        assert_eq!(economy.delta_v, 0.0);
    }

    #[test]
    fn directions_are_orthonormal_frame() {
        let heading = DVec3::new(1.0, 0.0, 0.0);
        let right = ThrustDirection::Right.vector(heading);
        assert!((right - DVec3::Z).length() < 1e-12);
        assert_eq!(ThrustDirection::Left.vector(heading), -right);
        assert_eq!(ThrustDirection::Back.vector(heading), DVec3::NEG_X);
        for dir in ThrustDirection::ALL {
            assert!((dir.vector(heading).length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn boost_round_trip_restores_exact_velocity() {
        let mut state = flying();
        state.velocity = DVec3::new(0.1, -0.37, 2.5e-3);
        let before = state.velocity;
        state.start_boost(100.0);
        assert_eq!(state.velocity, before * 100.0);
        assert_eq!(state.acceleration_rate, 200.0);
        state.end_boost();
        assert_eq!(state.velocity, before);
        assert_eq!(state.acceleration_rate, 0.196);
    }

    #[test]
    fn boost_ignores_empty_tank() {
        // Known asymmetry: thrust is delta-V gated, boost is not.
        let mut state = flying();
        let mut economy = RocketEconomy {
            delta_v: 0.0,
            ..RocketEconomy::default()
        };
        state.velocity = DVec3::X;
        state.start_boost(100.0);
        assert!(state.is_boosting);
        assert_eq!(state.velocity, DVec3::X * 100.0);

        let dv = state.apply_thrust(ThrustDirection::Forward, &mut economy, 10.0);
        assert_eq!(dv, DVec3::ZERO);
        assert_eq!(state.velocity, DVec3::X * 100.0);
        assert_eq!(economy.delta_v, 0.0);
    }

    #[test]
    fn repeated_boost_activation_does_not_compound() {
        let mut state = flying();
        state.velocity = DVec3::X;
        state.start_boost(100.0);
        state.start_boost(100.0);
        assert_eq!(state.velocity, DVec3::X * 100.0);
    }

    #[test]
    fn close_approach_docks_and_locks_velocity() {
        let mut state = flying();
        state.position = DVec3::new(5_000.0, 0.0, 0.0);
        state.velocity = DVec3::new(3.0, 1.0, 0.0);
        assert_eq!(state.resolve_proximity(50.0, 100.0), Some(PlayerStatus::Docked));
        assert_eq!(state.velocity, DVec3::ZERO);
        assert_eq!(state.position, state.spawn_point);

        state.velocity = DVec3::ONE;
        assert_eq!(state.resolve_proximity(50.0, 100.0), None);
        assert_eq!(state.velocity, DVec3::ZERO);
    }

    #[test]
    fn negative_clearance_kills() {
        let mut state = flying();
        state.velocity = DVec3::ONE;
        assert_eq!(state.resolve_proximity(-5.0, 100.0), Some(PlayerStatus::Dead));
        assert_eq!(state.status, PlayerStatus::Dead);
        assert_eq!(state.velocity, DVec3::ZERO);
        assert_eq!(state.position, state.spawn_point);
    }

    #[test]
    fn launch_grants_grace_until_zone_is_left() {
        let mut state = flying();
        state.resolve_proximity(50.0, 100.0);
        assert!(state.launch());
        assert_eq!(state.status, PlayerStatus::Flying);
        assert_eq!(state.resolve_proximity(50.0, 100.0), None);
        assert_eq!(state.status, PlayerStatus::Flying);

        state.resolve_proximity(150.0, 100.0);
        assert!(!state.dock_grace);
        assert_eq!(state.resolve_proximity(50.0, 100.0), Some(PlayerStatus::Docked));
    }

    #[test]
    fn grace_does_not_prevent_collision() {
        let mut state = flying();
        state.dock_grace = true;
        assert_eq!(state.resolve_proximity(-1.0, 100.0), Some(PlayerStatus::Dead));
    }

    #[test]
    fn integrate_is_semi_implicit() {
        let mut state = flying();
        let start = state.position;
        state.velocity = DVec3::X;
        state.integrate(DVec3::Y);
        assert_eq!(state.velocity, DVec3::new(1.0, 1.0, 0.0));
        assert_eq!(state.position, start + DVec3::new(1.0, 1.0, 0.0));
    }
}
