//! Input abstraction: raw keys and on-screen buttons → one [`InputToken`].
//!
//! Every tick the keyboard and the on-screen buttons are reduced to a single
//! token plus the boost modifier.  A pressed on-screen button wins over any
//! held key.  Boost (Space or the warp button) is tracked on its own so it
//! combines with thrust.  When the token changes, the new token is a press
//! *edge*; edges pass through the [`KeyPressLimiter`] before discrete actions
//! (boost activation, sell, upgrade, launch) may fire.  Continuous holds
//! (thrust, mining) are not rate-limited.

use super::state::ThrustDirection;
use bevy::prelude::*;

// ── Token ─────────────────────────────────────────────────────────────────────

/// The single input intent resolved for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputToken {
    #[default]
    None,
    Thrust(ThrustDirection),
    Boost,
    Mine,
    Sell,
    Upgrade,
    Launch,
}

impl InputToken {
    /// Button caption for this token.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Thrust(ThrustDirection::Forward) => "^",
            Self::Thrust(ThrustDirection::Back) => "v",
            Self::Thrust(ThrustDirection::Left) => "<",
            Self::Thrust(ThrustDirection::Right) => ">",
            Self::Thrust(ThrustDirection::Up) => "up",
            Self::Thrust(ThrustDirection::Down) => "down",
            Self::Boost => "warp",
            Self::Mine => "drill",
            Self::Sell => "sell ore",
            Self::Upgrade => "upgrade",
            Self::Launch => "launch",
        }
    }

    /// Whether this token triggers a one-shot action on its press edge.
    ///
    /// Boost is resolved as a modifier, not a token; see [`split_boost`].
    pub fn is_discrete(self) -> bool {
        matches!(self, Self::Sell | Self::Upgrade | Self::Launch)
    }
}

/// Key holding the boost modifier.
pub const BOOST_KEY: KeyCode = KeyCode::Space;

/// Keyboard bindings in priority order: the first held key wins.
///
/// Boost is not listed; see [`BOOST_KEY`].
pub const KEY_BINDINGS: [(KeyCode, InputToken); 10] = [
    (KeyCode::KeyW, InputToken::Thrust(ThrustDirection::Forward)),
    (KeyCode::KeyS, InputToken::Thrust(ThrustDirection::Back)),
    (KeyCode::KeyA, InputToken::Thrust(ThrustDirection::Left)),
    (KeyCode::KeyD, InputToken::Thrust(ThrustDirection::Right)),
    (KeyCode::KeyR, InputToken::Thrust(ThrustDirection::Up)),
    (KeyCode::KeyF, InputToken::Thrust(ThrustDirection::Down)),
    (KeyCode::KeyE, InputToken::Mine),
    (KeyCode::KeyG, InputToken::Sell),
    (KeyCode::KeyU, InputToken::Upgrade),
    (KeyCode::KeyL, InputToken::Launch),
];

/// Token for the currently held keys, or [`InputToken::None`].
pub fn keyboard_token(keys: &ButtonInput<KeyCode>) -> InputToken {
    KEY_BINDINGS
        .iter()
        .find(|(key, _)| keys.pressed(*key))
        .map_or(InputToken::None, |&(_, token)| token)
}

/// Combine the two sources; a pressed button beats the keyboard.
#[inline]
pub fn resolve_token(button: InputToken, keyboard: InputToken) -> InputToken {
    if button != InputToken::None {
        button
    } else {
        keyboard
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Token of the on-screen button currently held down, written by the button
/// widgets.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnScreenInput(pub InputToken);

/// Rolling one-second press counter.
///
/// The window restarts when a press arrives at least one second after the
/// window opened; within a window at most `cap` presses are accepted.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct KeyPressLimiter {
    pub cap: u32,
    count: u32,
    clock: f64,
    window_start: f64,
}

impl Default for KeyPressLimiter {
    fn default() -> Self {
        Self::new(crate::constants::KEY_PRESS_RATE_CAP)
    }
}

impl KeyPressLimiter {
    pub fn new(cap: u32) -> Self {
        Self {
            cap,
            count: 0,
            clock: 0.0,
            window_start: 0.0,
        }
    }

    /// Advance the wall clock by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.clock += dt;
    }

    /// Register a press; returns `false` when the cap for this window is spent.
    pub fn try_press(&mut self) -> bool {
        if self.clock - self.window_start >= 1.0 {
            self.count = 0;
            self.window_start = self.clock;
        }
        if self.count < self.cap {
            self.count += 1;
            true
        } else {
            false
        }
    }
}

/// Resolved input for the current tick.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFrame {
    pub token: InputToken,
    pub previous: InputToken,
    /// Boost modifier held this tick, independent of `token`.
    pub boost: bool,
    /// Boost was pressed this tick and passed the limiter.
    pub boost_started: bool,
    /// Discrete action accepted this tick, if any.
    pub action: Option<InputToken>,
}

impl InputFrame {
    /// Roll the frame forward with this tick's token and boost modifier.
    pub fn advance(&mut self, token: InputToken, boost: bool, limiter: &mut KeyPressLimiter) {
        let boost_edge = boost && !self.boost;
        self.previous = self.token;
        self.token = token;
        self.boost = boost;
        self.boost_started = false;
        self.action = None;

        if boost_edge {
            if limiter.try_press() {
                self.boost_started = true;
            } else {
                debug!("Rate-limited boost press");
            }
        }

        let is_edge = token != self.previous && token != InputToken::None;
        if is_edge && token.is_discrete() {
            if limiter.try_press() {
                self.action = Some(token);
            } else {
                debug!("Rate-limited press of {:?}", token);
            }
        }
    }

    /// Direction of continuous thrust held this tick.
    pub fn thrust(&self) -> Option<ThrustDirection> {
        match self.token {
            InputToken::Thrust(dir) => Some(dir),
            _ => None,
        }
    }

    #[inline]
    pub fn mining_held(&self) -> bool {
        self.token == InputToken::Mine
    }

    #[inline]
    pub fn boost_held(&self) -> bool {
        self.boost
    }
}

// ── System ────────────────────────────────────────────────────────────────────

/// Split the held button into `(token, boost)`: the warp button is a modifier
/// and leaves the keyboard free to supply thrust.
#[inline]
pub fn split_boost(button: InputToken) -> (InputToken, bool) {
    match button {
        InputToken::Boost => (InputToken::None, true),
        other => (other, false),
    }
}

/// Reduce keyboard and button state to this tick's [`InputFrame`].
pub fn resolve_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    on_screen: Res<OnScreenInput>,
    time: Res<Time>,
    mut limiter: ResMut<KeyPressLimiter>,
    mut frame: ResMut<InputFrame>,
) {
    limiter.tick(time.delta_secs_f64());
    let (button, button_boost) = split_boost(on_screen.0);
    let token = resolve_token(button, keyboard_token(&keys));
    let boost = button_boost || keys.pressed(BOOST_KEY);
    frame.advance(token, boost, &mut limiter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_beats_keyboard() {
        assert_eq!(
            resolve_token(InputToken::Sell, InputToken::Thrust(ThrustDirection::Up)),
            InputToken::Sell
        );
        assert_eq!(
            resolve_token(InputToken::None, InputToken::Mine),
            InputToken::Mine
        );
        assert_eq!(
            resolve_token(InputToken::None, InputToken::None),
            InputToken::None
        );
    }

    #[test]
    fn keyboard_uses_binding_priority() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyU);
        keys.press(KeyCode::KeyS);
        assert_eq!(
            keyboard_token(&keys),
            InputToken::Thrust(ThrustDirection::Back)
        );
        keys.release(KeyCode::KeyS);
        assert_eq!(keyboard_token(&keys), InputToken::Upgrade);
        keys.release(KeyCode::KeyU);
        assert_eq!(keyboard_token(&keys), InputToken::None);
    }

    #[test]
    fn discrete_action_fires_once_per_press() {
        let mut limiter = KeyPressLimiter::new(10);
        let mut frame = InputFrame::default();
        frame.advance(InputToken::Sell, false, &mut limiter);
        assert_eq!(frame.action, Some(InputToken::Sell));
        frame.advance(InputToken::Sell, false, &mut limiter);
        assert_eq!(frame.action, None);
        frame.advance(InputToken::None, false, &mut limiter);
        frame.advance(InputToken::Sell, false, &mut limiter);
        assert_eq!(frame.action, Some(InputToken::Sell));
    }

    #[test]
    fn continuous_tokens_are_not_limited() {
        let mut limiter = KeyPressLimiter::new(1);
        let mut frame = InputFrame::default();
        for _ in 0..50 {
            frame.advance(InputToken::Thrust(ThrustDirection::Left), false, &mut limiter);
            assert_eq!(frame.thrust(), Some(ThrustDirection::Left));
            frame.advance(InputToken::Mine, false, &mut limiter);
            assert!(frame.mining_held());
        }
        // Thrust and mine edges never touched the counter.
        assert!(limiter.try_press());
    }

    #[test]
    fn boost_combines_with_thrust() {
        let mut limiter = KeyPressLimiter::new(10);
        let mut frame = InputFrame::default();
        frame.advance(InputToken::None, true, &mut limiter);
        assert!(frame.boost_started && frame.boost_held());

        let forward = InputToken::Thrust(ThrustDirection::Forward);
        frame.advance(forward, true, &mut limiter);
        assert!(!frame.boost_started);
        assert!(frame.boost_held());
        assert_eq!(frame.thrust(), Some(ThrustDirection::Forward));

        frame.advance(forward, false, &mut limiter);
        assert!(!frame.boost_held());
    }

    #[test]
    fn space_is_not_a_token_binding() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(BOOST_KEY);
        assert_eq!(keyboard_token(&keys), InputToken::None);
        keys.press(KeyCode::KeyW);
        assert_eq!(
            keyboard_token(&keys),
            InputToken::Thrust(ThrustDirection::Forward)
        );
    }

    #[test]
    fn warp_button_is_a_modifier() {
        assert_eq!(split_boost(InputToken::Boost), (InputToken::None, true));
        assert_eq!(split_boost(InputToken::Sell), (InputToken::Sell, false));
    }

    #[test]
    fn limiter_caps_presses_per_second() {
        let mut limiter = KeyPressLimiter::new(10);
        let accepted = (0..25).filter(|_| limiter.try_press()).count();
        assert_eq!(accepted, 10);

        limiter.tick(0.5);
        assert!(!limiter.try_press());
        limiter.tick(0.5);
        assert!(limiter.try_press());
    }

    #[test]
    fn rejected_edge_does_not_fire() {
        let mut limiter = KeyPressLimiter::new(1);
        let mut frame = InputFrame::default();
        frame.advance(InputToken::Upgrade, false, &mut limiter);
        assert_eq!(frame.action, Some(InputToken::Upgrade));
        frame.advance(InputToken::None, false, &mut limiter);
        frame.advance(InputToken::Upgrade, false, &mut limiter);
        assert_eq!(frame.action, None);
    }
}
