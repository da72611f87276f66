//! Player module: flight state, input resolution, flight systems, and the
//! rocket's visuals.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `FlightState` resource, `Player` marker, status and movement enums |
//! | [`input`] | Keyboard/button → `InputToken`, press limiter, `InputFrame` |
//! | [`control`] | Launch/boost/thrust, integration, dock/collision systems |
//! | [`rendering`] | Lathed hull mesh, engine rings, mining laser |

pub mod control;
pub mod input;
pub mod rendering;
pub mod state;

pub use control::{flight_control_system, integration_system, proximity_system};
pub use input::{InputFrame, InputToken, KeyPressLimiter, OnScreenInput};
pub use rendering::RocketRenderPlugin;
pub use state::{FlightState, MovementClass, Player, PlayerStatus, ThrustDirection};
