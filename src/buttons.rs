//! On-screen control buttons.
//!
//! Each button carries a [`ControlButton`] with the [`InputToken`] it feeds.
//! While a button is held its token is written to [`OnScreenInput`], which the
//! input resolver prefers over the keyboard.  Buttons are tinted with the
//! current tier's colour.

use crate::economy::TechTier;
use crate::menu::GameState;
use crate::player::input::{resolve_input_system, InputToken, OnScreenInput};
use crate::player::state::ThrustDirection;
use crate::telemetry::FlightTelemetry;
use bevy::prelude::*;

/// Button that feeds its token into [`OnScreenInput`] while pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlButton(pub InputToken);

/// Root of the control button panels.
#[derive(Component)]
pub struct ControlPanel;

/// Direction pad on the right edge.
const THRUST_PAD: [InputToken; 6] = [
    InputToken::Thrust(ThrustDirection::Forward),
    InputToken::Thrust(ThrustDirection::Back),
    InputToken::Thrust(ThrustDirection::Left),
    InputToken::Thrust(ThrustDirection::Right),
    InputToken::Thrust(ThrustDirection::Up),
    InputToken::Thrust(ThrustDirection::Down),
];

/// Action row along the bottom edge.
const ACTION_ROW: [InputToken; 4] = [
    InputToken::Mine,
    InputToken::Boost,
    InputToken::Sell,
    InputToken::Upgrade,
];

pub struct ControlButtonsPlugin;

impl Plugin for ControlButtonsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_control_buttons)
            .add_systems(
                Update,
                (
                    control_button_input_system.before(resolve_input_system),
                    tint_control_buttons_system,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

fn spawn_button(parent: &mut ChildSpawnerCommands<'_>, token: InputToken, width: f32, height: f32) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(width),
                height: Val::Px(height),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BorderRadius::all(Val::Px(5.0)),
            BackgroundColor(TechTier::Chemical.button_color()),
            ControlButton(token),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(token.label()),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Spawn the direction pad and the action row.
pub fn setup_control_buttons(mut commands: Commands, existing: Query<(), With<ControlPanel>>) {
    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Percent(30.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            ControlPanel,
        ))
        .with_children(|pad| {
            for token in THRUST_PAD {
                spawn_button(pad, token, 60.0, 40.0);
            }
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Percent(5.0),
                left: Val::Percent(30.0),
                column_gap: Val::Px(30.0),
                ..default()
            },
            ControlPanel,
        ))
        .with_children(|row| {
            for token in ACTION_ROW {
                spawn_button(row, token, 140.0, 60.0);
            }
        });
}

/// Write the held button's token (or `None`) to [`OnScreenInput`].
pub fn control_button_input_system(
    buttons: Query<(&Interaction, &ControlButton)>,
    mut on_screen: ResMut<OnScreenInput>,
) {
    let held = buttons
        .iter()
        .find(|(interaction, _)| **interaction == Interaction::Pressed)
        .map_or(InputToken::None, |(_, button)| button.0);
    if on_screen.0 != held {
        on_screen.0 = held;
    }
}

/// Tint buttons with the tier colour; darken the one being pressed.
pub fn tint_control_buttons_system(
    telemetry: Res<FlightTelemetry>,
    mut buttons: Query<(&Interaction, &mut BackgroundColor), With<ControlButton>>,
) {
    let base = telemetry.tier.button_color();
    for (interaction, mut background) in buttons.iter_mut() {
        let color = match interaction {
            Interaction::Pressed => base.darker(0.2),
            _ => base,
        };
        if background.0 != color {
            background.0 = color;
        }
    }
}
