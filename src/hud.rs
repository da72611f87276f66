//! HUD text panel driven by [`FlightTelemetry`].

use crate::config::GameConfig;
use crate::menu::GameState;
use crate::telemetry::FlightTelemetry;
use bevy::prelude::*;

/// Marker for the HUD text node's parent.
#[derive(Component)]
pub struct HudDisplay;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(
                Update,
                hud_display_system.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Spawn the bottom-left telemetry panel.
pub fn setup_hud(
    mut commands: Commands,
    config: Res<GameConfig>,
    existing: Query<(), With<HudDisplay>>,
) {
    if !existing.is_empty() {
        return;
    }
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                bottom: Val::Px(10.0),
                padding: UiRect::all(Val::Px(5.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            BorderRadius::all(Val::Px(5.0)),
            HudDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Rewrite the HUD text whenever the telemetry snapshot changes.
pub fn hud_display_system(
    telemetry: Res<FlightTelemetry>,
    parent_query: Query<&Children, With<HudDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !telemetry.is_changed() {
        return;
    }
    let contents = telemetry.hud_lines().join("\n");
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                if text.0 != contents {
                    text.0.clone_from(&contents);
                }
            }
        }
    }
}
