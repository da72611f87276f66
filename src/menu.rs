//! Title screen, `GameState`, and the docked/destroyed overlay.
//!
//! ## States
//!
//! | State      | Description                                  |
//! |------------|----------------------------------------------|
//! | `MainMenu` | Initial state; title screen shown            |
//! | `Playing`  | Flight simulation running                    |
//!
//! ## Systems (registered by `MainMenuPlugin`)
//!
//! | System                  | Schedule                  | Purpose                               |
//! |-------------------------|---------------------------|---------------------------------------|
//! | `setup_main_menu`       | `OnEnter(MainMenu)`       | Spawn the title screen                |
//! | `cleanup_main_menu`     | `OnExit(MainMenu)`        | Despawn the title screen              |
//! | `menu_button_system`    | `Update / in MainMenu`    | Handle Launch Mission / Quit clicks   |
//! | `setup_status_overlay`  | `OnEnter(Playing)`        | Spawn the hidden dock/death overlay   |
//! | `status_overlay_system` | `Update / in Playing`     | Show the overlay while docked or dead |

use crate::buttons::ControlButton;
use crate::player::input::InputToken;
use crate::player::state::PlayerStatus;
use crate::telemetry::FlightTelemetry;
use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Every tick system in [`crate::simulation::SimulationPlugin`] runs under
/// `.run_if(in_state(GameState::Playing))`.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the title screen; despawned on `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component)]
pub struct MenuStartButton;

#[derive(Component)]
pub struct MenuQuitButton;

/// Root node of the docked/destroyed overlay.
#[derive(Component)]
pub struct StatusOverlay;

/// Headline text inside the overlay.
#[derive(Component)]
pub struct StatusOverlayTitle;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the title screen and the status overlay.
///
/// Must be added before any plugin that uses `in_state(GameState::Playing)`.
pub struct MainMenuPlugin;

impl Plugin for MainMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(OnEnter(GameState::Playing), setup_status_overlay)
            .add_systems(
                Update,
                (
                    menu_button_system.run_if(in_state(GameState::MainMenu)),
                    status_overlay_system.run_if(in_state(GameState::Playing)),
                ),
            );
    }
}

// ── Colours ───────────────────────────────────────────────────────────────────

const START_BG: Color = Color::srgb(0.05, 0.22, 0.40);
const START_BORDER: Color = Color::srgb(0.20, 0.55, 0.95);
const START_TEXT: Color = Color::srgb(0.80, 0.90, 1.0);
const QUIT_BG: Color = Color::srgb(0.28, 0.06, 0.06);
const QUIT_BORDER: Color = Color::srgb(0.60, 0.12, 0.12);
const QUIT_TEXT: Color = Color::srgb(1.0, 0.65, 0.65);
const TITLE_COLOR: Color = Color::srgb(0.95, 0.75, 0.35);
const SUBTITLE_COLOR: Color = Color::srgb(0.55, 0.55, 0.65);
const HINT_COLOR: Color = Color::srgb(0.30, 0.30, 0.38);

// ── OnEnter(MainMenu) ─────────────────────────────────────────────────────────

/// Spawn the full-screen title screen.
///
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │                PROSPECTOR                   │
/// │      Fly, mine, sell, and upgrade           │
/// │                                             │
/// │           [ LAUNCH MISSION ]                │
/// │               [ QUIT ]                      │
/// │                                             │
/// │   W/S/A/D/R/F thrust · Space warp · E drill │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::BLACK),
            MainMenuRoot,
        ))
        .with_children(|root| {
            label(root, "PROSPECTOR", 56.0, TITLE_COLOR);
            label(root, "Fly, mine, sell, and upgrade", 18.0, SUBTITLE_COLOR);
            menu_button(root, "LAUNCH MISSION", START_BG, START_BORDER, START_TEXT, MenuStartButton);
            menu_button(root, "QUIT", QUIT_BG, QUIT_BORDER, QUIT_TEXT, MenuQuitButton);
            label(
                root,
                "W/S/A/D/R/F thrust · Space warp · E drill · G sell · U upgrade · L launch",
                12.0,
                HINT_COLOR,
            );
        });
}

fn label(parent: &mut ChildSpawnerCommands<'_>, text: &str, size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    ));
}

fn menu_button(
    parent: &mut ChildSpawnerCommands<'_>,
    text: &str,
    bg: Color,
    border: Color,
    text_color: Color,
    marker: impl Bundle,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(240.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| label(btn, text, 18.0, text_color));
}

// ── OnExit(MainMenu) ──────────────────────────────────────────────────────────

pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (MainMenu only) ────────────────────────────────────────────────────

/// Start → [`GameState::Playing`]; Quit → [`AppExit`].  Hover brightens text.
#[allow(clippy::type_complexity)]
pub fn menu_button_system(
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuStartButton>)>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let mut tint = |children: &Children, color: Color| {
        for child in children.iter() {
            if let Ok(mut text) = btn_text.get_mut(child) {
                *text = TextColor(color);
            }
        }
    };

    for (interaction, children) in start_query.iter() {
        match interaction {
            Interaction::Pressed => {
                info!("Mission launched from title screen");
                next_state.set(GameState::Playing);
            }
            Interaction::Hovered => tint(children, Color::WHITE),
            Interaction::None => tint(children, START_TEXT),
        }
    }

    for (interaction, children) in quit_query.iter() {
        match interaction {
            Interaction::Pressed => {
                exit.write(AppExit::Success);
            }
            Interaction::Hovered => tint(children, Color::WHITE),
            Interaction::None => tint(children, QUIT_TEXT),
        }
    }
}

// ── Status overlay (Playing) ──────────────────────────────────────────────────

/// Spawn the hidden overlay shown while docked or destroyed.
///
/// Its button carries [`ControlButton`]`(Launch)`, so pressing it feeds the
/// same launch token as the `L` key.
pub fn setup_status_overlay(mut commands: Commands, existing: Query<(), With<StatusOverlay>>) {
    if !existing.is_empty() {
        return;
    }
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(30.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(12.0),
                ..default()
            },
            Visibility::Hidden,
            StatusOverlay,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new(""),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(TITLE_COLOR),
                StatusOverlayTitle,
            ));
            menu_button(
                root,
                "LAUNCH",
                START_BG,
                START_BORDER,
                START_TEXT,
                ControlButton(InputToken::Launch),
            );
        });
}

/// Toggle the overlay from the telemetry status.
pub fn status_overlay_system(
    telemetry: Res<FlightTelemetry>,
    mut overlay: Query<&mut Visibility, With<StatusOverlay>>,
    mut title: Query<&mut Text, With<StatusOverlayTitle>>,
) {
    if !telemetry.is_changed() {
        return;
    }
    let headline = match telemetry.status {
        PlayerStatus::Flying => None,
        PlayerStatus::Docked => Some("DOCKED"),
        PlayerStatus::Dead => Some("ROCKET DESTROYED"),
    };
    for mut visibility in overlay.iter_mut() {
        *visibility = if headline.is_some() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let Some(headline) = headline {
        for mut text in title.iter_mut() {
            if text.0 != headline {
                text.0 = headline.to_string();
            }
        }
    }
}
