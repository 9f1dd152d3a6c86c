use std::time::Duration;

use bevy::prelude::*;

use super::controller::SceneSet;
use crate::engine::assets::portfolio_data::PortfolioData;
use crate::engine::camera::choreographer::{CameraPhase, CameraPhaseChanged};
use crate::engine::core::app_state::AppState;

const INTRO_BACKDROP_ALPHA: f32 = 0.5;
const INTRO_FADE: Duration = Duration::from_millis(500);
const USAGE_HINT: &str = "Click on doors to explore • Drag to rotate • Scroll to zoom";

/// Full-screen title card shown during the intro shot.
#[derive(Component, Default)]
pub struct IntroOverlay {
    fade: Option<Timer>,
}

#[derive(Component)]
pub struct IntroText;

#[derive(Component)]
pub struct UsageHint;

/// Native title card and usage hint. In the browser the host page draws these
/// from the `camera_phase_changed` notification instead.
pub struct IntroOverlayPlugin;

impl Plugin for IntroOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Running), spawn_intro_overlay)
            .add_systems(
                Update,
                (begin_intro_fade, fade_intro_overlay)
                    .chain()
                    .after(SceneSet::Tick)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnExit(AppState::Running), despawn_overlays);
    }
}

fn spawn_intro_overlay(mut commands: Commands, portfolio: Option<Res<PortfolioData>>) {
    let default_portfolio = PortfolioData::default();
    let portfolio = portfolio.as_deref().unwrap_or(&default_portfolio);

    commands
        .spawn((
            IntroOverlay::default(),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::BLACK.with_alpha(INTRO_BACKDROP_ALPHA)),
        ))
        .with_children(|parent| {
            parent.spawn((
                IntroText,
                Text::new(portfolio.display_name()),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                IntroText,
                Text::new(portfolio.display_title()),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// The title card starts fading at the instant the camera settles, and the
/// usage hint appears.
fn begin_intro_fade(
    mut commands: Commands,
    mut phase_events: EventReader<CameraPhaseChanged>,
    mut overlays: Query<&mut IntroOverlay>,
) {
    for event in phase_events.read() {
        if event.phase != CameraPhase::Settled {
            continue;
        }
        for mut overlay in &mut overlays {
            overlay.fade = Some(Timer::new(INTRO_FADE, TimerMode::Once));
        }
        commands.spawn((
            UsageHint,
            Text::new(USAGE_HINT),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(32.0),
                left: Val::Px(32.0),
                ..default()
            },
        ));
    }
}

fn fade_intro_overlay(
    mut commands: Commands,
    time: Res<Time>,
    mut overlays: Query<(Entity, &mut IntroOverlay, &mut BackgroundColor)>,
    mut texts: Query<&mut TextColor, With<IntroText>>,
) {
    for (entity, mut overlay, mut background) in &mut overlays {
        let Some(fade) = overlay.fade.as_mut() else {
            continue;
        };
        fade.tick(time.delta());

        if fade.finished() {
            commands.entity(entity).despawn();
            continue;
        }

        let alpha = 1.0 - fade.fraction();
        background.0 = Color::BLACK.with_alpha(INTRO_BACKDROP_ALPHA * alpha);
        for mut text in &mut texts {
            text.0 = Color::WHITE.with_alpha(alpha);
        }
    }
}

fn despawn_overlays(
    mut commands: Commands,
    overlays: Query<Entity, Or<(With<IntroOverlay>, With<UsageHint>)>>,
) {
    for entity in &overlays {
        commands.entity(entity).despawn();
    }
}
