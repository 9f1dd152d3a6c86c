use std::collections::HashMap;

use bevy::prelude::*;
use constants::sections::{SECTION_CATALOG, SectionKey};

use crate::engine::assets::portfolio_data::PortfolioData;
use crate::engine::camera::choreographer::{
    CameraChoreographer, CameraPhaseChanged, tick_camera_choreography,
};
use crate::engine::camera::orbit_camera::{OrbitCamera, reseat_orbit_on_phase_change};
use crate::engine::core::app_state::AppState;
use crate::engine::core::scene_settings::SceneSettings;
use crate::interaction::door::{Door, DoorInteraction, DoorPanel, DoorPointerEvent, SectionSelected};
use crate::interaction::visibility::resolve_visible_sections;

/// Per-frame ordering of the mounted scene. Pointer events of a frame are
/// fully applied before that frame's animation tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneSet {
    /// Reconcile door entities with the current portfolio.
    Doors,
    /// Hit-testing in the presentation layer.
    Picking,
    /// Apply pointer events to door state.
    Input,
    /// Camera schedule, door easing, idle motion.
    Tick,
}

/// Parent of every door; carries the idle sway.
#[derive(Component)]
pub struct BuildingRoot;

/// Door entities of the mounted scene, keyed by section.
#[derive(Resource, Default, Debug)]
pub struct SceneDoors {
    doors: HashMap<SectionKey, Entity>,
}

impl SceneDoors {
    #[cfg(test)]
    pub fn entity(&self, key: SectionKey) -> Option<Entity> {
        self.doors.get(&key).copied()
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.doors.contains_key(&key)
    }

    /// Keys with a door, in catalogue order.
    pub fn keys(&self) -> Vec<SectionKey> {
        SECTION_CATALOG
            .iter()
            .map(|spec| spec.key)
            .filter(|key| self.doors.contains_key(key))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    #[cfg(test)]
    pub fn from_entries(entries: impl IntoIterator<Item = (SectionKey, Entity)>) -> Self {
        Self {
            doors: entries.into_iter().collect(),
        }
    }
}

/// Headless scene logic: door lifecycle, pointer handling, camera schedule
/// and idle motion. Rendering, picking and input devices are added on top by
/// the app setup.
pub struct SceneControllerPlugin;

impl Plugin for SceneControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .add_event::<DoorPointerEvent>()
            .add_event::<SectionSelected>()
            .add_event::<CameraPhaseChanged>()
            .configure_sets(
                Update,
                (SceneSet::Doors, SceneSet::Picking, SceneSet::Input, SceneSet::Tick)
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnEnter(AppState::Running), mount_scene)
            .add_systems(OnExit(AppState::Running), teardown_scene)
            .add_systems(Update, sync_doors_with_portfolio.in_set(SceneSet::Doors))
            .add_systems(Update, handle_door_pointer_events.in_set(SceneSet::Input))
            .add_systems(
                Update,
                (
                    tick_camera_choreography,
                    reseat_orbit_on_phase_change,
                    tick_door_interactions,
                    animate_idle_rotation,
                )
                    .chain()
                    .in_set(SceneSet::Tick),
            );
    }
}

fn mount_scene(mut commands: Commands, settings: Res<SceneSettings>) {
    commands.spawn((
        Name::new("Building"),
        BuildingRoot,
        Transform::default(),
        Visibility::default(),
    ));

    commands.insert_resource(CameraChoreographer::new(
        settings.intro_delay,
        settings.intro_camera_position,
        settings.settled_camera_position,
    ));
    commands.insert_resource(OrbitCamera::from_position(
        settings.intro_camera_position,
        settings.camera_target,
        settings.orbit,
    ));
    commands.insert_resource(SceneDoors::default());

    info!(
        "Scene mounted, settling camera in {} ms",
        settings.intro_delay.as_millis()
    );
}

/// Cancels the pending camera cut and drops every piece of scene state, so
/// nothing can touch the scene once it is gone.
fn teardown_scene(
    mut commands: Commands,
    choreographer: Option<ResMut<CameraChoreographer>>,
    roots: Query<Entity, With<BuildingRoot>>,
) {
    if let Some(mut choreographer) = choreographer {
        if choreographer.cancel() {
            info!("Scene torn down before the camera settled, intro cut cancelled");
        }
    }

    for root in &roots {
        commands.entity(root).despawn();
    }

    commands.remove_resource::<CameraChoreographer>();
    commands.remove_resource::<OrbitCamera>();
    commands.remove_resource::<SceneDoors>();
    info!("Scene torn down");
}

/// Reconciles door entities with the portfolio whenever it changes. Doors whose
/// section emptied are despawned, not hidden, so a later reappearance starts
/// from a fresh interaction state.
pub fn sync_doors_with_portfolio(
    mut commands: Commands,
    portfolio: Option<Res<PortfolioData>>,
    doors: Option<ResMut<SceneDoors>>,
    roots: Query<Entity, With<BuildingRoot>>,
) {
    let Some(mut doors) = doors else {
        return;
    };

    let data_changed = portfolio.as_ref().is_some_and(|p| p.is_changed());
    let data_removed = portfolio.is_none() && !doors.is_empty();
    if !(doors.is_added() || data_changed || data_removed) {
        return;
    }

    let Ok(root) = roots.single() else {
        return;
    };

    let visible = resolve_visible_sections(portfolio.as_deref());

    let stale: Vec<SectionKey> = doors
        .doors
        .keys()
        .copied()
        .filter(|key| !visible.iter().any(|spec| spec.key == *key))
        .collect();
    for key in stale {
        if let Some(entity) = doors.doors.remove(&key) {
            commands.entity(entity).despawn();
            debug!("Door removed: {}", key.as_str());
        }
    }

    for spec in visible {
        if doors.doors.contains_key(&spec.key) {
            continue;
        }
        let entity = commands
            .spawn((
                Name::new(format!("Door: {}", spec.label)),
                Door::new(spec),
                DoorInteraction::default(),
                Transform::from_translation(spec.position),
                Visibility::default(),
                ChildOf(root),
            ))
            .with_children(|door| {
                door.spawn((
                    Name::new(format!("Door panel: {}", spec.label)),
                    DoorPanel,
                    Transform::default(),
                    Visibility::default(),
                ));
            })
            .id();
        doors.doors.insert(spec.key, entity);
        debug!("Door spawned: {}", spec.key.as_str());
    }

    info!(
        "Doors: [{}]",
        doors
            .keys()
            .iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

/// Applies pointer events to door state; a click is relayed as the scene's
/// single outward `SectionSelected` event.
pub fn handle_door_pointer_events(
    mut pointer_events: EventReader<DoorPointerEvent>,
    mut doors: Query<(&Door, &mut DoorInteraction)>,
    mut selections: EventWriter<SectionSelected>,
) {
    for event in pointer_events.read() {
        match *event {
            DoorPointerEvent::Enter(entity) => {
                if let Ok((_, mut interaction)) = doors.get_mut(entity) {
                    interaction.on_pointer_enter();
                }
            }
            DoorPointerEvent::Leave(entity) => {
                if let Ok((_, mut interaction)) = doors.get_mut(entity) {
                    interaction.on_pointer_leave();
                }
            }
            DoorPointerEvent::Click(entity) => {
                if let Ok((door, _)) = doors.get(entity) {
                    let selection = door.on_click();
                    info!("Section selected: {}", selection.key.as_str());
                    selections.write(selection);
                }
            }
        }
    }
}

/// Eases every door toward its target scale and applies it to the door's panel.
pub fn tick_door_interactions(
    mut doors: Query<&mut DoorInteraction, With<Door>>,
    mut panels: Query<(&ChildOf, &mut Transform), With<DoorPanel>>,
) {
    for mut interaction in &mut doors {
        interaction.tick();
    }

    for (child_of, mut transform) in &mut panels {
        let Ok(interaction) = doors.get(child_of.parent()) else {
            continue;
        };
        let scale = interaction.current_scale();
        transform.scale.x = scale.x;
        transform.scale.y = scale.y;
    }
}

/// Slow sway of the whole building driven by elapsed time.
pub fn animate_idle_rotation(
    time: Res<Time>,
    settings: Res<SceneSettings>,
    mut roots: Query<&mut Transform, With<BuildingRoot>>,
) {
    let angle = (time.elapsed_secs() * settings.idle_rotation_frequency).sin()
        * settings.idle_rotation_amplitude;
    for mut transform in &mut roots {
        transform.rotation = Quat::from_rotation_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::state::app::StatesPlugin;
    use bevy::time::{TimePlugin, TimeUpdateStrategy};
    use serde_json::json;

    use super::*;
    use crate::engine::camera::choreographer::CameraPhase;

    #[derive(Resource, Default)]
    struct Recorded {
        selections: Vec<SectionKey>,
        phases: Vec<CameraPhase>,
    }

    fn record_events(
        mut selections: EventReader<SectionSelected>,
        mut phases: EventReader<CameraPhaseChanged>,
        mut recorded: ResMut<Recorded>,
    ) {
        recorded.selections.extend(selections.read().map(|s| s.key));
        recorded.phases.extend(phases.read().map(|p| p.phase));
    }

    fn scenario_portfolio() -> PortfolioData {
        PortfolioData::from_json_value(json!({
            "skills": ["Go"],
            "experience": [],
            "projects": {},
            "education": [{ "degree": "BS" }],
            "contact": { "email": "a@b.com" }
        }))
        .unwrap()
    }

    /// Headless app with the scene mounted and the first door sync applied.
    fn mounted_scene(portfolio: Option<PortfolioData>) -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_resource::<Time>()
            .init_resource::<Time<Real>>()
            .insert_state(AppState::Running)
            .add_plugins(SceneControllerPlugin)
            .init_resource::<Recorded>()
            .add_systems(Last, record_events);
        if let Some(portfolio) = portfolio {
            app.insert_resource(portfolio);
        }
        app.update();
        app
    }

    /// Run one frame after `millis` of frame time on both clocks.
    fn advance(app: &mut App, millis: u64) {
        let delta = Duration::from_millis(millis);
        app.world_mut().resource_mut::<Time>().advance_by(delta);
        app.world_mut().resource_mut::<Time<Real>>().advance_by(delta);
        app.update();
    }

    fn panel_scale(app: &mut App, door: Entity) -> Vec3 {
        let mut panels = app
            .world_mut()
            .query_filtered::<(&ChildOf, &Transform), With<DoorPanel>>();
        panels
            .iter(app.world())
            .find(|(child_of, _)| child_of.parent() == door)
            .map(|(_, transform)| transform.scale)
            .unwrap_or_else(|| panic!("door {door} has no panel"))
    }

    fn door_entity(app: &App, key: SectionKey) -> Entity {
        app.world()
            .resource::<SceneDoors>()
            .entity(key)
            .unwrap_or_else(|| panic!("no door for {}", key.as_str()))
    }

    fn door_count(app: &mut App) -> usize {
        let mut doors = app.world_mut().query::<&Door>();
        doors.iter(app.world()).count()
    }

    fn send_pointer(app: &mut App, event: DoorPointerEvent) {
        app.world_mut().send_event(event);
    }

    #[test]
    fn mount_spawns_doors_only_for_sections_with_data() {
        let mut app = mounted_scene(Some(scenario_portfolio()));

        let doors = app.world().resource::<SceneDoors>();
        assert_eq!(
            doors.keys(),
            [SectionKey::Skills, SectionKey::Education, SectionKey::Contact]
        );
        assert_eq!(door_count(&mut app), 3);

        let skills = door_entity(&app, SectionKey::Skills);
        let door = app.world().get::<Door>(skills).unwrap();
        assert_eq!(door.key(), SectionKey::Skills);
        let transform = app.world().get::<Transform>(skills).unwrap();
        assert_eq!(transform.translation, Vec3::new(-3.0, 0.0, 0.0));
        assert!(app.world().get::<ChildOf>(skills).is_some());
    }

    #[test]
    fn missing_portfolio_mounts_an_empty_building_until_data_arrives() {
        let mut app = mounted_scene(None);
        assert_eq!(door_count(&mut app), 0);

        app.insert_resource(scenario_portfolio());
        advance(&mut app, 16);
        assert_eq!(door_count(&mut app), 3);
    }

    #[test]
    fn hover_eases_door_scale_up_and_back_down() {
        let mut app = mounted_scene(Some(scenario_portfolio()));
        let contact = door_entity(&app, SectionKey::Contact);

        send_pointer(&mut app, DoorPointerEvent::Enter(contact));
        for _ in 0..60 {
            advance(&mut app, 16);
        }
        let interaction = app.world().get::<DoorInteraction>(contact).unwrap();
        assert!(interaction.hovered());
        let scale = panel_scale(&mut app, contact);
        assert!((scale.x - 1.1).abs() < 1e-3 && (scale.y - 1.1).abs() < 1e-3);
        assert_eq!(scale.z, 1.0);

        // Only the panel grows; the door itself, and so its handle, keeps unit scale.
        assert_eq!(app.world().get::<Transform>(contact).unwrap().scale, Vec3::ONE);

        send_pointer(&mut app, DoorPointerEvent::Leave(contact));
        for _ in 0..60 {
            advance(&mut app, 16);
        }
        let scale = panel_scale(&mut app, contact);
        assert!((scale.x - 1.0).abs() < 1e-3 && (scale.y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn click_without_hover_selects_exactly_once() {
        let mut app = mounted_scene(Some(scenario_portfolio()));
        let education = door_entity(&app, SectionKey::Education);

        send_pointer(&mut app, DoorPointerEvent::Click(education));
        advance(&mut app, 16);
        advance(&mut app, 16);

        let recorded = app.world().resource::<Recorded>();
        assert_eq!(recorded.selections, [SectionKey::Education]);
        assert!(!app.world().get::<DoorInteraction>(education).unwrap().hovered());
    }

    #[test]
    fn emptied_section_loses_its_door_and_returns_fresh() {
        let mut app = mounted_scene(Some(scenario_portfolio()));
        let skills = door_entity(&app, SectionKey::Skills);
        send_pointer(&mut app, DoorPointerEvent::Enter(skills));
        advance(&mut app, 16);
        assert!(app.world().get::<DoorInteraction>(skills).unwrap().hovered());

        let mut without_skills = scenario_portfolio();
        without_skills.skills = Some(json!([]));
        app.insert_resource(without_skills);
        advance(&mut app, 16);

        assert!(!app.world().resource::<SceneDoors>().contains(SectionKey::Skills));
        assert!(!app.world().entities().contains(skills));

        // Events aimed at the despawned door are dropped.
        send_pointer(&mut app, DoorPointerEvent::Click(skills));
        advance(&mut app, 16);
        assert!(app.world().resource::<Recorded>().selections.is_empty());

        app.insert_resource(scenario_portfolio());
        advance(&mut app, 16);
        let reborn = door_entity(&app, SectionKey::Skills);
        assert_ne!(reborn, skills);
        let interaction = app.world().get::<DoorInteraction>(reborn).unwrap();
        assert_eq!(interaction, &DoorInteraction::default());
    }

    #[test]
    fn surviving_doors_keep_their_state_across_reloads() {
        let mut app = mounted_scene(Some(scenario_portfolio()));
        let contact = door_entity(&app, SectionKey::Contact);
        send_pointer(&mut app, DoorPointerEvent::Enter(contact));
        advance(&mut app, 16);

        let mut reloaded = scenario_portfolio();
        reloaded.projects = Some(json!(["scanner"]));
        app.insert_resource(reloaded);
        advance(&mut app, 16);

        assert_eq!(door_entity(&app, SectionKey::Contact), contact);
        assert!(app.world().get::<DoorInteraction>(contact).unwrap().hovered());
        assert!(app.world().resource::<SceneDoors>().contains(SectionKey::Projects));
    }

    #[test]
    fn camera_settles_once_after_intro_delay() {
        let mut app = mounted_scene(Some(scenario_portfolio()));
        let intro = Vec3::new(0.0, 2.0, 15.0);
        let settled = Vec3::new(0.0, 0.0, 10.0);

        for _ in 0..19 {
            advance(&mut app, 100);
            let choreographer = app.world().resource::<CameraChoreographer>();
            assert_eq!(choreographer.phase(), CameraPhase::Intro);
            assert_eq!(choreographer.current_position(), intro);
        }
        assert!(app.world().resource::<OrbitCamera>().position().distance(intro) < 1e-4);

        advance(&mut app, 100);
        assert_eq!(
            app.world().resource::<CameraChoreographer>().current_position(),
            settled
        );
        assert!(app.world().resource::<OrbitCamera>().position().distance(settled) < 1e-4);

        for _ in 0..30 {
            advance(&mut app, 100);
        }
        assert_eq!(app.world().resource::<Recorded>().phases, [CameraPhase::Settled]);
        assert_eq!(
            app.world().resource::<CameraChoreographer>().phase(),
            CameraPhase::Settled
        );
    }

    #[test]
    fn intro_delay_is_measured_in_wall_clock_time() {
        let mut app = App::new();
        app.add_plugins((StatesPlugin, TimePlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(1000)))
            .insert_state(AppState::Running)
            .add_plugins(SceneControllerPlugin)
            .insert_resource(scenario_portfolio());

        // Each 1000 ms frame is clamped on the virtual clock; the cut must not wait for it.
        for _ in 0..5 {
            app.update();
            let real_elapsed = app.world().resource::<Time<Real>>().elapsed();
            if real_elapsed >= Duration::from_millis(2000) {
                break;
            }
        }

        assert!(app.world().resource::<Time<Real>>().elapsed() >= Duration::from_millis(2000));
        assert!(app.world().resource::<Time<Virtual>>().elapsed() < Duration::from_millis(2000));
        assert_eq!(
            app.world().resource::<CameraChoreographer>().phase(),
            CameraPhase::Settled
        );
    }

    #[test]
    fn teardown_before_settling_cancels_the_cut_and_drops_the_scene() {
        let mut app = mounted_scene(Some(scenario_portfolio()));
        let skills = door_entity(&app, SectionKey::Skills);
        advance(&mut app, 1000);

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Unmounted);
        advance(&mut app, 16);

        assert!(!app.world().contains_resource::<CameraChoreographer>());
        assert!(!app.world().contains_resource::<OrbitCamera>());
        assert!(!app.world().contains_resource::<SceneDoors>());
        assert_eq!(door_count(&mut app), 0);

        send_pointer(&mut app, DoorPointerEvent::Click(skills));
        for _ in 0..5 {
            advance(&mut app, 1000);
        }

        let recorded = app.world().resource::<Recorded>();
        assert!(recorded.phases.is_empty());
        assert!(recorded.selections.is_empty());
        let mut roots = app.world_mut().query::<&BuildingRoot>();
        assert_eq!(roots.iter(app.world()).count(), 0);
    }

    #[test]
    fn building_sways_gently_with_elapsed_time() {
        let mut app = mounted_scene(Some(scenario_portfolio()));
        let mut max_angle: f32 = 0.0;
        for _ in 0..40 {
            advance(&mut app, 1000);
            let elapsed = app.world().resource::<Time>().elapsed_secs();
            let mut roots = app.world_mut().query_filtered::<&Transform, With<BuildingRoot>>();
            let rotation = roots.single(app.world()).unwrap().rotation;
            let expected = Quat::from_rotation_y((elapsed * 0.1).sin() * 0.05);
            assert!(rotation.angle_between(expected) < 1e-4);
            max_angle = max_angle.max(rotation.to_euler(EulerRot::YXZ).0.abs());
        }
        assert!(max_angle <= 0.05 + 1e-4);
        assert!(max_angle > 0.04);
    }
}
