use bevy::prelude::*;
use bevy::ui::ComputedNode;
use constants::camera::{CAMERA_FOV_DEGREES, CAMERA_TARGET, INTRO_CAMERA_POSITION};
use constants::interaction::{
    DOOR_HANDLE_OFFSET, DOOR_HANDLE_RADIUS, DOOR_LABEL_FONT_SIZE, DOOR_LABEL_OFFSET, DOOR_SIZE,
    HOVER_HIGHLIGHT_COLOUR,
};

use super::controller::{BuildingRoot, SceneSet, sync_doors_with_portfolio};
use crate::engine::camera::orbit_camera::orbit_camera_controller;
use crate::engine::core::app_state::AppState;
use crate::interaction::door::{Door, DoorInteraction, DoorPanel, DoorPointerEvent};
use crate::interaction::picking::{DoorPickingState, pick_doors};

const WALL_COLOUR: Color = Color::srgb(0.102, 0.102, 0.102);
const FLOOR_COLOUR: Color = Color::srgb(0.165, 0.165, 0.165);
const HANDLE_COLOUR: Color = Color::srgb(1.0, 0.843, 0.0);

/// Shared meshes and materials for door visuals.
#[derive(Resource)]
pub struct DoorVisualAssets {
    door_mesh: Handle<Mesh>,
    handle_mesh: Handle<Mesh>,
    handle_material: Handle<StandardMaterial>,
    highlight_material: Handle<StandardMaterial>,
}

/// Material pair a door panel switches between on hover.
#[derive(Component)]
pub struct DoorMaterials {
    base: Handle<StandardMaterial>,
    highlight: Handle<StandardMaterial>,
}

/// Screen-space section name following a door.
#[derive(Component)]
pub struct DoorLabel {
    door: Entity,
}

/// Meshes, materials, lights, camera and picking for the mounted scene.
pub struct ScenePresentationPlugin;

impl Plugin for ScenePresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DoorPickingState>()
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (setup_door_visual_assets, spawn_lighting, spawn_camera))
            .add_systems(
                Update,
                (attach_building_visuals, attach_door_visuals, attach_panel_visuals)
                    .in_set(SceneSet::Doors)
                    .after(sync_doors_with_portfolio),
            )
            .add_systems(Update, pick_doors.in_set(SceneSet::Picking))
            .add_systems(
                Update,
                (
                    update_door_highlight,
                    orbit_camera_controller,
                    position_door_labels.after(orbit_camera_controller),
                )
                    .after(SceneSet::Tick)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                OnExit(AppState::Running),
                (reset_picking, despawn_door_labels),
            );
    }
}

fn setup_door_visual_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(DoorVisualAssets {
        door_mesh: meshes.add(Cuboid::new(DOOR_SIZE.x, DOOR_SIZE.y, DOOR_SIZE.z)),
        handle_mesh: meshes.add(Sphere::new(DOOR_HANDLE_RADIUS)),
        handle_material: materials.add(StandardMaterial {
            base_color: HANDLE_COLOUR,
            metallic: 0.9,
            perceptual_roughness: 0.1,
            ..default()
        }),
        highlight_material: materials.add(door_material(HOVER_HIGHLIGHT_COLOUR)),
    });
}

fn door_material(colour: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: colour,
        perceptual_roughness: 0.7,
        metallic: 0.1,
        ..default()
    }
}

fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        brightness: 250.0,
        ..default()
    });
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 50.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0),
    ));
    commands.spawn((
        SpotLight {
            intensity: 2_000_000.0,
            outer_angle: 0.3,
            inner_angle: 0.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(INTRO_CAMERA_POSITION).looking_at(CAMERA_TARGET, Vec3::Y),
    ));
}

/// Floor and back wall, parented to the building so they sway with the doors.
fn attach_building_visuals(
    mut commands: Commands,
    roots: Query<Entity, Added<BuildingRoot>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for root in &roots {
        commands.entity(root).with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Plane3d::default().mesh().size(15.0, 10.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: FLOOR_COLOUR,
                    perceptual_roughness: 0.8,
                    ..default()
                })),
                Transform::from_xyz(0.0, -4.0, -1.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(10.0, 8.0, 0.5))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: WALL_COLOUR,
                    perceptual_roughness: 0.7,
                    ..default()
                })),
                Transform::from_xyz(0.0, 0.0, -2.0),
            ));
        });
    }
}

/// Handle and label for each new door. The handle sits on the door itself so
/// it keeps its size while the panel grows.
fn attach_door_visuals(
    mut commands: Commands,
    doors: Query<(Entity, &Door), Added<Door>>,
    visuals: Option<Res<DoorVisualAssets>>,
) {
    let Some(visuals) = visuals else {
        return;
    };

    for (entity, door) in &doors {
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                Mesh3d(visuals.handle_mesh.clone()),
                MeshMaterial3d(visuals.handle_material.clone()),
                Transform::from_translation(DOOR_HANDLE_OFFSET),
            ));
        });

        commands.spawn((
            Name::new(format!("Door label: {}", door.spec.label)),
            DoorLabel { door: entity },
            Text::new(door.spec.label),
            TextFont {
                font_size: DOOR_LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            // Shown once it has been placed over its door.
            Visibility::Hidden,
        ));
    }
}

fn attach_panel_visuals(
    mut commands: Commands,
    panels: Query<(Entity, &ChildOf), Added<DoorPanel>>,
    doors: Query<&Door>,
    visuals: Option<Res<DoorVisualAssets>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(visuals) = visuals else {
        return;
    };

    for (entity, child_of) in &panels {
        let Ok(door) = doors.get(child_of.parent()) else {
            continue;
        };
        let base = materials.add(door_material(door.spec.colour));
        commands.entity(entity).insert((
            Mesh3d(visuals.door_mesh.clone()),
            MeshMaterial3d(base.clone()),
            DoorMaterials {
                base,
                highlight: visuals.highlight_material.clone(),
            },
        ));
    }
}

/// Swaps panel material on hover. The colour snaps; only scale is eased.
fn update_door_highlight(
    doors: Query<&DoorInteraction>,
    mut panels: Query<(
        &ChildOf,
        &DoorMaterials,
        &mut MeshMaterial3d<StandardMaterial>,
    )>,
) {
    for (child_of, door_materials, mut material) in &mut panels {
        let Ok(interaction) = doors.get(child_of.parent()) else {
            continue;
        };
        let wanted = if interaction.hovered() {
            &door_materials.highlight
        } else {
            &door_materials.base
        };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

/// Keeps each label centred over the front of its door. Labels whose door was
/// removed go with it; labels behind the camera are hidden.
fn position_door_labels(
    mut commands: Commands,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    doors: Query<&GlobalTransform, With<Door>>,
    mut labels: Query<(Entity, &DoorLabel, &ComputedNode, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, cam_xf)) = cameras.single() else {
        return;
    };

    for (entity, label, computed, mut node, mut visibility) in &mut labels {
        let Ok(door_xf) = doors.get(label.door) else {
            commands.entity(entity).despawn();
            continue;
        };

        let anchor = door_xf.transform_point(DOOR_LABEL_OFFSET);
        match camera.world_to_viewport(cam_xf, anchor) {
            Ok(point) => {
                let size = computed.size() * computed.inverse_scale_factor();
                let top_left = label_top_left(point, size);
                node.left = Val::Px(top_left.x);
                node.top = Val::Px(top_left.y);
                *visibility = Visibility::Inherited;
            }
            Err(_) => *visibility = Visibility::Hidden,
        }
    }
}

/// Top-left corner that centres a label of `size` on `anchor`.
fn label_top_left(anchor: Vec2, size: Vec2) -> Vec2 {
    anchor - size * 0.5
}

fn despawn_door_labels(mut commands: Commands, labels: Query<Entity, With<DoorLabel>>) {
    for entity in &labels {
        commands.entity(entity).despawn();
    }
}

fn reset_picking(
    mut picking: ResMut<DoorPickingState>,
    mut pointer_events: ResMut<Events<DoorPointerEvent>>,
) {
    *picking = DoorPickingState::default();
    pointer_events.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_centred_on_its_anchor() {
        let top_left = label_top_left(Vec2::new(400.0, 300.0), Vec2::new(80.0, 20.0));
        assert_eq!(top_left, Vec2::new(360.0, 290.0));
    }

    #[test]
    fn unmeasured_label_sits_on_the_anchor() {
        let anchor = Vec2::new(12.0, 34.0);
        assert_eq!(label_top_left(anchor, Vec2::ZERO), anchor);
    }
}
