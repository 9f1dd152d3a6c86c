use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::interaction::{CLICK_DRAG_TOLERANCE, DOOR_SIZE};

use super::door::{Door, DoorPanel, DoorPointerEvent};
use super::ray::ray_hits_obb;

/// Where a press started and which door, if any, was under it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub position: Vec2,
    pub door: Option<Entity>,
}

/// Hover and press bookkeeping for the mouse pointer.
#[derive(Resource, Default)]
pub struct DoorPickingState {
    hovered: Option<Entity>,
    press: Option<PointerPress>,
}

/// Raycasts the cursor against door panels and turns the result into
/// enter/leave/click events. Releases that travelled further than the drag
/// tolerance belong to the orbit camera and never click.
pub fn pick_doors(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    panels: Query<(&ChildOf, &GlobalTransform), With<DoorPanel>>,
    doors: Query<(), With<Door>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut picking: ResMut<DoorPickingState>,
    mut pointer_events: EventWriter<DoorPointerEvent>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((cam_xf, camera)) = cameras.single() else {
        return;
    };

    let door_under = |point: Vec2| -> Option<Entity> {
        let ray = camera.viewport_to_world(cam_xf, point).ok()?;
        closest_door_hit(ray.origin, ray.direction.as_vec3(), &panels)
    };

    let cursor = window.cursor_position();
    let hit = cursor.and_then(door_under);

    let (hovered, hover_events) =
        hover_transition(picking.hovered, hit, |door| doors.contains(door));
    picking.hovered = hovered;
    pointer_events.write_batch(hover_events);

    if mouse_button.just_pressed(MouseButton::Left) {
        picking.press = cursor.map(|position| PointerPress {
            position,
            door: hit,
        });
    }

    if mouse_button.just_released(MouseButton::Left) {
        let press = picking.press.take();
        if let Some(click) = release_click(press, cursor, hit) {
            pointer_events.write(click);
        }
    }

    for touch in touches.iter_just_released() {
        let press = PointerPress {
            position: touch.start_position(),
            door: door_under(touch.start_position()),
        };
        let release = touch.position();
        if let Some(click) = release_click(Some(press), Some(release), door_under(release)) {
            pointer_events.write(click);
        }
    }
}

/// Hover change for one frame. Moving between doors leaves the old one before
/// entering the new one. A previously hovered door that no longer exists is
/// forgotten without a leave event.
pub fn hover_transition(
    previous: Option<Entity>,
    hit: Option<Entity>,
    is_live: impl Fn(Entity) -> bool,
) -> (Option<Entity>, Vec<DoorPointerEvent>) {
    let previous = previous.filter(|door| is_live(*door));
    let mut events = Vec::new();
    if hit == previous {
        return (hit, events);
    }

    if let Some(left) = previous {
        events.push(DoorPointerEvent::Leave(left));
    }
    if let Some(entered) = hit {
        events.push(DoorPointerEvent::Enter(entered));
    }
    (hit, events)
}

/// Click produced by a release, if any: press and release must both be over
/// the same door and no further apart than the drag tolerance.
pub fn release_click(
    press: Option<PointerPress>,
    release: Option<Vec2>,
    hit: Option<Entity>,
) -> Option<DoorPointerEvent> {
    let press = press?;
    let release = release?;
    let door = hit?;
    if press.door != Some(door) || !is_click(press.position, release) {
        return None;
    }
    Some(DoorPointerEvent::Click(door))
}

/// Nearest door whose panel the ray passes through.
fn closest_door_hit(
    origin: Vec3,
    dir: Vec3,
    panels: &Query<(&ChildOf, &GlobalTransform), With<DoorPanel>>,
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for (child_of, xf) in panels.iter() {
        let Some(t) = ray_hits_obb(origin, dir, xf, DOOR_SIZE) else {
            continue;
        };
        if t > 0.0 && best.is_none_or(|(_, best_t)| t < best_t) {
            best = Some((child_of.parent(), t));
        }
    }
    best.map(|(door, _)| door)
}

fn is_click(press: Vec2, release: Vec2) -> bool {
    press.distance(release) <= CLICK_DRAG_TOLERANCE
}
