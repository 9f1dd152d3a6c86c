use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use constants::camera::{
    MAX_POLAR_ANGLE, MAX_ZOOM_DISTANCE, MIN_ZOOM_DISTANCE, ORBIT_ROTATE_SPEED, PIXEL_SCROLL_SCALE,
    ZOOM_STEP,
};

use super::choreographer::CameraPhaseChanged;

/// Keeps the polar angle off the pole so the up vector stays well defined.
const POLAR_EPSILON: f32 = 1e-4;

/// Limits applied to every user-driven orbit update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConstraints {
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitConstraints {
    fn default() -> Self {
        Self {
            min_distance: MIN_ZOOM_DISTANCE,
            max_distance: MAX_ZOOM_DISTANCE,
            max_polar_angle: MAX_POLAR_ANGLE,
        }
    }
}

/// Spherical camera rig around a fixed target. No pan operation; the target
/// never moves.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    radius: f32,
    azimuth: f32,
    polar: f32,
    constraints: OrbitConstraints,
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, target: Vec3, constraints: OrbitConstraints) -> Self {
        let mut orbit = Self {
            target,
            radius: constraints.min_distance,
            azimuth: 0.0,
            polar: constraints.max_polar_angle,
            constraints,
        };
        orbit.reseat(position);
        orbit
    }

    /// Jump to a new camera position, e.g. at a choreography cut.
    pub fn reseat(&mut self, position: Vec3) {
        let offset = position - self.target;
        let radius = offset.length();
        if radius > f32::EPSILON {
            self.radius = radius;
            self.polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
            self.azimuth = offset.x.atan2(offset.z);
        }
        self.enforce_constraints();
    }

    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth += delta_azimuth;
        self.polar += delta_polar;
        self.enforce_constraints();
    }

    /// Multiply the orbit distance; factors below one move closer.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.radius *= factor;
        }
        self.enforce_constraints();
    }

    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    #[cfg(test)]
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Angle between the camera offset and the up axis.
    #[cfg(test)]
    pub fn polar_angle(&self) -> f32 {
        self.polar
    }

    fn enforce_constraints(&mut self) {
        self.radius = self
            .radius
            .clamp(self.constraints.min_distance, self.constraints.max_distance);
        self.polar = self
            .polar
            .clamp(POLAR_EPSILON, self.constraints.max_polar_angle);
        self.azimuth = self.azimuth.rem_euclid(std::f32::consts::TAU);
    }
}

/// Reseats the orbit rig on each choreography cut so the camera jumps to the new shot.
pub fn reseat_orbit_on_phase_change(
    mut phase_events: EventReader<CameraPhaseChanged>,
    orbit: Option<ResMut<OrbitCamera>>,
) {
    let Some(mut orbit) = orbit else {
        phase_events.clear();
        return;
    };
    for event in phase_events.read() {
        orbit.reseat(event.position);
    }
}

/// Mouse drag and single-finger drag orbit; wheel and pinch zoom. Writes the
/// resulting pose straight to the camera transform.
pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    orbit: Option<ResMut<OrbitCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    touches: Res<Touches>,
) {
    let Some(mut orbit) = orbit else {
        mouse_motion.clear();
        scroll_events.clear();
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(
            -mouse_delta.x * ORBIT_ROTATE_SPEED,
            -mouse_delta.y * ORBIT_ROTATE_SPEED,
        );
    }

    let scroll_accum: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * PIXEL_SCROLL_SCALE,
        })
        .sum();
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(ZOOM_STEP.powf(scroll_accum));
    }

    let active: Vec<_> = touches.iter().collect();
    match active.as_slice() {
        [touch] => {
            let delta = touch.delta();
            if delta != Vec2::ZERO {
                orbit.rotate(-delta.x * ORBIT_ROTATE_SPEED, -delta.y * ORBIT_ROTATE_SPEED);
            }
        }
        [first, second] => {
            let previous = first.previous_position().distance(second.previous_position());
            let current = first.position().distance(second.position());
            if previous > f32::EPSILON && current > f32::EPSILON {
                orbit.zoom(previous / current);
            }
        }
        _ => {}
    }

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        *camera_transform =
            Transform::from_translation(orbit.position()).looking_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit_at(position: Vec3) -> OrbitCamera {
        OrbitCamera::from_position(position, Vec3::ZERO, OrbitConstraints::default())
    }

    #[test]
    fn seating_preserves_an_in_bounds_position() {
        let orbit = orbit_at(Vec3::new(0.0, 2.0, 15.0));
        assert!(orbit.position().distance(Vec3::new(0.0, 2.0, 15.0)) < 1e-4);
        assert!((orbit.distance() - 229f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped_to_distance_bounds() {
        let mut orbit = orbit_at(Vec3::new(0.0, 0.0, 10.0));
        for _ in 0..100 {
            orbit.zoom(0.5);
        }
        assert_eq!(orbit.distance(), 5.0);

        for _ in 0..100 {
            orbit.zoom(2.0);
        }
        assert_eq!(orbit.distance(), 20.0);
    }

    #[test]
    fn vertical_rotation_never_passes_the_horizon_or_the_pole() {
        let mut orbit = orbit_at(Vec3::new(0.0, 0.0, 10.0));
        orbit.rotate(0.0, 3.0);
        assert!(orbit.polar_angle() <= std::f32::consts::FRAC_PI_2);
        assert!(orbit.position().y >= -1e-4);

        orbit.rotate(0.0, -10.0);
        assert!(orbit.polar_angle() > 0.0);
        assert!(orbit.position().is_finite());
    }

    #[test]
    fn constraints_hold_after_any_input_sequence() {
        let mut orbit = orbit_at(Vec3::new(0.0, 2.0, 15.0));
        let inputs = [
            (0.3, -0.2, 0.8),
            (-1.7, 2.4, 1.9),
            (5.0, -4.0, 0.1),
            (0.0, 0.9, 7.5),
            (-0.4, -0.1, 1.0),
        ];
        for (azimuth, polar, zoom) in inputs {
            orbit.rotate(azimuth, polar);
            orbit.zoom(zoom);
            assert!((5.0..=20.0).contains(&orbit.distance()));
            assert!(orbit.polar_angle() > 0.0);
            assert!(orbit.polar_angle() <= std::f32::consts::FRAC_PI_2);
        }
    }

    #[test]
    fn out_of_bounds_seat_is_pulled_back_inside() {
        let orbit = orbit_at(Vec3::new(0.0, -5.0, 40.0));
        assert_eq!(orbit.distance(), 20.0);
        assert!(orbit.position().y >= -1e-4);
    }
}
