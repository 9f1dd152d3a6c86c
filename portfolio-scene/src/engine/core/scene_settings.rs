use std::time::Duration;

use bevy::prelude::*;
use constants::camera::{
    CAMERA_TARGET, IDLE_ROTATION_AMPLITUDE, IDLE_ROTATION_FREQUENCY, INTRO_CAMERA_POSITION,
    INTRO_DELAY_MS, SETTLED_CAMERA_POSITION,
};

use crate::engine::camera::orbit_camera::OrbitConstraints;

/// Scene tuning read by the controller at mount time. Defaults come from the
/// `constants` crate; tests and hosts may insert their own before mounting.
#[derive(Resource, Debug, Clone)]
pub struct SceneSettings {
    pub intro_delay: Duration,
    pub intro_camera_position: Vec3,
    pub settled_camera_position: Vec3,
    pub camera_target: Vec3,
    pub orbit: OrbitConstraints,
    pub idle_rotation_amplitude: f32,
    pub idle_rotation_frequency: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            intro_delay: Duration::from_millis(INTRO_DELAY_MS),
            intro_camera_position: INTRO_CAMERA_POSITION,
            settled_camera_position: SETTLED_CAMERA_POSITION,
            camera_target: CAMERA_TARGET,
            orbit: OrbitConstraints::default(),
            idle_rotation_amplitude: IDLE_ROTATION_AMPLITUDE,
            idle_rotation_frequency: IDLE_ROTATION_FREQUENCY,
        }
    }
}
