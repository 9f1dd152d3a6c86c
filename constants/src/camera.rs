use bevy::math::Vec3;

/// Delay between scene mount and the cut from the intro shot to the settled shot.
pub const INTRO_DELAY_MS: u64 = 2000;

/// Wide establishing shot used while the intro title is on screen.
pub const INTRO_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.0, 15.0);

/// Closer shot the camera cuts to once the intro finishes.
pub const SETTLED_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Point the camera orbits around and looks at.
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

pub const CAMERA_FOV_DEGREES: f32 = 75.0;

/// Orbit zoom distance bounds (world units from the target).
pub const MIN_ZOOM_DISTANCE: f32 = 5.0;
pub const MAX_ZOOM_DISTANCE: f32 = 20.0;

/// Largest angle between the camera and the up axis; keeps the camera above the horizon.
pub const MAX_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

/// Radians of orbit per pixel of pointer drag.
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;

/// Distance multiplier per scroll line; values below one zoom in on positive scroll.
pub const ZOOM_STEP: f32 = 0.95;

/// Pixel scroll events are scaled down to roughly match line scrolling.
pub const PIXEL_SCROLL_SCALE: f32 = 0.05;

/// Idle sway of the whole building around the Y axis.
pub const IDLE_ROTATION_AMPLITUDE: f32 = 0.05;
pub const IDLE_ROTATION_FREQUENCY: f32 = 0.1;
