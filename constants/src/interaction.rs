use bevy::color::Color;
use bevy::math::Vec3;

/// Door scale while hovered.
pub const HOVER_SCALE: f32 = 1.1;

/// Door scale at rest.
pub const REST_SCALE: f32 = 1.0;

/// Fraction of the remaining distance covered each frame when easing door scale.
pub const HOVER_EASING_FACTOR: f32 = 0.1;

/// Door colour while hovered (#a0522d). Applied instantly, not eased.
pub const HOVER_HIGHLIGHT_COLOUR: Color = Color::srgb(0.627, 0.322, 0.176);

/// Door panel extents, also used as the picking bounding box.
pub const DOOR_SIZE: Vec3 = Vec3::new(1.5, 2.5, 0.2);

/// Door handle placement and radius relative to the door centre.
pub const DOOR_HANDLE_OFFSET: Vec3 = Vec3::new(0.5, 0.0, 0.15);
pub const DOOR_HANDLE_RADIUS: f32 = 0.08;

/// Maximum pointer travel in pixels between press and release for a click.
/// Anything further is treated as an orbit drag.
pub const CLICK_DRAG_TOLERANCE: f32 = 6.0;

/// Section label anchor relative to the door centre, just in front of the panel.
pub const DOOR_LABEL_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.15);
pub const DOOR_LABEL_FONT_SIZE: f32 = 18.0;
