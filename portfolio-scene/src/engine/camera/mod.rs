//! Scene camera: the scripted opening shot and the user-driven orbit.
//!
//! The choreographer decides where the camera should be during the intro and
//! after it settles; the orbit rig takes over from each of those positions and
//! applies the zoom and angle limits to user input.

/// Timed Intro → Settled camera schedule with cancellation.
pub mod choreographer;

/// Orbit rig around the building with clamped distance and polar angle.
pub mod orbit_camera;
