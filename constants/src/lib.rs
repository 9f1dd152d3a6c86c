//! Compile-time configuration shared by the portfolio scene.
//!
//! Layout, choreography and interaction tuning live here so the engine crate
//! only carries behaviour.

/// Camera choreography timings, camera shots and orbit bounds.
pub mod camera;

/// Door interaction tuning: hover scale, easing and picking tolerances.
pub mod interaction;

/// Asset paths relative to the Bevy asset root.
pub mod path;

/// Fixed catalogue of portfolio sections and their door layout.
pub mod sections;
