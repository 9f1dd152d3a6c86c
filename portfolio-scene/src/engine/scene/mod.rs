//! The mounted portfolio scene.
//!
//! The controller owns scene logic and runs headless; the building and
//! overlay modules put meshes, lights, camera and UI on top of it.

/// Building, door meshes, lighting, camera spawn and door picking registration.
///
/// Door materials swap to the highlight colour while hovered.
pub mod building;

/// Scene controller plugin: mount, door lifecycle, pointer handling, per-frame tick, teardown.
pub mod controller;

/// Native intro title card faded out when the camera settles.
pub mod intro_overlay;
