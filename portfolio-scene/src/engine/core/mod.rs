//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, scene settings
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the scene controller, presentation systems,
/// portfolio loading and the web RPC bridge.
pub mod app_setup;

/// Application state machine from loading through the mounted scene to teardown.
pub mod app_state;

/// Runtime scene tuning seeded from the `constants` crate.
pub mod scene_settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
