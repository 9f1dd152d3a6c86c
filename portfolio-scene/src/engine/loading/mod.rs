//! Portfolio loading for the scene.
//!
//! Loads the portfolio document through the asset server, falls back to a
//! built-in sample when that fails, and republishes it on hot reload.

/// Portfolio asset loading, fallback and reload systems.
pub mod portfolio_loader;

/// Built-in demonstration portfolio.
pub mod sample_portfolio;
